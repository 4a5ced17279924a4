use std::env;

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub environment: String,
    pub reference_currency: String,
    pub input_max_attempts: Option<u32>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input_max_attempts = match lookup("INPUT_MAX_ATTEMPTS") {
            Some(raw) => Some(raw.trim().parse::<u32>().map_err(|_| {
                anyhow::anyhow!("INPUT_MAX_ATTEMPTS must be a positive integer, got '{}'", raw)
            })?),
            None => None,
        };

        let config = Config {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
            environment: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            reference_currency: lookup("REFERENCE_CURRENCY")
                .map(|c| c.trim().to_string())
                .unwrap_or_else(|| "UAH".to_string()),
            input_max_attempts,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.log_level.trim().is_empty() {
            return Err(anyhow::anyhow!("LOG_LEVEL must not be empty"));
        }

        if let Err(e) = EnvFilter::try_new(&self.log_level) {
            return Err(anyhow::anyhow!(
                "LOG_LEVEL '{}' is not a valid log filter: {}",
                self.log_level,
                e
            ));
        }

        if self.reference_currency.is_empty() {
            return Err(anyhow::anyhow!("REFERENCE_CURRENCY must not be empty"));
        }

        if self.input_max_attempts == Some(0) {
            return Err(anyhow::anyhow!("INPUT_MAX_ATTEMPTS must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.environment, "development");
        assert_eq!(config.reference_currency, "UAH");
        assert_eq!(config.input_max_attempts, None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("LOG_LEVEL", "debug"),
            ("APP_ENV", "production"),
            ("REFERENCE_CURRENCY", " EUR "),
            ("INPUT_MAX_ATTEMPTS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.environment, "production");
        assert_eq!(config.reference_currency, "EUR");
        assert_eq!(config.input_max_attempts, Some(5));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("INPUT_MAX_ATTEMPTS", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("INPUT_MAX_ATTEMPTS", "many")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("REFERENCE_CURRENCY", "  ")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("LOG_LEVEL", "")])).is_err());
    }

    #[test]
    fn test_unparsable_log_filter_rejected() {
        let err = Config::from_lookup(lookup_from(&[("LOG_LEVEL", "product_catalog=loud")]))
            .unwrap_err();
        assert!(err.to_string().contains("LOG_LEVEL"));

        let config =
            Config::from_lookup(lookup_from(&[("LOG_LEVEL", "info,product_catalog_cli=trace")]))
                .unwrap();
        assert_eq!(config.log_level, "info,product_catalog_cli=trace");
    }
}
