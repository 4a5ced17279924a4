use validator::Validate;

use super::{ensure_finite, positive_zero, validate_not_blank, ModelError};

/// An amount of money in a named foreign currency together with the rate that converts
/// one unit of it into the reference currency.
#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    name: String,
    amount: Option<f64>,
    exchange_rate: f64,
}

// request dto
#[derive(Debug, Clone, Validate)]
pub struct StoreCurrencyRequest {
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[validate(range(min = 0.0, message = "Amount must be >= 0"))]
    pub amount: Option<f64>,

    pub exchange_rate: f64,
}

impl Currency {
    pub fn new(
        name: impl Into<String>,
        amount: Option<f64>,
        exchange_rate: f64,
    ) -> Result<Self, ModelError> {
        Self::store(StoreCurrencyRequest {
            name: name.into(),
            amount,
            exchange_rate,
        })
    }

    pub fn store(request: StoreCurrencyRequest) -> Result<Self, ModelError> {
        if let Some(amount) = request.amount {
            ensure_finite("amount", amount)?;
        }
        ensure_finite("exchange_rate", request.exchange_rate)?;

        request.validate()?;

        if request.exchange_rate <= 0.0 {
            return Err(ModelError::invalid(
                "exchange_rate",
                "Exchange rate must be > 0",
            ));
        }

        Ok(Self {
            name: request.name.trim().to_string(),
            amount: request.amount.map(positive_zero),
            exchange_rate: request.exchange_rate,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Option<f64> {
        self.amount
    }

    pub fn exchange_rate(&self) -> f64 {
        self.exchange_rate
    }

    /// Price of one product unit in the reference currency. Without an amount the rate
    /// itself is the unit price.
    pub fn to_reference_unit_price(&self) -> f64 {
        match self.amount {
            Some(amount) => amount * self.exchange_rate,
            None => self.exchange_rate,
        }
    }
}
