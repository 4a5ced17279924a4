pub mod currency;
pub mod product;

pub use currency::*;
pub use product::*;

use validator::{ValidationError, ValidationErrors};

// custom error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },
}

impl ModelError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ModelError::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            ModelError::InvalidArgument { field, .. } => field,
        }
    }
}

/// Reports the alphabetically-first failing field so the result does not depend on
/// hash map iteration order.
impl From<ValidationErrors> for ModelError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        match fields.first() {
            Some((field, field_errors)) => {
                let message = field_errors
                    .first()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .unwrap_or_else(|| "invalid value".to_string());
                ModelError::invalid(field, message)
            }
            None => ModelError::invalid("unknown", errors.to_string()),
        }
    }
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}

pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<(), ModelError> {
    if !value.is_finite() {
        return Err(ModelError::invalid(field, "must be a finite number"));
    }
    Ok(())
}

/// `-0.0` passes every `>= 0` rule but prints as `-0.00`.
pub(crate) fn positive_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
