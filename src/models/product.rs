use validator::Validate;

use super::{ensure_finite, positive_zero, validate_not_blank, Currency, ModelError};

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    name: String,
    cost: Currency,
    quantity: u32,
    manufacturer: String,
    weight: f64,
}

// request dto
#[derive(Debug, Clone, Validate)]
pub struct StoreProductRequest {
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    pub cost: Currency,

    #[validate(range(min = 0, message = "Quantity must be >= 0"))]
    pub quantity: i32,

    #[validate(custom = "validate_not_blank")]
    pub manufacturer: String,

    #[validate(range(min = 0.0, message = "Weight must be >= 0"))]
    pub weight: f64,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        cost: Currency,
        quantity: i32,
        manufacturer: impl Into<String>,
        weight: f64,
    ) -> Result<Self, ModelError> {
        Self::store(StoreProductRequest {
            name: name.into(),
            cost,
            quantity,
            manufacturer: manufacturer.into(),
            weight,
        })
    }

    pub fn store(request: StoreProductRequest) -> Result<Self, ModelError> {
        ensure_finite("weight", request.weight)?;
        request.validate()?;

        let quantity = u32::try_from(request.quantity)
            .map_err(|_| ModelError::invalid("quantity", "Quantity must be >= 0"))?;

        Ok(Self {
            name: request.name.trim().to_string(),
            cost: request.cost,
            quantity,
            manufacturer: request.manufacturer.trim().to_string(),
            weight: positive_zero(request.weight),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> &Currency {
        &self.cost
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    /// Weight of a single unit.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn unit_price(&self) -> f64 {
        self.cost.to_reference_unit_price()
    }

    pub fn total_price(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity)
    }

    pub fn total_weight(&self) -> f64 {
        self.weight * f64::from(self.quantity)
    }
}
