use std::cmp::Ordering;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::Product;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogServiceError {
    #[error("No products loaded. Please enter products first.")]
    NoData,
}

/// Cheapest and most expensive products by unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceExtremes {
    pub cheapest: Product,
    pub most_expensive: Product,
}

/// Single pass over `products`. Ties keep the earliest product.
pub fn find_price_extremes(products: &[Product]) -> Option<PriceExtremes> {
    let (first, rest) = products.split_first()?;
    let mut cheapest = first;
    let mut most_expensive = first;

    for product in rest {
        if product.unit_price() < cheapest.unit_price() {
            cheapest = product;
        }
        if product.unit_price() > most_expensive.unit_price() {
            most_expensive = product;
        }
    }

    Some(PriceExtremes {
        cheapest: cheapest.clone(),
        most_expensive: most_expensive.clone(),
    })
}

pub fn compare_by_unit_price(a: &Product, b: &Product) -> Ordering {
    a.unit_price()
        .partial_cmp(&b.unit_price())
        .unwrap_or(Ordering::Equal)
}

pub fn compare_by_quantity(a: &Product, b: &Product) -> Ordering {
    a.quantity().cmp(&b.quantity())
}

/// The products entered during one session. Replaced wholesale on re-entry, otherwise
/// only read or reordered.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn replace(&mut self, products: Vec<Product>) {
        info!(
            "Replacing catalog of {} products with {} products",
            self.products.len(),
            products.len()
        );
        self.products = products;
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> Result<&[Product], CatalogServiceError> {
        if self.products.is_empty() {
            return Err(CatalogServiceError::NoData);
        }
        Ok(&self.products)
    }

    pub fn price_extremes(&self) -> Result<PriceExtremes, CatalogServiceError> {
        let extremes =
            find_price_extremes(&self.products).ok_or(CatalogServiceError::NoData)?;
        debug!(
            "Cheapest: '{}' ({:.2}), most expensive: '{}' ({:.2})",
            extremes.cheapest.name(),
            extremes.cheapest.unit_price(),
            extremes.most_expensive.name(),
            extremes.most_expensive.unit_price()
        );
        Ok(extremes)
    }

    pub fn sort_by_unit_price(&mut self) -> Result<(), CatalogServiceError> {
        self.ensure_loaded()?;
        self.products.sort_by(compare_by_unit_price);
        info!("Sorted {} products by unit price", self.products.len());
        Ok(())
    }

    pub fn sort_by_quantity(&mut self) -> Result<(), CatalogServiceError> {
        self.ensure_loaded()?;
        self.products.sort_by(compare_by_quantity);
        info!("Sorted {} products by quantity", self.products.len());
        Ok(())
    }

    fn ensure_loaded(&self) -> Result<(), CatalogServiceError> {
        if self.products.is_empty() {
            return Err(CatalogServiceError::NoData);
        }
        Ok(())
    }
}
