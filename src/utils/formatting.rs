use serde::Serialize;
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::Product;

pub const SEPARATOR_WIDTH: usize = 40;

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Total Price")]
    total_price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Manufacturer")]
    manufacturer: String,
    #[tabled(rename = "Unit Weight")]
    unit_weight: String,
    #[tabled(rename = "Total Weight")]
    total_weight: String,
}

/// JSON shape of a product, with the derived prices and weights spelled out.
#[derive(Debug, Serialize)]
pub struct ProductSummary<'a> {
    pub name: &'a str,
    pub currency: &'a str,
    pub amount: Option<f64>,
    pub exchange_rate: f64,
    pub reference_currency: &'a str,
    pub unit_price: f64,
    pub total_price: f64,
    pub quantity: u32,
    pub manufacturer: &'a str,
    pub unit_weight: f64,
    pub total_weight: f64,
}

impl<'a> ProductSummary<'a> {
    pub fn new(product: &'a Product, reference_currency: &'a str) -> Self {
        Self {
            name: product.name(),
            currency: product.cost().name(),
            amount: product.cost().amount(),
            exchange_rate: product.cost().exchange_rate(),
            reference_currency,
            unit_price: product.unit_price(),
            total_price: product.total_price(),
            quantity: product.quantity(),
            manufacturer: product.manufacturer(),
            unit_weight: product.weight(),
            total_weight: product.total_weight(),
        }
    }
}

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

pub fn format_product_detail(product: &Product, reference_currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Name: {}\n", product.name()));
    output.push_str(&format!(
        "Unit Price ({}): {:.2}\n",
        reference_currency,
        product.unit_price()
    ));
    output.push_str(&format!(
        "Total Price ({}): {:.2}\n",
        reference_currency,
        product.total_price()
    ));
    output.push_str(&format!("Quantity: {}\n", product.quantity()));
    output.push_str(&format!("Manufacturer: {}\n", product.manufacturer()));
    output.push_str(&format!("Unit Weight (kg): {:.2}\n", product.weight()));
    output.push_str(&format!("Total Weight (kg): {:.2}\n", product.total_weight()));
    output.push_str(&separator());
    output.push('\n');

    output
}

pub fn format_product_table(products: &[Product]) -> String {
    if products.is_empty() {
        return String::new();
    }

    let rows: Vec<ProductTableRow> = products
        .iter()
        .enumerate()
        .map(|(i, product)| ProductTableRow {
            position: i + 1,
            name: product.name().to_string(),
            currency: product.cost().name().to_string(),
            unit_price: format!("{:.2}", product.unit_price()),
            total_price: format!("{:.2}", product.total_price()),
            quantity: product.quantity(),
            manufacturer: product.manufacturer().to_string(),
            unit_weight: format!("{:.2}", product.weight()),
            total_weight: format!("{:.2}", product.total_weight()),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_products_json(
    products: &[Product],
    reference_currency: &str,
) -> serde_json::Result<String> {
    let summaries: Vec<ProductSummary<'_>> = products
        .iter()
        .map(|p| ProductSummary::new(p, reference_currency))
        .collect();
    serde_json::to_string_pretty(&summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Currency;

    fn laptop() -> Product {
        let cost = Currency::new("USD", Some(2.5), 40.0).unwrap();
        Product::new("Laptop", cost, 3, "Lenovo", 1.8).unwrap()
    }

    #[test]
    fn test_detail_layout() {
        let expected = format!(
            "Name: Laptop\n\
             Unit Price (UAH): 100.00\n\
             Total Price (UAH): 300.00\n\
             Quantity: 3\n\
             Manufacturer: Lenovo\n\
             Unit Weight (kg): 1.80\n\
             Total Weight (kg): 5.40\n\
             {}\n",
            "-".repeat(40)
        );
        assert_eq!(format_product_detail(&laptop(), "UAH"), expected);
    }

    #[test]
    fn test_negative_zero_prints_as_zero() {
        let cost = Currency::new("USD", Some(-0.0), 40.0).unwrap();
        let product = Product::new("Sample", cost, 2, "Acme", -0.0).unwrap();
        let detail = format_product_detail(&product, "UAH");
        assert!(detail.contains("Unit Price (UAH): 0.00\n"));
        assert!(detail.contains("Total Price (UAH): 0.00\n"));
        assert!(detail.contains("Unit Weight (kg): 0.00\n"));
        assert!(detail.contains("Total Weight (kg): 0.00\n"));
        assert!(!detail.contains("-0.00"));
    }

    #[test]
    fn test_table_contains_rows() {
        let table = format_product_table(&[laptop()]);
        assert!(table.contains("Laptop"));
        assert!(table.contains("100.00"));
        assert!(table.contains("Manufacturer"));
        assert!(format_product_table(&[]).is_empty());
    }

    #[test]
    fn test_json_includes_derived_values() {
        let json = format_products_json(&[laptop()], "UAH").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value[0];
        assert_eq!(first["name"], "Laptop");
        assert_eq!(first["currency"], "USD");
        assert_eq!(first["reference_currency"], "UAH");
        assert_eq!(first["unit_price"], 100.0);
        assert_eq!(first["total_price"], 300.0);
        assert_eq!(first["quantity"], 3);
    }
}
