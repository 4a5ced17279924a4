use anyhow::{Context, Result};
use console::{style, Emoji};
use tracing::{debug, error, info, warn};

use crate::{
    cli::{
        args::ListingFormat,
        input::InputReader,
        menu::{render_menu, MenuChoice},
        prompt::{PromptError, Prompter},
    },
    models::{Currency, ModelError, Product},
    services::{Catalog, CatalogServiceError},
    utils::formatting::{format_product_detail, format_product_table, format_products_json},
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "+ ");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "x ");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "! ");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "i ");

#[derive(Debug, Clone)]
pub struct ShellSettings {
    pub reference_currency: String,
    pub listing_format: ListingFormat,
    /// `None` asks again forever.
    pub max_attempts: Option<u32>,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            reference_currency: "UAH".to_string(),
            listing_format: ListingFormat::default(),
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct CliApp<P: Prompter> {
    prompter: P,
    settings: ShellSettings,
}

impl<P: Prompter> CliApp<P> {
    pub fn new(prompter: P, settings: ShellSettings) -> Self {
        Self { prompter, settings }
    }

    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Runs the menu until the user exits or input ends, and hands back the last catalog.
    pub fn run(&mut self) -> Result<Catalog> {
        let mut catalog = Catalog::default();

        loop {
            self.prompter.clear_screen()?;
            self.say(render_menu())?;

            let selection = match self.prompter.read_line("Select an option") {
                Ok(selection) => selection,
                Err(PromptError::EndOfInput) => {
                    info!("Input ended, leaving the menu");
                    break;
                }
                Err(e) => return Err(e).context("Failed to read menu selection"),
            };

            match self.handle_menu_choice(&selection, &mut catalog) {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(e) if is_end_of_input(&e) => {
                    info!("Input ended during an action, leaving the menu");
                    break;
                }
                Err(e) => return Err(e),
            }

            match self.prompter.pause() {
                Ok(()) => {}
                Err(PromptError::EndOfInput) => break,
                Err(e) => return Err(e).context("Failed to wait for a key press"),
            }
        }

        info!("Session finished with {} products", catalog.len());
        Ok(catalog)
    }

    fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        self.prompter
            .output(text.as_ref())
            .context("Failed to write output")
    }

    fn handle_menu_choice(&mut self, selection: &str, catalog: &mut Catalog) -> Result<Flow> {
        let Some(choice) = MenuChoice::parse(selection) else {
            debug!("Unrecognized menu selection: {:?}", selection);
            self.say(style("Invalid selection. Try again.").red().to_string())?;
            return Ok(Flow::Continue);
        };

        debug!("Menu selection: {:?}", choice);
        match choice {
            MenuChoice::EnterProducts => self.handle_enter_products(catalog)?,
            MenuChoice::ShowProducts => self.handle_show_products(catalog)?,
            MenuChoice::ShowPriceExtremes => self.handle_price_extremes(catalog)?,
            MenuChoice::SortByUnitPrice => {
                let result = catalog.sort_by_unit_price();
                self.report_sort(result, "Products sorted by unit price.")?;
            }
            MenuChoice::SortByQuantity => {
                let result = catalog.sort_by_quantity();
                self.report_sort(result, "Products sorted by quantity.")?;
            }
            MenuChoice::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    fn handle_enter_products(&mut self, catalog: &mut Catalog) -> Result<()> {
        match self.read_products() {
            Ok(products) => {
                let count = products.len();
                catalog.replace(products);
                self.say(format!("{}{} products saved.", CHECKMARK, count))?;
            }
            Err(e) => match e.downcast_ref::<PromptError>() {
                Some(PromptError::AttemptsExhausted { prompt, attempts }) => {
                    warn!("Product entry cancelled at '{}' after {} attempts", prompt, attempts);
                    let message = format!(
                        "{}Product entry cancelled: no valid {} after {} attempts. The previous list is kept.",
                        CROSS,
                        style(prompt).yellow(),
                        attempts
                    );
                    self.say(message)?;
                }
                Some(_) => return Err(e),
                None => match e.downcast_ref::<ModelError>() {
                    Some(model_error) => {
                        error!("Failed to create product: {}", model_error);
                        let message = format!(
                            "{}Failed to create product: {}",
                            CROSS,
                            style(model_error).red()
                        );
                        self.say(message)?;
                    }
                    None => return Err(e),
                },
            },
        }

        Ok(())
    }

    fn read_products(&mut self) -> Result<Vec<Product>> {
        let unit_label = format!(
            "Exchange rate ({} per unit)",
            self.settings.reference_currency
        );
        let mut reader = InputReader::new(&mut self.prompter, self.settings.max_attempts);

        let count = reader.read_int("Enter number of products", 1)?;
        let mut products = Vec::new();

        for i in 0..count {
            reader.output(&style(format!("--- Product #{} ---", i + 1)).bold().to_string())?;

            let name = reader.read_non_empty("Name")?;
            let currency_name = reader.read_non_empty("Currency name")?;
            let amount = reader.read_number_at_least("Price (in that currency)", 0.0)?;
            let rate = reader.read_number_above(&unit_label, 0.0)?;
            let quantity = reader.read_int("Quantity", 0)?;
            let manufacturer = reader.read_non_empty("Manufacturer")?;
            let weight = reader.read_number_at_least("Weight (kg)", 0.0)?;

            let cost = Currency::new(currency_name, Some(amount), rate)?;
            let product = Product::new(name, cost, quantity, manufacturer, weight)?;
            debug!("Read product '{}' ({:.2})", product.name(), product.unit_price());
            products.push(product);
        }

        Ok(products)
    }

    fn handle_show_products(&mut self, catalog: &Catalog) -> Result<()> {
        let products = match catalog.products() {
            Ok(products) => products,
            Err(e) => return self.report_no_data(&e),
        };

        let currency = self.settings.reference_currency.clone();
        match self.settings.listing_format {
            ListingFormat::Records => {
                self.say(style("=== Products List ===").bold().cyan().to_string())?;
                for product in products {
                    self.say(record(product, &currency))?;
                }
            }
            ListingFormat::Table => {
                let header = format!(
                    "{}{}",
                    INFO,
                    style(format!("{} products, prices in {}", products.len(), currency)).bold()
                );
                self.say(header)?;
                self.say(format_product_table(products))?;
            }
            ListingFormat::Json => {
                let json = format_products_json(products, &currency)
                    .context("Failed to serialize products")?;
                self.say(json)?;
            }
        }

        Ok(())
    }

    fn handle_price_extremes(&mut self, catalog: &Catalog) -> Result<()> {
        let extremes = match catalog.price_extremes() {
            Ok(extremes) => extremes,
            Err(e) => return self.report_no_data(&e),
        };

        let currency = self.settings.reference_currency.clone();
        self.say(style("--- Cheapest Product ---").green().bold().to_string())?;
        self.say(record(&extremes.cheapest, &currency))?;
        self.say(style("--- Most Expensive Product ---").red().bold().to_string())?;
        self.say(record(&extremes.most_expensive, &currency))?;
        Ok(())
    }

    fn report_sort(&mut self, result: Result<(), CatalogServiceError>, message: &str) -> Result<()> {
        match result {
            Ok(()) => self.say(format!("{}{}", CHECKMARK, message)),
            Err(e) => self.report_no_data(&e),
        }
    }

    fn report_no_data(&mut self, e: &CatalogServiceError) -> Result<()> {
        warn!("Action skipped: {}", e);
        self.say(format!("{}{}", WARNING, style(e).red()))
    }
}

/// The record block without its final line break; `output` adds one.
fn record(product: &Product, reference_currency: &str) -> String {
    format_product_detail(product, reference_currency)
        .trim_end_matches('\n')
        .to_string()
}

fn is_end_of_input(e: &anyhow::Error) -> bool {
    matches!(e.downcast_ref::<PromptError>(), Some(PromptError::EndOfInput))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompt::LinePrompter;
    use std::io::{sink, Cursor, Sink};

    fn app(script: &str) -> CliApp<LinePrompter<Cursor<String>, Sink>> {
        CliApp::new(
            LinePrompter::new(Cursor::new(script.to_string()), sink()),
            ShellSettings::default(),
        )
    }

    #[test]
    fn test_exit_immediately() {
        let catalog = app("6\n").run().unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let catalog = app("").run().unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_actions_on_empty_catalog_continue() {
        let catalog = app("2\n3\n4\n5\nbogus\n6\n").run().unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_enter_and_sort() {
        let script = "1\n2\n\
                      Tea\nUSD\n2\n40\n3\nAhmad\n0.5\n\
                      Coffee\nEUR\n1\n45\n1\nJacobs\n0.25\n\
                      4\n6\n";
        let catalog = app(script).run().unwrap();
        let products = catalog.products().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name(), "Coffee");
        assert_eq!(products[0].unit_price(), 45.0);
        assert_eq!(products[1].name(), "Tea");
        assert_eq!(products[1].total_price(), 240.0);
    }

    #[test]
    fn test_exhausted_attempts_keep_previous_catalog() {
        let settings = ShellSettings {
            max_attempts: Some(2),
            ..ShellSettings::default()
        };
        let script = "1\n1\nBolt\nUSD\n1\n40\n10\nBosch\n0.1\n\
                      1\nzero\nnone\n6\n";
        let mut app = CliApp::new(
            LinePrompter::new(Cursor::new(script.to_string()), sink()),
            settings,
        );
        let catalog = app.run().unwrap();
        let products = catalog.products().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name(), "Bolt");
    }
}
