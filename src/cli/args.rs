use clap::{Parser, ValueEnum};
use std::fmt;

#[derive(Parser, Debug)]
#[command(name = "product-catalog")]
#[command(about = "Interactive product list with foreign currency prices")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// How the product list is printed
    #[arg(short, long, default_value = "records")]
    pub format: ListingFormat,

    /// Do not wait for a key press after each action
    #[arg(long)]
    pub no_pause: bool,

    /// Do not clear the screen before showing the menu
    #[arg(long)]
    pub no_clear: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ListingFormat {
    #[default]
    Records,
    Table,
    Json,
}

impl fmt::Display for ListingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingFormat::Records => write!(f, "records"),
            ListingFormat::Table => write!(f, "table"),
            ListingFormat::Json => write!(f, "json"),
        }
    }
}
