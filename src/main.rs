use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use product_catalog_cli::{
    cli::{Args, CliApp, LinePrompter, Prompter, ShellSettings, TerminalPrompter},
    utils::Config,
};
use tracing_subscriber::EnvFilter;

/// Retry bound used when answers are piped in and nobody can fix a bad line.
const PIPED_MAX_ATTEMPTS: u32 = 3;

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?;

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("LOG_LEVEL '{}' is not a valid log filter", config.log_level))?
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    tracing::info!("🦀 Product catalog starting...");
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let interactive = io::stdin().is_terminal();
    let settings = ShellSettings {
        reference_currency: config.reference_currency.clone(),
        listing_format: args.format,
        max_attempts: if interactive {
            config.input_max_attempts
        } else {
            Some(config.input_max_attempts.unwrap_or(PIPED_MAX_ATTEMPTS))
        },
    };

    if interactive {
        run_shell(TerminalPrompter::new(!args.no_pause, !args.no_clear), settings)?;
    } else {
        tracing::debug!("stdin is not a terminal, reading answers line by line");
        run_shell(LinePrompter::new(io::stdin().lock(), io::stdout()), settings)?;
    }

    tracing::info!("🦀 Product catalog stopped");
    Ok(())
}

fn run_shell<P: Prompter>(prompter: P, settings: ShellSettings) -> Result<()> {
    let mut app = CliApp::new(prompter, settings);
    app.run()?;
    Ok(())
}
