use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use chise_cli::commands::{contrast, grid, media, menu, scroll};
use chise_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr; stdout carries command output only.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout().lock();
    match &cli.command {
        Some(Commands::Media { files, ops, json }) => {
            media::run(&mut stdout, &config, files, ops, *json)?;
        }
        Some(Commands::Contrast { colors, json }) => {
            contrast::run(&mut stdout, &config, colors, *json)?;
        }
        Some(Commands::Grid {
            urls,
            cols,
            rows,
            screenshot,
            json,
        }) => {
            grid::run(&mut stdout, &config, urls, *cols, *rows, *screenshot, *json)?;
        }
        Some(Commands::Scroll { from, to, steps }) => {
            scroll::run(&mut stdout, &config, *from, *to, *steps)?;
        }
        Some(Commands::Menu { files, notes, list }) => {
            menu::run(&mut stdout, files, notes, *list)?;
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
