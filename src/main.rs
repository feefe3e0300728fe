//! globegen - localized route generation CLI.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use globegen::config::I18nConfig;
use globegen::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = I18nConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Generate { watch } => cli::generate::run(config, *watch),
        Commands::Routes { json } => cli::inspect::routes(&config, *json),
        Commands::Match { locale, pathname } => cli::inspect::match_path(&config, locale, pathname),
        Commands::Href {
            target,
            locale,
            query,
            domain,
        } => cli::inspect::href(&config, target, locale.as_deref(), query, *domain),
        Commands::Alternates { target } => cli::inspect::alternates(&config, target),
    }
}
