//! `generate` command: one full pass, optionally followed by watch mode.

use anyhow::Result;
use globegen::config::I18nConfig;
use globegen::generate::full_pass;
use globegen::materialize::GenerationState;
use globegen::watch::{setup_shutdown_handler, watch};

pub fn run(config: I18nConfig, watching: bool) -> Result<()> {
    if watching {
        setup_shutdown_handler()?;
        return watch(config);
    }

    let summary = full_pass(&config, &mut GenerationState::new())?;
    summary.log();
    Ok(())
}
