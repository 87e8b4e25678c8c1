#![doc = include_str!("../README.md")]

mod command;
mod config;
mod telemetry;

use clap::Parser;
use config::{Cli, GeneratorSettings};
use telemetry::init_tracing;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let settings = GeneratorSettings::try_from(cli.args)?;

    init_tracing()?;
    tracing::debug!(?settings, "resolved generator settings");

    let stdout = std::io::stdout();
    command::execute(&cli.command, &settings, &mut stdout.lock())
}
