//! vaultpub CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use vaultpub::cli::args::{Cli, Commands};
use vaultpub::cli::output::Output;
use vaultpub::cli::{check, export};
use vaultpub::config::Config;
use vaultpub::error::{ExitCode as PublishExitCode, PublishError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<PublishExitCode, PublishError> {
    let config = Config::load()?;
    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Export(args) => export::run(&vault_path, &config, args, &output),
        Commands::Check(args) => check::run(&vault_path, &config, args, &output),
    }
}
