//! NVM-Shield CLI
//!
//! The `nvm-shield` command fails a build when the running Node version does
//! not match the project's `.nvmrc` (or `--version`), and guards
//! `package-lock.json` between CI stages.
//!
//! ## Flags
//!
//! - `--version=<x[.y[.z]]>`: required version, overrides `.nvmrc`
//! - `--compare=<major|minor|patch>`: how much of the version must match
//! - `--preci`: snapshot the lock file checksum and exit
//! - `--postci`: compare the lock file against the snapshot and exit

mod console;

use anyhow::{Context, Result};
use nvm_shield_core::{init_tracing, Outcome, ParsedArguments, Shield, ShieldConfig};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let tokens = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());

    match run(tokens) {
        Ok(outcome) => {
            console::report(&outcome);
            ExitCode::from(outcome.exit_code())
        }
        Err(err) => {
            console::failure(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run(tokens: impl Iterator<Item = String>) -> Result<Outcome> {
    let config = ShieldConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config);
    debug!("Configuration: {:?}", config);

    let shield = Shield::from_config(&config)?;
    let args = ParsedArguments::parse(tokens)?;
    let outcome = shield.run(&args)?;
    Ok(outcome)
}
