//! Command-line flag parsing.
//!
//! Each token is `--flag` or `--flag=value`, split on the first `=`. Flags
//! outside [`VALID_FLAGS`] and bare words are rejected. `--version` is a user
//! flag here, so clap's own help and version handling is switched off.

use crate::error::{Result, ShieldError};
use clap::error::{ContextKind, ContextValue};
use clap::{Arg, ArgMatches, Command};
use std::collections::BTreeMap;

pub const VERSION_FLAG: &str = "--version";
pub const COMPARE_FLAG: &str = "--compare";
pub const PRECI_FLAG: &str = "--preci";
pub const POSTCI_FLAG: &str = "--postci";

/// Every flag the shield accepts.
pub const VALID_FLAGS: [&str; 4] = [VERSION_FLAG, COMPARE_FLAG, PRECI_FLAG, POSTCI_FLAG];

/// Recognized flags and their (optional) values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    flags: BTreeMap<String, Option<String>>,
}

/// The clap command behind [`ParsedArguments::parse`]. Flags are keyed by
/// their full `--name` spelling.
fn command() -> Command {
    let flags = VALID_FLAGS.iter().copied().map(|flag| {
        Arg::new(flag)
            .long(flag.trim_start_matches('-'))
            .num_args(0..=1)
            .require_equals(true)
    });

    Command::new("nvm-shield")
        .no_binary_name(true)
        .disable_version_flag(true)
        .disable_help_flag(true)
        .args_override_self(true)
        .args(flags)
}

/// Map a clap rejection onto the offending token.
fn invalid_argument(err: clap::Error) -> ShieldError {
    let flag = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(flag)) => flag.clone(),
        _ => err.kind().to_string(),
    };
    ShieldError::InvalidArgument { flag }
}

impl ParsedArguments {
    /// Parse the tokens following the program name. Repeated flags keep the
    /// last value.
    pub fn parse<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(|t| t.as_ref().to_string()).collect();
        let matches = command()
            .try_get_matches_from(tokens)
            .map_err(invalid_argument)?;
        Ok(Self::from_matches(&matches))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let flags = VALID_FLAGS
            .iter()
            .copied()
            .filter(|flag| matches.contains_id(flag))
            .map(|flag| (flag.to_string(), matches.get_one::<String>(flag).cloned()))
            .collect();
        ParsedArguments { flags }
    }

    /// Whether `flag` was given, with or without a value.
    pub fn has(&self, flag: &str) -> bool {
        self.flags.contains_key(flag)
    }

    /// The value given for `flag`, if any.
    pub fn value(&self, flag: &str) -> Option<&str> {
        self.flags.get(flag).and_then(|v| v.as_deref())
    }

    pub fn version(&self) -> Option<&str> {
        self.value(VERSION_FLAG)
    }

    pub fn compare(&self) -> Option<&str> {
        self.value(COMPARE_FLAG)
    }

    pub fn preci(&self) -> bool {
        self.has(PRECI_FLAG)
    }

    pub fn postci(&self) -> bool {
        self.has(POSTCI_FLAG)
    }
}
