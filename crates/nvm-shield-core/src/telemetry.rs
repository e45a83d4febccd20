//! Tracing setup for the `nvm-shield` binary.
//!
//! Log lines always go to stderr, apart from the tagged verdict line.
//! `RUST_LOG` wins over the configured verbosity.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::config::ShieldConfig;

/// Crates whose events `NVM_SHIELD_VERBOSE` raises to DEBUG.
const SHIELD_CRATES: [&str; 2] = ["nvm_shield_core", "lockfile_guard"];

/// Filter used when `RUST_LOG` is unset. Dependencies stay at WARN even in
/// verbose mode.
fn default_filter(verbose: bool) -> EnvFilter {
    let mut filter = EnvFilter::default().add_directive(LevelFilter::WARN.into());
    if verbose {
        for krate in SHIELD_CRATES {
            if let Ok(directive) = format!("{krate}=debug").parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }
    }
    filter
}

/// Install the global subscriber described by `config`.
///
/// Returns `false` when a subscriber was already installed, in which case the
/// existing one keeps receiving events.
pub fn init_tracing(config: &ShieldConfig) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config.verbose));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.verbose)
        .with_writer(std::io::stderr);

    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_filter_stops_at_warn() {
        assert_eq!(default_filter(false).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn verbose_filter_reaches_debug() {
        assert_eq!(default_filter(true).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn second_install_is_refused() {
        let mut config = ShieldConfig::new("/work");
        config.json_logs = true;
        init_tracing(&config);
        assert!(!init_tracing(&ShieldConfig::new("/work")));
    }
}
