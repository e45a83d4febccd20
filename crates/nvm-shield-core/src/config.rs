//! Environment-driven configuration.
//!
//! | Variable                  | Default               |
//! |---------------------------|-----------------------|
//! | `NVM_SHIELD_ROOT`         | current directory     |
//! | `NVM_SHIELD_NODE`         | `node`                |
//! | `NVM_SHIELD_NODE_VERSION` | ask `node --version`  |
//! | `NVM_SHIELD_LOCKFILE`     | `package-lock.json`   |
//! | `NVM_SHIELD_LOG_JSON`     | `false`               |
//! | `NVM_SHIELD_VERBOSE`      | `false`               |

use std::path::PathBuf;

use lockfile_guard::DEFAULT_LOCKFILE;

use crate::error::{Result, ShieldError};

pub const ENV_ROOT: &str = "NVM_SHIELD_ROOT";
pub const ENV_NODE: &str = "NVM_SHIELD_NODE";
pub const ENV_NODE_VERSION: &str = "NVM_SHIELD_NODE_VERSION";
pub const ENV_LOCKFILE: &str = "NVM_SHIELD_LOCKFILE";
pub const ENV_LOG_JSON: &str = "NVM_SHIELD_LOG_JSON";
pub const ENV_VERBOSE: &str = "NVM_SHIELD_VERBOSE";

/// Runtime configuration for a shield invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShieldConfig {
    /// Directory holding `.nvmrc`, the lock file and the checksum snapshot
    pub root: PathBuf,
    /// Node binary asked for the running version
    pub node_binary: String,
    /// Use this running version instead of running `node_binary`
    pub node_version: Option<String>,
    /// Lock file name, relative to `root`
    pub lockfile: String,
    /// Emit JSON log lines
    pub json_logs: bool,
    /// Log at DEBUG instead of WARN
    pub verbose: bool,
}

impl ShieldConfig {
    /// Defaults rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ShieldConfig {
            root: root.into(),
            node_binary: "node".to_string(),
            node_version: None,
            lockfile: DEFAULT_LOCKFILE.to_string(),
            json_logs: false,
            verbose: false,
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| ShieldError::InvalidConfig(format!("cannot read working directory: {e}")))?;
        Self::from_lookup(cwd, |key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, defaulting the root to `cwd`.
    pub fn from_lookup<F>(cwd: PathBuf, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = ShieldConfig::new(get(ENV_ROOT).map(PathBuf::from).unwrap_or(cwd));
        if let Some(node) = get(ENV_NODE) {
            config.node_binary = node;
        }
        config.node_version = get(ENV_NODE_VERSION);
        if let Some(lockfile) = get(ENV_LOCKFILE) {
            config.lockfile = lockfile;
        }
        config.json_logs = get(ENV_LOG_JSON)
            .map(|v| parse_bool(ENV_LOG_JSON, &v))
            .transpose()?
            .unwrap_or(false);
        config.verbose = get(ENV_VERBOSE)
            .map(|v| parse_bool(ENV_VERBOSE, &v))
            .transpose()?
            .unwrap_or(false);

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ShieldError::InvalidConfig(format!(
            "{key} must be a boolean, got {other:?}"
        ))),
    }
}
