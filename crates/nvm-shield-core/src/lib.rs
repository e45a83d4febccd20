//! NVM-Shield Core Library
//!
//! Guards a Node.js project against running under the wrong Node version and
//! against uncommitted `package-lock.json` drift in CI.
//!
//! ## Flow
//!
//! 1. Resolve the running Node version ([`runtime`]).
//! 2. Read the declared version from `.nvmrc` ([`nvmrc`]).
//! 3. Parse `--flag=value` arguments ([`args`]).
//! 4. Compare versions, honouring `--compare` granularity ([`version`]).
//! 5. Snapshot or verify the lock file for `--preci` / `--postci`
//!    (`lockfile-guard`).

pub mod args;
pub mod config;
pub mod error;
pub mod nvmrc;
pub mod runtime;
pub mod shield;
pub mod telemetry;
pub mod version;

pub use args::ParsedArguments;
pub use config::ShieldConfig;
pub use error::{Result, ShieldError};
pub use nvmrc::{read_nvmrc, NVMRC_FILE};
pub use runtime::{detect_node_version, running_version};
pub use shield::{Outcome, Shield};
pub use telemetry::init_tracing;
pub use version::{check_version, CompareMode, RunningVersion, VersionSource, VersionTriple};

pub use lockfile_guard::{ChecksumStore, LockStatus};

/// NVM-Shield version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
