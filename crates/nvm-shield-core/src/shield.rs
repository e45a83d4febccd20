//! Orchestration of a single shield run.
//!
//! A [`Shield`] holds everything a run depends on (running version, declared
//! `.nvmrc` version, lock file checksum store) so the decision logic in
//! [`Shield::run`] needs no process state.

use lockfile_guard::{ChecksumStore, LockStatus, DIGEST_FILE};
use tracing::{debug, info};

use crate::args::ParsedArguments;
use crate::config::ShieldConfig;
use crate::error::Result;
use crate::nvmrc::{read_nvmrc, NVMRC_FILE};
use crate::runtime::running_version;
use crate::version::{check_version, CompareMode, RunningVersion, VersionSource, VersionTriple};

/// Terminal state of a shield run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The running version satisfies the declared one
    Passed {
        running: RunningVersion,
        mode: Option<CompareMode>,
    },
    /// Neither `--version` nor `.nvmrc` declared a version
    NoVersionSource,
    /// `--preci` completed
    SnapshotSaved { lockfile: String },
    /// `--postci` found no lock file changes
    LockUnchanged { lockfile: String },
    /// `--postci` found changes or could not confirm there were none
    LockDrifted { lockfile: String, status: LockStatus },
}

impl Outcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::LockDrifted { .. } => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Passed { running, mode } => {
                write!(f, "Passed! ({})", running)?;
                if let Some(mode) = mode {
                    write!(f, " Compare Method: ({})", mode)?;
                }
                Ok(())
            }
            Outcome::NoVersionSource => write!(
                f,
                "No \"{}\" file found in the project and --version argument not supplied!",
                NVMRC_FILE
            ),
            Outcome::SnapshotSaved { lockfile } => {
                write!(f, "Saved SHA256 checksum of {} to {}", lockfile, DIGEST_FILE)
            }
            Outcome::LockUnchanged { lockfile } => write!(f, "No changes to {}", lockfile),
            Outcome::LockDrifted {
                lockfile,
                status: LockStatus::Unconfirmed(reason),
            } => write!(f, "Could not confirm {} is unchanged ({})", lockfile, reason),
            Outcome::LockDrifted { lockfile, .. } => write!(
                f,
                "Uncommitted changes to {} detected, this could be caused by committing \
                 changes from a different Node version",
                lockfile
            ),
        }
    }
}

/// Everything a shield run needs, captured up front.
pub struct Shield {
    running: RunningVersion,
    declared: Option<String>,
    store: ChecksumStore,
    lockfile: String,
}

impl Shield {
    pub fn new(running: RunningVersion, declared: Option<String>, store: ChecksumStore) -> Self {
        let lockfile = store
            .lockfile()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| store.lockfile().display().to_string());
        Shield {
            running,
            declared,
            store,
            lockfile,
        }
    }

    /// Capture the running version, `.nvmrc` and checksum store described by
    /// `config`.
    pub fn from_config(config: &ShieldConfig) -> Result<Self> {
        let running = running_version(&config.node_binary, config.node_version.as_deref())?;
        debug!("Running Node version {}", running);
        let declared = read_nvmrc(&config.root);
        let store = ChecksumStore::new(&config.root, &config.lockfile);
        Ok(Shield::new(running, declared, store))
    }

    /// The version to check against: `--version` wins over `.nvmrc`.
    pub fn resolve_target(
        &self,
        args: &ParsedArguments,
    ) -> Result<Option<(VersionTriple, VersionSource)>> {
        if let Some(explicit) = args.version().filter(|v| !v.is_empty()) {
            let triple = VersionTriple::parse(explicit, VersionSource::Flag)?;
            return Ok(Some((triple, VersionSource::Flag)));
        }
        match &self.declared {
            Some(declared) => {
                let triple = VersionTriple::parse(declared, VersionSource::Nvmrc)?;
                Ok(Some((triple, VersionSource::Nvmrc)))
            }
            None => Ok(None),
        }
    }

    /// Run the version check and any requested lock file step.
    pub fn run(&self, args: &ParsedArguments) -> Result<Outcome> {
        let mode = match self.resolve_target(args)? {
            Some((target, origin)) => {
                let mode = parse_mode(args.compare())?;
                check_version(&self.running, &target, mode)?;
                info!(
                    "Node {} satisfies {} from {} (mode: {:?})",
                    self.running, target, origin, mode
                );
                mode
            }
            None if !args.preci() && !args.postci() => return Ok(Outcome::NoVersionSource),
            None => None,
        };

        if args.preci() {
            self.store.snapshot();
            return Ok(Outcome::SnapshotSaved {
                lockfile: self.lockfile.clone(),
            });
        }

        if args.postci() {
            let status = self.store.verify();
            debug!("Lock status for {}: {:?}", self.lockfile, status);
            let lockfile = self.lockfile.clone();
            return Ok(if status.is_unchanged() {
                Outcome::LockUnchanged { lockfile }
            } else {
                Outcome::LockDrifted { lockfile, status }
            });
        }

        Ok(Outcome::Passed {
            running: self.running.clone(),
            mode,
        })
    }
}

/// Blank `--compare` values mean "no relaxed comparison".
fn parse_mode(value: Option<&str>) -> Result<Option<CompareMode>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value.parse().map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShieldError;
    use std::path::Path;

    fn shield(running: &str, declared: Option<&str>, root: &Path) -> Shield {
        Shield::new(
            RunningVersion::new(running),
            declared.map(str::to_string),
            ChecksumStore::new(root, "package-lock.json"),
        )
    }

    fn args(tokens: &[&str]) -> ParsedArguments {
        ParsedArguments::parse(tokens).unwrap()
    }

    #[test]
    fn explicit_version_wins_over_nvmrc() {
        let dir = tempfile::tempdir().unwrap();
        let shield = shield("v18.4.0", Some("v20.11.1"), dir.path());

        let (target, origin) = shield
            .resolve_target(&args(&["--version=v18.4.0"]))
            .unwrap()
            .unwrap();
        assert_eq!(target.to_string(), "v18.4.0");
        assert_eq!(origin, VersionSource::Flag);
    }

    #[test]
    fn empty_version_flag_falls_back_to_nvmrc() {
        let dir = tempfile::tempdir().unwrap();
        let shield = shield("v18.4.0", Some("18"), dir.path());

        let (_, origin) = shield.resolve_target(&args(&["--version="])).unwrap().unwrap();
        assert_eq!(origin, VersionSource::Nvmrc);
    }

    #[test]
    fn passed_message_includes_mode() {
        let dir = tempfile::tempdir().unwrap();
        let shield = shield("v18.4.9", None, dir.path());

        let outcome = shield
            .run(&args(&["--version=18.4.0", "--compare=MINOR"]))
            .unwrap();
        assert_eq!(
            outcome.to_string(),
            "Passed! (v18.4.9) Compare Method: (minor)"
        );
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn blank_compare_is_strict() {
        let dir = tempfile::tempdir().unwrap();
        let shield = shield("v18.4.9", None, dir.path());

        let err = shield
            .run(&args(&["--version=18.4.0", "--compare=  "]))
            .unwrap_err();
        assert!(matches!(err, ShieldError::VersionMismatch { .. }));
    }

    #[test]
    fn compare_mode_only_validated_with_a_target() {
        let dir = tempfile::tempdir().unwrap();
        let shield = shield("v18.4.9", None, dir.path());

        let outcome = shield.run(&args(&["--compare=weird"])).unwrap();
        assert_eq!(outcome, Outcome::NoVersionSource);

        let err = shield
            .run(&args(&["--version=18", "--compare=weird"]))
            .unwrap_err();
        assert!(matches!(err, ShieldError::InvalidCompareMode(_)));
    }

    #[test]
    fn snapshot_names_lockfile_and_digest_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("npm-shrinkwrap.json"), "{}").unwrap();
        let shield = Shield::new(
            RunningVersion::new("v18.4.0"),
            None,
            ChecksumStore::new(dir.path(), "npm-shrinkwrap.json"),
        );

        let outcome = shield.run(&args(&["--preci"])).unwrap();
        assert_eq!(
            outcome.to_string(),
            "Saved SHA256 checksum of npm-shrinkwrap.json to .package-lock-hash"
        );
        assert!(dir.path().join(DIGEST_FILE).exists());
    }

    #[test]
    fn drift_messages() {
        let drifted = Outcome::LockDrifted {
            lockfile: "package-lock.json".to_string(),
            status: LockStatus::Drifted,
        };
        assert!(drifted.to_string().starts_with("Uncommitted changes to package-lock.json"));
        assert_eq!(drifted.exit_code(), 1);

        let unconfirmed = Outcome::LockDrifted {
            lockfile: "package-lock.json".to_string(),
            status: LockStatus::Unconfirmed("no snapshot".to_string()),
        };
        assert_eq!(
            unconfirmed.to_string(),
            "Could not confirm package-lock.json is unchanged (no snapshot)"
        );
        assert_eq!(unconfirmed.exit_code(), 1);
    }
}
