//! Version normalization and granularity-aware comparison.

use crate::error::{Result, ShieldError};
use std::str::FromStr;
use tracing::debug;

/// How much of the version must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    Major,
    Minor,
    Patch,
}

impl CompareMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareMode::Major => "major",
            CompareMode::Minor => "minor",
            CompareMode::Patch => "patch",
        }
    }
}

impl std::fmt::Display for CompareMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareMode {
    type Err = ShieldError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(CompareMode::Major),
            "minor" => Ok(CompareMode::Minor),
            "patch" => Ok(CompareMode::Patch),
            other => Err(ShieldError::InvalidCompareMode(other.to_string())),
        }
    }
}

/// Where a target version was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// `--version=<x>` on the command line
    Flag,
    /// The `.nvmrc` marker file
    Nvmrc,
}

impl std::fmt::Display for VersionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionSource::Flag => f.write_str("--version"),
            VersionSource::Nvmrc => f.write_str(crate::nvmrc::NVMRC_FILE),
        }
    }
}

/// A `major[.minor[.patch]]` version with absent trailing components left
/// unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTriple {
    pub major: String,
    pub minor: Option<String>,
    pub patch: Option<String>,
}

impl VersionTriple {
    /// Strictly parse a declared version.
    ///
    /// Trims, strips one leading `v`, then requires every present component
    /// to be all ASCII digits. `18`, `v18.4` and `18.4.0` are valid; `18.x`,
    /// `lts/iron` and `18..0` are not.
    pub fn parse(raw: &str, origin: VersionSource) -> Result<Self> {
        let invalid = || ShieldError::InvalidVersionFormat {
            origin,
            value: raw.to_string(),
        };

        let trimmed = raw.trim();
        let body = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let mut parts = body.splitn(3, '.');

        let major = parts.next().filter(|p| is_numeric(p)).ok_or_else(invalid)?;
        let minor = parts.next();
        let patch = parts.next();
        for component in [minor, patch].into_iter().flatten() {
            if !is_numeric(component) {
                return Err(invalid());
            }
        }

        Ok(VersionTriple {
            major: major.to_string(),
            minor: minor.map(str::to_string),
            patch: patch.map(str::to_string),
        })
    }

    /// Split a version without validating components.
    ///
    /// Used for the runtime's own version, which may carry pre-release tags
    /// (`v22.0.0-nightly2024...`) that are compared verbatim.
    pub fn split_loose(raw: &str) -> Self {
        let trimmed = raw.trim();
        let body = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let mut parts = body.splitn(3, '.');
        VersionTriple {
            major: parts.next().unwrap_or_default().to_string(),
            minor: parts.next().map(str::to_string),
            patch: parts.next().map(str::to_string),
        }
    }

    /// Dotted form without the `v` prefix, omitting unspecified components.
    pub fn canonical(&self) -> String {
        let mut out = self.major.clone();
        for component in [&self.minor, &self.patch].into_iter().flatten() {
            out.push('.');
            out.push_str(component);
        }
        out
    }

    /// `vM.x.x` / `vM.m.x` rendering used in relaxed-mode mismatch messages.
    fn masked(&self, mode: CompareMode) -> String {
        match mode {
            CompareMode::Major => format!("v{}.x.x", self.major),
            CompareMode::Minor => format!(
                "v{}.{}.x",
                self.major,
                self.minor.as_deref().unwrap_or("x")
            ),
            CompareMode::Patch => self.to_string(),
        }
    }
}

impl std::fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.canonical())
    }
}

fn is_numeric(component: &str) -> bool {
    !component.is_empty() && component.bytes().all(|b| b.is_ascii_digit())
}

/// The version of the Node runtime being guarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningVersion {
    raw: String,
    triple: VersionTriple,
}

impl RunningVersion {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into().trim().to_string();
        let triple = VersionTriple::split_loose(&raw);
        RunningVersion { raw, triple }
    }

    /// The version exactly as reported by the runtime, e.g. `v20.11.0`.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn triple(&self) -> &VersionTriple {
        &self.triple
    }
}

impl std::fmt::Display for RunningVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Check that `running` satisfies `target` under `mode`.
///
/// Identical versions always pass. Without a mode (or with `patch`) the full
/// version must match; `major` and `minor` only look at the leading
/// components.
pub fn check_version(
    running: &RunningVersion,
    target: &VersionTriple,
    mode: Option<CompareMode>,
) -> Result<()> {
    let current = running.triple();
    if current.canonical() == target.canonical() {
        debug!("Running version {} matches {} exactly", running, target);
        return Ok(());
    }

    match mode {
        None | Some(CompareMode::Patch) => {
            if mode.is_some() && target.patch.is_none() {
                return Err(ShieldError::MissingComponent {
                    component: CompareMode::Patch,
                    provided: target.canonical(),
                    expected: "x.x.x",
                });
            }
            Err(ShieldError::VersionMismatch {
                current: running.to_string(),
                required: target.to_string(),
            })
        }
        Some(CompareMode::Major) => {
            if current.major != target.major {
                return Err(ShieldError::VersionMismatch {
                    current: current.masked(CompareMode::Major),
                    required: target.masked(CompareMode::Major),
                });
            }
            debug!("Major versions match ({})", target.major);
            Ok(())
        }
        Some(CompareMode::Minor) => {
            if target.minor.is_none() {
                return Err(ShieldError::MissingComponent {
                    component: CompareMode::Minor,
                    provided: target.canonical(),
                    expected: "x.x",
                });
            }
            if current.major != target.major || current.minor != target.minor {
                return Err(ShieldError::VersionMismatch {
                    current: current.masked(CompareMode::Minor),
                    required: target.masked(CompareMode::Minor),
                });
            }
            debug!("Minor versions match ({})", target.masked(CompareMode::Minor));
            Ok(())
        }
    }
}
