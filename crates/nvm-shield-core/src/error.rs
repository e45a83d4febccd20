//! Error taxonomy for NVM-Shield.
//!
//! Every variant aborts the run with exit code 1; the `Display` text is the
//! single line shown to the user.

use crate::version::{CompareMode, VersionSource};

/// NVM-Shield errors.
#[derive(Debug, thiserror::Error)]
pub enum ShieldError {
    #[error("Invalid argument: {flag}")]
    InvalidArgument { flag: String },

    #[error("Invalid {origin} value supplied ({value})")]
    InvalidVersionFormat { origin: VersionSource, value: String },

    #[error("Invalid compare value ({0}). Expected \"major\", \"minor\", \"patch\".")]
    InvalidCompareMode(String),

    #[error(
        "Requested {component} version comparison but did not provide the {component} version. \
         Provided: ({provided}), Expected: ({expected})"
    )]
    MissingComponent {
        component: CompareMode,
        provided: String,
        expected: &'static str,
    },

    #[error("Current Node version: {current}. Required Node version: {required}.")]
    VersionMismatch { current: String, required: String },

    #[error("Unable to determine the running Node version: {0}")]
    RuntimeUnavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for NVM-Shield operations.
pub type Result<T> = std::result::Result<T, ShieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_names_flag() {
        let err = ShieldError::InvalidArgument {
            flag: "--foo".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid argument: --foo");
    }

    #[test]
    fn test_version_mismatch_shows_both_sides() {
        let err = ShieldError::VersionMismatch {
            current: "v20.11.0".to_string(),
            required: "v20.11.1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("v20.11.0"));
        assert!(msg.contains("v20.11.1"));
    }

    #[test]
    fn test_missing_component_message() {
        let err = ShieldError::MissingComponent {
            component: CompareMode::Patch,
            provided: "18.4".to_string(),
            expected: "x.x.x",
        };
        assert_eq!(
            err.to_string(),
            "Requested patch version comparison but did not provide the patch version. \
             Provided: (18.4), Expected: (x.x.x)"
        );
    }

    #[test]
    fn test_invalid_version_format_names_origin() {
        let err = ShieldError::InvalidVersionFormat {
            origin: VersionSource::Nvmrc,
            value: "lts/iron".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid .nvmrc value supplied (lts/iron)");
    }
}
