//! `.nvmrc` marker file lookup.

use std::path::Path;
use tracing::debug;

/// Name of the declared-version marker file
pub const NVMRC_FILE: &str = ".nvmrc";

/// Read the declared Node version from `<dir>/.nvmrc`.
///
/// Returns `None` when the file is missing, unreadable or blank; a project
/// without an `.nvmrc` is a normal state, not an error.
pub fn read_nvmrc(dir: &Path) -> Option<String> {
    let path = dir.join(NVMRC_FILE);
    match std::fs::read_to_string(&path) {
        Ok(contents) => {
            let version = contents.trim();
            if version.is_empty() {
                debug!("{:?} is empty", path);
                None
            } else {
                debug!("Declared version {} from {:?}", version, path);
                Some(version.to_string())
            }
        }
        Err(err) => {
            debug!("No usable {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reads_and_trims() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(NVMRC_FILE), "  v20.11.1\n").unwrap();
        assert_eq!(read_nvmrc(dir.path()).as_deref(), Some("v20.11.1"));
    }

    #[test]
    fn test_missing_file_is_absent() {
        let dir = tempdir().unwrap();
        assert_eq!(read_nvmrc(dir.path()), None);
    }

    #[test]
    fn test_blank_file_is_absent() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(NVMRC_FILE), "\n\n").unwrap();
        assert_eq!(read_nvmrc(dir.path()), None);
    }

    #[test]
    fn test_directory_in_place_of_file_is_absent() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join(NVMRC_FILE)).unwrap();
        assert_eq!(read_nvmrc(dir.path()), None);
    }
}
