//! Utility functions and helpers

use crate::error::{CertPushError, Result};
use std::path::{Path, PathBuf};

/// File system utilities
pub struct FileUtils;

impl FileUtils {
    /// Expand tilde (~) in file paths
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        let rest = match path.strip_prefix('~') {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
            _ => return Ok(PathBuf::from(path)),
        };
        match dirs::home_dir() {
            Some(home_dir) if rest.is_empty() => Ok(home_dir),
            Some(home_dir) => Ok(home_dir.join(rest)),
            None => Err(CertPushError::Config(
                "Cannot determine home directory".to_string(),
            )),
        }
    }

    /// Final path component, the name the appliance stores the file under.
    pub fn base_name(path: &Path) -> Result<String> {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                CertPushError::Config(format!("Path has no file name: {}", path.display()))
            })
    }

    /// Map an open/read failure to the error variant the exit codes expect.
    pub fn read_error(path: &Path, err: std::io::Error) -> CertPushError {
        match err.kind() {
            std::io::ErrorKind::NotFound => {
                CertPushError::FileNotFound(path.display().to_string())
            }
            std::io::ErrorKind::PermissionDenied => {
                CertPushError::PermissionDenied(format!("Cannot read file {}", path.display()))
            }
            _ => CertPushError::Payload(format!("cannot read {}: {}", path.display(), err)),
        }
    }
}

/// String utilities
pub struct StringUtils;

impl StringUtils {
    /// Parse timeout values (supports suffixes like 's', 'm', 'h')
    pub fn parse_timeout(input: &str) -> Result<std::time::Duration> {
        if let Ok(seconds) = input.parse::<u64>() {
            return Ok(std::time::Duration::from_secs(seconds));
        }

        let (number_part, suffix) = if let Some(stripped) = input.strip_suffix('s') {
            (stripped, 1)
        } else if let Some(stripped) = input.strip_suffix('m') {
            (stripped, 60)
        } else if let Some(stripped) = input.strip_suffix('h') {
            (stripped, 3600)
        } else {
            return Err(CertPushError::Usage(format!(
                "Invalid timeout format: '{}'. Use number with optional suffix (s/m/h)",
                input
            )));
        };

        let number: u64 = number_part
            .parse()
            .map_err(|_| CertPushError::Usage(format!("Invalid timeout number: '{}'", number_part)))?;

        let seconds = number.checked_mul(suffix).ok_or_else(|| {
            CertPushError::Usage(format!("Timeout out of range: '{}'", input))
        })?;

        Ok(std::time::Duration::from_secs(seconds))
    }
}
