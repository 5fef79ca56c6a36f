//! SSL/TLS configuration and utilities

use crate::config::TlsPolicy;
use crate::error::{CertPushError, Result};
use std::path::Path;

/// SSL/TLS certificate utilities
pub struct SslUtils;

impl SslUtils {
    /// Validate SSL configuration
    pub fn validate_policy(policy: &TlsPolicy) -> Result<()> {
        if let TlsPolicy::Verify {
            ca_cert: Some(ca_cert),
        } = policy
        {
            if !ca_cert.is_file() {
                return Err(CertPushError::Ssl(format!(
                    "CA certificate file not found: {}",
                    ca_cert.display()
                )));
            }
        }
        Ok(())
    }

    /// Load a PEM CA certificate to trust in addition to the system roots.
    pub fn load_ca_cert(path: &Path) -> Result<reqwest::Certificate> {
        let pem = std::fs::read(path).map_err(|e| {
            CertPushError::Ssl(format!(
                "Cannot read CA certificate {}: {}",
                path.display(),
                e
            ))
        })?;
        reqwest::Certificate::from_pem(&pem).map_err(|e| {
            CertPushError::Ssl(format!(
                "Invalid CA certificate {}: {}",
                path.display(),
                e
            ))
        })
    }
}
