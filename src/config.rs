//! Configuration management for certpush

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::{Host, Url};

use crate::error::{CertPushError, Result};

/// Port the appliance's web console listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 4444;

/// Fixed path of the management API on the appliance.
pub const API_PATH: &str = "/webconsole/APIController";

/// Host and port of the appliance's management interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplianceAddress {
    host: Host,
    port: u16,
}

impl ApplianceAddress {
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let host = parse_host(host)?;
        Ok(Self { host, port })
    }

    /// Parse `host`, `host:port`, `[v6]`, `[v6]:port` or a bare IPv6 literal.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CertPushError::InvalidAddress(
                "address must not be empty".to_string(),
            ));
        }

        let (host, port) = if let Some(rest) = input.strip_prefix('[') {
            let (host, tail) = rest.split_once(']').ok_or_else(|| {
                CertPushError::InvalidAddress(format!("unterminated '[' in '{}'", input))
            })?;
            let port = match tail {
                "" => None,
                tail => match tail.strip_prefix(':') {
                    Some(port) => Some(port),
                    None => {
                        return Err(CertPushError::InvalidAddress(format!(
                            "unexpected '{}' after ']' in '{}'",
                            tail, input
                        )))
                    }
                },
            };
            (format!("[{}]", host), port)
        } else {
            match input.matches(':').count() {
                0 => (input.to_string(), None),
                1 => {
                    let (host, port) = input.split_once(':').unwrap_or((input, ""));
                    (host.to_string(), Some(port))
                }
                // More than one colon without brackets: a bare IPv6 literal.
                _ => (format!("[{}]", input), None),
            }
        };

        let port = match port {
            Some(port) => parse_port(port)?,
            None => DEFAULT_PORT,
        };

        Self::new(&host, port)
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for ApplianceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `Host` renders IPv6 with brackets already.
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for ApplianceAddress {
    type Err = CertPushError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_host(host: &str) -> Result<Host> {
    if host.is_empty() {
        return Err(CertPushError::InvalidAddress(
            "host must not be empty".to_string(),
        ));
    }
    Host::parse(host)
        .map_err(|e| CertPushError::InvalidAddress(format!("Invalid host '{}': {}", host, e)))
}

/// Parse a TCP port, rejecting 0.
pub fn parse_port(input: &str) -> Result<u16> {
    match input.parse::<u16>() {
        Ok(0) | Err(_) => Err(CertPushError::InvalidAddress(format!(
            "Invalid port '{}': expected a number between 1 and 65535",
            input
        ))),
        Ok(port) => Ok(port),
    }
}

/// Everything needed to upload one certificate/key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub address: ApplianceAddress,
    pub username: String,
    pub password: String,
    /// Display name shown in the appliance's web interface.
    pub name: String,
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

impl UploadRequest {
    /// Build a request, rejecting empty credentials, names or paths.
    pub fn new(
        address: ApplianceAddress,
        username: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        cert_path: impl Into<PathBuf>,
        key_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let request = Self {
            address,
            username: username.into(),
            password: password.into(),
            name: name.into(),
            cert_path: cert_path.into(),
            key_path: key_path.into(),
        };

        for (field, empty) in [
            ("username", request.username.is_empty()),
            ("password", request.password.is_empty()),
            ("name", request.name.is_empty()),
            ("certificate path", request.cert_path.as_os_str().is_empty()),
            ("key path", request.key_path.as_os_str().is_empty()),
        ] {
            if empty {
                return Err(CertPushError::Usage(format!("{} must not be empty", field)));
            }
        }

        Ok(request)
    }

    /// `https://<host>:<port>/webconsole/APIController`
    pub fn endpoint_url(&self) -> Result<Url> {
        let raw = format!("https://{}{}", self.address, API_PATH);
        Url::parse(&raw)
            .map_err(|e| CertPushError::InvalidAddress(format!("Invalid URL '{}': {}", raw, e)))
    }
}

/// How the dispatcher treats the appliance's server certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsPolicy {
    /// Standard chain and hostname verification, optionally trusting an
    /// extra PEM root.
    Verify { ca_cert: Option<PathBuf> },
    /// Skip all server certificate checks.
    AcceptInvalidCerts,
}

impl Default for TlsPolicy {
    fn default() -> Self {
        TlsPolicy::Verify { ca_cert: None }
    }
}

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub tls: TlsPolicy,
    /// `None` waits for the appliance indefinitely.
    pub timeout: Option<Duration>,
    pub connect_timeout: Duration,
    pub user_agent: Option<String>,
    pub verbose: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            tls: TlsPolicy::default(),
            timeout: None,
            connect_timeout: Duration::from_secs(30),
            user_agent: Some(format!("certpush/{}", crate::VERSION)),
            verbose: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub file: Option<PathBuf>,
    pub verbose: bool,
}

/// Fully resolved invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub request: UploadRequest,
    pub dispatch: DispatchConfig,
    pub output: OutputConfig,
}
