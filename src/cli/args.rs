//! Resolution of parsed arguments into [`Settings`].
//!
//! Two invocation shapes are accepted and normalized into one
//! [`UploadRequest`]:
//!
//! * flags: `--ip HOST [--port PORT] --username U --password P --name N --cert FILE --key FILE`
//! * positional: `ADDRESS USERNAME PASSWORD NAME CERT KEY`, port embedded in `ADDRESS`

use clap::parser::ValueSource;
use clap::ArgMatches;

use crate::config::{
    parse_port, ApplianceAddress, DispatchConfig, OutputConfig, Settings, TlsPolicy,
    UploadRequest, DEFAULT_PORT,
};
use crate::error::{CertPushError, Result};
use crate::utils::{FileUtils, StringUtils};

/// Flags that describe the upload itself, as opposed to transport options.
pub const REQUEST_FLAGS: [&str; 7] = ["ip", "port", "username", "password", "name", "cert", "key"];

/// Number of values the positional form takes.
pub const POSITIONAL_COUNT: usize = 6;

/// Build the complete settings from command line arguments
pub fn resolve(matches: &ArgMatches) -> Result<Settings> {
    let request = match matches.get_many::<String>("positional") {
        Some(values) => {
            let values: Vec<&str> = values.map(String::as_str).collect();
            resolve_positional(matches, &values)?
        }
        None => resolve_flags(matches)?,
    };

    let verbose = matches.get_flag("verbose");
    let dispatch = build_dispatch_config(matches, verbose)?;

    let output = OutputConfig {
        file: matches
            .get_one::<String>("output")
            .map(|path| FileUtils::expand_path(path))
            .transpose()?,
        verbose,
    };

    Ok(Settings {
        request,
        dispatch,
        output,
    })
}

fn resolve_positional(matches: &ArgMatches, values: &[&str]) -> Result<UploadRequest> {
    if let Some(flag) = REQUEST_FLAGS
        .iter()
        .find(|id| matches.value_source(id) == Some(ValueSource::CommandLine))
    {
        return Err(CertPushError::Usage(format!(
            "--{} cannot be combined with positional arguments",
            flag
        )));
    }

    let [address, username, password, name, cert, key] = values else {
        return Err(CertPushError::Usage(format!(
            "expected {} positional arguments <ADDRESS> <USERNAME> <PASSWORD> <NAME> <CERT> <KEY>, got {}",
            POSITIONAL_COUNT,
            values.len()
        )));
    };

    UploadRequest::new(
        ApplianceAddress::parse(address)?,
        *username,
        *password,
        *name,
        FileUtils::expand_path(cert)?,
        FileUtils::expand_path(key)?,
    )
}

fn resolve_flags(matches: &ArgMatches) -> Result<UploadRequest> {
    let ip = required(matches, "ip")?;
    let port = match matches.get_one::<String>("port") {
        Some(port) => parse_port(port)?,
        None => DEFAULT_PORT,
    };
    let address = ApplianceAddress::new(&bracket_ipv6(ip), port)?;

    UploadRequest::new(
        address,
        required(matches, "username")?,
        required(matches, "password")?,
        required(matches, "name")?,
        FileUtils::expand_path(required(matches, "cert")?)?,
        FileUtils::expand_path(required(matches, "key")?)?,
    )
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| {
            CertPushError::Usage(format!(
                "missing --{} (or pass all {} positional arguments)",
                id, POSITIONAL_COUNT
            ))
        })
}

/// `--ip fe80::1` carries no port, so a bare IPv6 literal is allowed there.
fn bracket_ipv6(ip: &str) -> String {
    if ip.contains(':') && !ip.starts_with('[') {
        format!("[{}]", ip)
    } else {
        ip.to_string()
    }
}

fn build_dispatch_config(matches: &ArgMatches, verbose: bool) -> Result<DispatchConfig> {
    let mut config = DispatchConfig {
        verbose,
        ..DispatchConfig::default()
    };

    config.tls = if matches.get_flag("insecure") {
        TlsPolicy::AcceptInvalidCerts
    } else {
        TlsPolicy::Verify {
            ca_cert: matches
                .get_one::<String>("cacert")
                .map(|path| FileUtils::expand_path(path))
                .transpose()?,
        }
    };

    if let Some(timeout) = matches.get_one::<String>("timeout") {
        config.timeout = Some(StringUtils::parse_timeout(timeout)?);
    }

    if let Some(connect_timeout) = matches.get_one::<String>("connect-timeout") {
        config.connect_timeout = StringUtils::parse_timeout(connect_timeout)?;
    }

    if let Some(user_agent) = matches.get_one::<String>("user-agent") {
        config.user_agent = Some(user_agent.clone());
    }

    Ok(config)
}
