//! CLI argument parsing module
//!
//! This module handles command-line argument parsing and is the single place
//! that turns errors into messages and process exit codes.

use crate::config::Settings;
use crate::error::{CertPushError, Result};
use crate::exit_code::exit_code_for_error;
use crate::http::Dispatcher;
use crate::i18n::localize_error;
use crate::output::OutputWriter;
use crate::payload::build_upload_payload;
use crate::ssl::SslUtils;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::debug;

pub mod args;

/// Environment variable consulted for `--password`.
pub const PASSWORD_ENV: &str = "CERTPUSH_PASSWORD";

/// Main entry point for the CLI application
pub fn run() {
    let matches = match create_app().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    crate::logging::init(matches.get_flag("verbose"));

    if let Err(e) = run_with_args(&matches) {
        eprintln!("certpush: error: {}", localize_error(&e));
        if matches!(e, CertPushError::Usage(_)) {
            eprintln!("\n{}", create_app().render_usage());
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

/// Run certpush with parsed command line arguments
fn run_with_args(matches: &ArgMatches) -> Result<()> {
    let Settings {
        request,
        dispatch,
        output,
    } = args::resolve(matches)?;
    SslUtils::validate_policy(&dispatch.tls)?;

    // Both files are read and closed before any connection is attempted.
    let payload = build_upload_payload(&request)?;
    debug!(
        "payload ready: {} content bytes, boundary {}",
        payload.content_len(),
        payload.boundary()
    );

    let writer = OutputWriter::new(output);
    writer.write_verbose(&format!("Uploading to {}", request.endpoint_url()?));

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CertPushError::Config(format!("Failed to create async runtime: {}", e)))?;

    let response = rt.block_on(async {
        let dispatcher = Dispatcher::new(dispatch)?;
        dispatcher.upload(&request, payload).await
    })?;

    writer.write_verbose(&format!("Appliance answered {}", response.status));
    writer.write(&response.body)
}

/// Create the CLI application structure
pub fn create_app() -> Command {
    Command::new("certpush")
        .version(crate::VERSION)
        .about("Upload a TLS certificate and private key to a firewall appliance")
        .after_help(
            "Either pass all six positional arguments after any options\n  \
             certpush [OPTIONS] <ADDRESS[:PORT]> <USERNAME> <PASSWORD> <NAME> <CERT> <KEY>\n\
             or use --ip/--port/--username/--password/--name/--cert/--key.",
        )
        .arg(Arg::new("positional")
            .help("ADDRESS[:PORT] USERNAME PASSWORD NAME CERT KEY")
            .value_name("ARGS")
            .num_args(1..)
            .action(ArgAction::Append)
            .allow_hyphen_values(true)
            .index(1))
        .arg(Arg::new("ip")
            .long("ip")
            .value_name("HOST")
            .help("Address of the appliance"))
        .arg(Arg::new("port")
            .long("port")
            .value_name("PORT")
            .help("Port of the appliance's web console [default: 4444]"))
        .arg(Arg::new("username")
            .long("username")
            .value_name("USERNAME")
            .allow_hyphen_values(true)
            .help("Username for authentication"))
        .arg(Arg::new("password")
            .long("password")
            .value_name("PASSWORD")
            .allow_hyphen_values(true)
            .env(PASSWORD_ENV)
            .hide_env_values(true)
            .help("Password for authentication"))
        .arg(Arg::new("name")
            .long("name")
            .value_name("NAME")
            .allow_hyphen_values(true)
            .help("Name the certificate is displayed under in the web interface"))
        .arg(Arg::new("cert")
            .long("cert")
            .value_name("FILE")
            .help("PEM certificate file"))
        .arg(Arg::new("key")
            .long("key")
            .value_name("FILE")
            .help("PEM private key file"))
        .arg(Arg::new("insecure")
            .short('k')
            .long("insecure")
            .help("Do not verify the appliance's TLS certificate")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("cacert")
            .long("cacert")
            .value_name("FILE")
            .help("Trust this PEM CA certificate for the appliance")
            .conflicts_with("insecure"))
        .arg(Arg::new("timeout")
            .long("timeout")
            .value_name("SECONDS")
            .help("Maximum time for the whole request (default: no limit)"))
        .arg(Arg::new("connect-timeout")
            .long("connect-timeout")
            .value_name("SECONDS")
            .help("Maximum time for connection")
            .default_value("30"))
        .arg(Arg::new("user-agent")
            .short('A')
            .long("user-agent")
            .value_name("STRING")
            .help("User-Agent header"))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_name("FILE")
            .help("Write the response body to FILE instead of stdout"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("Verbose output")
            .action(ArgAction::SetTrue))
}
