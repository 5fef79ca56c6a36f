use crate::error::{error_chain, CertPushError};

pub fn exit_code_for_error(err: &CertPushError) -> i32 {
    match err {
        CertPushError::Usage(_) => 1,
        CertPushError::Config(_) => 2,
        CertPushError::InvalidAddress(_) => 3,
        CertPushError::PermissionDenied(_) | CertPushError::FileNotFound(_) => 37,
        CertPushError::Ssl(message) => ssl_exit_code(message),
        CertPushError::Io(_) => 23,
        CertPushError::Payload(_) => 26,
        CertPushError::Http(err) => http_exit_code(err),
        CertPushError::ResponseRead(err) if err.is_timeout() => 28,
        CertPushError::ResponseRead(_) => 56,
    }
}

fn http_exit_code(err: &reqwest::Error) -> i32 {
    if err.is_timeout() {
        return 28;
    }
    if let Some(code) = tls_exit_code(&error_chain(err)) {
        return code;
    }
    if err.is_connect() {
        return 7;
    }
    if err.is_builder() {
        return 2;
    }
    43
}

/// Handshake failures surface as connect errors; tell them apart by the
/// rustls message in the source chain.
fn tls_exit_code(chain: &str) -> Option<i32> {
    let lower = chain.to_ascii_lowercase();
    if lower.contains("invalid peer certificate") || lower.contains("certificate verify") {
        return Some(60);
    }
    if lower.contains("handshake")
        || lower.contains("tls")
        || lower.contains("received corrupt message")
    {
        return Some(35);
    }
    None
}

fn ssl_exit_code(message: &str) -> i32 {
    if message.to_ascii_lowercase().contains("ca certificate") {
        return 77;
    }
    35
}
