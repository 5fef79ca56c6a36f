//! certpush - upload a TLS certificate and private key to a firewall
//! appliance's management API
//!
//! The pipeline is: resolve an [`UploadRequest`], build the multipart
//! payload from the two PEM files, then send it to
//! `https://<address>/webconsole/APIController` and return the raw response.

pub mod cli;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod http;
pub mod i18n;
pub mod logging;
pub mod output;
pub mod payload;
pub mod ssl;
pub mod utils;

pub use config::{ApplianceAddress, DispatchConfig, TlsPolicy, UploadRequest};
pub use error::{CertPushError, Result};
pub use http::{Dispatcher, RawResponse};
pub use payload::{build_upload_payload, MultipartPayload, PayloadBuilder};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the payload for `request` and send it with a dispatcher configured
/// by `config`. Nothing is sent if either file cannot be read.
pub async fn upload_certificate(
    request: &UploadRequest,
    config: DispatchConfig,
) -> Result<RawResponse> {
    let payload = build_upload_payload(request)?;
    let dispatcher = Dispatcher::new(config)?;
    dispatcher.upload(request, payload).await
}
