//! HTTP dispatch module
//!
//! Sends a finished multipart payload to the appliance's management API and
//! hands back the raw response body.

use crate::config::{DispatchConfig, TlsPolicy, UploadRequest};
use crate::error::{CertPushError, Result};
use crate::payload::MultipartPayload;
use crate::ssl::SslUtils;
use log::{debug, info, warn};
use reqwest::{Client, ClientBuilder, Method};
use url::Url;

pub mod response;

pub use response::RawResponse;

/// The API reads the form from the body of a GET request.
pub const UPLOAD_METHOD: Method = Method::GET;

/// HTTP client wrapper for the management API
pub struct Dispatcher {
    client: Client,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Create a new dispatcher with the given configuration
    pub fn new(config: DispatchConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::none());

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        match &config.tls {
            TlsPolicy::Verify { ca_cert: None } => {}
            TlsPolicy::Verify {
                ca_cert: Some(path),
            } => {
                builder = builder.add_root_certificate(SslUtils::load_ca_cert(path)?);
            }
            TlsPolicy::AcceptInvalidCerts => {
                warn!("server certificate verification is disabled");
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        let client = builder.build().map_err(CertPushError::Http)?;

        Ok(Self { client, config })
    }

    /// Send `payload` to the management API of the appliance named in
    /// `request`.
    pub async fn upload(
        &self,
        request: &UploadRequest,
        payload: MultipartPayload,
    ) -> Result<RawResponse> {
        let url = request.endpoint_url()?;
        info!(
            "uploading certificate '{}' to {}",
            request.name, request.address
        );
        self.send(url, payload).await
    }

    /// Send `payload` to `url` and read the whole response body, whatever
    /// the status code.
    pub async fn send(&self, url: Url, payload: MultipartPayload) -> Result<RawResponse> {
        debug!(
            "sending {} parts ({} content bytes) to {}",
            payload.parts().len(),
            payload.content_len(),
            url
        );

        let request = self
            .client
            .request(UPLOAD_METHOD, url)
            .multipart(payload.into_form())
            .build()
            .map_err(CertPushError::Http)?;

        if self.config.verbose {
            write_verbose_request_headers(&request);
        }

        let response = self
            .client
            .execute(request)
            .await
            .map_err(CertPushError::Http)?;
        let status = response.status();
        debug!("appliance answered with {}", status);

        let body = response
            .bytes()
            .await
            .map_err(CertPushError::ResponseRead)?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn write_verbose_request_headers(request: &reqwest::Request) {
    let url = request.url();
    eprintln!("> {} {}", request.method(), request_path(url));

    if let Some(host) = url.host_str() {
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        eprintln!("> Host: {}", host);
    }

    for (name, value) in request.headers().iter() {
        let value = value.to_str().unwrap_or("<non-utf8>");
        eprintln!("> {}: {}", name, value);
    }
    eprintln!(">");
}

fn request_path(url: &Url) -> String {
    match url[url::Position::BeforePath..].trim() {
        "" => "/".to_string(),
        path => path.to_string(),
    }
}
