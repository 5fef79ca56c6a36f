//! HTTP response handling

use reqwest::StatusCode;

/// Response from the appliance. The body is never interpreted.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}
