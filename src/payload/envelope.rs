//! The `reqxml` control document sent alongside the certificate files.

use serde::Serialize;

use crate::error::{CertPushError, Result};

/// XML request telling the appliance to store the uploaded pair as a PEM
/// certificate under `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEnvelope<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub name: &'a str,
    /// Base name of the certificate part's filename.
    pub cert_file: &'a str,
    /// Base name of the private key part's filename.
    pub key_file: &'a str,
}

#[derive(Serialize)]
#[serde(rename = "Request")]
struct RequestXml<'a> {
    #[serde(rename = "Login")]
    login: LoginXml<'a>,
    #[serde(rename = "Set")]
    set: SetXml<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct LoginXml<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SetXml<'a> {
    #[serde(rename = "Certificate")]
    certificate: CertificateXml<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CertificateXml<'a> {
    #[serde(rename = "@transactionid")]
    transaction_id: &'a str,
    name: &'a str,
    action: &'a str,
    certificate_format: &'a str,
    certificate_file: &'a str,
    private_key_file: &'a str,
}

impl ControlEnvelope<'_> {
    pub const TRANSACTION_ID: &'static str = "10";
    pub const ACTION: &'static str = "UploadCertificate";
    pub const FORMAT: &'static str = "pem";

    /// Serialize to the appliance's request schema. Reserved characters in
    /// every value are escaped by the serializer.
    pub fn render(&self) -> Result<String> {
        let request = RequestXml {
            login: LoginXml {
                username: self.username,
                password: self.password,
            },
            set: SetXml {
                certificate: CertificateXml {
                    transaction_id: Self::TRANSACTION_ID,
                    name: self.name,
                    action: Self::ACTION,
                    certificate_format: Self::FORMAT,
                    certificate_file: self.cert_file,
                    private_key_file: self.key_file,
                },
            },
        };
        quick_xml::se::to_string(&request)
            .map_err(|e| CertPushError::Payload(format!("cannot render reqxml: {}", e)))
    }
}
