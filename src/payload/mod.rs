//! Multipart/form-data payload construction
//!
//! The appliance expects one form with the certificate, the private key and
//! the `reqxml` control document, in that order. Both files are read into
//! memory before anything touches the network, so a missing or unreadable
//! file never results in a partial upload.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use reqwest::multipart::{Form, Part};

use crate::config::UploadRequest;
use crate::error::{CertPushError, Result};
use crate::utils::FileUtils;

pub mod envelope;

pub use envelope::ControlEnvelope;

/// Form field carrying the certificate file.
pub const CERTIFICATE_FIELD: &str = "Certificate";
/// Form field carrying the private key file.
pub const PRIVATE_KEY_FIELD: &str = "Private Key";
/// Form field carrying the XML control document.
pub const REQXML_FIELD: &str = "reqxml";

const FILE_MIME: &str = "application/octet-stream";

/// One part of a finished payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartInfo {
    pub name: String,
    pub file_name: Option<String>,
    /// Content length in bytes.
    pub len: usize,
}

/// A finalized multipart/form-data form plus a record of its parts.
#[derive(Debug)]
pub struct MultipartPayload {
    form: Form,
    parts: Vec<PartInfo>,
}

impl MultipartPayload {
    pub fn boundary(&self) -> &str {
        self.form.boundary()
    }

    /// Value the request's `Content-Type` header will carry.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.form.boundary())
    }

    pub fn parts(&self) -> &[PartInfo] {
        &self.parts
    }

    /// Sum of all part contents, excluding multipart framing.
    pub fn content_len(&self) -> usize {
        self.parts.iter().map(|part| part.len).sum()
    }

    pub fn into_form(self) -> Form {
        self.form
    }
}

/// Collects parts in insertion order.
///
/// [`PayloadBuilder::finish`] consumes the builder, so no part can follow the
/// closing boundary.
#[derive(Debug)]
pub struct PayloadBuilder {
    form: Form,
    parts: Vec<PartInfo>,
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self {
            // The appliance matches `name="Private Key"` literally; the default
            // encoding would send `name*=utf-8''Private%20Key`.
            form: Form::new().percent_encode_noop(),
            parts: Vec::new(),
        }
    }

    /// Read the file at `path` into a file part named `name`. The part's
    /// filename is the path's base name.
    ///
    /// The file is opened read-only and closed before this returns, whether
    /// or not reading succeeded.
    pub fn add_file(mut self, name: &str, path: &Path) -> Result<Self> {
        let file_name = FileUtils::base_name(path)?;
        let mut content = Vec::new();
        {
            let mut file = File::open(path).map_err(|e| FileUtils::read_error(path, e))?;
            file.read_to_end(&mut content)
                .map_err(|e| FileUtils::read_error(path, e))?;
        }
        debug!("read {} bytes from {} for part '{}'", content.len(), path.display(), name);

        let len = content.len();
        let part = Part::bytes(content)
            .file_name(file_name.clone())
            .mime_str(FILE_MIME)
            .map_err(|e| CertPushError::Payload(format!("part '{}': {}", name, e)))?;

        self.form = self.form.part(name.to_string(), part);
        self.parts.push(PartInfo {
            name: name.to_string(),
            file_name: Some(file_name),
            len,
        });
        Ok(self)
    }

    /// Append a plain text field.
    pub fn add_text(mut self, name: &str, value: String) -> Self {
        let len = value.len();
        self.form = self.form.text(name.to_string(), value);
        self.parts.push(PartInfo {
            name: name.to_string(),
            file_name: None,
            len,
        });
        self
    }

    /// Close the form and hand out the finished payload.
    pub fn finish(self) -> Result<MultipartPayload> {
        if self.parts.is_empty() {
            return Err(CertPushError::Payload(
                "a multipart payload needs at least one part".to_string(),
            ));
        }
        Ok(MultipartPayload {
            form: self.form,
            parts: self.parts,
        })
    }
}

/// Build the three-part upload form for `request`: Certificate, Private Key,
/// then the `reqxml` control document naming both files by base name.
pub fn build_upload_payload(request: &UploadRequest) -> Result<MultipartPayload> {
    let cert_file = FileUtils::base_name(&request.cert_path)?;
    let key_file = FileUtils::base_name(&request.key_path)?;
    let reqxml = ControlEnvelope {
        username: &request.username,
        password: &request.password,
        name: &request.name,
        cert_file: &cert_file,
        key_file: &key_file,
    }
    .render()?;

    PayloadBuilder::new()
        .add_file(CERTIFICATE_FIELD, &request.cert_path)?
        .add_file(PRIVATE_KEY_FIELD, &request.key_path)?
        .add_text(REQXML_FIELD, reqxml)
        .finish()
}
