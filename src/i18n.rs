use crate::error::{error_chain, CertPushError};
use fluent_templates::fluent_bundle::FluentValue;
use fluent_templates::{static_loader, Loader};
use std::borrow::Cow;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

static_loader! {
    static LOCALES = {
        locales: "locales",
        fallback_language: "en-US",
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

pub fn localize_error(err: &CertPushError) -> String {
    let langid = resolve_language();
    match err {
        CertPushError::Usage(detail) => message_with_detail(&langid, "error-usage", detail),
        CertPushError::InvalidAddress(detail) => {
            message_with_detail(&langid, "error-invalid-address", detail)
        }
        CertPushError::Config(detail) => message_with_detail(&langid, "error-config", detail),
        CertPushError::FileNotFound(detail) => {
            message_with_detail(&langid, "error-file-not-found", detail)
        }
        CertPushError::PermissionDenied(detail) => {
            message_with_detail(&langid, "error-permission-denied", detail)
        }
        CertPushError::Io(detail) => message_with_detail(&langid, "error-io", &detail.to_string()),
        CertPushError::Payload(detail) => message_with_detail(&langid, "error-payload", detail),
        CertPushError::Ssl(detail) => message_with_detail(&langid, "error-ssl", detail),
        CertPushError::Http(detail) => {
            message_with_detail(&langid, "error-http", &error_chain(detail))
        }
        CertPushError::ResponseRead(detail) => {
            message_with_detail(&langid, "error-response-read", &error_chain(detail))
        }
    }
}

fn message_with_detail(langid: &LanguageIdentifier, key: &str, detail: &str) -> String {
    let mut args: HashMap<Cow<'static, str>, FluentValue> = HashMap::new();
    args.insert(Cow::Borrowed("detail"), FluentValue::from(detail.to_string()));
    LOCALES.lookup_with_args(langid, key, &args)
}

fn resolve_language() -> LanguageIdentifier {
    for key in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(value) = std::env::var(key) {
            if let Some(lang) = normalize_lang(value) {
                if let Ok(langid) = lang.parse::<LanguageIdentifier>() {
                    return langid;
                }
            }
        }
    }
    "en-US".parse().unwrap_or_default()
}

fn normalize_lang(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "C" || value == "POSIX" {
        return None;
    }
    let value = value.split('.').next().unwrap_or(value);
    let value = value.replace('_', "-");
    Some(value)
}
