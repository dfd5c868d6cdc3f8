use crate::error::ConfigError;
use crate::form::{DocumentKind, ValidationPolicy};
use crate::upload::ImageFieldScheme;
use reqwest::Url;
use std::env;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_TEST_WEBHOOK_URL: &str =
    "https://sem89.app.n8n.cloud/webhook-test/new-claim/submit";
pub const DEFAULT_LIVE_WEBHOOK_URL: &str = "https://sem89.app.n8n.cloud/webhook/new-claim/submit";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointMode {
    Test,
    #[default]
    Live,
}

impl EndpointMode {
    pub fn toggle(&mut self) {
        *self = match self {
            EndpointMode::Test => EndpointMode::Live,
            EndpointMode::Live => EndpointMode::Test,
        };
    }

    pub fn label(&self) -> &'static str {
        match self {
            EndpointMode::Test => "Test",
            EndpointMode::Live => "Live",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub test: Url,
    pub live: Url,
}

impl Endpoints {
    pub fn url_for(&self, mode: EndpointMode) -> &Url {
        match mode {
            EndpointMode::Test => &self.test,
            EndpointMode::Live => &self.live,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoints: Endpoints,
    pub default_mode: EndpointMode,
    pub image_fields: ImageFieldScheme,
    pub policy: ValidationPolicy,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &'static str, default: &str| -> String {
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(value) => value.trim().to_string(),
                None => {
                    info!("{key} not set, using default: {default}");
                    default.to_string()
                }
            }
        };

        let endpoints = Endpoints {
            test: parse_url(
                "CLAIM_TEST_WEBHOOK_URL",
                var("CLAIM_TEST_WEBHOOK_URL", DEFAULT_TEST_WEBHOOK_URL),
            )?,
            live: parse_url(
                "CLAIM_LIVE_WEBHOOK_URL",
                var("CLAIM_LIVE_WEBHOOK_URL", DEFAULT_LIVE_WEBHOOK_URL),
            )?,
        };

        let default_mode = match var("CLAIM_DEFAULT_MODE", "live").to_lowercase().as_str() {
            "live" => EndpointMode::Live,
            "test" => EndpointMode::Test,
            other => return Err(invalid("CLAIM_DEFAULT_MODE", other, "live or test")),
        };

        let scheme = var("CLAIM_IMAGE_FIELD_SCHEME", "repeated").to_lowercase();
        let image_key = lookup("CLAIM_IMAGE_FIELD_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let image_fields = match scheme.as_str() {
            "repeated" => ImageFieldScheme::Repeated {
                key: image_key
                    .unwrap_or_else(|| ImageFieldScheme::DEFAULT_REPEATED_KEY.to_string()),
            },
            "indexed" => ImageFieldScheme::Indexed {
                prefix: image_key
                    .unwrap_or_else(|| ImageFieldScheme::DEFAULT_INDEXED_PREFIX.to_string()),
            },
            other => {
                return Err(invalid(
                    "CLAIM_IMAGE_FIELD_SCHEME",
                    other,
                    "repeated or indexed",
                ));
            }
        };

        let mut required_documents = Vec::new();
        for key in var("CLAIM_REQUIRED_DOCUMENTS", "")
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
        {
            let kind = DocumentKind::from_field_key(key).ok_or_else(|| {
                invalid(
                    "CLAIM_REQUIRED_DOCUMENTS",
                    key,
                    "claim_form, pdrm_report, workshop_report, driving_license or identity_card",
                )
            })?;
            if !required_documents.contains(&kind) {
                required_documents.push(kind);
            }
        }

        let require_images = match var("CLAIM_REQUIRE_IMAGES", "true").to_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            other => return Err(invalid("CLAIM_REQUIRE_IMAGES", other, "true or false")),
        };

        let default_timeout = DEFAULT_TIMEOUT_SECS.to_string();
        let timeout = var("CLAIM_REQUEST_TIMEOUT_SECS", &default_timeout);
        let request_timeout = timeout
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                invalid(
                    "CLAIM_REQUEST_TIMEOUT_SECS",
                    &timeout,
                    "a positive number of seconds",
                )
            })?;

        Ok(Self {
            endpoints,
            default_mode,
            image_fields,
            policy: ValidationPolicy {
                required_documents,
                require_images,
            },
            request_timeout,
        })
    }
}

fn parse_url(key: &'static str, value: String) -> Result<Url, ConfigError> {
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        Ok(url) => Err(ConfigError::InvalidUrl {
            key,
            reason: format!("unsupported scheme '{}'", url.scheme()),
            value,
        }),
        Err(e) => Err(ConfigError::InvalidUrl {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

fn invalid(key: &'static str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        expected,
    }
}
