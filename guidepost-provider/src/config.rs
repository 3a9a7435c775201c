//! Service addresses and client options.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ProviderError, Result};

/// Default base address of the attributes API.
pub const DEFAULT_API_URL: &str = "https://hiking.waymarkedtrails.org/api/v1";

/// Default address of the destination sign generator.
pub const DEFAULT_DESTINATION_URL: &str =
    "http://osm.mueschelsoft.de/destinationsign/code/generate.pl";

/// Configuration shared by both data sources.
///
/// Missing keys fall back to the defaults when deserialized:
///
/// ```json
/// { "apiUrl": "https://cycling.waymarkedtrails.org/api/v1" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfig {
    /// Base address of the attributes API (without trailing `/details/...`).
    pub api_url: String,
    /// Address of the destination sign generator, without query string.
    pub destination_url: String,
    /// Transport timeout in seconds. `None` leaves the transport default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            destination_url: DEFAULT_DESTINATION_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    /// Checks both addresses and the timeout.
    pub fn validate(&self) -> Result<()> {
        parse_http_url("apiUrl", &self.api_url)?;
        parse_http_url("destinationUrl", &self.destination_url)?;
        if self.timeout_secs == Some(0) {
            return Err(ProviderError::InvalidConfig {
                field: "timeoutSecs".to_string(),
                detail: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Parses `value` and requires an `http` or `https` scheme.
pub(crate) fn parse_http_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value.trim()).map_err(|e| ProviderError::InvalidConfig {
        field: field.to_string(),
        detail: format!("{e}: {value}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ProviderError::InvalidConfig {
            field: field.to_string(),
            detail: format!("unsupported scheme `{other}`"),
        }),
    }
}
