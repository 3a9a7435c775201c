//! Shared HTTP handling for both sources.
//!
//! Each source builds its own URL; sending, status handling, logging and
//! JSON decoding live here.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::ServiceConfig;
use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Builds the client shared by both sources.
    pub fn build_client(config: &ServiceConfig) -> Result<Client, ProviderError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build().map_err(|e| ProviderError::InvalidConfig {
            field: "client".to_string(),
            detail: e.to_string(),
        })
    }

    /// Sends the request and returns the body of a 2xx response.
    ///
    /// # Returns
    /// * `Ok(body)` - response text on any 2xx status
    /// * `Err(ProviderError::HttpStatus)` - any other status
    /// * `Err(ProviderError::NetworkError | Timeout)` - transport failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        service: &str,
        url: &str,
    ) -> Result<String, ProviderError> {
        log::debug!("[{service}] GET {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    service: service.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    service: service.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        log::debug!("[{service}] Response Status: {}", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.ok().filter(|b| !b.is_empty());
            log::warn!("[{service}] Request failed (HTTP {})", status.as_u16());
            return Err(ProviderError::HttpStatus {
                service: service.to_string(),
                status: status.as_u16(),
                body: body.as_deref().map(truncate_for_log),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                service: service.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("[{service}] Response Body: {}", truncate_for_log(&text));

        Ok(text)
    }

    /// Parse JSON response
    pub fn parse_json<T>(response_text: &str, service: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{service}] JSON parse failed: {e}");
            log::error!("[{service}] Raw response: {}", truncate_for_log(response_text));
            ProviderError::ParseError {
                service: service.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
