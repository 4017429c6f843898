//! HTTP transport for chat completions

use serde_json::Value;

use super::ChatRequest;
use crate::error::AppError;
#[cfg(feature = "http")]
use crate::error::RequestError;

/// Posts a chat request and returns the decoded JSON body
pub(crate) trait CompletionClient {
    fn complete(
        &self,
        api_key: &str,
        base_url: &str,
        request: &ChatRequest<'_>,
    ) -> Result<Value, AppError>;
}

pub(crate) fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Blocking client over ureq; timeouts are ureq's defaults
#[derive(Debug, Default)]
pub(crate) struct HttpClient;

#[cfg(feature = "http")]
impl CompletionClient for HttpClient {
    fn complete(
        &self,
        api_key: &str,
        base_url: &str,
        request: &ChatRequest<'_>,
    ) -> Result<Value, AppError> {
        // Keep non-2xx bodies so API errors are readable
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        let url = completions_url(base_url);
        let mut response = agent
            .post(&url)
            .header("Authorization", &format!("Bearer {api_key}"))
            .send_json(request)
            .map_err(RequestError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .body_mut()
                .read_to_string()
                .unwrap_or_default();
            return Err(RequestError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body: Value = response
            .body_mut()
            .read_json()
            .map_err(|e| RequestError::Malformed(e.to_string()))?;
        Ok(body)
    }
}

#[cfg(not(feature = "http"))]
impl CompletionClient for HttpClient {
    fn complete(
        &self,
        _api_key: &str,
        _base_url: &str,
        _request: &ChatRequest<'_>,
    ) -> Result<Value, AppError> {
        Err(AppError::DependencyUnavailable)
    }
}
