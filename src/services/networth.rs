use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::models::{NetworthOptions, NetworthRequest};

/// Shown to callers when an upstream failure carries no usable message.
const NO_MESSAGE_FALLBACK: &str = "Failed to compute networth";

#[derive(Debug, Error)]
pub enum NetworthError {
    /// The engine rejected the payload (bad or incomplete profile data).
    #[error("{0}")]
    Validation(String),
    /// The engine accepted the payload but failed while computing.
    #[error("{0}")]
    Computation(String),
    /// The valuation service could not be reached at all.
    #[error("valuation service unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
}

/// The external valuation collaborator. Implementations own every pricing and
/// aggregation rule; this crate only moves payloads across the seam.
#[async_trait]
pub trait NetworthEngine: Send + Sync {
    async fn compute(
        &self,
        request: &NetworthRequest,
        options: &NetworthOptions,
    ) -> Result<Value, NetworthError>;
}

/// One-shot calculator bound to a single request's profile data. Holds
/// nothing but the payload and the engine handle, and is dropped as soon as
/// the response is written.
pub struct ProfileNetworthCalculator {
    engine: Arc<dyn NetworthEngine>,
    request: NetworthRequest,
}

impl ProfileNetworthCalculator {
    pub fn new(
        engine: Arc<dyn NetworthEngine>,
        profile: Option<Value>,
        museum_data: Option<Value>,
        bank: Option<Value>,
    ) -> Self {
        Self {
            engine,
            request: NetworthRequest {
                profile,
                bank,
                museum_data,
            },
        }
    }

    pub async fn get_networth(&self, options: &NetworthOptions) -> Result<Value, NetworthError> {
        self.engine.compute(&self.request, options).await
    }
}

/// Engine backed by an external valuation service speaking JSON over HTTP.
///
/// The service is expected to answer `POST {base}/networth` with the result
/// object on 2xx, and an error body (JSON `{"message": ...}` or plain text)
/// otherwise. No timeout is applied; a hung upstream stalls only the request
/// that is waiting on it.
pub struct HttpNetworthEngine {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpNetworthEngine {
    pub fn new(base_url: Url) -> anyhow::Result<Self> {
        let endpoint = base_url
            .join("networth")
            .map_err(|_| anyhow::anyhow!("CALCULATOR_URL cannot be used as a base URL"))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }
}

#[derive(Serialize)]
struct EnginePayload<'a> {
    #[serde(flatten)]
    request: &'a NetworthRequest,
    options: &'a NetworthOptions,
}

#[async_trait]
impl NetworthEngine for HttpNetworthEngine {
    async fn compute(
        &self,
        request: &NetworthRequest,
        options: &NetworthOptions,
    ) -> Result<Value, NetworthError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&EnginePayload { request, options })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            // A 2xx with an undecodable body is still a failed computation.
            return response
                .json()
                .await
                .map_err(|_| NetworthError::Computation(NO_MESSAGE_FALLBACK.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        match error_message(&body) {
            Some(message) if status.is_client_error() => Err(NetworthError::Validation(message)),
            Some(message) => Err(NetworthError::Computation(message)),
            None => Err(NetworthError::Computation(NO_MESSAGE_FALLBACK.to_string())),
        }
    }
}

/// Pull a human-readable message out of an upstream error body. JSON bodies
/// must carry it in `message` (or be a bare string); anything else non-empty
/// is taken verbatim as plain text.
fn error_message(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(message)) => Some(message),
        Ok(value) => value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        Err(_) => {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_message_field() {
        assert_eq!(
            error_message(r#"{"message":"profile is required"}"#).as_deref(),
            Some("profile is required")
        );
    }

    #[test]
    fn error_message_takes_plain_text_bodies_verbatim() {
        assert_eq!(
            error_message("profile is required\n").as_deref(),
            Some("profile is required")
        );
    }

    #[test]
    fn error_message_ignores_json_without_message() {
        assert_eq!(error_message(r#"{"error":"boom"}"#), None);
        assert_eq!(error_message(""), None);
        assert_eq!(error_message("   "), None);
    }
}
