//! # Transform Service
//!
//! The request/response boundary to the remote transformation endpoint.
//! One attempt per call: no retry, no backoff and no client-side timeout.

use anyhow::{Context, Result};
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

/// Content type submitted for the Input document, whatever its mode
pub const UNKNOWN_CONTENT_TYPE: &str = "unknown/unknown";

/// Public transformation endpoint used when none is configured
pub const DEFAULT_TRANSFORM_ENDPOINT: &str = "https://6psg46wepa.execute-api.us-east-1.amazonaws.com/";

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a single transform call
#[derive(Debug, Error)]
pub enum TransformError {
    /// The endpoint could not be reached or the connection failed
    #[error("network error: {0}")]
    Network(#[source] BoxError),

    /// The endpoint answered, but not with a usable response
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl TransformError {
    pub fn network(err: impl Into<BoxError>) -> Self {
        TransformError::Network(err.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        TransformError::Protocol(message.into())
    }
}

/// The document handed to the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformPayload {
    #[serde(rename = "content-type")]
    pub content_type: String,
    pub content: String,
}

/// Body of a transform call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRequest {
    pub template: String,
    pub payload: TransformPayload,
}

impl TransformRequest {
    /// Build a request from snapshots of the Template and Input documents
    ///
    /// The payload is always declared as `unknown/unknown`.
    pub fn new(template: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            payload: TransformPayload {
                content_type: UNKNOWN_CONTENT_TYPE.to_string(),
                content: content.into(),
            },
        }
    }
}

/// Transformed document and its declared content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResponse {
    pub content_type: String,
    pub body: String,
}

impl TransformResponse {
    pub fn new(content_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            body: body.into(),
        }
    }
}

/// Anything that can run a transform
pub trait TransformClient: Send + Sync + 'static {
    fn send(
        &self,
        request: TransformRequest,
    ) -> impl Future<Output = std::result::Result<TransformResponse, TransformError>> + Send;
}

/// Transform client talking JSON over HTTP POST
#[derive(Debug, Clone)]
pub struct HttpTransformClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransformClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid transform endpoint '{endpoint}'"))?;

        tracing::debug!("Creating transform client for {endpoint}");
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::default())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl TransformClient for HttpTransformClient {
    fn send(
        &self,
        request: TransformRequest,
    ) -> impl Future<Output = std::result::Result<TransformResponse, TransformError>> + Send {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        async move {
            tracing::debug!(
                "POST {endpoint} (template {} bytes, payload {} bytes)",
                request.template.len(),
                request.payload.content.len()
            );

            let response = client
                .post(endpoint)
                .header(CACHE_CONTROL, "no-cache")
                .json(&request)
                .send()
                .await
                .map_err(TransformError::network)?;

            let status = response.status();
            if !status.is_success() {
                return Err(TransformError::protocol(format!(
                    "transform endpoint returned {status}"
                )));
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
                .ok_or_else(|| TransformError::protocol("response has no content-type"))?;

            let body = response
                .text()
                .await
                .map_err(|e| TransformError::protocol(format!("unreadable response body: {e}")))?;

            tracing::debug!("Transform returned {status}, {content_type}, {} bytes", body.len());
            Ok(TransformResponse { content_type, body })
        }
    }
}
