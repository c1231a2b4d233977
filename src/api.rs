use std::collections::HashMap;

use anyhow::{anyhow, Result};
use reqwest::{Client, Response};
use serde::Serialize;

use crate::catalog::Mode;

/// Payload for a single generation trigger. Built fresh per submission.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<HashMap<String, String>>,
}

/// HTTP client for the generation backend.
///
/// The base URL is injected once at construction and never changes. The
/// client performs exactly one POST per call: no retries, no timeout beyond
/// the transport default, no response-body validation.
#[derive(Clone)]
pub struct GenerationClient {
    client: Client,
    base_url: String,
}

impl GenerationClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs the payload to `{base_url}/ai/generate`.
    ///
    /// Transport errors and non-success statuses both surface as errors;
    /// classifying them is left entirely to the caller. The raw response is
    /// returned unconsumed.
    pub async fn trigger_generation(&self, payload: &GenerationRequest) -> Result<Response> {
        let url = format!("{}/ai/generate", self.base_url);
        tracing::debug!(mode = payload.mode.as_str(), %url, "dispatching generation trigger");

        let response = self.client.post(&url).json(payload).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "generation request failed with status: {}",
                response.status()
            ));
        }

        Ok(response)
    }
}
