use crate::error::{config_error, generation_error, PlannerResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

/// Text-generation service that answers a prompt with JSON following a schema
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Send the prompt and return the raw JSON text of the answer
    async fn generate_json(&self, prompt: &str, schema: &Value) -> PlannerResult<String>;
}

/// Google Gemini `generateContent` backend
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiBackend {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        }
    }

    /// Build the request URL, failing when no API key is configured
    fn endpoint(&self) -> PlannerResult<Url> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| config_error("GEMINI_API_KEY is not set"))?;

        let url_str = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let mut url = Url::parse(&url_str)
            .map_err(|e| config_error(&format!("Invalid Gemini URL '{}': {}", url_str, e)))?;
        url.query_pairs_mut().append_pair("key", api_key);

        Ok(url)
    }
}

/// Pull the answer text out of a `generateContent` response
fn extract_text(response: &Value) -> PlannerResult<String> {
    response
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                .collect::<String>()
        })
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| generation_error("No text in Gemini response"))
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    async fn generate_json(&self, prompt: &str, schema: &Value) -> PlannerResult<String> {
        let url = self.endpoint()?;
        info!("Requesting schedule from Gemini model {}", self.model);

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema
            }
        });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            error!("Gemini request failed: HTTP {} - {}", status, error_body);
            return Err(generation_error(&format!(
                "Gemini request failed: HTTP {} - {}",
                status, error_body
            )));
        }

        let response_data: Value = response.json().await?;
        debug!("Gemini response: {}", response_data);

        extract_text(&response_data)
    }
}
