//! HuggingFace Inference API client for the text-generation command

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{check_status, ApiError, ApiResult};

const API_BASE: &str = "https://api-inference.huggingface.co/models";
const DEFAULT_MODEL: &str = "gpt2";

/// Text-generation provider
#[async_trait]
pub trait TextGen: Send + Sync {
    /// Generate a completion for a free-text prompt
    async fn generate(&self, prompt: &str) -> ApiResult<String>;
}

/// HuggingFace Inference API provider
pub struct HuggingFaceClient {
    client: Client,
    api_key: String,
    model: String,
}

impl HuggingFaceClient {
    pub fn new(client: Client, api_key: impl Into<String>, model: Option<&str>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
        }
    }

    fn model_url(&self) -> String {
        format!("{}/{}", API_BASE, self.model)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct Generated {
    generated_text: Option<String>,
}

/// The inference API returns either a bare object or a one-element array
#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Many(Vec<Generated>),
    One(Generated),
}

#[async_trait]
impl TextGen for HuggingFaceClient {
    async fn generate(&self, prompt: &str) -> ApiResult<String> {
        let response = self
            .client
            .post(self.model_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&GenerateRequest { inputs: prompt })
            .send()
            .await?;
        let body: GenerateResponse = check_status(response)?.json().await?;

        let generated = match body {
            GenerateResponse::Many(entries) => entries
                .into_iter()
                .next()
                .and_then(|e| e.generated_text),
            GenerateResponse::One(entry) => entry.generated_text,
        };
        generated.ok_or(ApiError::MissingField("generated_text"))
    }
}
