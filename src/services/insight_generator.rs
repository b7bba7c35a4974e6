use askama::Template;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::config::Settings;
use crate::error::{AppError, InsightError, Result};

const NO_ERROR_MESSAGE: &str = "No error message provided.";

#[derive(Template)]
#[template(path = "marketing_prompt.txt")]
struct MarketingPrompt<'a> {
    clinic_name: &'a str,
    clinic_data: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_completion_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Generates marketing suggestions through a Groq-compatible chat
/// completion endpoint.
#[derive(Clone)]
pub struct InsightGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    completion_url: String,
    default_temperature: f64,
    default_max_tokens: u32,
    timeout: std::time::Duration,
}

impl InsightGenerator {
    /// Fails when no API key is configured; nothing is sent over the network.
    pub fn new(settings: &Settings) -> Result<Self> {
        let api_key = settings.api_key.trim();
        if api_key.is_empty() {
            return Err(AppError::Configuration("GROQ_API_KEY is required".into()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            model: settings.model.clone(),
            completion_url: settings.completion_url.clone(),
            default_temperature: settings.default_temperature,
            default_max_tokens: settings.default_max_tokens,
            timeout: settings.completion_timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate marketing insights for `clinic_name` from the formatted
    /// competitor list.
    ///
    /// Never fails: on any error the returned text describes what went wrong.
    pub async fn generate(
        &self,
        clinic_data: &str,
        clinic_name: &str,
        temperature: Option<f64>,
        max_tokens: Option<u32>,
    ) -> String {
        match self
            .try_generate(clinic_data, clinic_name, temperature, max_tokens)
            .await
        {
            Ok(content) => content,
            Err(e) => {
                error!(error = %e, "Marketing generation failed");
                e.to_string()
            }
        }
    }

    #[instrument(skip(self, clinic_data), fields(model = %self.model))]
    pub async fn try_generate(
        &self,
        clinic_data: &str,
        clinic_name: &str,
        temperature: Option<f64>,
        max_tokens: Option<u32>,
    ) -> std::result::Result<String, InsightError> {
        let prompt = build_prompt(clinic_data, clinic_name)?;

        let request = CompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: temperature.unwrap_or(self.default_temperature),
            max_completion_tokens: max_tokens.unwrap_or(self.default_max_tokens),
        };

        let response = self
            .client
            .post(&self.completion_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        let content = extract_content(&body)?;

        info!("Successfully generated marketing insights");

        Ok(content)
    }
}

fn build_prompt(
    clinic_data: &str,
    clinic_name: &str,
) -> std::result::Result<String, InsightError> {
    MarketingPrompt {
        clinic_name,
        clinic_data,
    }
    .render()
    .map_err(|e| InsightError::Unexpected(e.to_string()))
}

/// Pull `choices[0].message.content` out of a completion response body.
fn extract_content(body: &Value) -> std::result::Result<String, InsightError> {
    if body.get("choices").is_none() {
        let message = match body.get("error") {
            None | Some(Value::Null) => NO_ERROR_MESSAGE.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        return Err(InsightError::Api(message));
    }

    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or(InsightError::UnexpectedFormat)
}
