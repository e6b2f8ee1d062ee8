use crate::config::NamingConfig;
use crate::domain::ports::GroupNamer;
use crate::utils::error::{Result, TeamError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Gemini 風格 generateContent 端點的命名服務客戶端
///
/// One batched request per invocation, no retry. Callers are expected
/// to fall back to placeholder names on any error from here.
pub struct GeminiNamer {
    client: Client,
    config: NamingConfig,
}

impl GeminiNamer {
    pub fn new(config: NamingConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url().trim_end_matches('/'),
            self.config.model()
        )
    }

    fn build_prompt(groups: &[Vec<String>]) -> Result<String> {
        let membership = serde_json::to_string(groups)?;
        Ok(format!(
            "I have divided people into {} teams.\n\
             Here are the members for each team:\n\
             {}\n\n\
             Please generate a creative, fun, and motivating team name for each group \
             based on a random cohesive theme (e.g., Animals, Space, Superheroes, Elements, Colors).\n\
             Return ONLY a JSON array of strings containing the team names in the same order.",
            groups.len(),
            membership
        ))
    }
}

#[async_trait]
impl GroupNamer for GeminiNamer {
    async fn suggest_names(&self, groups: &[Vec<String>]) -> Result<Vec<String>> {
        if groups.is_empty() {
            return Ok(Vec::new());
        }

        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| TeamError::MissingConfigError {
                field: "naming.api_key".to_string(),
            })?;

        let payload = json!({
            "contents": [{ "parts": [{ "text": Self::build_prompt(groups)? }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": { "type": "ARRAY", "items": { "type": "STRING" } }
            }
        });

        tracing::debug!("Requesting names for {} group(s)", groups.len());
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .timeout(self.config.timeout())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TeamError::NamingServiceError {
                message: format!("unexpected status {}", response.status()),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let text = body
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|value| value.as_str())
            .ok_or_else(|| TeamError::NamingServiceError {
                message: "response carries no candidate text".to_string(),
            })?;

        let names: Vec<String> = serde_json::from_str(text)?;
        Ok(names)
    }
}
