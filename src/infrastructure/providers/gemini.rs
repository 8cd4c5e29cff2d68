//! Google Gemini 보강 provider 어댑터.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use url::Url;

use crate::application::config::Config;
use crate::application::ports::{EnhancementError, EnhancementPort};
use crate::infrastructure::config::resolve_provider_api_key;

use super::api_runner::{build_api_client, collect_text, send_json};
use super::{build_enhancement_prompt, parse_enhanced_text};

pub struct GeminiEnhancer {
    client: Client,
    base_url: String,
    model: String,
    credential: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiEnhancer {
    /// 활성화되어 있고 API key가 해석될 때만 provider를 만든다.
    pub fn from_config(config: &Config) -> Option<Self> {
        let provider = config.gemini();
        if !provider.is_enabled() {
            return None;
        }

        let credential = resolve_provider_api_key(&provider).credential?;
        Some(Self {
            client: build_api_client(config.enhance_timeout()),
            base_url: provider.api_base(),
            model: provider.model(),
            credential,
            temperature: provider.temperature(),
            max_output_tokens: provider.max_output_tokens(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn payload(&self, draft: &str) -> Value {
        json!({
            "contents": [
                {
                    "parts": [
                        { "text": build_enhancement_prompt(draft) }
                    ]
                }
            ],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_output_tokens
            }
        })
    }
}

fn extract_gemini_content(response: &Value) -> String {
    if let Some(content) = response.pointer("/candidates/0/content") {
        return collect_text(content);
    }
    String::new()
}

#[async_trait]
impl EnhancementPort for GeminiEnhancer {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn enhance(&self, draft: &str) -> Result<String, EnhancementError> {
        let payload = self.payload(draft);

        // Gemini는 API key(query) 또는 OAuth(Bearer) 방식 모두 허용한다.
        let request = if self.credential.starts_with("AIza") {
            let mut url = Url::parse(&self.endpoint())
                .map_err(|err| EnhancementError::Transport(format!("invalid Gemini URL: {err}")))?;
            url.query_pairs_mut().append_pair("key", &self.credential);
            self.client.post(url).json(&payload)
        } else {
            self.client
                .post(self.endpoint())
                .bearer_auth(&self.credential)
                .json(&payload)
        };

        let response = send_json(self.name(), request).await?;
        let content = extract_gemini_content(&response);
        tracing::debug!(chars = content.len(), "Gemini response received");

        parse_enhanced_text(&content)
    }
}
