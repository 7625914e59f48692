//! Google Gemini provider: `generateContent` for text replies and for
//! inline image generation.
//!
//! Authentication is an API key passed in explicitly or read from
//! `GEMINI_API_KEY` / `GOOGLE_API_KEY`.

use crate::config::schema::DEFAULT_API_BASE_URL;
use crate::error::LlmError;
use crate::llm::{
    DEFAULT_REQUEST_TIMEOUT, provider_client, sanitize_api_error,
    traits::{GeneratedImage, Provider},
};
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

mod types;
use types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, Part,
};

const PROVIDER_NAME: &str = "gemini";

/// Gemini provider over the public REST API.
pub struct GeminiProvider {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// Authentication priority:
    /// 1. Explicit API key passed in
    /// 2. `GEMINI_API_KEY` environment variable
    /// 3. `GOOGLE_API_KEY` environment variable
    pub fn new(api_key: Option<&str>) -> Self {
        let resolved_key = api_key
            .filter(|k| !k.trim().is_empty())
            .map(String::from)
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok());

        Self {
            api_key: resolved_key,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            client: provider_client(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    /// Point the provider at a different API root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.client = provider_client(Duration::from_secs(timeout_secs));
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        self.api_key.as_deref().ok_or_else(|| LlmError::MissingApiKey {
            provider: PROVIDER_NAME.into(),
        })
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn build_text_request(
        system_prompt: Option<&str>,
        message: &str,
        temperature: f64,
    ) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: message.to_string(),
                }],
            }],
            system_instruction: system_prompt.map(|sys| Content {
                role: None,
                parts: vec![Part {
                    text: sys.to_string(),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: Some(temperature),
                max_output_tokens: Some(8192),
                image_config: None,
            },
        }
    }

    fn build_image_request(prompt: &str, aspect_ratio: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: None,
            generation_config: GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: aspect_ratio.to_string(),
                }),
                ..GenerationConfig::default()
            },
        }
    }

    /// Map a non-success HTTP status into the provider error taxonomy.
    fn status_error(status: StatusCode, body: &str) -> LlmError {
        let message = format!("Gemini API error ({status}): {}", sanitize_api_error(body));
        match status {
            StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited {
                provider: PROVIDER_NAME.into(),
                message,
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth {
                provider: PROVIDER_NAME.into(),
            },
            _ => LlmError::Request {
                provider: PROVIDER_NAME.into(),
                message,
            },
        }
    }

    async fn call_api(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> anyhow::Result<GenerateContentResponse> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/{}:generateContent",
            self.base_url,
            Self::model_name(model)
        );

        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(|err| LlmError::Request {
                provider: PROVIDER_NAME.into(),
                message: sanitize_api_error(&err.without_url().to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, &body).into());
        }

        let result: GenerateContentResponse =
            response.json().await.map_err(|err| LlmError::Request {
                provider: PROVIDER_NAME.into(),
                message: format!("invalid response body: {}", err.without_url()),
            })?;

        if let Some(err) = result.error.as_ref() {
            let message = format!("Gemini API error: {}", sanitize_api_error(&err.message));
            return Err(if err.code == Some(429) {
                LlmError::RateLimited {
                    provider: PROVIDER_NAME.into(),
                    message,
                }
            } else {
                LlmError::Request {
                    provider: PROVIDER_NAME.into(),
                    message,
                }
            }
            .into());
        }

        if let Some(usage) = result.usage_metadata.as_ref() {
            tracing::debug!(
                model,
                input_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "gemini usage"
            );
        }

        Ok(result)
    }

    fn extract_text(result: &GenerateContentResponse) -> Result<String, LlmError> {
        let text = result
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                let mut out = String::new();
                for part in &content.parts {
                    if let Some(t) = &part.text {
                        if !out.is_empty() {
                            out.push('\n');
                        }
                        out.push_str(t);
                    }
                }
                out
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyResponse {
                provider: PROVIDER_NAME.into(),
            });
        }

        Ok(text)
    }

    /// First inline image part of the first candidate, if any.
    fn extract_image(result: &GenerateContentResponse) -> Option<GeneratedImage> {
        result
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
            .map(|inline| GeneratedImage {
                mime_type: inline.mime_type.clone(),
                data: inline.data.clone(),
            })
    }
}

impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn chat_with_system<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let request = Self::build_text_request(system_prompt, message, temperature);
            let result = self.call_api(model, &request).await?;
            Ok(Self::extract_text(&result)?)
        })
    }

    fn generate_image<'a>(
        &'a self,
        prompt: &'a str,
        model: &'a str,
        aspect_ratio: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<GeneratedImage>>> + Send + 'a>> {
        Box::pin(async move {
            let request = Self::build_image_request(prompt, aspect_ratio);
            let result = self.call_api(model, &request).await?;
            Ok(Self::extract_image(&result))
        })
    }
}
