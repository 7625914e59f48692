use super::prompts;
use crate::catalog::Publication;
use crate::config::Config;
use crate::error::LlmError;
use crate::llm::{Provider, sanitize_api_error};
use std::sync::Arc;

/// Reply shown when the service reports a quota or rate-limit condition.
pub const RATE_LIMITED_REPLY: &str =
    "The campus assistant is currently busy with many requests. Please try again in a few moments.";

/// Reply shown for every other service failure.
pub const CONNECTION_TROUBLE_REPLY: &str =
    "I'm having trouble connecting to the campus server. Please try again later.";

/// Check if a provider error signals a quota/429 condition.
fn is_rate_limited(err: &anyhow::Error) -> bool {
    if let Some(llm_err) = err.downcast_ref::<LlmError>()
        && llm_err.is_rate_limited()
    {
        return true;
    }

    let msg = err.to_string();
    if msg.contains("429") {
        return true;
    }
    let lower = msg.to_ascii_lowercase();
    lower.contains("resource_exhausted") || lower.contains("exceeded your current quota")
}

/// Model and sampling settings for the three gateway calls.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySettings {
    pub text_model: String,
    pub image_model: String,
    pub chat_temperature: f64,
    pub bio_temperature: f64,
    pub aspect_ratio: String,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl GatewaySettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            chat_temperature: config.chat_temperature,
            bio_temperature: config.bio_temperature,
            aspect_ratio: config.image_aspect_ratio.clone(),
        }
    }
}

/// Boundary around the generative service.
///
/// Every call is a single request with no retry. Failures never reach the
/// caller as errors: text replies degrade to a canned message, images and
/// bios degrade to `None`.
#[derive(Clone)]
pub struct AssistantGateway {
    provider: Arc<dyn Provider>,
    settings: GatewaySettings,
}

impl AssistantGateway {
    pub fn new(provider: Arc<dyn Provider>, settings: GatewaySettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Ask for a text reply. `system_instruction` replaces the default persona.
    pub async fn request_reply(&self, user_text: &str, system_instruction: Option<&str>) -> String {
        let system = system_instruction.unwrap_or(prompts::DEFAULT_PERSONA);
        match self
            .provider
            .chat_with_system(
                Some(system),
                user_text,
                &self.settings.text_model,
                self.settings.chat_temperature,
            )
            .await
        {
            Ok(reply) => reply,
            // An answer with no text; callers substitute their own placeholder.
            Err(err)
                if matches!(
                    err.downcast_ref::<LlmError>(),
                    Some(LlmError::EmptyResponse { .. })
                ) =>
            {
                tracing::debug!(provider = self.provider.name(), "assistant reply was empty");
                String::new()
            }
            Err(err) if is_rate_limited(&err) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %sanitize_api_error(&err.to_string()),
                    "assistant reply rate-limited"
                );
                RATE_LIMITED_REPLY.to_string()
            }
            Err(err) => {
                tracing::error!(
                    provider = self.provider.name(),
                    error = %sanitize_api_error(&err.to_string()),
                    "assistant reply failed"
                );
                CONNECTION_TROUBLE_REPLY.to_string()
            }
        }
    }

    /// Generate a building photograph for `subject`, as a `data:` URI.
    pub async fn request_image(&self, subject: &str) -> Option<String> {
        let prompt = match prompts::image_prompt(subject) {
            Ok(prompt) => prompt,
            Err(err) => {
                tracing::error!(subject, error = %err, "failed to render image prompt");
                return None;
            }
        };

        match self
            .provider
            .generate_image(
                &prompt,
                &self.settings.image_model,
                &self.settings.aspect_ratio,
            )
            .await
        {
            Ok(Some(image)) => Some(image.to_data_uri()),
            Ok(None) => {
                tracing::debug!(subject, "image response carried no inline data");
                None
            }
            Err(err) if is_rate_limited(&err) => {
                tracing::warn!(
                    subject,
                    "image generation quota exhausted (429); wait before requesting more images"
                );
                None
            }
            Err(err) => {
                tracing::error!(
                    subject,
                    error = %sanitize_api_error(&err.to_string()),
                    "image generation failed"
                );
                None
            }
        }
    }

    /// Generate a short biography from a faculty member's structured fields.
    pub async fn request_generated_bio(
        &self,
        name: &str,
        role: &str,
        qualification: &str,
        interests: &[String],
        publications: &[Publication],
    ) -> Option<String> {
        let prompt =
            match prompts::bio_prompt(name, role, qualification, interests, publications) {
                Ok(prompt) => prompt,
                Err(err) => {
                    tracing::error!(name, error = %err, "failed to render bio prompt");
                    return None;
                }
            };

        match self
            .provider
            .chat_with_system(
                Some(prompts::BIO_WRITER_PERSONA),
                &prompt,
                &self.settings.text_model,
                self.settings.bio_temperature,
            )
            .await
        {
            Ok(bio) if !bio.trim().is_empty() => Some(bio),
            Ok(_) => None,
            Err(err) => {
                tracing::error!(
                    name,
                    error = %sanitize_api_error(&err.to_string()),
                    "bio generation failed"
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for AssistantGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantGateway")
            .field("provider", &self.provider.name())
            .field("settings", &self.settings)
            .finish()
    }
}
