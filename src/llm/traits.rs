use std::future::Future;
use std::pin::Pin;

/// Binary image returned by a provider, base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: String,
}

impl GeneratedImage {
    /// `data:<mime>;base64,<data>` URI suitable for an `<img src>`.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// The external generative service: text completion and image generation.
///
/// Implementations surface failures as `anyhow::Error`, ideally wrapping a
/// [`crate::error::LlmError`] so callers can classify them.
pub trait Provider: Send + Sync {
    /// Provider identifier (e.g. "gemini").
    fn name(&self) -> &str;

    fn chat_with_system<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;

    /// Generate one image for `prompt`. `Ok(None)` means the service answered
    /// without any image part.
    fn generate_image<'a>(
        &'a self,
        prompt: &'a str,
        model: &'a str,
        aspect_ratio: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<GeneratedImage>>> + Send + 'a>> {
        let _ = (prompt, model, aspect_ratio);
        Box::pin(async move {
            let unsupported: anyhow::Result<Option<GeneratedImage>> = Err(anyhow::anyhow!(
                "provider {} does not support image generation",
                self.name()
            ));
            unsupported
        })
    }
}
