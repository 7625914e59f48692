use crate::error::LlmError;
use crate::llm::{GeneratedImage, Provider};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub(crate) enum Behavior {
    Reply(String),
    Fail(String),
    RateLimited,
    Empty,
    Image { mime_type: String, data: String },
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub system: Option<String>,
    pub message: String,
    pub model: String,
    pub temperature: f64,
}

/// In-memory provider that plays back scripted behaviors and records calls.
///
/// Behaviors are consumed in order; the last one repeats forever.
pub(crate) struct ScriptedProvider {
    behaviors: Mutex<VecDeque<Behavior>>,
    calls: Mutex<Vec<RecordedCall>>,
    call_count: AtomicUsize,
    delay: Duration,
}

impl ScriptedProvider {
    pub fn new(behaviors: Vec<Behavior>) -> Self {
        Self {
            behaviors: Mutex::new(behaviors.into()),
            calls: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Behavior::Reply(text.to_string())])
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Behavior::Fail(message.to_string())])
    }

    pub fn rate_limited() -> Self {
        Self::new(vec![Behavior::RateLimited])
    }

    pub fn empty() -> Self {
        Self::new(vec![Behavior::Empty])
    }

    pub fn with_image(mime_type: &str, data: &str) -> Self {
        Self::new(vec![Behavior::Image {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        }])
    }

    /// Hold every response for `delay` (use with paused time).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn record(&self, system: Option<&str>, message: &str, model: &str, temperature: f64) -> Behavior {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.map(str::to_string),
            message: message.to_string(),
            model: model.to_string(),
            temperature,
        });
        let mut behaviors = self.behaviors.lock().unwrap();
        if behaviors.len() > 1 {
            behaviors.pop_front().unwrap()
        } else {
            behaviors.front().cloned().unwrap_or(Behavior::Empty)
        }
    }

    fn error(&self, behavior: &Behavior) -> Option<anyhow::Error> {
        match behavior {
            Behavior::Fail(message) => Some(anyhow::anyhow!("{message}")),
            Behavior::RateLimited => Some(
                LlmError::RateLimited {
                    provider: self.name().into(),
                    message: "quota".into(),
                }
                .into(),
            ),
            Behavior::Empty => Some(
                LlmError::EmptyResponse {
                    provider: self.name().into(),
                }
                .into(),
            ),
            Behavior::Reply(_) | Behavior::Image { .. } => None,
        }
    }
}

impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn chat_with_system<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let behavior = self.record(system_prompt, message, model, temperature);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if let Some(err) = self.error(&behavior) {
                return Err(err);
            }
            match behavior {
                Behavior::Reply(text) => Ok(text),
                _ => Ok(String::new()),
            }
        })
    }

    fn generate_image<'a>(
        &'a self,
        prompt: &'a str,
        model: &'a str,
        _aspect_ratio: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<GeneratedImage>>> + Send + 'a>> {
        Box::pin(async move {
            let behavior = self.record(None, prompt, model, 0.0);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if let Some(err) = self.error(&behavior) {
                return Err(err);
            }
            match behavior {
                Behavior::Image { mime_type, data } => Ok(Some(GeneratedImage { mime_type, data })),
                _ => Ok(None),
            }
        })
    }
}
