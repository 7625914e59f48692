use super::types::{ChatMessage, IgnoreReason, SendOutcome, SessionScope};
use crate::assistant::{AssistantGateway, prompts};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Transcript {
    messages: Vec<ChatMessage>,
    pending: bool,
}

struct SessionInner {
    id: Uuid,
    scope: SessionScope,
    gateway: AssistantGateway,
    transcript: Mutex<Transcript>,
}

/// One independent conversation thread.
///
/// At most one request is outstanding per session, so replies are appended
/// in send order. Clones share the same transcript.
#[derive(Clone)]
pub struct ChatSession {
    inner: Arc<SessionInner>,
}

impl ChatSession {
    /// Open a session whose transcript starts with the scope's greeting.
    pub fn new(scope: SessionScope, gateway: AssistantGateway) -> Self {
        let greeting = ChatMessage::assistant(scope.greeting());
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, scope = scope.label(), "chat session opened");
        Self {
            inner: Arc::new(SessionInner {
                id,
                scope,
                gateway,
                transcript: Mutex::new(Transcript {
                    messages: vec![greeting],
                    pending: false,
                }),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn scope(&self) -> &SessionScope {
        &self.inner.scope
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.transcript().messages.clone()
    }

    pub fn len(&self) -> usize {
        self.transcript().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript().messages.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.transcript().pending
    }

    fn transcript(&self) -> MutexGuard<'_, Transcript> {
        self.inner
            .transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Send `text` and wait for the assistant's reply.
    ///
    /// Blank input, or input while a reply is pending, is ignored without
    /// touching the transcript. The exchange runs on its own task, so the
    /// reply is still appended if this future is dropped.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let text = text.trim();
        {
            let mut transcript = self.transcript();
            if text.is_empty() {
                return SendOutcome::Ignored(IgnoreReason::BlankInput);
            }
            if transcript.pending {
                tracing::debug!(session = %self.inner.id, "send ignored while reply pending");
                return SendOutcome::Ignored(IgnoreReason::RequestPending);
            }
            transcript.messages.push(ChatMessage::user(text));
            transcript.pending = true;
        }

        let session = self.clone();
        let user_text = text.to_string();
        let exchange = tokio::spawn(async move {
            let content = session.reply_for(&user_text).await;
            session.finish(content)
        });

        match exchange.await {
            Ok(reply) => SendOutcome::Replied(reply),
            Err(err) => {
                tracing::error!(session = %self.inner.id, error = %err, "chat exchange task failed");
                SendOutcome::Replied(self.finish(self.inner.scope.failure_reply().to_string()))
            }
        }
    }

    async fn reply_for(&self, user_text: &str) -> String {
        let scope = &self.inner.scope;
        let system = match scope {
            SessionScope::General => None,
            SessionScope::Faculty { member, bio_cache } => {
                let generated = bio_cache.get(&member.name);
                match prompts::faculty_persona(member, generated.as_deref()) {
                    Ok(persona) => Some(persona),
                    Err(err) => {
                        tracing::error!(member = %member.name, error = %err, "failed to build faculty persona");
                        return scope.failure_reply().to_string();
                    }
                }
            }
        };

        let reply = self
            .inner
            .gateway
            .request_reply(user_text, system.as_deref())
            .await;
        if reply.trim().is_empty() {
            scope.empty_reply().to_string()
        } else {
            reply
        }
    }

    fn finish(&self, content: String) -> ChatMessage {
        let message = ChatMessage::assistant(content);
        let mut transcript = self.transcript();
        transcript.messages.push(message.clone());
        transcript.pending = false;
        message
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let transcript = self.transcript();
        f.debug_struct("ChatSession")
            .field("id", &self.inner.id)
            .field("scope", &self.inner.scope.label())
            .field("messages", &transcript.messages.len())
            .field("pending", &transcript.pending)
            .finish()
    }
}
