use crate::assets::AssetCache;
use crate::catalog::FacultyMember;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Who a session speaks for.
#[derive(Debug, Clone)]
pub enum SessionScope {
    /// The site-wide assistant widget.
    General,
    /// Assistant scoped to one faculty member. Generated bios are read from
    /// `bio_cache` (keyed by member name) when the record has none.
    Faculty {
        member: Box<FacultyMember>,
        bio_cache: AssetCache,
    },
}

impl SessionScope {
    pub fn faculty(member: FacultyMember, bio_cache: AssetCache) -> Self {
        Self::Faculty {
            member: Box::new(member),
            bio_cache,
        }
    }

    pub fn greeting(&self) -> String {
        match self {
            Self::General => {
                "Assalam-o-Alaikum! I'm your IUB Virtual Assistant. How can I help you today?"
                    .to_string()
            }
            Self::Faculty { member, .. } => format!(
                "Hello! I'm the research assistant for {}. Ask me anything about their academic background, research papers, or expertise!",
                member.name
            ),
        }
    }

    /// Shown when the service answered with no text.
    pub fn empty_reply(&self) -> &'static str {
        match self {
            Self::General => "I'm sorry, I couldn't process that request.",
            Self::Faculty { .. } => "I'm sorry, I couldn't find specific information on that.",
        }
    }

    /// Shown when the reply could not be produced at all.
    pub fn failure_reply(&self) -> &'static str {
        match self {
            Self::General => "I encountered an error. Please try again.",
            Self::Faculty { .. } => {
                "I encountered an error accessing the faculty records. Please try again."
            }
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::General => "general",
            Self::Faculty { member, .. } => &member.name,
        }
    }
}

/// Result of [`ChatSession::send`](super::ChatSession::send).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The exchange completed; carries the appended assistant message.
    Replied(ChatMessage),
    /// Nothing was sent and the transcript is unchanged.
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    BlankInput,
    RequestPending,
}
