mod session;
pub mod types;

pub use session::ChatSession;
pub use types::{ChatMessage, IgnoreReason, MessageRole, SendOutcome, SessionScope};
