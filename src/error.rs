use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for Campus Portal.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum PortalError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Provider ──────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Navigation ──────────────────────────────────────────────────────
    #[error("navigation: {0}")]
    Navigation(#[from] NavigationError),

    // ── Catalog ─────────────────────────────────────────────────────────
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("provider {provider} rate-limited (429): {message}")]
    RateLimited { provider: String, message: String },

    #[error("provider {provider} authentication failed")]
    Auth { provider: String },

    #[error("provider {provider} has no API key configured")]
    MissingApiKey { provider: String },

    #[error("provider {provider} returned no content")]
    EmptyResponse { provider: String },
}

impl LlmError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

// ─── Navigation errors ──────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("unknown view identifier: {0:?}")]
    InvalidView(String),
}

// ─── Catalog errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(String),

    #[error("duplicate department id: {0}")]
    DuplicateId(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for library-level results.
pub type Result<T> = std::result::Result<T, PortalError>;
