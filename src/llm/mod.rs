//! Generative-service boundary: the `Provider` seam plus the Gemini REST
//! implementation behind it.

pub mod gemini;
pub mod http_client;
pub mod scrub;
pub mod traits;

pub use gemini::GeminiProvider;
pub use http_client::{DEFAULT_REQUEST_TIMEOUT, provider_client};
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::{GeneratedImage, Provider};
