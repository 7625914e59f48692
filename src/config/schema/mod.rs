mod core;
mod sections;

pub use core::{Config, DEFAULT_API_BASE_URL};
pub use sections::{AssetsConfig, NavigationConfig, PortalConfig};
