pub mod schema;

pub use schema::{AssetsConfig, Config, NavigationConfig, PortalConfig};
