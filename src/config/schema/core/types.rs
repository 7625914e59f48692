use super::super::{AssetsConfig, NavigationConfig, PortalConfig};
use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub(crate) const CONFIG_DIR_NAME: &str = ".campus-portal";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    pub api_key: Option<String>,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f64,
    #[serde(default = "default_bio_temperature")]
    pub bio_temperature: f64,
    #[serde(default = "default_image_aspect_ratio")]
    pub image_aspect_ratio: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Optional TOML catalog replacing the built-in content fixtures
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub portal: PortalConfig,
}

fn default_text_model() -> String {
    "gemini-3-flash-preview".into()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".into()
}

fn default_chat_temperature() -> f64 {
    0.7
}

fn default_bio_temperature() -> f64 {
    0.6
}

fn default_image_aspect_ratio() -> String {
    "16:9".into()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.into()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());

        Self {
            config_path: home.join(CONFIG_DIR_NAME).join("config.toml"),
            api_key: None,
            text_model: default_text_model(),
            image_model: default_image_model(),
            chat_temperature: default_chat_temperature(),
            bio_temperature: default_bio_temperature(),
            image_aspect_ratio: default_image_aspect_ratio(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            catalog_path: None,
            navigation: NavigationConfig::default(),
            assets: AssetsConfig::default(),
            portal: PortalConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("chat_temperature", self.chat_temperature),
            ("bio_temperature", self.bio_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be within 0.0..=2.0 (got {value})"
                )));
            }
        }

        if self.text_model.trim().is_empty() || self.image_model.trim().is_empty() {
            return Err(ConfigError::Validation(
                "text_model and image_model must not be empty".into(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    /// Whether config carries a non-blank API key.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_behavior() {
        let config = Config::default();
        assert_eq!(config.text_model, "gemini-3-flash-preview");
        assert_eq!(config.image_model, "gemini-2.5-flash-image");
        assert!((config.chat_temperature - 0.7).abs() < f64::EPSILON);
        assert!((config.bio_temperature - 0.6).abs() < f64::EPSILON);
        assert_eq!(config.image_aspect_ratio, "16:9");
        assert_eq!(config.navigation.transition_ms, 300);
        assert_eq!(config.assets.prefetch_stagger_ms, 800);
        assert_eq!(config.portal.login_delay_ms, 1500);
        assert!(config.config_path.ends_with(".campus-portal/config.toml"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_temperature() {
        let config = Config {
            chat_temperature: 2.5,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("chat_temperature"));
    }

    #[test]
    fn validate_rejects_blank_model() {
        let config = Config {
            image_model: "  ".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
api_key = "k"

[navigation]
transition_ms = 50
"#,
        )
        .unwrap();
        assert_eq!(config.navigation.transition_ms, 50);
        assert_eq!(config.assets.prefetch_stagger_ms, 800);
        assert_eq!(config.text_model, "gemini-3-flash-preview");
        assert!(config.has_api_key());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = Config {
            api_key: Some("   ".into()),
            ..Config::default()
        };
        assert!(!config.has_api_key());
    }
}
