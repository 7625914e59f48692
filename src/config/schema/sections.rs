use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Delay between a navigation request and its commit (default: 300ms)
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

fn default_transition_ms() -> u64 {
    300
}

impl NavigationConfig {
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Spacing between staggered image generations on the home page (default: 800ms)
    #[serde(default = "default_prefetch_stagger_ms")]
    pub prefetch_stagger_ms: u64,
    /// Generate department images when the home page mounts (default: true)
    #[serde(default = "default_true")]
    pub prefetch_on_home: bool,
}

fn default_prefetch_stagger_ms() -> u64 {
    800
}

fn default_true() -> bool {
    true
}

impl AssetsConfig {
    pub fn prefetch_stagger(&self) -> Duration {
        Duration::from_millis(self.prefetch_stagger_ms)
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            prefetch_stagger_ms: default_prefetch_stagger_ms(),
            prefetch_on_home: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Simulated sign-in latency for the student portal mock (default: 1500ms)
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,
}

fn default_login_delay_ms() -> u64 {
    1500
}

impl PortalConfig {
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: default_login_delay_ms(),
        }
    }
}
