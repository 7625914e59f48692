use crate::error::NavigationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString, IntoStaticStr};

/// Every full-screen page the site can show.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum View {
    Home,
    Admissions,
    Academics,
    Portal,
    DepartmentDetail,
    Research,
    Faculty,
}

impl View {
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::Admissions,
        Self::Academics,
        Self::Portal,
        Self::DepartmentDetail,
        Self::Research,
        Self::Faculty,
    ];

    /// Strict parse of a view token such as `department-detail`.
    pub fn parse(token: &str) -> Result<Self, NavigationError> {
        Self::from_str(token).map_err(|_| NavigationError::InvalidView(token.to_string()))
    }

    /// Views reachable through a `#/<view>` location fragment.
    ///
    /// `research` and `faculty` appear in the menu but have no page of their
    /// own, so deep links to them are ignored.
    pub fn is_routable(self) -> bool {
        !matches!(self, Self::Research | Self::Faculty)
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Location fragment for this view (`#/academics`).
    pub fn fragment(self) -> String {
        format!("#/{}", self.as_str())
    }

    /// Map a location fragment to a routable view; anything else is `None`.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let token = fragment.strip_prefix('#').unwrap_or(fragment);
        let token = token.strip_prefix('/').unwrap_or(token);
        Self::from_str(token).ok().filter(|view| view.is_routable())
    }
}

/// Parameter bag carried by a navigation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavParams {
    pub id: Option<String>,
}

impl NavParams {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }

    /// Entity id, ignoring empty strings.
    pub fn entity_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}
