//! Application root: owns the shared state and turns the current view into
//! a page model.

pub mod dispatch;

use crate::assets::{AssetCache, EnsureOutcome};
use crate::assistant::{AssistantGateway, GatewaySettings};
use crate::catalog::ContentCatalog;
use crate::chat::{ChatSession, SessionScope};
use crate::config::Config;
use crate::llm::{GeminiProvider, Provider};
use crate::navigation::{View, ViewController};
use crate::pages::{
    AcademicsPage, AdmissionsWizard, DepartmentDetail, DetailContext, HomePage, PortalPage,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// What is on screen for the committed view.
#[derive(Debug)]
pub enum Page {
    Home(HomePage),
    Admissions(AdmissionsWizard),
    Academics(AcademicsPage),
    Portal(PortalPage),
    DepartmentDetail(DepartmentDetail),
}

/// Timing knobs the pages need from configuration.
#[derive(Debug, Clone, Copy)]
struct PageTiming {
    prefetch_stagger: Duration,
    prefetch_on_home: bool,
    login_delay: Duration,
}

/// Owns every process-wide structure and hands pages the handles they need.
#[derive(Debug)]
pub struct App {
    catalog: Arc<ContentCatalog>,
    nav: ViewController,
    images: AssetCache,
    bios: AssetCache,
    gateway: AssistantGateway,
    assistant: ChatSession,
    timing: PageTiming,
}

impl App {
    pub fn new(config: &Config, catalog: ContentCatalog, provider: Arc<dyn Provider>) -> Self {
        let gateway = AssistantGateway::new(provider, GatewaySettings::from_config(config));
        let assistant = ChatSession::new(SessionScope::General, gateway.clone());
        Self {
            catalog: Arc::new(catalog),
            nav: ViewController::new(config.navigation.transition_delay()),
            images: AssetCache::new("department-images"),
            bios: AssetCache::new("faculty-bios"),
            gateway,
            assistant,
            timing: PageTiming {
                prefetch_stagger: config.assets.prefetch_stagger(),
                prefetch_on_home: config.assets.prefetch_on_home,
                login_delay: config.portal.login_delay(),
            },
        }
    }

    /// Build the app against the Gemini API using `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = ContentCatalog::load(config.catalog_path.as_deref())
            .context("Failed to load content catalog")?;
        let provider = GeminiProvider::new(config.api_key.as_deref())
            .with_base_url(config.api_base_url.as_str())
            .with_timeout_secs(config.request_timeout_secs);
        if !provider.has_api_key() {
            tracing::warn!("no API key configured; assistant replies will use fallback text");
        }
        Ok(Self::new(config, catalog, Arc::new(provider)))
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn navigation(&self) -> &ViewController {
        &self.nav
    }

    pub fn images(&self) -> &AssetCache {
        &self.images
    }

    pub fn bios(&self) -> &AssetCache {
        &self.bios
    }

    pub fn gateway(&self) -> &AssistantGateway {
        &self.gateway
    }

    /// The site-wide assistant widget session.
    pub fn assistant(&self) -> &ChatSession {
        &self.assistant
    }

    pub fn home_page(&self) -> HomePage {
        HomePage::new(
            Arc::clone(&self.catalog),
            self.images.clone(),
            self.gateway.clone(),
            self.timing.prefetch_stagger,
        )
    }

    pub fn academics_page(&self) -> AcademicsPage {
        AcademicsPage::new(Arc::clone(&self.catalog))
    }

    fn detail_context(&self) -> DetailContext {
        DetailContext {
            catalog: Arc::clone(&self.catalog),
            images: self.images.clone(),
            bios: self.bios.clone(),
            gateway: self.gateway.clone(),
        }
    }

    /// Run the home page's mount hook: staggered image prefetch.
    pub fn mount_home(&self) -> Vec<JoinHandle<EnsureOutcome>> {
        if self.timing.prefetch_on_home {
            self.home_page().prefetch_images()
        } else {
            Vec::new()
        }
    }

    /// Page model for the committed view.
    ///
    /// `research` and `faculty` have no page of their own and show Home.
    pub fn render(&self) -> Page {
        let state = self.nav.snapshot();
        match state.current {
            View::Home | View::Research | View::Faculty => Page::Home(self.home_page()),
            View::Admissions => Page::Admissions(AdmissionsWizard::default()),
            View::Academics => Page::Academics(self.academics_page()),
            View::Portal => Page::Portal(PortalPage::new(self.timing.login_delay)),
            View::DepartmentDetail => Page::DepartmentDetail(DepartmentDetail::resolve(
                &self.detail_context(),
                state.selected_entity_id.as_deref(),
            )),
        }
    }
}
