use crate::assets::{AssetCache, EnsureOutcome};
use crate::assistant::AssistantGateway;
use crate::catalog::{ContentCatalog, Department, NewsItem, StatItem};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Landing page: stat tiles, news and the department cards.
#[derive(Debug, Clone)]
pub struct HomePage {
    catalog: Arc<ContentCatalog>,
    images: AssetCache,
    gateway: AssistantGateway,
    stagger: Duration,
}

impl HomePage {
    pub fn new(
        catalog: Arc<ContentCatalog>,
        images: AssetCache,
        gateway: AssistantGateway,
        stagger: Duration,
    ) -> Self {
        Self {
            catalog,
            images,
            gateway,
            stagger,
        }
    }

    pub fn stats(&self) -> &[StatItem] {
        self.catalog.stats()
    }

    pub fn news(&self) -> &[NewsItem] {
        self.catalog.news()
    }

    pub fn departments(&self) -> &[Department] {
        self.catalog.departments()
    }

    /// Generated image if cached, otherwise the fixture image.
    pub fn department_image(&self, id: &str) -> Option<String> {
        department_image(&self.catalog, &self.images, id)
    }

    pub fn is_generating(&self, id: &str) -> bool {
        self.images.is_in_flight(id)
    }

    /// Queue image generation for every department without a cached image.
    ///
    /// The n-th missing department starts `n × stagger` after mount. Each
    /// task goes through [`AssetCache::ensure`], so repeated mounts never
    /// duplicate a generation that is already cached or running.
    pub fn prefetch_images(&self) -> Vec<JoinHandle<EnsureOutcome>> {
        let missing: Vec<&Department> = self
            .catalog
            .departments()
            .iter()
            .filter(|dept| !self.images.contains(&dept.id))
            .collect();
        tracing::debug!(missing = missing.len(), "prefetching department images");

        missing
            .into_iter()
            .zip(0u32..)
            .map(|(dept, index)| {
                let images = self.images.clone();
                let gateway = self.gateway.clone();
                let delay = self.stagger * index;
                let id = dept.id.clone();
                let name = dept.name.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    images
                        .ensure(&id, || async move { gateway.request_image(&name).await })
                        .await
                })
            })
            .collect()
    }

    /// Per-card "generate" action.
    pub async fn generate_image(&self, id: &str) -> EnsureOutcome {
        generate_department_image(&self.catalog, &self.images, &self.gateway, id).await
    }
}

pub(super) fn department_image(
    catalog: &ContentCatalog,
    images: &AssetCache,
    id: &str,
) -> Option<String> {
    images
        .get(id)
        .map(|asset| asset.to_string())
        .or_else(|| catalog.department(id).map(|dept| dept.image.clone()))
}

pub(super) async fn generate_department_image(
    catalog: &ContentCatalog,
    images: &AssetCache,
    gateway: &AssistantGateway,
    id: &str,
) -> EnsureOutcome {
    let Some(dept) = catalog.department(id) else {
        tracing::warn!(id, "image requested for unknown department");
        return EnsureOutcome::Failed;
    };
    images
        .ensure(id, || gateway.request_image(&dept.name))
        .await
}
