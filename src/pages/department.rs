use super::home::department_image;
use crate::assets::{AssetCache, EnsureOutcome};
use crate::assistant::AssistantGateway;
use crate::catalog::{ContentCatalog, Department, FacultyMember};
use crate::chat::{ChatSession, SessionScope};
use crate::navigation::{NavParams, View, ViewController};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Shared handles a department page needs.
#[derive(Debug, Clone)]
pub struct DetailContext {
    pub catalog: Arc<ContentCatalog>,
    pub images: AssetCache,
    pub bios: AssetCache,
    pub gateway: AssistantGateway,
}

/// Outcome of resolving the selected department id.
#[derive(Debug)]
pub enum DepartmentDetail {
    Found(Box<DepartmentPage>),
    NotFound(DepartmentNotFound),
}

impl DepartmentDetail {
    pub fn resolve(ctx: &DetailContext, selected_id: Option<&str>) -> Self {
        match selected_id.and_then(|id| ctx.catalog.department(id)) {
            Some(department) => Self::Found(Box::new(DepartmentPage {
                department: department.clone(),
                ctx: ctx.clone(),
                profile: None,
            })),
            None => {
                tracing::debug!(id = selected_id.unwrap_or("-"), "department not found");
                Self::NotFound(DepartmentNotFound {
                    requested_id: selected_id.map(str::to_string),
                })
            }
        }
    }
}

/// Non-fatal missing-department state with a way back to the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentNotFound {
    pub requested_id: Option<String>,
}

impl DepartmentNotFound {
    pub const TITLE: &'static str = "Department Not Found";
    pub const MESSAGE: &'static str =
        "The department you are looking for might have been moved or renamed.";
    pub const ACTION: &'static str = "Browse Academics";

    /// Message naming the id that failed to resolve, when there was one.
    pub fn detail(&self) -> String {
        match self.requested_id.as_deref() {
            Some(id) => format!("No department with id {id:?}. {}", Self::MESSAGE),
            None => format!("No department was selected. {}", Self::MESSAGE),
        }
    }

    pub fn recover(&self, nav: &ViewController) {
        nav.navigate(View::Academics, NavParams::none());
    }
}

/// One department with an optional open faculty profile.
#[derive(Debug)]
pub struct DepartmentPage {
    department: Department,
    ctx: DetailContext,
    profile: Option<FacultyProfile>,
}

impl DepartmentPage {
    pub fn department(&self) -> &Department {
        &self.department
    }

    pub fn header_image(&self) -> String {
        department_image(&self.ctx.catalog, &self.ctx.images, &self.department.id)
            .unwrap_or_else(|| self.department.image.clone())
    }

    pub fn back(&self, nav: &ViewController) {
        nav.navigate(View::Academics, NavParams::none());
    }

    pub fn profile(&self) -> Option<&FacultyProfile> {
        self.profile.as_ref()
    }

    pub fn profile_mut(&mut self) -> Option<&mut FacultyProfile> {
        self.profile.as_mut()
    }

    /// Open a faculty profile with a fresh assistant session.
    ///
    /// Members without a fixture bio get one generated in the background
    /// unless the bio cache already holds it or is producing it.
    pub fn select_faculty(&mut self, name: &str) -> Option<&mut FacultyProfile> {
        let Some(member) = self.department.faculty_member(name).cloned() else {
            tracing::warn!(department = %self.department.id, name, "unknown faculty member");
            return None;
        };

        let chat = ChatSession::new(
            SessionScope::faculty(member.clone(), self.ctx.bios.clone()),
            self.ctx.gateway.clone(),
        );

        let bio_task = (member.fixture_bio().is_none() && !self.ctx.bios.contains(&member.name))
            .then(|| {
                let gateway = self.ctx.gateway.clone();
                let subject = member.clone();
                self.ctx.bios.spawn_ensure(member.name.clone(), move || async move {
                    gateway
                        .request_generated_bio(
                            &subject.name,
                            &subject.designation,
                            &subject.qualification,
                            &subject.research_interests,
                            &subject.publications,
                        )
                        .await
                })
            });

        self.profile = Some(FacultyProfile {
            member,
            chat,
            bios: self.ctx.bios.clone(),
            bio_task,
        });
        self.profile.as_mut()
    }

    /// Close the profile; its assistant session is discarded.
    pub fn close_profile(&mut self) {
        self.profile = None;
    }
}

/// An open faculty profile.
#[derive(Debug)]
pub struct FacultyProfile {
    member: FacultyMember,
    chat: ChatSession,
    bios: AssetCache,
    bio_task: Option<JoinHandle<EnsureOutcome>>,
}

impl FacultyProfile {
    pub fn member(&self) -> &FacultyMember {
        &self.member
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn avatar_url(&self) -> String {
        self.member.avatar_url()
    }

    /// Fixture bio, else a generated one once available.
    pub fn bio(&self) -> Option<String> {
        self.member
            .fixture_bio()
            .map(str::to_string)
            .or_else(|| self.bios.get(&self.member.name).map(|b| b.to_string()))
    }

    /// Bio text for display, with placeholder copy while none exists.
    pub fn display_bio(&self) -> String {
        self.bio().unwrap_or_else(|| {
            format!(
                "Academic biography details are being updated. Dr. {} has a distinguished career in research and teaching.",
                self.member.surname()
            )
        })
    }

    pub fn is_bio_generating(&self) -> bool {
        self.bios.is_in_flight(&self.member.name)
    }

    /// Wait for a background bio generation started by this profile.
    pub async fn wait_for_bio(&mut self) -> Option<String> {
        if let Some(task) = self.bio_task.take()
            && let Err(err) = task.await
        {
            tracing::error!(member = %self.member.name, error = %err, "bio generation task failed");
        }
        self.bio()
    }
}
