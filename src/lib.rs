#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod assets;
pub mod assistant;
pub mod catalog;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod navigation;
pub mod pages;
pub mod ui;

pub use app::{App, Page};
pub use assets::{Asset, AssetCache, EnsureOutcome};
pub use assistant::AssistantGateway;
pub use catalog::ContentCatalog;
pub use chat::{ChatSession, SessionScope};
pub use config::Config;
pub use error::PortalError;
pub use navigation::{NavParams, View, ViewController, ViewState};
