//! Client-side navigation: the closed set of views and the controller that
//! sequences transitions between them.

pub mod controller;
pub mod view;

pub use controller::{DEFAULT_TRANSITION, PendingNavigation, Phase, ViewController, ViewState};
pub use view::{NavParams, View};

#[cfg(test)]
mod tests;
