use super::view::{NavParams, View};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Fixed delay between a navigation request and its commit.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

/// A navigation that has been requested but not yet committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    pub target: View,
    pub params: NavParams,
}

/// Two-state view of the controller's machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle(View),
    Transitioning { current: View, target: View },
}

/// Everything the render layer needs to decide what is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub current: View,
    pub pending: Option<PendingNavigation>,
    /// Last entity id carried by a navigation; never cleared by parameter-less ones.
    pub selected_entity_id: Option<String>,
    /// Vertical scroll position reported by the render layer; reset on commit.
    pub scroll_offset: u32,
}

impl ViewState {
    /// Transitioning exactly while a target is pending.
    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn phase(&self) -> Phase {
        match &self.pending {
            Some(pending) => Phase::Transitioning {
                current: self.current,
                target: pending.target,
            },
            None => Phase::Idle(self.current),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current: View::Home,
            pending: None,
            selected_entity_id: None,
            scroll_offset: 0,
        }
    }
}

struct Inner {
    state: watch::Sender<ViewState>,
    transition: Duration,
    /// Bumped by every request; a commit only applies if its epoch is still current.
    epoch: AtomicU64,
    commit_task: Mutex<Option<JoinHandle<()>>>,
}

/// Single authority for what is on screen.
///
/// Navigation is two-phase: [`navigate`](Self::navigate) marks the target
/// pending immediately and a timer commits it after the transition delay.
/// A newer request supersedes an older one still in flight: the older timer
/// is cancelled, so the most recent request always wins.
#[derive(Clone)]
pub struct ViewController {
    inner: Arc<Inner>,
}

impl ViewController {
    pub fn new(transition: Duration) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            inner: Arc::new(Inner {
                state,
                transition,
                epoch: AtomicU64::new(0),
                commit_task: Mutex::new(None),
            }),
        }
    }

    pub fn transition_delay(&self) -> Duration {
        self.inner.transition
    }

    pub fn snapshot(&self) -> ViewState {
        self.inner.state.borrow().clone()
    }

    pub fn current(&self) -> View {
        self.inner.state.borrow().current
    }

    pub fn is_transitioning(&self) -> bool {
        self.inner.state.borrow().is_transitioning()
    }

    pub fn selected_entity_id(&self) -> Option<String> {
        self.inner.state.borrow().selected_entity_id.clone()
    }

    /// Receiver the render layer watches for state changes.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.inner.state.subscribe()
    }

    /// Request a transition to `target`.
    ///
    /// Navigating to the view already on screen still runs the full
    /// transition. Must be called from within a Tokio runtime to get the
    /// deferred commit; without one the commit is applied immediately.
    pub fn navigate(&self, target: View, params: NavParams) {
        // Held across the epoch bump, state write and task swap so that
        // concurrent requests are applied in one total order.
        let mut commit_task = self.lock_commit_task();
        let epoch = self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.send_modify(|state| {
            state.pending = Some(PendingNavigation { target, params });
        });
        tracing::debug!(view = %target, epoch, "navigation requested");

        if let Some(previous) = commit_task.take() {
            previous.abort();
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(view = %target, "no async runtime; committing navigation immediately");
            Self::commit(&self.inner, epoch);
            return;
        };

        let inner = Arc::clone(&self.inner);
        let delay = self.inner.transition;
        *commit_task = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            Self::commit(&inner, epoch);
        }));
    }

    fn lock_commit_task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner
            .commit_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Lenient navigation from an untyped token.
    ///
    /// Unknown tokens (and the empty token used by the home link) land on
    /// `home`, mirroring the render fallback.
    pub fn navigate_token(&self, token: &str, params: NavParams) -> View {
        let target = if token.is_empty() {
            View::Home
        } else {
            View::parse(token).unwrap_or_else(|err| {
                tracing::warn!(%err, "falling back to home view");
                View::Home
            })
        };
        self.navigate(target, params);
        target
    }

    /// Apply a browser location change.
    ///
    /// A recognized fragment sets the current view directly, bypassing the
    /// transition and cancelling any pending navigation. Unrecognized
    /// fragments are ignored. Returns the view applied, if any.
    pub fn on_location_changed(&self, fragment: &str) -> Option<View> {
        let Some(view) = View::from_fragment(fragment) else {
            tracing::debug!(fragment, "ignoring unrecognized location fragment");
            return None;
        };

        let mut commit_task = self.lock_commit_task();
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = commit_task.take() {
            task.abort();
        }
        self.inner.state.send_modify(|state| {
            state.pending = None;
            state.current = view;
        });
        drop(commit_task);
        tracing::debug!(view = %view, "location fragment applied");
        Some(view)
    }

    /// Record the render layer's scroll position.
    pub fn set_scroll_offset(&self, offset: u32) {
        self.inner.state.send_if_modified(|state| {
            let changed = state.scroll_offset != offset;
            state.scroll_offset = offset;
            changed
        });
    }

    /// Wait until no navigation is pending.
    pub async fn settled(&self) -> ViewState {
        let mut rx = self.subscribe();
        if let Ok(state) = rx.wait_for(|state| !state.is_transitioning()).await {
            return state.clone();
        }
        self.snapshot()
    }

    fn commit(inner: &Inner, epoch: u64) {
        inner.state.send_if_modified(|state| {
            if inner.epoch.load(Ordering::SeqCst) != epoch {
                return false;
            }
            let Some(pending) = state.pending.take() else {
                return false;
            };

            state.current = pending.target;
            if let Some(id) = pending.params.entity_id() {
                state.selected_entity_id = Some(id.to_string());
            }
            state.scroll_offset = 0;
            tracing::info!(
                view = %state.current,
                selected = state.selected_entity_id.as_deref().unwrap_or("-"),
                "navigation committed"
            );
            true
        });
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION)
    }
}

impl std::fmt::Debug for ViewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewController")
            .field("state", &*self.inner.state.borrow())
            .field("transition", &self.inner.transition)
            .finish_non_exhaustive()
    }
}
