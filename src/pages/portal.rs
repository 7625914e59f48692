use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    LoggedOut,
    Authenticating,
    LoggedIn,
}

/// Student portal with a simulated sign-in.
#[derive(Debug, Clone)]
pub struct PortalPage {
    state: Arc<Mutex<LoginState>>,
    delay: Duration,
}

impl PortalPage {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(LoginState::LoggedOut)),
            delay,
        }
    }

    pub fn state(&self) -> LoginState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start signing in; the session is considered authenticated once the
    /// delay elapses. Ignored unless logged out. Returns the resulting state.
    pub async fn login(&self) -> LoginState {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state != LoginState::LoggedOut {
                return *state;
            }
            *state = LoginState::Authenticating;
        }
        tracing::debug!(delay = ?self.delay, "portal login started");

        let state = Arc::clone(&self.state);
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            *state.lock().unwrap_or_else(PoisonError::into_inner) = LoginState::LoggedIn;
        });
        if let Err(err) = task.await {
            tracing::error!(error = %err, "portal login task failed");
            *self.state.lock().unwrap_or_else(PoisonError::into_inner) = LoginState::LoggedOut;
        }
        self.state()
    }
}
