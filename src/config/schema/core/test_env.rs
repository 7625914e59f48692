use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

/// Every variable `apply_env_overrides` reads.
const CONFIG_VARS: [&str; 6] = [
    "CAMPUS_API_KEY",
    "GEMINI_API_KEY",
    "API_KEY",
    "CAMPUS_TEXT_MODEL",
    "CAMPUS_IMAGE_MODEL",
    "CAMPUS_TEMPERATURE",
];

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Exclusive, clean view of the config env vars for one test.
///
/// Holding it serializes env access across tests. On creation every config
/// variable is cleared; on drop the values seen before are put back.
pub(super) struct ScopedEnv {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    pub(super) fn clean() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = CONFIG_VARS
            .iter()
            .map(|&key| (key, std::env::var(key).ok()))
            .collect();
        for key in CONFIG_VARS {
            // SAFETY: ENV_LOCK is held, so no other test touches the env.
            unsafe { std::env::remove_var(key) };
        }
        Self { saved, _lock: lock }
    }

    pub(super) fn set(self, key: &'static str, value: &str) -> Self {
        // SAFETY: ENV_LOCK is held for the lifetime of `self`.
        unsafe { std::env::set_var(key, value) };
        self
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            // SAFETY: runs before `_lock` is released.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
