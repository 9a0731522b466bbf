use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Serialize tests that touch process env vars. A panicking test must not
/// wedge the rest, so poisoning is ignored.
pub(super) fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sets or removes an env var and restores the previous value on drop.
pub(super) struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl EnvVarGuard {
    pub(super) fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        // SAFETY: Test-only helper. Callers hold `lock_env()`, serializing
        // concurrent env-var access.
        unsafe {
            std::env::set_var(key, value);
        }
        Self { key, previous }
    }

    pub(super) fn unset(key: &'static str) -> Self {
        let previous = std::env::var(key).ok();
        // SAFETY: Test-only helper. `lock_env()` is held by the caller.
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, previous }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // SAFETY: Test-only restoration while the caller still holds `lock_env()`.
        unsafe {
            match &self.previous {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }
}
