//! Scoped environment overrides for integration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Restores the overridden variables when dropped.
///
/// Holds a process-wide lock so tests touching the environment run one at
/// a time.
pub struct EnvVarGuard {
    previous: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Applies each change, setting the variable when a value is given and
    /// removing it otherwise.
    pub fn set_many(changes: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = changes
            .iter()
            .map(|&(key, value)| {
                let saved = env::var_os(key);
                apply(key, value.map(OsString::from));
                (key, saved)
            })
            .collect();

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            apply(key, value);
        }
    }
}

fn apply(key: &str, value: Option<OsString>) {
    unsafe {
        // SAFETY: ENV_MUTEX serializes environment mutations in tests.
        match value {
            Some(new_value) => env::set_var(key, new_value),
            None => env::remove_var(key),
        }
    }
}
