//! Environment guards for tests that touch driver variables or `PATH`.
//!
//! Every mutation happens under a global re-entrant mutex and returns an RAII
//! guard restoring the prior value on drop. [`EnvScope`] keeps the lock for
//! its whole lifetime so a test can point `PATH` at a fake front-end without
//! other tests interleaving.
//!
//! # Examples
//!
//! ```
//! use slang_driver_test_helpers::env;
//! use std::path::Path;
//!
//! let dir = Path::new("/opt/fake-slang/bin");
//! let _scope = env::scope_with(|lock| vec![lock.prepend_path(dir)]);
//! let path = std::env::var_os("PATH").unwrap_or_default();
//! assert_eq!(std::env::split_paths(&path).next().as_deref(), Some(dir));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held during restoration.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_MUTEX` is held during restoration.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Handle proving the global environment lock is held.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Sets `key` to `value` while the lock is held.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        let key = key.into();
        let original = env::var_os(&key);
        // SAFETY: the caller holds `ENV_MUTEX` through `self`.
        unsafe { env::set_var(&key, value) };
        EnvVarGuard { key, original }
    }

    /// Puts `dir` at the front of `PATH`.
    pub fn prepend_path(&self, dir: &Path) -> EnvVarGuard {
        let mut paths = vec![dir.to_path_buf()];
        if let Some(existing) = env::var_os("PATH") {
            paths.extend(env::split_paths(&existing));
        }
        let joined = env::join_paths(paths).unwrap_or_else(|_| dir.as_os_str().to_owned());
        self.set_var("PATH", joined)
    }
}

/// Holds the environment lock together with the guards created under it.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvVarLock,
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore while the lock is still held.
        drop(std::mem::take(&mut self.guards));
    }
}

fn lock() -> EnvVarLock {
    EnvVarLock {
        _guard: ENV_MUTEX.lock(),
    }
}

/// Builds a scope by running `builder` while holding the lock.
pub fn scope_with<F>(builder: F) -> EnvScope
where
    F: FnOnce(&EnvVarLock) -> Vec<EnvVarGuard>,
{
    let lock = lock();
    let guards = builder(&lock);
    EnvScope {
        guards,
        _lock: lock,
    }
}
