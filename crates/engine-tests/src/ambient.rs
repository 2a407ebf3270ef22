use std::{env, ffi::OsString};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

static AMBIENT_LOCK: Mutex<()> = Mutex::const_new(());

/// Sets the process-wide `TZ` for as long as the guard lives and restores the
/// previous value on drop. Guards are serialized through a global lock, so at most
/// one scenario changes the ambient zone at a time.
pub struct AmbientZoneGuard {
    previous: Option<OsString>,
    _lock: MutexGuard<'static, ()>,
}

impl AmbientZoneGuard {
    /// For async scenarios; the guard may be held across `.await`.
    pub async fn enter(zone: &str) -> Self {
        Self::install(AMBIENT_LOCK.lock().await, zone)
    }

    /// For synchronous tests. Must not be called from inside a runtime.
    pub fn set(zone: &str) -> Self {
        Self::install(AMBIENT_LOCK.blocking_lock(), zone)
    }

    fn install(lock: MutexGuard<'static, ()>, zone: &str) -> Self {
        let previous = env::var_os("TZ");
        // SAFETY: all writers hold AMBIENT_LOCK, and the scenarios read no other
        // environment variables while a guard is alive.
        unsafe { env::set_var("TZ", zone) };
        debug!("Ambient zone set to {}", zone);
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for AmbientZoneGuard {
    fn drop(&mut self) {
        // SAFETY: see `install`; the lock is still held here.
        unsafe {
            match self.previous.take() {
                Some(value) => env::set_var("TZ", value),
                None => env::remove_var("TZ"),
            }
        }
    }
}
