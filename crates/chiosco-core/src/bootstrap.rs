use crate::error::BootstrapError;
use crate::store::{PolicyStore, PolicyValue};

/// HKCU run key consulted and written by [`RunKeyRegistry`].
pub const RUN_KEY_PATH: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

/// One logon autostart mechanism.
///
/// The first-run check and the registration must go through the same
/// implementation: `ensure_registered_once` decides "first run" by
/// asking `is_registered`, so mixing mechanisms would re-register on
/// every start.
pub trait AutostartRegistry {
    /// Whether `app_id` is currently registered to start at logon.
    fn is_registered(&self, app_id: &str) -> Result<bool, BootstrapError>;

    /// Registers `command` to run at logon under `app_id`. Overwrites
    /// a stale registration for the same id.
    fn register(&mut self, app_id: &str, command: &str) -> Result<(), BootstrapError>;

    fn unregister(&mut self, app_id: &str) -> Result<(), BootstrapError>;
}

/// Logon registration through a string value in the HKCU run key.
pub struct RunKeyRegistry<S> {
    store: S,
}

impl<S: PolicyStore> RunKeyRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: PolicyStore> AutostartRegistry for RunKeyRegistry<S> {
    fn is_registered(&self, app_id: &str) -> Result<bool, BootstrapError> {
        Ok(self.store.get(RUN_KEY_PATH, app_id)?.is_some())
    }

    fn register(&mut self, app_id: &str, command: &str) -> Result<(), BootstrapError> {
        self.store
            .set(RUN_KEY_PATH, app_id, &PolicyValue::Text(command.to_string()))?;
        Ok(())
    }

    fn unregister(&mut self, app_id: &str) -> Result<(), BootstrapError> {
        self.store.delete(RUN_KEY_PATH, app_id)?;
        Ok(())
    }
}

/// Registers the application for logon autostart exactly once.
pub struct BootstrapManager<R> {
    registry: R,
}

impl<R: AutostartRegistry> BootstrapManager<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Registers `command` under `app_id` unless a registration already
    /// exists. Returns `Ok(true)` only when a new registration was
    /// written.
    ///
    /// When the registration check itself fails the state is unknown,
    /// and writing blindly could duplicate or clobber a registration
    /// made by an elevated sibling. The failure is logged and treated
    /// as "already registered"; the next start retries.
    pub fn ensure_registered_once(
        &mut self,
        app_id: &str,
        command: &str,
    ) -> Result<bool, BootstrapError> {
        let registered = match self.registry.is_registered(app_id) {
            Ok(registered) => registered,
            Err(err) => {
                crate::log_warn!("bootstrap: could not check autostart registration: {err}");
                return Ok(false);
            }
        };

        if registered {
            return Ok(false);
        }

        self.registry.register(app_id, command)?;
        crate::log_info!("bootstrap: registered '{app_id}' for logon autostart");
        Ok(true)
    }
}
