//! Logon autostart registry selection.
//!
//! One configured mechanism serves both the first-run check and the
//! registration. If the check consulted the run key while registration
//! created a scheduled task, the check would never see the task and
//! every start would register again.

use chiosco_core::bootstrap::{AutostartRegistry, RunKeyRegistry};
use chiosco_core::config::Mechanism;
use chiosco_core::error::BootstrapError;

use crate::registry::RegistryPolicyStore;
use crate::tasks::ScheduledTaskRegistry;

/// The autostart registry chosen by `bootstrap.mechanism`.
pub enum ConfiguredRegistry {
    RunKey(RunKeyRegistry<RegistryPolicyStore>),
    ScheduledTask(ScheduledTaskRegistry),
}

impl ConfiguredRegistry {
    pub fn from_mechanism(mechanism: Mechanism) -> Self {
        match mechanism {
            Mechanism::RunKey => {
                ConfiguredRegistry::RunKey(RunKeyRegistry::new(RegistryPolicyStore::new()))
            }
            Mechanism::ScheduledTask => {
                ConfiguredRegistry::ScheduledTask(ScheduledTaskRegistry::new())
            }
        }
    }

    /// Short name for status and doctor output.
    pub fn describe(&self) -> &'static str {
        match self {
            ConfiguredRegistry::RunKey(_) => "run key",
            ConfiguredRegistry::ScheduledTask(_) => "scheduled task",
        }
    }
}

impl AutostartRegistry for ConfiguredRegistry {
    fn is_registered(&self, app_id: &str) -> Result<bool, BootstrapError> {
        match self {
            ConfiguredRegistry::RunKey(registry) => registry.is_registered(app_id),
            ConfiguredRegistry::ScheduledTask(registry) => registry.is_registered(app_id),
        }
    }

    fn register(&mut self, app_id: &str, command: &str) -> Result<(), BootstrapError> {
        match self {
            ConfiguredRegistry::RunKey(registry) => registry.register(app_id, command),
            ConfiguredRegistry::ScheduledTask(registry) => registry.register(app_id, command),
        }
    }

    fn unregister(&mut self, app_id: &str) -> Result<(), BootstrapError> {
        match self {
            ConfiguredRegistry::RunKey(registry) => registry.unregister(app_id),
            ConfiguredRegistry::ScheduledTask(registry) => registry.unregister(app_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_mechanism_selects_its_registry() {
        let run_key = ConfiguredRegistry::from_mechanism(Mechanism::RunKey);
        assert_eq!(run_key.describe(), "run key");
        assert!(matches!(run_key, ConfiguredRegistry::RunKey(_)));

        let task = ConfiguredRegistry::from_mechanism(Mechanism::ScheduledTask);
        assert_eq!(task.describe(), "scheduled task");
        assert!(matches!(task, ConfiguredRegistry::ScheduledTask(_)));
    }
}
