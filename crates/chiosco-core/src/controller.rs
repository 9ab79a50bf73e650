use crate::catalogue::{Target, Toggle, ToggleCatalogue};
use crate::error::PolicyError;
use crate::store::{PolicyStore, PolicyValue};

/// Control over the live shell tray window.
///
/// Changes made through this trait are not durable: the shell resets
/// its window state on restart and at the next logon.
pub trait ShellTray {
    fn show(&mut self) -> Result<(), PolicyError>;

    fn hide(&mut self) -> Result<(), PolicyError>;

    fn is_visible(&self) -> Result<bool, PolicyError>;
}

/// Outcome of a successfully applied toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub toggle: Toggle,
    pub value: u32,
    /// Human label for the new state ("Active", "Hidden", ...).
    pub label: &'static str,
    /// False for live-window toggles that revert on shell restart.
    pub durable: bool,
}

/// Current state of a toggle as read back from its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleState {
    Configured { value: u32, label: &'static str },
    /// No value was ever written; the shell default applies.
    Unconfigured,
}

/// Applies toggles to their targets and reads them back.
///
/// Durable toggles become DWORD values under their catalogue path;
/// the live taskbar toggle drives the tray window directly. The value
/// domain is checked again here so a front-end that skips validation
/// cannot produce an out-of-range write.
pub struct ToggleController<S, T> {
    catalogue: ToggleCatalogue,
    store: S,
    tray: T,
}

impl<S: PolicyStore, T: ShellTray> ToggleController<S, T> {
    pub fn new(catalogue: ToggleCatalogue, store: S, tray: T) -> Self {
        Self {
            catalogue,
            store,
            tray,
        }
    }

    pub fn catalogue(&self) -> &ToggleCatalogue {
        &self.catalogue
    }

    /// Applies `value` to `toggle` and reports the resulting state.
    pub fn set(&mut self, toggle: Toggle, value: u32) -> Result<Applied, PolicyError> {
        let entry = self.catalogue.entry(toggle);
        if !entry.domain.contains(&value) {
            return Err(PolicyError::ValueOutOfDomain {
                toggle,
                value,
                allowed: entry.domain,
            });
        }

        match entry.target {
            Target::Policy { path, value: name } => {
                self.store.set(path, name, &PolicyValue::Dword(value))?;
            }
            Target::TrayWindow => {
                if value == 0 {
                    self.tray.show()?;
                } else {
                    self.tray.hide()?;
                }
            }
        }

        Ok(Applied {
            toggle,
            value,
            label: entry.label(value),
            durable: entry.is_durable(),
        })
    }

    /// Reads the current state of `toggle` from its target.
    pub fn current(&self, toggle: Toggle) -> Result<ToggleState, PolicyError> {
        let entry = self.catalogue.entry(toggle);

        match entry.target {
            Target::Policy { path, value: name } => match self.store.get(path, name)? {
                None => Ok(ToggleState::Unconfigured),
                Some(PolicyValue::Dword(value)) => Ok(ToggleState::Configured {
                    value,
                    label: entry.label(value),
                }),
                Some(other) => Err(PolicyError::KindMismatch {
                    path: path.to_string(),
                    name: name.to_string(),
                    expected: "number",
                    found: other.kind(),
                }),
            },
            Target::TrayWindow => {
                let value = if self.tray.is_visible()? { 0 } else { 1 };
                Ok(ToggleState::Configured {
                    value,
                    label: entry.label(value),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{POLICY_EXPLORER_PATH, POLICY_SYSTEM_PATH};
    use crate::store::MemoryPolicyStore;

    /// Tray double that records calls and tracks visibility.
    struct FakeTray {
        visible: bool,
        calls: Vec<&'static str>,
    }

    impl FakeTray {
        fn new() -> Self {
            Self {
                visible: true,
                calls: Vec::new(),
            }
        }
    }

    impl ShellTray for FakeTray {
        fn show(&mut self) -> Result<(), PolicyError> {
            self.visible = true;
            self.calls.push("show");
            Ok(())
        }

        fn hide(&mut self) -> Result<(), PolicyError> {
            self.visible = false;
            self.calls.push("hide");
            Ok(())
        }

        fn is_visible(&self) -> Result<bool, PolicyError> {
            Ok(self.visible)
        }
    }

    fn controller() -> ToggleController<MemoryPolicyStore, FakeTray> {
        ToggleController::new(
            ToggleCatalogue::standard(),
            MemoryPolicyStore::new(),
            FakeTray::new(),
        )
    }

    #[test]
    fn durable_toggle_round_trips_through_the_store() {
        let mut controller = controller();

        let applied = controller.set(Toggle::TaskManager, 1).unwrap();

        assert_eq!(applied.label, "Not Active");
        assert!(applied.durable);
        assert_eq!(
            controller
                .store
                .get(POLICY_SYSTEM_PATH, "DisableTaskMgr")
                .unwrap(),
            Some(PolicyValue::Dword(1))
        );
        assert_eq!(
            controller.current(Toggle::TaskManager).unwrap(),
            ToggleState::Configured {
                value: 1,
                label: "Not Active"
            }
        );
    }

    #[test]
    fn zero_re_enables_task_manager() {
        let mut controller = controller();
        controller.set(Toggle::TaskManager, 1).unwrap();

        let applied = controller.set(Toggle::TaskManager, 0).unwrap();

        assert_eq!(applied.label, "Active");
        assert_eq!(
            controller
                .store
                .get(POLICY_SYSTEM_PATH, "DisableTaskMgr")
                .unwrap(),
            Some(PolicyValue::Dword(0))
        );
    }

    #[test]
    fn setting_the_same_value_twice_is_idempotent() {
        let mut controller = controller();

        let first = controller.set(Toggle::StartMenuHidden, 1).unwrap();
        let second = controller.set(Toggle::StartMenuHidden, 1).unwrap();

        assert_eq!(first, second);
        assert_eq!(controller.store.len(), 1);
        assert_eq!(
            controller.store.get(POLICY_EXPLORER_PATH, "NoStartMenu").unwrap(),
            Some(PolicyValue::Dword(1))
        );
    }

    #[test]
    fn each_durable_toggle_writes_its_own_coordinate() {
        let mut controller = controller();

        for toggle in [
            Toggle::TaskManager,
            Toggle::StartMenuEnabled,
            Toggle::StartMenuHidden,
            Toggle::TaskbarEnabled,
        ] {
            controller.set(toggle, 1).unwrap();
        }

        assert_eq!(controller.store.len(), 4);
        for (path, name) in [
            (POLICY_SYSTEM_PATH, "DisableTaskMgr"),
            (POLICY_EXPLORER_PATH, "NoStartMenuMorePrograms"),
            (POLICY_EXPLORER_PATH, "NoStartMenu"),
            (POLICY_EXPLORER_PATH, "NoTrayItemsDisplay"),
        ] {
            assert_eq!(
                controller.store.get(path, name).unwrap(),
                Some(PolicyValue::Dword(1)),
                "{path}\\{name}"
            );
        }
    }

    #[test]
    fn every_durable_toggle_round_trips_both_values() {
        let mut controller = controller();

        for toggle in Toggle::ALL {
            if !controller.catalogue.entry(toggle).is_durable() {
                continue;
            }
            for value in [1, 0] {
                let applied = controller.set(toggle, value).unwrap();
                assert_eq!(applied.value, value);

                let state = controller.current(toggle).unwrap();
                assert_eq!(
                    state,
                    ToggleState::Configured {
                        value,
                        label: applied.label
                    },
                    "{toggle}={value}"
                );
            }
        }
    }

    #[test]
    fn live_taskbar_toggle_never_touches_the_store() {
        let mut controller = controller();

        let applied = controller.set(Toggle::TaskbarHidden, 1).unwrap();

        assert!(!applied.durable);
        assert_eq!(applied.label, "Hidden");
        assert!(controller.store.is_empty());
        assert_eq!(controller.tray.calls, vec!["hide"]);

        controller.set(Toggle::TaskbarHidden, 0).unwrap();
        assert!(controller.store.is_empty());
        assert_eq!(controller.tray.calls, vec!["hide", "show"]);
    }

    #[test]
    fn live_taskbar_state_reads_from_the_window() {
        let mut controller = controller();

        assert_eq!(
            controller.current(Toggle::TaskbarHidden).unwrap(),
            ToggleState::Configured {
                value: 0,
                label: "Shown"
            }
        );

        controller.set(Toggle::TaskbarHidden, 1).unwrap();

        assert_eq!(
            controller.current(Toggle::TaskbarHidden).unwrap(),
            ToggleState::Configured {
                value: 1,
                label: "Hidden"
            }
        );
    }

    #[test]
    fn out_of_domain_value_is_refused_before_any_write() {
        let mut controller = controller();

        let err = controller.set(Toggle::TaskManager, 2).unwrap_err();

        assert_eq!(
            err,
            PolicyError::ValueOutOfDomain {
                toggle: Toggle::TaskManager,
                value: 2,
                allowed: &[0, 1],
            }
        );
        assert!(controller.store.is_empty());
        assert!(controller.tray.calls.is_empty());
    }

    #[test]
    fn unwritten_durable_toggle_reads_as_unconfigured() {
        let controller = controller();

        assert_eq!(
            controller.current(Toggle::StartMenuEnabled).unwrap(),
            ToggleState::Unconfigured
        );
    }

    #[test]
    fn stored_string_surfaces_as_kind_mismatch() {
        let mut controller = controller();
        controller
            .store
            .set(
                POLICY_SYSTEM_PATH,
                "DisableTaskMgr",
                &PolicyValue::Text("1".into()),
            )
            .unwrap();

        let err = controller.current(Toggle::TaskManager).unwrap_err();

        assert_eq!(
            err,
            PolicyError::KindMismatch {
                path: POLICY_SYSTEM_PATH.to_string(),
                name: "DisableTaskMgr".to_string(),
                expected: "number",
                found: "string",
            }
        );
    }
}
