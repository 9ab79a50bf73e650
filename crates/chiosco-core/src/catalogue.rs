use std::fmt;

use serde::{Deserialize, Serialize};

/// HKCU policy path read by the system components of the shell.
pub const POLICY_SYSTEM_PATH: &str = r"Software\Microsoft\Windows\CurrentVersion\Policies\System";

/// HKCU policy path read by Explorer.
pub const POLICY_EXPLORER_PATH: &str =
    r"Software\Microsoft\Windows\CurrentVersion\Policies\Explorer";

/// One user-facing shell setting with a fixed target coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Toggle {
    /// Whether Task Manager can be opened (`DisableTaskMgr`).
    TaskManager,
    /// Whether the start menu's submenus are usable (`NoStartMenuMorePrograms`).
    StartMenuEnabled,
    /// Whether the start menu is suppressed entirely (`NoStartMenu`).
    StartMenuHidden,
    /// Whether taskbar tray items are displayed (`NoTrayItemsDisplay`).
    TaskbarEnabled,
    /// Whether the live taskbar window is hidden. Not durable.
    TaskbarHidden,
}

impl Toggle {
    pub const ALL: [Toggle; 5] = [
        Toggle::TaskManager,
        Toggle::StartMenuEnabled,
        Toggle::StartMenuHidden,
        Toggle::TaskbarEnabled,
        Toggle::TaskbarHidden,
    ];

    /// Stable kebab-case name used on the command line and in JSON output.
    pub fn name(self) -> &'static str {
        match self {
            Toggle::TaskManager => "task-manager",
            Toggle::StartMenuEnabled => "start-menu-enabled",
            Toggle::StartMenuHidden => "start-menu-hidden",
            Toggle::TaskbarEnabled => "taskbar-enabled",
            Toggle::TaskbarHidden => "taskbar-hidden",
        }
    }

    /// Title for human-facing output ("Task Manager: Not Active").
    pub fn title(self) -> &'static str {
        match self {
            Toggle::TaskManager => "Task Manager",
            Toggle::StartMenuEnabled => "Start menu submenus",
            Toggle::StartMenuHidden => "Start menu",
            Toggle::TaskbarEnabled => "Taskbar tray items",
            Toggle::TaskbarHidden => "Taskbar",
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a toggle lands when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A durable DWORD policy value in the hierarchical store.
    Policy {
        path: &'static str,
        value: &'static str,
    },
    /// The live shell tray window. Reverts when the shell restarts.
    TrayWindow,
}

/// Catalogue entry: one toggle, its target, the values it accepts and
/// what each value means to the user.
#[derive(Debug, Clone, Copy)]
pub struct ToggleEntry {
    pub toggle: Toggle,
    pub target: Target,
    pub domain: &'static [u32],
    pub meanings: &'static [(u32, &'static str)],
}

impl ToggleEntry {
    /// Human label for an accepted value ("Active", "Hidden", ...).
    pub fn label(&self, value: u32) -> &'static str {
        self.meanings
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, label)| *label)
            .unwrap_or("unknown")
    }

    pub fn is_durable(&self) -> bool {
        matches!(self.target, Target::Policy { .. })
    }
}

// Entries are kept in `Toggle::ALL` order so lookup is an index.
const STANDARD: &[ToggleEntry] = &[
    ToggleEntry {
        toggle: Toggle::TaskManager,
        target: Target::Policy {
            path: POLICY_SYSTEM_PATH,
            value: "DisableTaskMgr",
        },
        domain: &[0, 1],
        meanings: &[(0, "Active"), (1, "Not Active")],
    },
    ToggleEntry {
        toggle: Toggle::StartMenuEnabled,
        target: Target::Policy {
            path: POLICY_EXPLORER_PATH,
            value: "NoStartMenuMorePrograms",
        },
        domain: &[0, 1],
        meanings: &[(0, "Enabled"), (1, "Disabled")],
    },
    ToggleEntry {
        toggle: Toggle::StartMenuHidden,
        target: Target::Policy {
            path: POLICY_EXPLORER_PATH,
            value: "NoStartMenu",
        },
        domain: &[0, 1],
        meanings: &[(0, "Shown"), (1, "Hidden")],
    },
    ToggleEntry {
        toggle: Toggle::TaskbarEnabled,
        target: Target::Policy {
            path: POLICY_EXPLORER_PATH,
            value: "NoTrayItemsDisplay",
        },
        domain: &[0, 1],
        meanings: &[(0, "Enabled"), (1, "Disabled")],
    },
    ToggleEntry {
        toggle: Toggle::TaskbarHidden,
        target: Target::TrayWindow,
        domain: &[0, 1],
        meanings: &[(0, "Shown"), (1, "Hidden")],
    },
];

/// The immutable set of toggles the engine knows about.
///
/// Front-ends and the controller share one catalogue; adding a toggle
/// means adding an entry here, not touching the engine.
#[derive(Debug, Clone, Copy)]
pub struct ToggleCatalogue {
    entries: &'static [ToggleEntry],
}

impl ToggleCatalogue {
    /// The built-in catalogue of the five shell toggles.
    pub fn standard() -> Self {
        Self { entries: STANDARD }
    }

    pub fn entries(&self) -> &'static [ToggleEntry] {
        self.entries
    }

    pub fn entry(&self, toggle: Toggle) -> &'static ToggleEntry {
        &self.entries[toggle as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_align_with_toggle_order() {
        let catalogue = ToggleCatalogue::standard();

        assert_eq!(catalogue.entries().len(), Toggle::ALL.len());
        for toggle in Toggle::ALL {
            assert_eq!(catalogue.entry(toggle).toggle, toggle);
        }
    }

    #[test]
    fn durable_coordinates_are_unique() {
        let catalogue = ToggleCatalogue::standard();

        let mut seen = Vec::new();
        for entry in catalogue.entries() {
            if let Target::Policy { path, value } = entry.target {
                assert!(
                    !seen.contains(&(path, value)),
                    "{} reuses {path}\\{value}",
                    entry.toggle
                );
                seen.push((path, value));
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn every_domain_value_has_a_meaning() {
        for entry in ToggleCatalogue::standard().entries() {
            for &value in entry.domain {
                assert_ne!(entry.label(value), "unknown", "{}={value}", entry.toggle);
            }
        }
    }

    #[test]
    fn task_manager_labels_match_policy_semantics() {
        let entry = ToggleCatalogue::standard().entry(Toggle::TaskManager);

        // 0 clears the restriction, 1 sets it.
        assert_eq!(entry.label(0), "Active");
        assert_eq!(entry.label(1), "Not Active");
    }

    #[test]
    fn only_the_live_taskbar_toggle_is_transient() {
        let catalogue = ToggleCatalogue::standard();

        for toggle in Toggle::ALL {
            let durable = catalogue.entry(toggle).is_durable();
            assert_eq!(durable, toggle != Toggle::TaskbarHidden);
        }
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(Toggle::TaskManager.name(), "task-manager");
        assert_eq!(Toggle::StartMenuEnabled.name(), "start-menu-enabled");
        assert_eq!(Toggle::StartMenuHidden.name(), "start-menu-hidden");
        assert_eq!(Toggle::TaskbarEnabled.name(), "taskbar-enabled");
        assert_eq!(Toggle::TaskbarHidden.name(), "taskbar-hidden");
    }
}
