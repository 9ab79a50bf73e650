/// Autostart registry selection by configured mechanism.
pub mod autostart;

/// UAC elevation probe and "runas" relaunch.
pub mod elevation;

/// Policy store over the HKCU registry hive.
pub mod registry;

/// Logon tasks via the Task Scheduler.
pub mod tasks;

/// Live shell tray window control.
pub mod tray;

pub use autostart::ConfiguredRegistry;
pub use registry::RegistryPolicyStore;
pub use tasks::ScheduledTaskRegistry;
pub use tray::TrayWindow;
