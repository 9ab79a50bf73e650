//! Logon autostart through the Task Scheduler.
//!
//! Registrations are driven through `schtasks.exe` rather than the COM
//! task service: a logon trigger with `/RL HIGHEST` is the whole
//! requirement, and the command tool keeps this crate free of the COM
//! interface plumbing. The task starts elevated at logon, which the
//! run key cannot do.

#[cfg(windows)]
use std::process::Command;

use chiosco_core::bootstrap::AutostartRegistry;
use chiosco_core::error::BootstrapError;

/// `CREATE_NO_WINDOW` (0x08000000) — the schtasks child doesn't get a
/// console window flashing up under a GUI session.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x08000000;

/// [`AutostartRegistry`] implementation over Task Scheduler logon tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduledTaskRegistry;

impl ScheduledTaskRegistry {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl AutostartRegistry for ScheduledTaskRegistry {
    fn is_registered(&self, app_id: &str) -> Result<bool, BootstrapError> {
        // A missing task and a query error both exit non-zero; either way
        // there is no registration we could trust, and `/Create /F` below
        // overwrites safely if the check was wrong.
        let output = schtasks("query", &["/Query", "/TN", app_id])?;
        Ok(output.status.success())
    }

    fn register(&mut self, app_id: &str, command: &str) -> Result<(), BootstrapError> {
        let output = schtasks(
            "create",
            &[
                "/Create", "/F", "/SC", "ONLOGON", "/RL", "HIGHEST", "/TN", app_id, "/TR", command,
            ],
        )?;
        if !output.status.success() {
            return Err(command_error("create", &output));
        }
        chiosco_core::log_info!("tasks: created logon task '{app_id}'");
        Ok(())
    }

    fn unregister(&mut self, app_id: &str) -> Result<(), BootstrapError> {
        let output = schtasks("delete", &["/Delete", "/F", "/TN", app_id])?;
        if !output.status.success() {
            // Deleting an absent task fails; that is the state we wanted.
            if !self.is_registered(app_id)? {
                return Ok(());
            }
            return Err(command_error("delete", &output));
        }
        chiosco_core::log_info!("tasks: deleted logon task '{app_id}'");
        Ok(())
    }
}

#[cfg(not(windows))]
impl AutostartRegistry for ScheduledTaskRegistry {
    fn is_registered(&self, _app_id: &str) -> Result<bool, BootstrapError> {
        Err(unsupported())
    }

    fn register(&mut self, _app_id: &str, _command: &str) -> Result<(), BootstrapError> {
        Err(unsupported())
    }

    fn unregister(&mut self, _app_id: &str) -> Result<(), BootstrapError> {
        Err(unsupported())
    }
}

#[cfg(windows)]
fn schtasks(action: &'static str, args: &[&str]) -> Result<std::process::Output, BootstrapError> {
    use std::os::windows::process::CommandExt;

    Command::new("schtasks")
        .args(args)
        .creation_flags(CREATE_NO_WINDOW)
        .output()
        .map_err(|e| BootstrapError::TaskCommand {
            action,
            detail: e.to_string(),
        })
}

#[cfg(windows)]
fn command_error(action: &'static str, output: &std::process::Output) -> BootstrapError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = match stderr.trim() {
        "" => format!("exit status {}", output.status),
        message => message.to_string(),
    };
    BootstrapError::TaskCommand { action, detail }
}

#[cfg(not(windows))]
fn unsupported() -> BootstrapError {
    BootstrapError::TaskCommand {
        action: "invocation",
        detail: "only available on Windows".to_string(),
    }
}
