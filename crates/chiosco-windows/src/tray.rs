//! Live shell tray window control.
//!
//! Hiding the taskbar this way is intentionally not durable: Explorer
//! recreates the window on restart and at the next logon. The handle
//! is looked up fresh on every call because the shell can recreate the
//! window at any time.

use chiosco_core::controller::ShellTray;
use chiosco_core::error::PolicyError;

#[cfg(windows)]
use windows::Win32::Foundation::HWND;
#[cfg(windows)]
use windows::Win32::UI::WindowsAndMessaging::{
    FindWindowW, IsWindowVisible, SW_HIDE, SW_SHOW, ShowWindow,
};
#[cfg(windows)]
use windows::core::w;

/// [`ShellTray`] implementation over the `Shell_TrayWnd` window.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrayWindow;

impl TrayWindow {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl ShellTray for TrayWindow {
    fn show(&mut self) -> Result<(), PolicyError> {
        let hwnd = find_tray_window()?;
        // SAFETY: ShowWindow is safe to call with a valid HWND.
        unsafe {
            let _ = ShowWindow(hwnd, SW_SHOW);
        }
        chiosco_core::log_debug!("tray: shell tray window shown");
        Ok(())
    }

    fn hide(&mut self) -> Result<(), PolicyError> {
        let hwnd = find_tray_window()?;
        // SAFETY: ShowWindow is safe to call with a valid HWND.
        unsafe {
            let _ = ShowWindow(hwnd, SW_HIDE);
        }
        chiosco_core::log_debug!("tray: shell tray window hidden");
        Ok(())
    }

    fn is_visible(&self) -> Result<bool, PolicyError> {
        let hwnd = find_tray_window()?;
        // SAFETY: IsWindowVisible reads window state without modifying it.
        Ok(unsafe { IsWindowVisible(hwnd) }.as_bool())
    }
}

#[cfg(not(windows))]
impl ShellTray for TrayWindow {
    fn show(&mut self) -> Result<(), PolicyError> {
        Err(PolicyError::Unsupported {
            operation: "tray window control",
        })
    }

    fn hide(&mut self) -> Result<(), PolicyError> {
        Err(PolicyError::Unsupported {
            operation: "tray window control",
        })
    }

    fn is_visible(&self) -> Result<bool, PolicyError> {
        Err(PolicyError::Unsupported {
            operation: "tray window control",
        })
    }
}

/// Finds the taskbar window of the running shell.
#[cfg(windows)]
fn find_tray_window() -> Result<HWND, PolicyError> {
    // SAFETY: FindWindowW only searches for a top-level window by class.
    unsafe { FindWindowW(w!("Shell_TrayWnd"), None) }
        .map_err(|_| PolicyError::ShellWindowNotFound)
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn stub_reports_tray_control_as_unsupported() {
        let mut tray = TrayWindow::new();

        assert!(tray.show().is_err());
        assert!(tray.hide().is_err());
        assert_eq!(
            tray.is_visible().unwrap_err(),
            PolicyError::Unsupported {
                operation: "tray window control"
            }
        );
    }
}
