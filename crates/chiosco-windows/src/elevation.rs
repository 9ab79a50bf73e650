//! UAC elevation probe and relaunch.
//!
//! Policy paths under `Policies\System` and `Policies\Explorer` are
//! shell-enforced settings, so mutating commands run behind a gate:
//! probe the process token first, and if it is not elevated, hand the
//! work to a fresh "runas" instance of the same executable.

use chiosco_core::error::ElevationError;

#[cfg(windows)]
use windows::Win32::Foundation::{CloseHandle, ERROR_CANCELLED, GetLastError, HANDLE};
#[cfg(windows)]
use windows::Win32::Security::{
    GetTokenInformation, OpenProcessToken, TOKEN_ELEVATION, TOKEN_QUERY, TokenElevation,
};
#[cfg(windows)]
use windows::Win32::System::Threading::GetCurrentProcess;
#[cfg(windows)]
use windows::Win32::UI::Shell::ShellExecuteW;
#[cfg(windows)]
use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
#[cfg(windows)]
use windows::core::PCWSTR;

/// Whether the current process token carries elevation.
///
/// Probe failures are logged and read as "not elevated"; the relaunch
/// path then asks for elevation explicitly instead of proceeding on a
/// guess.
#[cfg(windows)]
pub fn is_elevated() -> bool {
    let mut token = HANDLE::default();
    // SAFETY: OpenProcessToken on our own process pseudo-handle with
    // TOKEN_QUERY access. The guard closes the token after use.
    let opened = unsafe {
        OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token)
    };
    if opened.is_err() {
        chiosco_core::log_warn!("elevation: could not open the process token");
        return false;
    }
    let _guard = HandleGuard(token);

    let mut elevation = TOKEN_ELEVATION::default();
    let mut length = std::mem::size_of::<TOKEN_ELEVATION>() as u32;
    // SAFETY: the output buffer is exactly TOKEN_ELEVATION-sized and
    // the length parameter says so.
    let queried = unsafe {
        GetTokenInformation(
            token,
            TokenElevation,
            Some(&mut elevation as *mut TOKEN_ELEVATION as *mut _),
            length,
            &mut length,
        )
    };
    match queried {
        Ok(()) => elevation.TokenIsElevated != 0,
        Err(_) => {
            chiosco_core::log_warn!("elevation: could not query the token elevation");
            false
        }
    }
}

#[cfg(not(windows))]
pub fn is_elevated() -> bool {
    false
}

/// Starts an elevated instance of the current executable with `args`.
///
/// Returns `Ok(())` once the new instance is launched; the caller must
/// exit without doing further policy work. A dismissed UAC prompt maps
/// to [`ElevationError::Declined`].
#[cfg(windows)]
pub fn relaunch_elevated(args: &[String]) -> Result<(), ElevationError> {
    let exe = std::env::current_exe().map_err(|e| ElevationError::LaunchFailed {
        detail: format!("could not resolve exe path: {e}"),
    })?;

    let wide_verb = wide("runas");
    let wide_exe = wide(&exe.display().to_string());
    let wide_params = wide(&join_args(args));

    // SAFETY: ShellExecuteW with valid nul-terminated wide strings. The
    // returned HINSTANCE is a status code in disguise: values above 32
    // mean success.
    let result = unsafe {
        ShellExecuteW(
            None,
            PCWSTR(wide_verb.as_ptr()),
            PCWSTR(wide_exe.as_ptr()),
            PCWSTR(wide_params.as_ptr()),
            PCWSTR::null(),
            SW_SHOWNORMAL,
        )
    };
    if result.0 as isize > 32 {
        chiosco_core::log_info!("elevation: launched elevated instance");
        return Ok(());
    }

    // SAFETY: GetLastError right after the failed call.
    let last = unsafe { GetLastError() };
    if last == ERROR_CANCELLED {
        Err(ElevationError::Declined)
    } else {
        Err(ElevationError::LaunchFailed {
            detail: format!(
                "ShellExecuteW returned {} (os error {})",
                result.0 as isize,
                last.0
            ),
        })
    }
}

#[cfg(not(windows))]
pub fn relaunch_elevated(_args: &[String]) -> Result<(), ElevationError> {
    Err(ElevationError::LaunchFailed {
        detail: "elevation is only available on Windows".to_string(),
    })
}

/// Joins command-line arguments, quoting the ones containing spaces.
fn join_args(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            if arg.contains(' ') {
                format!("\"{arg}\"")
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(windows)]
struct HandleGuard(HANDLE);

#[cfg(windows)]
impl Drop for HandleGuard {
    fn drop(&mut self) {
        // SAFETY: CloseHandle on a token handle we own.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Null-terminated UTF-16 rendering for Win32 string parameters.
#[cfg(windows)]
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
