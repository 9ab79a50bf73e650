use thiserror::Error;

use crate::catalogue::Toggle;

/// Failures talking to the durable policy store or the live shell window.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("could not open policy path '{path}': {detail}")]
    OpenPath { path: String, detail: String },

    #[error("could not read value '{name}' under '{path}': {detail}")]
    ReadValue {
        path: String,
        name: String,
        detail: String,
    },

    #[error("could not write value '{name}' under '{path}': {detail}")]
    WriteValue {
        path: String,
        name: String,
        detail: String,
    },

    #[error("could not delete value '{name}' under '{path}': {detail}")]
    DeleteValue {
        path: String,
        name: String,
        detail: String,
    },

    /// The stored value exists but has a different kind than the
    /// catalogue expects (for example a string where a number belongs).
    #[error("value '{name}' under '{path}' is a {found}, expected a {expected}")]
    KindMismatch {
        path: String,
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A caller bypassed input validation and handed the controller a
    /// value outside the toggle's accepted domain. Nothing was written.
    #[error("{value} is not an accepted value for {toggle} (accepted: {allowed:?})")]
    ValueOutOfDomain {
        toggle: Toggle,
        value: u32,
        allowed: &'static [u32],
    },

    #[error("shell tray window (Shell_TrayWnd) not found")]
    ShellWindowNotFound,

    #[error("{operation} failed: {detail}")]
    ShellWindow {
        operation: &'static str,
        detail: String,
    },

    #[error("{operation} is only available on Windows")]
    Unsupported { operation: &'static str },
}

/// Rejections produced by toggle input parsing.
///
/// The parser is strict on purpose: only the canonical decimal
/// rendering of an accepted value passes, so "01", "+1" and " 1" are
/// all rejected even though they parse as integers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{raw}' is not a plain decimal integer")]
    NotAnInteger { raw: String },

    #[error("{value} is not one of the accepted values {allowed:?}")]
    OutOfDomain { value: i64, allowed: Vec<u32> },
}

/// Failures while checking or changing the logon autostart registration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    #[error("autostart registry: {0}")]
    Store(#[from] PolicyError),

    #[error("schtasks {action} failed: {detail}")]
    TaskCommand {
        action: &'static str,
        detail: String,
    },
}

/// Failures while acquiring administrator privileges.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElevationError {
    /// The user dismissed the elevation prompt.
    #[error("elevation request was declined")]
    Declined,

    #[error("could not start an elevated instance: {detail}")]
    LaunchFailed { detail: String },
}
