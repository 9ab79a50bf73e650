//! Shared preamble for commands that change protected policy values.
//!
//! Order matters: the elevation gate runs first, and only a process
//! that may proceed performs the one-time autostart registration and
//! the requested change. The relaunched elevated instance repeats the
//! same preamble, so a registration is never skipped by handing off.

use chiosco_core::bootstrap::BootstrapManager;
use chiosco_core::config::Config;
use chiosco_core::gate::{self, GateDecision};
use chiosco_windows::ConfiguredRegistry;
use chiosco_windows::elevation;

/// Runs the elevation gate and the first-run bootstrap.
///
/// Returns only when this process is allowed to continue; the
/// relaunching and denied branches exit here.
pub fn prepare(config: &Config) {
    let decision = gate::ensure_elevated(elevation::is_elevated, relaunch_with_same_args);
    match decision {
        GateDecision::AlreadyElevated => {}
        GateDecision::Relaunching => {
            println!("Restarting with administrator privileges...");
            std::process::exit(0);
        }
        GateDecision::ElevationDenied(err) => {
            eprintln!("Error: {err}");
            eprintln!("Policy changes need an elevated instance; nothing was changed.");
            std::process::exit(1);
        }
    }
    register_once(config);
}

fn relaunch_with_same_args() -> Result<(), chiosco_core::error::ElevationError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    elevation::relaunch_elevated(&args)
}

/// Registers the logon autostart on the first elevated run.
///
/// Failures are reported but do not block the command: a missing
/// autostart entry only costs convenience at the next logon.
fn register_once(config: &Config) {
    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            eprintln!("Warning: could not resolve the executable path: {e}");
            return;
        }
    };
    let command = format!("\"{}\"", exe.display());

    let registry = ConfiguredRegistry::from_mechanism(config.bootstrap.mechanism);
    let mut manager = BootstrapManager::new(registry);
    match manager.ensure_registered_once(&config.bootstrap.app_name, &command) {
        Ok(true) => println!("Registered {} to run at logon.", config.bootstrap.app_name),
        Ok(false) => {}
        Err(e) => eprintln!("Warning: autostart registration failed: {e}"),
    }
}
