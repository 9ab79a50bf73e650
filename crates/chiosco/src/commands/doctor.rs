use chiosco_core::bootstrap::AutostartRegistry;
use chiosco_core::catalogue::POLICY_SYSTEM_PATH;
use chiosco_core::config::{self, Config};
use chiosco_core::controller::ShellTray;
use chiosco_core::store::PolicyStore;
use chiosco_windows::{ConfiguredRegistry, RegistryPolicyStore, TrayWindow, elevation};

/// ANSI escape helpers for doctor output.
const OK: &str = "\x1b[32m[ok]\x1b[0m";
const WARN: &str = "\x1b[33m[warn]\x1b[0m";
const FAIL: &str = "\x1b[31m[fail]\x1b[0m";
const FIXED: &str = "\x1b[36m[fixed]\x1b[0m";

pub fn execute(config: &Config) {
    super::banner::print_logo();
    println!();
    check_config_dir();
    check_config_file();
    check_policy_store();
    check_elevation();
    check_autostart(config);
    check_tray_window();
    println!();
}

fn check_config_dir() {
    match config::config_dir() {
        Some(dir) if dir.is_dir() => {
            println!("  {OK} Config directory exists ({})", dir.display());
        }
        Some(dir) => match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                println!("  {FIXED} Created config directory ({})", dir.display());
            }
            Err(e) => {
                println!("  {FAIL} Config directory missing and could not create it: {e}");
            }
        },
        None => {
            println!("  {FAIL} Could not determine home directory");
        }
    }
}

fn check_config_file() {
    let Some(path) = config::config_path() else {
        println!("  {FAIL} Could not determine config path");
        return;
    };
    if !path.exists() {
        println!("  {WARN} config.toml not found (using defaults)");
        return;
    }
    match config::try_load() {
        Ok(_) => println!("  {OK} config.toml is valid"),
        Err(e) => println!("  {FAIL} config.toml: {e}"),
    }
}

fn check_policy_store() {
    let store = RegistryPolicyStore::new();
    match store.get(POLICY_SYSTEM_PATH, "DisableTaskMgr") {
        Ok(_) => println!("  {OK} Policy store is reachable (HKCU)"),
        Err(e) => println!("  {FAIL} Policy store: {e}"),
    }
}

fn check_elevation() {
    if elevation::is_elevated() {
        println!("  {OK} Running elevated");
    } else {
        println!("  {WARN} Not elevated (policy changes will prompt for elevation)");
    }
}

fn check_autostart(config: &Config) {
    let registry = ConfiguredRegistry::from_mechanism(config.bootstrap.mechanism);
    match registry.is_registered(&config.bootstrap.app_name) {
        Ok(true) => println!(
            "  {OK} Autostart is registered via {} ({})",
            registry.describe(),
            config.bootstrap.app_name
        ),
        Ok(false) => println!(
            "  {WARN} Autostart not registered (the first policy change will register it)"
        ),
        Err(e) => println!("  {FAIL} Autostart check: {e}"),
    }
}

fn check_tray_window() {
    let tray = TrayWindow::new();
    match tray.is_visible() {
        Ok(true) => println!("  {OK} Shell tray window found (visible)"),
        Ok(false) => println!("  {OK} Shell tray window found (hidden)"),
        Err(e) => println!("  {FAIL} Shell tray window: {e}"),
    }
}
