use chiosco_core::bootstrap::AutostartRegistry;
use chiosco_core::config::Config;
use chiosco_windows::ConfiguredRegistry;

/// Registers the configured logon autostart.
///
/// Unlike the first-run bootstrap this always writes, so a stale
/// command from a moved executable gets refreshed.
pub fn enable(config: &Config) {
    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            eprintln!("Error: could not resolve exe path: {e}");
            std::process::exit(1);
        }
    };
    let command = format!("\"{}\"", exe.display());

    let mut registry = ConfiguredRegistry::from_mechanism(config.bootstrap.mechanism);
    match registry.register(&config.bootstrap.app_name, &command) {
        Ok(()) => println!("Autostart enabled ({}).", registry.describe()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Removes the logon autostart registration.
pub fn disable(config: &Config) {
    let mut registry = ConfiguredRegistry::from_mechanism(config.bootstrap.mechanism);
    match registry.unregister(&config.bootstrap.app_name) {
        Ok(()) => println!("Autostart disabled."),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Shows whether the autostart registration exists.
pub fn status(config: &Config) {
    let registry = ConfiguredRegistry::from_mechanism(config.bootstrap.mechanism);
    match registry.is_registered(&config.bootstrap.app_name) {
        Ok(true) => println!("Autostart is currently enabled ({}).", registry.describe()),
        Ok(false) => println!("Autostart is currently disabled."),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
