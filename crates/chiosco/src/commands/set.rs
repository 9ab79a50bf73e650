use chiosco_core::Toggle;
use chiosco_core::catalogue::{Target, ToggleCatalogue};
use chiosco_core::config::Config;
use chiosco_core::controller::ToggleController;
use chiosco_core::validate;
use chiosco_windows::{RegistryPolicyStore, TrayWindow};

/// Applies one toggle from the command line.
///
/// The raw value is validated before anything else happens, so typos
/// fail fast without an elevation prompt. `--dry-run` stops after
/// printing what would change.
pub fn execute(config: &Config, toggle: Toggle, raw_value: &str, dry_run: bool) {
    let catalogue = ToggleCatalogue::standard();
    let entry = catalogue.entry(toggle);

    let value = match validate::parse_toggle_value(raw_value, entry.domain) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    if dry_run {
        match entry.target {
            Target::Policy { path, value: name } => {
                println!(
                    "[dry-run] Would write {name}={value} (DWORD) under HKCU\\{path} \
                     ({}: {}).",
                    toggle.title(),
                    entry.label(value)
                );
            }
            Target::TrayWindow => {
                let verb = if value == 0 { "show" } else { "hide" };
                println!(
                    "[dry-run] Would {verb} the shell tray window (not durable; \
                     Explorer restores it at the next logon)."
                );
            }
        }
        return;
    }

    super::startup::prepare(config);

    let mut controller =
        ToggleController::new(catalogue, RegistryPolicyStore::new(), TrayWindow::new());
    match controller.set(toggle, value) {
        Ok(applied) => {
            println!("{}: {}", applied.toggle.title(), applied.label);
            if !applied.durable {
                println!("Live window only; Explorer restores it at the next logon.");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
