use chiosco_core::catalogue::ToggleCatalogue;
use chiosco_core::controller::{ToggleController, ToggleState};
use chiosco_windows::{RegistryPolicyStore, TrayWindow};

/// Shows the current state of every toggle.
///
/// Reads are unprivileged, so this command runs without the elevation
/// gate. `--json` prints one object per toggle for scripting.
pub fn execute(json: bool) {
    let catalogue = ToggleCatalogue::standard();
    let controller =
        ToggleController::new(catalogue, RegistryPolicyStore::new(), TrayWindow::new());

    let rows: Vec<_> = catalogue
        .entries()
        .iter()
        .map(|entry| (entry, controller.current(entry.toggle)))
        .collect();

    if json {
        print_json(&rows);
    } else {
        print_table(&rows);
    }
}

type Row<'a> = (
    &'a chiosco_core::ToggleEntry,
    Result<ToggleState, chiosco_core::PolicyError>,
);

fn print_json(rows: &[Row<'_>]) {
    let items: Vec<serde_json::Value> = rows
        .iter()
        .map(|(entry, state)| match state {
            Ok(ToggleState::Configured { value, label }) => serde_json::json!({
                "toggle": entry.toggle.name(),
                "durable": entry.is_durable(),
                "value": value,
                "label": label,
            }),
            Ok(ToggleState::Unconfigured) => serde_json::json!({
                "toggle": entry.toggle.name(),
                "durable": entry.is_durable(),
                "value": null,
                "label": "not configured",
            }),
            Err(e) => serde_json::json!({
                "toggle": entry.toggle.name(),
                "durable": entry.is_durable(),
                "error": e.to_string(),
            }),
        })
        .collect();

    let rendered =
        serde_json::to_string_pretty(&items).expect("status rows always serialize to JSON");
    println!("{rendered}");
}

fn print_table(rows: &[Row<'_>]) {
    let d = "\x1b[90m"; // Dim gray for annotations
    let r = "\x1b[0m"; // Reset

    for (entry, state) in rows {
        let name = entry.toggle.name();
        match state {
            Ok(ToggleState::Configured { label, .. }) => {
                if entry.is_durable() {
                    println!("  {name:<20} {label}");
                } else {
                    println!("  {name:<20} {label} {d}(live window){r}");
                }
            }
            Ok(ToggleState::Unconfigured) => {
                println!("  {name:<20} {d}not configured (Windows default){r}");
            }
            Err(e) => {
                println!("  {name:<20} error: {e}");
            }
        }
    }
}
