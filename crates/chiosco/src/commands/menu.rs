use std::io::{self, BufRead, Write};

use chiosco_core::Toggle;
use chiosco_core::catalogue::ToggleCatalogue;
use chiosco_core::config::Config;
use chiosco_core::controller::{ShellTray, ToggleController};
use chiosco_core::store::PolicyStore;
use chiosco_core::validate;
use chiosco_windows::{RegistryPolicyStore, TrayWindow};

// ANSI escape codes for menu output.
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// One numbered menu choice.
enum MenuOp {
    /// Ask for the value on a second line.
    Prompt(Toggle),
    /// Apply a fixed value immediately.
    Apply(Toggle, u32),
}

/// Runs the interactive toggle menu until `EXIT` or end of input.
pub fn execute(config: &Config) {
    super::startup::prepare(config);
    super::banner::print_logo();
    println!();
    print_options();

    let mut controller = ToggleController::new(
        ToggleCatalogue::standard(),
        RegistryPolicyStore::new(),
        TrayWindow::new(),
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") {
            println!("{GREEN}Exiting...{RESET}");
            break;
        }

        let Some(op) = operation_for(input) else {
            eprintln!("{RED}Invalid option '{input}'. Pick 1-10 or EXIT.{RESET}");
            continue;
        };

        let (toggle, value) = match op {
            MenuOp::Apply(toggle, value) => (toggle, value),
            MenuOp::Prompt(toggle) => {
                println!("{CYAN}Enter 0 for Active or 1 for Not Active:{RESET}");
                match prompt_value(&mut lines, &controller, toggle) {
                    Some(value) => (toggle, value),
                    None => break,
                }
            }
        };

        apply(&mut controller, toggle, value);
    }
}

fn print_options() {
    println!("Choose your option:");
    println!("  1. Task Manager: pick a state");
    println!("  2. Task Manager: disable");
    println!("  3. Start menu submenus: disable");
    println!("  4. Start menu submenus: enable");
    println!("  5. Start menu: hide");
    println!("  6. Start menu: show");
    println!("  7. Taskbar tray items: disable");
    println!("  8. Taskbar tray items: enable");
    println!("  9. Taskbar: hide");
    println!(" 10. Taskbar: show");
    println!("Type EXIT to quit.");
}

/// Maps a menu number to its toggle operation.
fn operation_for(input: &str) -> Option<MenuOp> {
    match input {
        "1" => Some(MenuOp::Prompt(Toggle::TaskManager)),
        "2" => Some(MenuOp::Apply(Toggle::TaskManager, 1)),
        "3" => Some(MenuOp::Apply(Toggle::StartMenuEnabled, 1)),
        "4" => Some(MenuOp::Apply(Toggle::StartMenuEnabled, 0)),
        "5" => Some(MenuOp::Apply(Toggle::StartMenuHidden, 1)),
        "6" => Some(MenuOp::Apply(Toggle::StartMenuHidden, 0)),
        "7" => Some(MenuOp::Apply(Toggle::TaskbarEnabled, 1)),
        "8" => Some(MenuOp::Apply(Toggle::TaskbarEnabled, 0)),
        "9" => Some(MenuOp::Apply(Toggle::TaskbarHidden, 1)),
        "10" => Some(MenuOp::Apply(Toggle::TaskbarHidden, 0)),
        _ => None,
    }
}

/// Reads and validates a value for `toggle`, re-prompting on bad input.
///
/// Returns `None` at end of input.
fn prompt_value<S: PolicyStore, T: ShellTray>(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    controller: &ToggleController<S, T>,
    toggle: Toggle,
) -> Option<u32> {
    let domain = controller.catalogue().entry(toggle).domain;
    loop {
        let Some(Ok(line)) = lines.next() else {
            return None;
        };
        match validate::parse_toggle_value(line.trim(), domain) {
            Ok(value) => return Some(value),
            Err(e) => eprintln!("{RED}{e}. Please enter 0 or 1.{RESET}"),
        }
    }
}

fn apply<S: PolicyStore, T: ShellTray>(
    controller: &mut ToggleController<S, T>,
    toggle: Toggle,
    value: u32,
) {
    println!("{YELLOW}Processing...{RESET}");
    match controller.set(toggle, value) {
        Ok(applied) => {
            let bar = "=".repeat(50);
            println!("{YELLOW}[{bar}] Done{RESET}");
            println!("{}: {}", applied.toggle.title(), applied.label);
            if !applied.durable {
                println!("Live window only; Explorer restores it at the next logon.");
            }
        }
        Err(e) => eprintln!("{RED}Error: {e}{RESET}"),
    }
}
