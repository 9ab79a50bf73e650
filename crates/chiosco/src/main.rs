mod commands;

use clap::{Parser, Subcommand, ValueEnum};

use chiosco_core::Toggle;

#[derive(Parser)]
#[command(
    name = "chiosco",
    version,
    about = "A desktop lockdown console for Windows shells"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Pick toggles from an interactive menu
    Menu,
    /// Apply one toggle
    Set {
        /// The toggle to change
        #[arg(value_enum)]
        toggle: ToggleArg,
        /// New value: 0 or 1 (see `chiosco status` for meanings)
        value: String,
        /// Print the planned change without touching the system
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the current state of every toggle
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the logon autostart registration
    Autostart {
        #[command(subcommand)]
        command: AutostartCommands,
    },
    /// Check config, policy store, elevation, and registration
    Doctor,
}

#[derive(Subcommand)]
enum AutostartCommands {
    /// Register the configured logon autostart
    Enable,
    /// Remove the logon autostart registration
    Disable,
    /// Show whether the registration exists
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
enum ToggleArg {
    /// Allow or block Task Manager
    TaskManager,
    /// Allow or block the start menu's submenus
    StartMenuEnabled,
    /// Show or hide the start menu
    StartMenuHidden,
    /// Show or hide taskbar tray items
    TaskbarEnabled,
    /// Show or hide the live taskbar window (not durable)
    TaskbarHidden,
}

fn toggle(arg: ToggleArg) -> Toggle {
    match arg {
        ToggleArg::TaskManager => Toggle::TaskManager,
        ToggleArg::StartMenuEnabled => Toggle::StartMenuEnabled,
        ToggleArg::StartMenuHidden => Toggle::StartMenuHidden,
        ToggleArg::TaskbarEnabled => Toggle::TaskbarEnabled,
        ToggleArg::TaskbarHidden => Toggle::TaskbarHidden,
    }
}

fn main() {
    let cli = Cli::parse();
    let config = chiosco_core::config::load();
    chiosco_core::log::init(&config.logging);

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Menu => commands::menu::execute(&config),
        Commands::Set {
            toggle: arg,
            value,
            dry_run,
        } => commands::set::execute(&config, toggle(arg), &value, dry_run),
        Commands::Status { json } => commands::status::execute(json),
        Commands::Autostart { command } => match command {
            AutostartCommands::Enable => commands::autostart::enable(&config),
            AutostartCommands::Disable => commands::autostart::disable(&config),
            AutostartCommands::Status => commands::autostart::status(&config),
        },
        Commands::Doctor => commands::doctor::execute(&config),
    }
}
