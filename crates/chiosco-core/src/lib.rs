pub mod bootstrap;
pub mod catalogue;
pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod log;
pub mod store;
pub mod validate;

pub use bootstrap::{AutostartRegistry, BootstrapManager, RUN_KEY_PATH, RunKeyRegistry};
pub use catalogue::{Target, Toggle, ToggleCatalogue, ToggleEntry};
pub use controller::{Applied, ShellTray, ToggleController, ToggleState};
pub use error::{BootstrapError, ElevationError, PolicyError, ValidationError};
pub use gate::{GateDecision, ensure_elevated};
pub use store::{MemoryPolicyStore, PolicyStore, PolicyValue};
