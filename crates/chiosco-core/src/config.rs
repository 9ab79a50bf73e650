use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

/// Top-level configuration for Chiosco.
///
/// Loaded from `~/.config/chiosco/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logon autostart registration settings.
    pub bootstrap: BootstrapConfig,
    /// File logging settings.
    pub logging: LogConfig,
}

/// Logon autostart registration settings.
///
/// The mechanism drives both the first-run check and the registration
/// itself. Splitting them across mechanisms would make the check miss
/// the registration and re-register on every start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub mechanism: Mechanism,
    /// Run key value name, or scheduled task name.
    pub app_name: String,
}

/// Available logon autostart mechanisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mechanism {
    /// String value in the HKCU run key. Starts unelevated.
    RunKey,
    /// Task Scheduler logon task running at the highest level.
    ScheduledTask,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bootstrap: BootstrapConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            mechanism: Mechanism::RunKey,
            app_name: "Chiosco".into(),
        }
    }
}

impl Config {
    /// Replaces unusable values with defaults after deserialisation.
    fn validate(&mut self) {
        if self.bootstrap.app_name.trim().is_empty() {
            eprintln!("Warning: bootstrap.app_name is empty, using \"Chiosco\"");
            self.bootstrap.app_name = BootstrapConfig::default().app_name;
        }
    }
}

/// Returns the config directory: `~/.config/chiosco/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("chiosco"))
}

/// Returns the config file path: `~/.config/chiosco/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(Config)` on success, or an error string describing
/// what went wrong (IO error, parse error, etc.).
pub fn try_load() -> Result<Config, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut config: Config =
        toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently returns defaults; read and parse errors are
/// reported on stderr and also fall back to defaults.
pub fn load() -> Config {
    match config_path() {
        Some(path) if !path.exists() => Config::default(),
        None => Config::default(),
        Some(_) => match try_load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {e}");
                Config::default()
            }
        },
    }
}

/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `chiosco init` to create a starter config file that
/// users can immediately edit.
pub fn template() -> String {
    r##"# Chiosco configuration
# Location: ~/.config/chiosco/config.toml

[bootstrap]
# Logon autostart mechanism: "run-key" or "scheduled-task".
# The first-run check and the registration use the same mechanism.
# "run-key": string value in HKCU\Software\Microsoft\Windows\CurrentVersion\Run.
# "scheduled-task": Task Scheduler logon task running at the highest level.
mechanism = "run-key"
# Run key value name / scheduled task name.
app_name = "Chiosco"

[logging]
# Enable file logging to ~/.config/chiosco/logs/chiosco.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_the_run_key_mechanism() {
        // Arrange / Act
        let config = Config::default();

        // Assert
        assert_eq!(config.bootstrap.mechanism, Mechanism::RunKey);
        assert_eq!(config.bootstrap.app_name, "Chiosco");
        assert!(!config.logging.enabled);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_sections() {
        // Arrange
        let toml_str = "[bootstrap]\nmechanism = \"scheduled-task\"\n";

        // Act
        let mut config: Config = toml::from_str(toml_str).unwrap();
        config.validate();

        // Assert
        assert_eq!(config.bootstrap.mechanism, Mechanism::ScheduledTask);
        assert_eq!(config.bootstrap.app_name, "Chiosco"); // default
        assert_eq!(config.logging.max_file_mb, 10); // default
    }

    #[test]
    fn empty_app_name_is_replaced_with_the_default() {
        // Arrange
        let toml_str = "[bootstrap]\napp_name = \"  \"\n";

        // Act
        let mut config: Config = toml::from_str(toml_str).unwrap();
        config.validate();

        // Assert
        assert_eq!(config.bootstrap.app_name, "Chiosco");
    }

    #[test]
    fn mechanism_names_round_trip_through_toml() {
        // Arrange
        let config = Config {
            bootstrap: BootstrapConfig {
                mechanism: Mechanism::ScheduledTask,
                app_name: "Kiosk".into(),
            },
            logging: LogConfig::default(),
        };

        // Act
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        // Assert
        assert!(serialized.contains("mechanism = \"scheduled-task\""));
        assert_eq!(deserialized, config);
    }

    #[test]
    fn template_parses_to_the_default_config() {
        // Arrange / Act
        let config: Config = toml::from_str(&template()).unwrap();

        // Assert
        assert_eq!(config, Config::default());
    }
}
