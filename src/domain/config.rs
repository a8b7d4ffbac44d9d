use std::path::Path;

use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Configuration for the payroll tool.
///
/// Stored as TOML, usually in a `payroll.toml` file next to the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The first id handed out when employees are saved to a fresh registry.
    first_id: EmployeeId,

    /// Whether validation stops at the first invalid record.
    ///
    /// When `false` (default) every record is checked and all failures are
    /// reported.
    pub fail_fast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_id: EmployeeId::FIRST,
            fail_fast: false,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the first id handed out by a fresh registry.
    #[must_use]
    pub const fn first_id(&self) -> EmployeeId {
        self.first_id
    }

    /// Sets the first id handed out by a fresh registry.
    pub const fn set_first_id(&mut self, first_id: EmployeeId) {
        self.first_id = first_id;
    }
}

fn default_first_id() -> EmployeeId {
    EmployeeId::FIRST
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_first_id")]
        first_id: EmployeeId,

        #[serde(default)]
        fail_fast: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                first_id,
                fail_fast,
            } => Self {
                first_id,
                fail_fast,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            first_id: config.first_id,
            fail_fast: config.fail_fast,
        }
    }
}
