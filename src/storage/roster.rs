use std::{fs, io, path::Path};

use tracing::instrument;

use crate::domain::{Employee, EmployeeRecord, Error};

/// File formats a roster can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// A YAML sequence of records.
    Yaml,
    /// A JSON array of records.
    Json,
}

impl Format {
    /// Picks the format from a file extension (`yaml`, `yml` or `json`).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A list of employee records read from a file, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    records: Vec<EmployeeRecord>,
}

/// Errors that can occur when loading a roster.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The roster file was not found.
    #[error("roster file not found")]
    NotFound,
    /// The file extension does not name a supported format.
    #[error("unsupported roster format (expected .yaml, .yml or .json)")]
    UnsupportedFormat,
    /// An I/O error occurred.
    #[error("failed to read roster: {0}")]
    Io(#[from] io::Error),
    /// The YAML content could not be parsed.
    #[error("failed to parse roster YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The JSON content could not be parsed.
    #[error("failed to parse roster JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Roster {
    /// Creates a roster from records already in memory.
    #[must_use]
    pub const fn new(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }

    /// Reads a roster from a file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not recognised, the file cannot be
    /// read, or its contents are not a list of records.
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let format = Format::from_path(path).ok_or(LoadError::UnsupportedFormat)?;
        let content = fs::read_to_string(path).map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Io(io_error),
        })?;
        let roster = Self::parse(&content, format)?;
        tracing::debug!(records = roster.len(), "loaded roster");
        Ok(roster)
    }

    /// Parses a roster from a string in the given format.
    ///
    /// An empty YAML document is an empty roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a list of records.
    pub fn parse(content: &str, format: Format) -> Result<Self, LoadError> {
        let records = match format {
            Format::Yaml if content.trim().is_empty() => Vec::new(),
            Format::Yaml => serde_yaml::from_str(content)?,
            Format::Json => serde_json::from_str(content)?,
        };
        Ok(Self { records })
    }

    /// Returns the raw records.
    #[must_use]
    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the roster holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validates each record, in file order.
    pub fn validate(&self) -> impl Iterator<Item = Result<Employee, Error>> + '_ {
        self.records.iter().cloned().map(EmployeeRecord::validate)
    }
}
