//! Pipeline configuration.
//!
//! All storage locations are passed explicitly through [`PipelineConfig`];
//! nothing is read from process-wide state. A config can be loaded from a
//! TOML file and then overridden field by field (the CLI does this with its
//! flags).
//!
//! ```toml
//! source_location = "/data/landing"
//! interim_location = "/data/interim/transformed_data"
//! malformed_location = "/data/malformed/errors"
//! source_format = "parquet"
//! output_format = "parquet"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::columns::DEFAULT_SOURCE_CONTAINER;
use crate::error::{ConfigError, Result};
use crate::format::DataFormat;

/// Locations and formats for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Landing zone: file or directory of raw batches.
    #[serde(default)]
    pub source_location: String,

    /// Interim zone root; partitions are created beneath it.
    #[serde(default)]
    pub interim_location: String,

    /// Quarantine zone for malformed records.
    #[serde(default)]
    pub malformed_location: String,

    /// Encoding of the landing files.
    #[serde(default)]
    pub source_format: DataFormat,

    /// Encoding used for both interim and malformed output.
    #[serde(default)]
    pub output_format: DataFormat,

    /// Provenance tag stamped on transformed records.
    #[serde(default = "default_source_container")]
    pub source_container: String,
}

fn default_source_container() -> String {
    DEFAULT_SOURCE_CONTAINER.to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl PipelineConfig {
    /// Create a config for the three zones with default formats.
    pub fn new(
        source_location: impl Into<String>,
        interim_location: impl Into<String>,
        malformed_location: impl Into<String>,
    ) -> Self {
        Self {
            source_location: source_location.into(),
            interim_location: interim_location.into(),
            malformed_location: malformed_location.into(),
            source_format: DataFormat::default(),
            output_format: DataFormat::default(),
            source_container: default_source_container(),
        }
    }

    /// Load a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_source_format(mut self, format: DataFormat) -> Self {
        self.source_format = format;
        self
    }

    #[must_use]
    pub fn with_output_format(mut self, format: DataFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_source_container(mut self, container: impl Into<String>) -> Self {
        self.source_container = container.into();
        self
    }

    /// Check that a source location is set; enough for read-only runs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingLocation`].
    pub fn validate_source(&self) -> Result<()> {
        if self.source_location.trim().is_empty() {
            return Err(ConfigError::MissingLocation {
                field: "source_location",
            });
        }
        Ok(())
    }

    /// Check that every location is set, the two sinks are distinct, and
    /// neither sink lies inside the source location.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.validate_source()?;
        let required = [
            ("interim_location", &self.interim_location),
            ("malformed_location", &self.malformed_location),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingLocation { field });
            }
        }
        if self.interim_location.trim() == self.malformed_location.trim() {
            return Err(ConfigError::SharedSinkLocation {
                location: self.interim_location.clone(),
            });
        }
        // Component-wise: `/data/landing2` is not inside `/data/landing`.
        let source = Path::new(self.source_location.trim());
        for (field, value) in required {
            if Path::new(value.trim()).starts_with(source) {
                return Err(ConfigError::SinkInsideSource {
                    field,
                    location: value.clone(),
                    source_location: self.source_location.clone(),
                });
            }
        }
        Ok(())
    }
}
