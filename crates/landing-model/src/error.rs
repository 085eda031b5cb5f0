//! Error types for pipeline configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or checking a [`crate::PipelineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A required location was not provided.
    #[error("missing required setting: {field}")]
    MissingLocation { field: &'static str },

    /// Interim and malformed zones must not share a location.
    #[error("interim and malformed locations must differ (both are {location})")]
    SharedSinkLocation { location: String },

    /// A sink location lies inside the source location.
    #[error("{field} {location} must not be inside source_location {source_location}")]
    SinkInsideSource {
        field: &'static str,
        location: String,
        source_location: String,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::MissingLocation {
            field: "source_location",
        };
        assert_eq!(err.to_string(), "missing required setting: source_location");

        let err = ConfigError::SinkInsideSource {
            field: "interim_location",
            location: "/data/landing/interim".to_string(),
            source_location: "/data/landing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "interim_location /data/landing/interim must not be inside source_location /data/landing"
        );
    }
}
