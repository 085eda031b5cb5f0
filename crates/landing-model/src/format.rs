//! Storage formats and write modes.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// On-disk encoding of a record batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    /// Apache Parquet (columnar, typed).
    #[default]
    Parquet,
    /// Comma-separated values with a header row.
    Csv,
}

impl DataFormat {
    /// File extension without the leading dot.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }

    /// Returns true if `path` carries this format's extension.
    pub fn matches_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension()))
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DataFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "parquet" => Ok(Self::Parquet),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unsupported data format: {other}")),
        }
    }
}

/// How a sink treats data already present at the destination.
///
/// Only appending is supported: existing partition contents are never
/// replaced, new part files are added alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    #[default]
    Append,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("PARQUET".parse::<DataFormat>(), Ok(DataFormat::Parquet));
        assert_eq!(" csv ".parse::<DataFormat>(), Ok(DataFormat::Csv));
        assert!("avro".parse::<DataFormat>().is_err());
    }

    #[test]
    fn matches_extension() {
        assert!(DataFormat::Csv.matches_path(Path::new("a/b/part-1.CSV")));
        assert!(!DataFormat::Parquet.matches_path(Path::new("a/b/part-1.csv")));
        assert!(!DataFormat::Parquet.matches_path(Path::new("a/b/_SUCCESS")));
    }
}
