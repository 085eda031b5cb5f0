//! Batch file discovery for landing locations.

use std::path::{Path, PathBuf};

use landing_model::DataFormat;

use crate::error::{IngestError, Result};

/// Lists batch files of `format` under `root`, recursing into subdirectories.
///
/// Entries whose name starts with `.` or `_` (staging files, commit markers)
/// are skipped. Returns files sorted by full path so partition directories
/// are read in a stable order.
pub fn list_batch_files(root: &Path, format: DataFormat) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(IngestError::LocationNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| IngestError::DirectoryRead {
            path: dir.clone(),
            source: e,
        })?;

        for entry_result in entries {
            let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
                path: dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if is_hidden(&path) {
                continue;
            }
            if path.is_dir() {
                pending.push(path);
            } else if path.is_file() && format.matches_path(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.') || name.starts_with('_'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("year=2024").join("month=1");
        std::fs::create_dir_all(&nested).unwrap();

        for path in [
            dir.path().join("b.csv"),
            dir.path().join("a.csv"),
            dir.path().join("notes.txt"),
            dir.path().join("_SUCCESS"),
            dir.path().join(".part-0.csv.tmp"),
            nested.join("part-0.csv"),
        ] {
            std::fs::write(&path, "id,timestamp,value\n").unwrap();
        }
        dir
    }

    #[test]
    fn test_list_batch_files_recursive_and_sorted() {
        let dir = create_test_dir();
        let files = list_batch_files(dir.path(), DataFormat::Csv).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv", "year=2024/month=1/part-0.csv"]);
    }

    #[test]
    fn test_list_batch_files_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = list_batch_files(&dir.path().join("absent"), DataFormat::Csv).unwrap_err();
        assert!(matches!(err, IngestError::LocationNotFound { .. }));
    }
}
