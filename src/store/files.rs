use crate::model::Course;
use crate::store::{StoreError, StoreResult};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Lists the `*.json` files of a data directory, sorted by path
pub fn list_batch_files(dir: &Path) -> StoreResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Reads one batch file
pub fn read_batch(path: &Path) -> StoreResult<Vec<Course>> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes courses as a new `courses_<timestamp>.json` batch in `dir`
///
/// The directory is created if missing. Returns the path written.
pub fn write_batch(dir: &Path, courses: &[Course]) -> StoreResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let file_name = format!("courses_{}.json", Utc::now().format("%Y%m%dT%H%M%S%.3fZ"));
    let path = dir.join(file_name);

    let json = serde_json::to_string_pretty(courses).map_err(|source| StoreError::Json {
        path: path.clone(),
        source,
    })?;

    fs::write(&path, json).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!("Wrote {} courses to {}", courses.len(), path.display());
    Ok(path)
}
