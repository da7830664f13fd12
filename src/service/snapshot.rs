use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::info;

use crate::model::player::Snapshot;

use super::ranking::annotate;

/// Reads a precomputed snapshot. Scores are recomputed so they never disagree with the formula.
pub fn read_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut snapshot: Snapshot = serde_json::from_str(&raw).map_err(|source| SnapshotError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    annotate(&mut snapshot.players);

    info!(
        "Loaded {} players from snapshot {} taken at {}",
        snapshot.players.len(),
        path.display(),
        snapshot.timestamp
    );
    Ok(snapshot)
}

pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let io_error = |source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(snapshot).map_err(|source| SnapshotError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(io_error)?;

    info!("Saved {} players to {}", snapshot.players.len(), path.display());
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot {} is unavailable: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("snapshot {} is malformed: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
