//! Whole-state JSON snapshots: the tournament's persistence collaborator.

use crate::models::{Tournament, TournamentError};
use std::fs;
use std::path::Path;

/// Read a snapshot written by [`save`].
pub fn load(path: &Path) -> Result<Tournament, TournamentError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Read a snapshot if the file exists.
pub fn load_if_exists(path: &Path) -> Result<Option<Tournament>, TournamentError> {
    if path.exists() {
        load(path).map(Some)
    } else {
        Ok(None)
    }
}

/// Write the snapshot to a sibling temp file, then rename it over `path`.
pub fn save(tournament: &Tournament, path: &Path) -> Result<(), TournamentError> {
    let json = serde_json::to_string_pretty(tournament)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    log::debug!("Saved snapshot to {}", path.display());
    Ok(())
}
