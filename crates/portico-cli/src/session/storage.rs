//! Session storage for persisting login state.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use super::StoredSession;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "portico").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Save a session to the default location.
pub fn save_session(session: &StoredSession) -> Result<()> {
    save_session_to(&session_path()?, session)
}

/// Load the session from the default location.
pub fn load_session() -> Result<Option<StoredSession>> {
    load_session_from(&session_path()?)
}

fn save_session_to(path: &Path, session: &StoredSession) -> Result<()> {
    let json = serde_json::to_string_pretty(session)?;
    fs::write(path, &json).context("Failed to write session file")?;

    // The file holds a bearer token.
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    debug!(path = %path.display(), "Session saved");
    Ok(())
}

fn load_session_from(path: &Path) -> Result<Option<StoredSession>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path).context("Failed to read session file")?;
    let stored = serde_json::from_str(&json).context("Invalid session file")?;
    Ok(Some(stored))
}
