//! Where Touchline keeps its files.
//!
//! Both files live in one directory, `~/.config/touchline/`, regardless of
//! platform. `config.toml` holds settings and `touchline.sqlite` is the
//! key-value database behind the favourites store.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "touchline";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "touchline.sqlite";

/// Touchline's directory under the user's home, created on first use
pub fn touchline_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("No home directory to keep favourites in")?;
    touchline_dir_in(&home)
}

/// Touchline's directory under `home`, created if missing
pub fn touchline_dir_in(home: &Path) -> Result<PathBuf> {
    let dir = home.join(".config").join(APP_DIR);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

/// Settings file
pub fn config_path() -> Result<PathBuf> {
    Ok(touchline_dir()?.join(CONFIG_FILE))
}

/// SQLite file backing [`SqliteStore::open`](crate::SqliteStore::open)
pub fn database_path() -> Result<PathBuf> {
    Ok(touchline_dir()?.join(DATABASE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_dir_is_created_under_home() {
        let home = tempdir().unwrap();
        let dir = touchline_dir_in(home.path()).unwrap();

        assert_eq!(dir, home.path().join(".config").join("touchline"));
        assert!(dir.is_dir());
        // Calling again on an existing directory is fine
        assert_eq!(touchline_dir_in(home.path()).unwrap(), dir);
    }
}
