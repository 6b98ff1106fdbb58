// file: src/config/paths.rs
// version: 1.0.0
// guid: ef91bba8-858d-4802-a710-506295c51c73

//! Platform-dependent store location

use crate::Result;
use std::path::{Path, PathBuf};

/// Directory name created under the platform data directory
pub const APP_DIR_NAME: &str = "Herokron";

/// File name of the JSON store
pub const DATABASE_FILE_NAME: &str = "db.json";

/// Default store path for this platform
///
/// Linux: `~/.local/share/Herokron/db.json`, macOS:
/// `~/Library/Application Support/Herokron/db.json`, Windows:
/// `%APPDATA%\Herokron\db.json`.
pub fn default_database_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        crate::error::HerokronError::config(format!(
            "Unsupported platform ({}): no user data directory available",
            std::env::consts::OS
        ))
    })?;

    Ok(database_path_in(&data_dir))
}

/// Store path rooted at an arbitrary data directory
pub fn database_path_in(data_dir: &Path) -> PathBuf {
    data_dir.join(APP_DIR_NAME).join(DATABASE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_in() {
        let path = database_path_in(Path::new("/home/user/.local/share"));
        assert_eq!(
            path,
            PathBuf::from("/home/user/.local/share/Herokron/db.json")
        );
    }

    #[test]
    fn test_default_database_path_ends_with_store_file() {
        // CI containers may lack a home directory; only check the shape when resolvable.
        if let Ok(path) = default_database_path() {
            assert!(path.ends_with("Herokron/db.json"));
        }
    }
}
