use std::path::{Path, PathBuf};

use crate::archive::paths::index_home;

fn home_dotenv(index_home: Option<&Path>) -> Option<PathBuf> {
    let path = index_home?.join(".env");
    path.is_file().then_some(path)
}

/// Loads `./.env` (or a parent's), else `<index home>/.env`.
///
/// Returns the file that was applied so `status` can show it. Variables
/// already set in the process environment are never overwritten.
pub fn load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        return Some(path);
    }

    let path = home_dotenv(index_home().as_deref())?;
    dotenvy::from_path(&path).ok().map(|()| path)
}
