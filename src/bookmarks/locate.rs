use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::settings::Settings;

const CHROME_DEFAULT_PROFILE: [&str; 7] = [
    "AppData",
    "Local",
    "Google",
    "Chrome",
    "User Data",
    "Default",
    "Bookmarks",
];

/// Where Chrome keeps the default profile's bookmarks under a user profile dir.
pub fn bookmarks_path(profile_dir: &Path) -> PathBuf {
    CHROME_DEFAULT_PROFILE
        .iter()
        .fold(profile_dir.to_path_buf(), |p, part| p.join(part))
}

pub fn find_bookmarks_file(profile_dir: &Path) -> Result<PathBuf> {
    existing(bookmarks_path(profile_dir))
}

/// An explicit `bookmarks_file` wins over the profile lookup.
pub fn resolve(settings: &Settings) -> Result<PathBuf> {
    match (&settings.bookmarks_file, &settings.profile_dir) {
        (Some(file), _) => existing(file.clone()),
        (None, Some(dir)) => find_bookmarks_file(dir),
        (None, None) => Err(Error::NotFound(bookmarks_path(Path::new("")))),
    }
}

fn existing(path: PathBuf) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(Error::NotFound(path))
    }
}
