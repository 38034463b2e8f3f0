use std::env;
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;

pub const DEFAULT_DB_PATH: &str = "bookmarks.db";

/// Runtime settings, read from `BOOKMARKS_*` environment variables.
///
/// `BOOKMARKS_PROFILE_DIR` falls back to `USERPROFILE`, so on Windows the
/// tool works without any configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db_path: PathBuf,
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,
    #[serde(default, rename = "file")]
    pub bookmarks_file: Option<PathBuf>,
}

pub fn load() -> Result<Settings, ConfigError> {
    load_from(None, env::var("USERPROFILE").ok())
}

/// Build settings from `vars` instead of the process environment when given.
pub fn load_from(
    vars: Option<Map<String, String>>,
    user_profile: Option<String>,
) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder().set_default("db_path", DEFAULT_DB_PATH)?;
    if let Some(profile) = user_profile {
        builder = builder.set_default("profile_dir", profile)?;
    }
    builder
        .add_source(Environment::with_prefix("BOOKMARKS").source(vars))
        .build()?
        .try_deserialize()
}
