use crate::error::ArchiveIndexError;
use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_ARCHIVE_DIR: &str = "/root/clawd/twitter-archive";
pub const DEFAULT_OUTPUT_NAME: &str = "index.html";

pub const ENV_HOME: &str = "ARCHIVE_INDEX_HOME";
pub const ENV_DIR: &str = "ARCHIVE_INDEX_DIR";
pub const ENV_OUTPUT: &str = "ARCHIVE_INDEX_OUTPUT";
pub const ENV_LOGS_DIR: &str = "ARCHIVE_INDEX_LOGS_DIR";
pub const ENV_CONFIG_PATH: &str = "ARCHIVE_INDEX_CONFIG_PATH";

/// Variables read by [`resolve_paths`] and [`index_home`].
pub const PATH_ENV_KEYS: &[&str] = &[ENV_HOME, ENV_DIR, ENV_OUTPUT, ENV_LOGS_DIR, ENV_CONFIG_PATH];

#[derive(Debug, Clone)]
pub struct ArchivePaths {
    pub archive_dir: PathBuf,
    pub output_name: String,
    pub output_file: PathBuf,
    pub logs_dir: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

/// Values taken from the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub archive_dir: Option<PathBuf>,
    pub output_name: Option<String>,
}

impl ArchivePaths {
    pub fn new(archive_dir: impl Into<PathBuf>, output_name: &str) -> Result<Self> {
        validate_output_name(output_name)?;
        let archive_dir = archive_dir.into();
        Ok(Self {
            output_file: archive_dir.join(output_name),
            archive_dir,
            output_name: output_name.to_string(),
            logs_dir: None,
            config_file: None,
        })
    }
}

fn validate_output_name(name: &str) -> Result<()> {
    let bare = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n == name);
    if bare {
        Ok(())
    } else {
        Err(ArchiveIndexError::InvalidOutputName(name.to_string()).into())
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => Some(PathBuf::from(v.trim())),
        _ => None,
    }
}

fn env_or_default_path(var: &str, fallback: PathBuf) -> PathBuf {
    env_path(var).unwrap_or(fallback)
}

fn index_home_from(explicit: Option<PathBuf>, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| home_dir.map(|h| h.join(".archive-index")))
}

/// `$ARCHIVE_INDEX_HOME`, else `~/.archive-index`; holds `config.toml` and `.env`.
pub fn index_home() -> Option<PathBuf> {
    index_home_from(env_path(ENV_HOME), dirs::home_dir())
}

pub fn resolve_paths(overrides: &PathOverrides) -> Result<ArchivePaths> {
    let archive_dir = match &overrides.archive_dir {
        Some(dir) => dir.clone(),
        None => env_or_default_path(ENV_DIR, PathBuf::from(DEFAULT_ARCHIVE_DIR)),
    };
    let output_name = match &overrides.output_name {
        Some(name) => name.clone(),
        None => match env::var(ENV_OUTPUT) {
            Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => DEFAULT_OUTPUT_NAME.to_string(),
        },
    };

    let mut paths = ArchivePaths::new(archive_dir, &output_name)?;
    paths.logs_dir = env_path(ENV_LOGS_DIR);
    paths.config_file =
        env_path(ENV_CONFIG_PATH).or_else(|| index_home().map(|h| h.join("config.toml")));
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_file_lives_in_archive_dir() {
        let paths = ArchivePaths::new("/srv/archive", "index.html").expect("paths");
        assert_eq!(paths.output_file, PathBuf::from("/srv/archive/index.html"));
        assert_eq!(paths.output_name, "index.html");
    }

    #[test]
    fn output_name_must_be_bare() {
        assert!(ArchivePaths::new("/srv/archive", "nested/index.html").is_err());
        assert!(ArchivePaths::new("/srv/archive", "..").is_err());
        assert!(ArchivePaths::new("/srv/archive", "").is_err());
    }

    #[test]
    fn index_home_prefers_explicit_dir() {
        let got = index_home_from(
            Some(PathBuf::from("/srv/archive-index")),
            Some(PathBuf::from("/home/alice")),
        );
        assert_eq!(got, Some(PathBuf::from("/srv/archive-index")));
    }

    #[test]
    fn index_home_falls_back_to_dot_dir_in_home() {
        let got = index_home_from(None, Some(PathBuf::from("/home/alice")));
        assert_eq!(got, Some(PathBuf::from("/home/alice/.archive-index")));
        assert_eq!(index_home_from(None, None), None);
    }

    #[test]
    fn cli_overrides_take_precedence() {
        let overrides = PathOverrides {
            archive_dir: Some(PathBuf::from("/tmp/override")),
            output_name: Some("home.html".to_string()),
        };
        let paths = resolve_paths(&overrides).expect("paths");
        assert_eq!(paths.archive_dir, PathBuf::from("/tmp/override"));
        assert_eq!(paths.output_file, PathBuf::from("/tmp/override/home.html"));
    }
}
