use crate::error::ArchiveIndexError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// How archive file names are laid out: `<prefix><date>[<separator><time>]<extension>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub prefix: String,
    pub extension: String,
    pub separator: char,
    /// Time token used when a file name carries no time part.
    pub default_slot: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix: "TWITTER_SUMMARY_".to_string(),
            extension: ".html".to_string(),
            separator: '_',
            default_slot: "00-00".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub subtitle: String,
    pub repo_url: String,
    pub update_note: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Twitter 推文归档".to_string(),
            subtitle: "每日精选推文，自动整理".to_string(),
            repo_url: "https://github.com/fengzhao2021/twitter-archive".to_string(),
            update_note: "每6小时自动更新".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    pub naming: NamingConfig,
    pub page: PageConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PartialIndexConfig {
    naming: Option<NamingConfig>,
    page: Option<PageConfig>,
}

pub const ENV_PREFIX: &str = "ARCHIVE_INDEX_PREFIX";
pub const ENV_EXTENSION: &str = "ARCHIVE_INDEX_EXTENSION";
pub const ENV_DEFAULT_SLOT: &str = "ARCHIVE_INDEX_DEFAULT_SLOT";
pub const ENV_TITLE: &str = "ARCHIVE_INDEX_TITLE";

/// Variables read by [`load_config`] after the TOML file.
pub const CONFIG_ENV_KEYS: &[&str] = &[ENV_PREFIX, ENV_EXTENSION, ENV_DEFAULT_SLOT, ENV_TITLE];

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn validate(cfg: &IndexConfig) -> Result<()> {
    let naming = &cfg.naming;
    if naming.prefix.is_empty() {
        return Err(ArchiveIndexError::InvalidConfig("naming prefix cannot be empty".into()).into());
    }
    if naming.extension.is_empty() {
        return Err(
            ArchiveIndexError::InvalidConfig("naming extension cannot be empty".into()).into(),
        );
    }
    if naming.default_slot.trim().is_empty() {
        return Err(
            ArchiveIndexError::InvalidConfig("naming default_slot cannot be empty".into()).into(),
        );
    }
    Ok(())
}

fn merge_toml(base: &mut IndexConfig, raw: &str, origin: &Path) -> Result<()> {
    let parsed: PartialIndexConfig = toml::from_str(raw).map_err(|err| {
        ArchiveIndexError::InvalidConfig(format!("failed to parse {}: {err}", origin.display()))
    })?;
    if let Some(naming) = parsed.naming {
        base.naming = naming;
    }
    if let Some(page) = parsed.page {
        base.page = page;
    }
    Ok(())
}

fn merge_file_config(base: &mut IndexConfig, path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(path).map_err(|err| {
        ArchiveIndexError::InvalidConfig(format!("failed to read {}: {err}", path.display()))
    })?;
    merge_toml(base, &raw, path)
}

fn apply_env_overrides(cfg: &mut IndexConfig) {
    cfg.naming.prefix = env_or_string(ENV_PREFIX, &cfg.naming.prefix);
    cfg.naming.extension = env_or_string(ENV_EXTENSION, &cfg.naming.extension);
    cfg.naming.default_slot = env_or_string(ENV_DEFAULT_SLOT, &cfg.naming.default_slot);
    cfg.page.title = env_or_string(ENV_TITLE, &cfg.page.title);
}

/// Layers the optional TOML file and then environment overrides on top of the defaults.
pub fn load_config(config_file: Option<&Path>) -> Result<IndexConfig> {
    let mut cfg = IndexConfig::default();
    merge_file_config(&mut cfg, config_file)?;
    apply_env_overrides(&mut cfg);
    validate(&cfg)?;
    Ok(cfg)
}
