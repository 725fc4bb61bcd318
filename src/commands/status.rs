use anyhow::Result;
use std::env;
use std::path::Path;

use crate::archive::config::{CONFIG_ENV_KEYS, load_config};
use crate::archive::paths::{PATH_ENV_KEYS, PathOverrides, resolve_paths};
use crate::commands::CommandReport;

fn set_env_keys() -> Vec<&'static str> {
    PATH_ENV_KEYS
        .iter()
        .chain(CONFIG_ENV_KEYS)
        .copied()
        .filter(|key| env::var(key).is_ok_and(|v| !v.trim().is_empty()))
        .collect()
}

pub fn run(overrides: &PathOverrides, dotenv_file: Option<&Path>) -> Result<CommandReport> {
    let paths = resolve_paths(overrides)?;
    let mut report = CommandReport::new("status");

    report.detail(format!("version={}", env!("CARGO_PKG_VERSION")));
    match dotenv_file {
        Some(path) => report.detail(format!("dotenv={}", path.display())),
        None => report.detail("dotenv=(none)"),
    }
    report.detail(format!("archive_dir={}", paths.archive_dir.display()));
    report.detail(format!("output_file={}", paths.output_file.display()));
    match &paths.logs_dir {
        Some(dir) => report.detail(format!("logs_dir={}", dir.display())),
        None => report.detail("logs_dir=(disabled)"),
    }
    match &paths.config_file {
        Some(path) if path.exists() => report.detail(format!("config_file={}", path.display())),
        Some(path) => report.detail(format!("config_file={} (absent)", path.display())),
        None => report.detail("config_file=(none)"),
    }

    match load_config(paths.config_file.as_deref()) {
        Ok(cfg) => {
            report.detail(format!(
                "naming={}<date>[{}<time>]{} default_slot={}",
                cfg.naming.prefix,
                cfg.naming.separator,
                cfg.naming.extension,
                cfg.naming.default_slot
            ));
        }
        Err(err) => report.issue(format!("{err:#}")),
    }

    let keys = set_env_keys();
    if keys.is_empty() {
        report.detail("env_overrides=(none)");
    } else {
        report.detail(format!("env_overrides={}", keys.join(",")));
    }

    if !paths.archive_dir.is_dir() {
        report.issue("archive dir does not exist");
    }

    Ok(report)
}
