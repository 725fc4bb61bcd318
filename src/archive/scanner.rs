use crate::archive::config::NamingConfig;
use crate::archive::filename::archive_stem;
use crate::archive::warn::{self, WarnEvent};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn is_archive_file_name(name: &str, naming: &NamingConfig, output_name: &str) -> bool {
    name != output_name && archive_stem(name, naming).is_some()
}

/// Lists the archive files directly under `dir`, skipping the generated page.
///
/// The result is in directory order, which is unspecified.
pub fn scan_archive_files(
    dir: &Path,
    naming: &NamingConfig,
    output_name: &str,
) -> Result<Vec<PathBuf>> {
    let read_dir =
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    let mut out = Vec::new();
    for entry in read_dir {
        let entry = entry.with_context(|| format!("failed to read {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            warn::emit(WarnEvent {
                code: "SCAN_SKIPPED",
                stage: "scan",
                action: "read-dir-entry",
                path: &path.to_string_lossy(),
                reason: "non-utf8-file-name",
                err: "",
            });
            continue;
        };

        if is_archive_file_name(name, naming, output_name) {
            out.push(path);
        }
    }

    Ok(out)
}
