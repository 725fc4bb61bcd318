use anyhow::Result;

use crate::archive::audit;
use crate::archive::config::{NamingConfig, load_config};
use crate::archive::filename::reconstruct_file_name;
use crate::archive::index::ArchiveIndex;
use crate::archive::paths::{PathOverrides, resolve_paths};
use crate::archive::render::generate_page;
use crate::archive::warn::{self, WarnEvent};
use crate::commands::CommandReport;

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub overrides: PathOverrides,
    pub dry_run: bool,
}

/// Slots whose file name is not `<prefix><date><sep><time><ext>`, i.e. the
/// ones that got the default slot and need their real file name as a link.
fn implicit_slot_count(index: &ArchiveIndex, naming: &NamingConfig) -> usize {
    index
        .iter()
        .flat_map(|(date, slots)| slots.iter().map(move |s| (date, s)))
        .filter(|(date, s)| reconstruct_file_name(date, &s.time, naming) != s.file_name)
        .count()
}

pub fn run(opts: &GenerateOptions) -> Result<CommandReport> {
    let paths = resolve_paths(&opts.overrides)?;
    let config = load_config(paths.config_file.as_deref())?;
    let mut report = CommandReport::new("generate");

    report.detail(format!("archive_dir={}", paths.archive_dir.display()));
    report.detail(format!("output_file={}", paths.output_file.display()));

    let outcome = generate_page(&paths, &config, opts.dry_run)?;
    let index = &outcome.index;

    report.detail(format!("days={}", index.day_count()));
    report.detail(format!("entries={}", index.entry_count()));
    if let Some(latest) = index.latest_date() {
        let times = index.times(latest).unwrap_or_default();
        report.detail(format!("latest={latest} slots={}", times.join(",")));
    }
    let implicit = implicit_slot_count(index, &config.naming);
    if implicit > 0 {
        report.detail(format!(
            "implicit_slots={implicit} (no time in file name, filed under {})",
            config.naming.default_slot
        ));
    }
    if index.is_empty() {
        report.detail("no archive files found; page shows the empty state");
    }

    if outcome.written {
        report.detail(format!(
            "wrote {} bytes to {}",
            outcome.bytes,
            outcome.output_file.display()
        ));
    } else {
        report.detail(format!(
            "dry-run: {} bytes rendered, {} left untouched",
            outcome.bytes,
            outcome.output_file.display()
        ));
    }

    if let Some(logs_dir) = &paths.logs_dir {
        let message = format!(
            "days={} entries={} written={}",
            index.day_count(),
            index.entry_count(),
            outcome.written
        );
        if let Err(err) = audit::append_event(logs_dir, "generate", "ok", &message) {
            warn::emit(WarnEvent {
                code: "AUDIT_WRITE_FAILED",
                stage: "audit",
                action: "append-event",
                path: &logs_dir.display().to_string(),
                reason: "audit-log-unwritable",
                err: &format!("{err:#}"),
            });
        }
    }

    Ok(report)
}
