use crate::archive::config::NamingConfig;
use crate::archive::filename::parse_file_name;
use crate::archive::scanner::scan_archive_files;
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ArchiveSlot {
    pub time: String,
    pub file_name: String,
}

/// Archive files grouped by date token.
///
/// Every date holds at least one slot, and slots are sorted by time token
/// (then file name). Duplicate time tokens are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveIndex {
    days: BTreeMap<String, Vec<ArchiveSlot>>,
}

impl ArchiveIndex {
    pub fn build<I, P>(paths: I, naming: &NamingConfig) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut days: BTreeMap<String, Vec<ArchiveSlot>> = BTreeMap::new();
        for path in paths {
            let Some(file_name) = path.as_ref().file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let parsed = parse_file_name(file_name, naming);
            days.entry(parsed.date).or_default().push(ArchiveSlot {
                time: parsed.time,
                file_name: file_name.to_string(),
            });
        }

        for slots in days.values_mut() {
            slots.sort();
        }

        Self { days }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn entry_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn latest_date(&self) -> Option<&str> {
        self.days.keys().next_back().map(String::as_str)
    }

    pub fn times(&self, date: &str) -> Option<Vec<&str>> {
        self.days
            .get(date)
            .map(|slots| slots.iter().map(|s| s.time.as_str()).collect())
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &[ArchiveSlot])> {
        self.days.iter().map(|(date, slots)| (date.as_str(), slots.as_slice()))
    }

    /// The `date -> [time]` map embedded in the page.
    pub fn payload(&self) -> BTreeMap<&str, Vec<&str>> {
        self.iter()
            .map(|(date, slots)| (date, slots.iter().map(|s| s.time.as_str()).collect()))
            .collect()
    }

    /// Source file names, parallel to [`ArchiveIndex::payload`].
    pub fn links(&self) -> BTreeMap<&str, Vec<&str>> {
        self.iter()
            .map(|(date, slots)| (date, slots.iter().map(|s| s.file_name.as_str()).collect()))
            .collect()
    }
}

/// Scans `dir` and builds a fresh index from whatever archive files it holds.
pub fn index_directory(dir: &Path, naming: &NamingConfig, output_name: &str) -> Result<ArchiveIndex> {
    let files = scan_archive_files(dir, naming, output_name)?;
    Ok(ArchiveIndex::build(&files, naming))
}
