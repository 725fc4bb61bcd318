use crate::archive::config::{IndexConfig, PageConfig};
use crate::archive::index::{ArchiveIndex, index_directory};
use crate::archive::paths::ArchivePaths;
use crate::assets::{INDEX_TEMPLATE, INDEX_TEMPLATE_NAME};
use crate::error::ArchiveIndexError;
use anyhow::{Context, Result};
use minijinja::{Environment, context};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

const PAYLOAD_INDENT: &[u8] = b"            ";

#[derive(Debug, Clone, Serialize)]
struct SlotView<'a> {
    time: &'a str,
    href: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct DayView<'a> {
    date: &'a str,
    slots: Vec<SlotView<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct StatsView<'a> {
    days: usize,
    entries: usize,
    latest: &'a str,
}

#[derive(Debug, Clone)]
pub struct PageOutcome {
    pub index: ArchiveIndex,
    pub output_file: PathBuf,
    pub bytes: usize,
    pub written: bool,
}

/// Pretty JSON with literal non-ASCII, safe to place inside a `<script>` element.
pub fn to_script_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(PAYLOAD_INDENT));
    value
        .serialize(&mut ser)
        .context("failed to serialize archive payload")?;
    let json = String::from_utf8(buf).context("archive payload is not valid UTF-8")?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// `"2024-02-16"` is shown as `"02-16"`.
fn short_date(date: &str) -> &str {
    match date.char_indices().nth(5) {
        Some((at, _)) => &date[at..],
        None => "",
    }
}

pub fn render_page(index: &ArchiveIndex, page: &PageConfig) -> Result<String> {
    let archive_data = to_script_json(&index.payload())?;
    let archive_links = to_script_json(&index.links())?;

    // Newest first, same as the client-side list.
    let days: Vec<DayView<'_>> = index
        .iter()
        .rev()
        .map(|(date, slots)| DayView {
            date,
            slots: slots
                .iter()
                .map(|s| SlotView {
                    time: &s.time,
                    href: &s.file_name,
                })
                .collect(),
        })
        .collect();
    let stats = StatsView {
        days: index.day_count(),
        entries: index.entry_count(),
        latest: index.latest_date().map(short_date).unwrap_or("--"),
    };

    let mut env = Environment::new();
    env.add_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)
        .map_err(ArchiveIndexError::from)?;
    let template = env
        .get_template(INDEX_TEMPLATE_NAME)
        .map_err(ArchiveIndexError::from)?;
    let html = template
        .render(context! {
            page => page,
            stats => stats,
            days => days,
            archive_data => archive_data,
            archive_links => archive_links,
        })
        .map_err(ArchiveIndexError::from)?;
    Ok(html)
}

/// Overwrites `path` with the rendered page in one write.
pub fn write_page(path: &Path, html: &str) -> Result<()> {
    fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))
}

/// Scan, index, render and (unless `dry_run`) write the page.
///
/// Nothing touches the output file until the page has rendered.
pub fn generate_page(paths: &ArchivePaths, config: &IndexConfig, dry_run: bool) -> Result<PageOutcome> {
    let index = index_directory(&paths.archive_dir, &config.naming, &paths.output_name)?;
    let html = render_page(&index, &config.page)?;
    if !dry_run {
        write_page(&paths.output_file, &html)?;
    }

    Ok(PageOutcome {
        index,
        output_file: paths.output_file.clone(),
        bytes: html.len(),
        written: !dry_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::config::NamingConfig;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn index_of(names: &[&str]) -> ArchiveIndex {
        ArchiveIndex::build(names.iter().map(|n| PathBuf::from(*n)), &NamingConfig::default())
    }

    fn embedded(html: &str, name: &str) -> serde_json::Value {
        let marker = format!("const {name} = ");
        let start = html.find(&marker).expect("payload marker") + marker.len();
        let end = start + html[start..].find(";\n").expect("payload end");
        serde_json::from_str(&html[start..end]).expect("payload json")
    }

    #[test]
    fn script_json_keeps_non_ascii_literal() {
        let mut map = BTreeMap::new();
        map.insert("二月", vec!["早晨"]);
        let json = to_script_json(&map).expect("json");
        assert!(json.contains("\"二月\""));
        assert!(json.contains("\n            \"二月\""));
    }

    #[test]
    fn script_json_escapes_markup_characters() {
        let mut map = BTreeMap::new();
        map.insert("<!--", vec!["a&b>"]);
        let json = to_script_json(&map).expect("json");
        assert!(!json.contains('<'));
        assert!(!json.contains('&'));
        let back: BTreeMap<String, Vec<String>> = serde_json::from_str(&json).expect("decode");
        assert_eq!(back["<!--"], vec!["a&b>".to_string()]);
    }

    #[test]
    fn empty_index_renders_empty_state() {
        let html = render_page(&ArchiveIndex::default(), &PageConfig::default()).expect("render");
        assert_eq!(embedded(&html, "ARCHIVE_DATA"), serde_json::json!({}));
        assert!(html.contains("<div class=\"empty-state\" id=\"empty-state\">"));
        assert!(html.contains("id=\"total-days\">0<"));
        assert!(html.contains("id=\"latest-date\">--<"));
        assert!(!html.contains("<noscript>"));
    }

    #[test]
    fn payload_and_links_match_index() {
        let index = index_of(&[
            "TWITTER_SUMMARY_2024-01-01_18-00.html",
            "TWITTER_SUMMARY_2024-01-01_06-00.html",
            "TWITTER_SUMMARY_2024-01-02.html",
        ]);
        let html = render_page(&index, &PageConfig::default()).expect("render");

        assert_eq!(
            embedded(&html, "ARCHIVE_DATA"),
            serde_json::json!({
                "2024-01-01": ["06-00", "18-00"],
                "2024-01-02": ["00-00"],
            })
        );
        assert_eq!(
            embedded(&html, "ARCHIVE_LINKS"),
            serde_json::json!({
                "2024-01-01": [
                    "TWITTER_SUMMARY_2024-01-01_06-00.html",
                    "TWITTER_SUMMARY_2024-01-01_18-00.html",
                ],
                "2024-01-02": ["TWITTER_SUMMARY_2024-01-02.html"],
            })
        );
        assert!(html.contains("<a href=\"TWITTER_SUMMARY_2024-01-01_06-00.html\">06-00</a>"));
        assert!(html.contains("<a href=\"TWITTER_SUMMARY_2024-01-02.html\">00-00</a>"));
        assert!(html.contains("id=\"total-summaries\">3<"));
        assert!(html.contains("id=\"latest-date\">01-02<"));
        assert!(html.contains("id=\"empty-state\" style=\"display: none;\""));
    }

    #[test]
    fn page_text_is_escaped() {
        let page = PageConfig {
            title: "Tom & Jerry <daily>".to_string(),
            ..PageConfig::default()
        };
        let html = render_page(&ArchiveIndex::default(), &page).expect("render");
        assert!(html.contains("<title>Tom &amp; Jerry &lt;daily&gt;</title>"));
    }

    #[test]
    fn markup_in_file_names_stays_text() {
        let index = index_of(&["TWITTER_SUMMARY_<img src=x onerror=alert(1)>_06-00.html"]);
        let html = render_page(&index, &PageConfig::default()).expect("render");

        assert!(!html.contains("innerHTML"));
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("el.textContent = text;"));
        assert_eq!(
            embedded(&html, "ARCHIVE_DATA"),
            serde_json::json!({ "<img src=x onerror=alert(1)>": ["06-00"] })
        );
    }

    #[test]
    fn short_date_drops_year() {
        assert_eq!(short_date("2024-02-16"), "02-16");
        assert_eq!(short_date("2024"), "");
        assert_eq!(short_date("二〇二四年二月十六"), "二月十六");
    }

    #[test]
    fn dry_run_leaves_output_absent() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("TWITTER_SUMMARY_2024-01-01.html"), "x").expect("write");
        let paths = ArchivePaths::new(tmp.path(), "index.html").expect("paths");

        let outcome = generate_page(&paths, &IndexConfig::default(), true).expect("generate");
        assert!(!outcome.written);
        assert_eq!(outcome.index.entry_count(), 1);
        assert!(!paths.output_file.exists());
    }

    #[test]
    fn regenerating_is_byte_identical() {
        let tmp = tempdir().expect("tempdir");
        for name in [
            "TWITTER_SUMMARY_2024-01-01_06-00.html",
            "TWITTER_SUMMARY_2024-01-01_18-00.html",
            "TWITTER_SUMMARY_2024-01-02.html",
        ] {
            fs::write(tmp.path().join(name), "x").expect("write");
        }
        let paths = ArchivePaths::new(tmp.path(), "index.html").expect("paths");
        let config = IndexConfig::default();

        generate_page(&paths, &config, false).expect("first run");
        let first = fs::read(&paths.output_file).expect("read first");
        generate_page(&paths, &config, false).expect("second run");
        let second = fs::read(&paths.output_file).expect("read second");
        assert_eq!(first, second);
    }
}
