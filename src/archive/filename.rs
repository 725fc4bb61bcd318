use crate::archive::config::NamingConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub date: String,
    pub time: String,
}

/// Returns the part of `name` between the naming prefix and extension, if it has both.
pub fn archive_stem<'a>(name: &'a str, naming: &NamingConfig) -> Option<&'a str> {
    name.strip_prefix(naming.prefix.as_str())?
        .strip_suffix(naming.extension.as_str())
}

/// Splits an archive basename into date and time tokens.
///
/// Tokens are never validated: whatever sits on either side of the first
/// separator is taken verbatim, and a name without a separator gets
/// `naming.default_slot` as its time.
pub fn parse_file_name(name: &str, naming: &NamingConfig) -> ParsedName {
    let without_prefix = name.strip_prefix(naming.prefix.as_str()).unwrap_or(name);
    let stem = without_prefix
        .strip_suffix(naming.extension.as_str())
        .unwrap_or(without_prefix);

    match stem.split_once(naming.separator) {
        Some((date, time)) => ParsedName {
            date: date.to_string(),
            time: time.to_string(),
        },
        None => ParsedName {
            date: stem.to_string(),
            time: naming.default_slot.clone(),
        },
    }
}

pub fn reconstruct_file_name(date: &str, time: &str, naming: &NamingConfig) -> String {
    format!(
        "{}{}{}{}{}",
        naming.prefix, date, naming.separator, time, naming.extension
    )
}
