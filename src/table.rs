//! Ordered scale table and the `RealTimeScale.toml` line format.
//!
//! ```text
//! [RealTimeScale]
//!
//! "DefaultScale" = 4.00
//! "inventory" = 2.50
//! ```
//!
//! Only the `[RealTimeScale]` section is read. Lines that are not
//! `key = number` are skipped rather than rejected, so one damaged line never
//! hides the rest of the file. This is deliberately not a TOML parser.

use crate::scale::format2;

/// Section marker, matched case-insensitively on read.
pub const SECTION_HEADER: &str = "[RealTimeScale]";

/// Reserved key of the default entry.
pub const DEFAULT_KEY: &str = "DefaultScale";

/// One `"key" = value` line.
#[derive(Debug, Clone, PartialEq)]
struct ScaleEntry {
    key: String,
    scale: f64,
}

/// Context keys mapped to scales, in file order.
///
/// Backed by a `Vec`: tables hold a handful of entries and order matters more
/// than lookup speed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaleTable {
    entries: Vec<ScaleEntry>,
}

impl ScaleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.scale)
    }

    /// Value of the [`DEFAULT_KEY`] entry, if the table has one.
    pub fn default_scale(&self) -> Option<f64> {
        self.get(DEFAULT_KEY)
    }

    /// Update `key` in place, or append it when it is new.
    pub fn upsert(&mut self, key: &str, scale: f64) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.scale = scale,
            None => self.entries.push(ScaleEntry {
                key: key.to_owned(),
                scale,
            }),
        }
    }

    /// Append `key` only when it is not already present.
    pub fn insert_if_absent(&mut self, key: &str, scale: f64) {
        if self.get(key).is_none() {
            self.entries.push(ScaleEntry {
                key: key.to_owned(),
                scale,
            });
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Parse the contents of a preference file.
    ///
    /// Never fails. Text outside the `[RealTimeScale]` section and malformed
    /// lines inside it are ignored; the first other `[section]` ends parsing.
    pub fn parse(text: &str) -> Self {
        let mut table = Self::new();
        for line in section_lines(text) {
            if let Some((key, scale)) = parse_entry(line) {
                table.upsert(&key, scale);
            }
        }
        table
    }

    /// Value of the first default line in the section.
    ///
    /// Later default lines are ignored, even when the first one does not parse.
    pub fn first_default(text: &str) -> Option<f64> {
        section_lines(text)
            .find_map(|line| {
                let (lhs, rhs) = line.split_once('=')?;
                let key: String = lhs.trim().chars().filter(|&c| c != '"').collect();
                (key == DEFAULT_KEY).then(|| parse_scale(rhs))
            })
            .flatten()
    }

    /// Render the whole file: header, blank line, one entry per line.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(SECTION_HEADER.len() + 2 + self.entries.len() * 24);
        out.push_str(SECTION_HEADER);
        out.push_str("\n\n");
        for entry in &self.entries {
            out.push('"');
            out.push_str(&entry.key);
            out.push_str("\" = ");
            out.push_str(&format2(entry.scale));
            out.push('\n');
        }
        out
    }
}

/// Trimmed lines inside the `[RealTimeScale]` section, up to the next section.
fn section_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .scan(false, |in_section, line| {
            if line.eq_ignore_ascii_case(SECTION_HEADER) {
                *in_section = true;
                return Some(None);
            }
            if !*in_section {
                return Some(None);
            }
            if line.starts_with('[') && line.ends_with(']') {
                return None;
            }
            Some(Some(line))
        })
        .flatten()
}

/// `"key" = 1.25` → `("key", 1.25)`. Quotes anywhere in the key are dropped.
fn parse_entry(line: &str) -> Option<(String, f64)> {
    let (lhs, rhs) = line.split_once('=')?;
    let key: String = lhs.trim().chars().filter(|&c| c != '"').collect();
    if key.is_empty() {
        return None;
    }
    Some((key, parse_scale(rhs)?))
}

fn parse_scale(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
