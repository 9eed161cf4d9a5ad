//! The hand-maintained pack format record.
//!
//! One specifier per line, `<version id> [<pack format>] <keyword>`, with
//! `//` starting a comment that runs to the end of the line.

use regex::Regex;
use serde::Serialize;
use std::collections::hash_map::{self, HashMap};
use std::fmt;

use crate::diagnostics::{DuplicateSpecifier, InvalidLine, InvalidReason};
use crate::error::{ReconcileError, Result};
use crate::format::{FormatAssignment, SpecifierKind};

const COMMENT_MARKER: &str = "//";

/// One parsed record line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecifierEntry {
    pub version_id: String,
    pub specifier: FormatAssignment,
    /// 1-based line number in the record.
    pub source_line: usize,
}

impl SpecifierEntry {
    pub fn new(version_id: impl Into<String>, specifier: FormatAssignment, source_line: usize) -> Self {
        Self {
            version_id: version_id.into(),
            specifier,
            source_line,
        }
    }

    pub fn kind(&self) -> SpecifierKind {
        self.specifier.kind()
    }

    pub fn value(&self) -> Option<u32> {
        self.specifier.value()
    }
}

/// Renders the record line this entry was read from, minus comments.
impl fmt::Display for SpecifierEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if !self.version_id.is_empty() {
            parts.push(self.version_id.clone());
        }
        if let Some(value) = self.value() {
            parts.push(value.to_string());
        }
        parts.push(self.kind().keyword().to_string());
        f.write_str(&parts.join(" "))
    }
}

/// Specifiers keyed by version id, guaranteed free of duplicates.
///
/// Only [`ParsedRecord::into_specifiers`] and [`SpecifierMap::from_entries`]
/// build one, so holding a map means the duplicate check already passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecifierMap {
    entries: HashMap<String, SpecifierEntry>,
}

impl SpecifierMap {
    /// Build from entries, failing on the first repeated id.
    pub fn from_entries(entries: impl IntoIterator<Item = SpecifierEntry>) -> Result<Self> {
        let mut map: HashMap<String, SpecifierEntry> = HashMap::new();
        let mut duplicates = Vec::new();
        for entry in entries {
            match map.entry(entry.version_id.clone()) {
                hash_map::Entry::Occupied(existing) => {
                    duplicates.push(DuplicateSpecifier {
                        first_line: existing.get().source_line,
                        version_id: entry.version_id,
                        duplicate_line: entry.source_line,
                    });
                }
                hash_map::Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
            }
        }

        if duplicates.is_empty() {
            Ok(Self { entries: map })
        } else {
            Err(ReconcileError::DuplicateSpecifier { duplicates })
        }
    }

    pub fn get(&self, version_id: &str) -> Option<&SpecifierEntry> {
        self.entries.get(version_id)
    }

    pub fn contains(&self, version_id: &str) -> bool {
        self.entries.contains_key(version_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &SpecifierEntry> {
        self.entries.values()
    }

    /// Entries in record order.
    pub fn by_source_line(&self) -> Vec<&SpecifierEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by_key(|e| e.source_line);
        entries
    }

    pub(crate) fn into_inner(self) -> HashMap<String, SpecifierEntry> {
        self.entries
    }
}

/// Everything read from a record, before the duplicate check.
#[derive(Debug, Clone, Default)]
pub struct ParsedRecord {
    /// Accepted entries in record order, first occurrence of each id only.
    pub entries: Vec<SpecifierEntry>,
    pub invalid: Vec<InvalidLine>,
    pub duplicates: Vec<DuplicateSpecifier>,
}

impl ParsedRecord {
    pub fn invalid_lines(&self) -> &[InvalidLine] {
        &self.invalid
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }

    /// The specifier map, or every duplicate seen while parsing.
    pub fn into_specifiers(self) -> Result<SpecifierMap> {
        if self.has_duplicates() {
            return Err(ReconcileError::DuplicateSpecifier {
                duplicates: self.duplicates,
            });
        }
        SpecifierMap::from_entries(self.entries)
    }
}

/// Line tokenizer for the record.
pub struct SpecifierParser {
    /// Splits a trimmed line into everything before the last token and
    /// the last token.
    tail: Regex,
}

impl Default for SpecifierParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecifierParser {
    pub fn new() -> Self {
        Self {
            tail: Regex::new(r"^(?:(?P<head>.*\S)\s+)?(?P<last>\S+)$").expect("valid regex"),
        }
    }

    /// Split off the last whitespace-delimited token.
    fn split_last<'a>(&self, text: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.tail.captures(text)?;
        let head = caps.name("head").map_or("", |m| m.as_str());
        let last = caps.name("last")?.as_str();
        Some((head, last))
    }

    /// Parse the whole record.
    pub fn parse(&self, text: &str) -> ParsedRecord {
        let mut record = ParsedRecord::default();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let content = match raw.find(COMMENT_MARKER) {
                Some(at) => &raw[..at],
                None => raw,
            }
            .trim();
            if content.is_empty() {
                continue;
            }

            let (version_id, specifier) = match self.parse_content(content) {
                Ok(parsed) => parsed,
                Err(reason) => {
                    let invalid = InvalidLine {
                        line,
                        text: raw.to_string(),
                        reason,
                    };
                    tracing::warn!(line, text = %raw, reason = %invalid.reason, "invalid line in record");
                    record.invalid.push(invalid);
                    continue;
                }
            };

            if let Some(&first_line) = seen.get(&version_id) {
                tracing::warn!(version = %version_id, first_line, line, "duplicate specifier");
                record.duplicates.push(DuplicateSpecifier {
                    version_id,
                    first_line,
                    duplicate_line: line,
                });
                continue;
            }

            tracing::trace!(line, version = %version_id, %specifier, "parsed specifier");
            seen.insert(version_id.clone(), line);
            record.entries.push(SpecifierEntry::new(version_id, specifier, line));
        }

        tracing::debug!(
            entries = record.entries.len(),
            invalid = record.invalid.len(),
            duplicates = record.duplicates.len(),
            "parsed record"
        );
        record
    }

    fn parse_content(&self, content: &str) -> std::result::Result<(String, FormatAssignment), InvalidReason> {
        let Some((head, last)) = self.split_last(content) else {
            return Err(InvalidReason::UnknownKeyword {
                token: content.to_string(),
            });
        };
        let kind = SpecifierKind::from_keyword(last).ok_or_else(|| InvalidReason::UnknownKeyword {
            token: last.to_string(),
        })?;

        let (version_id, value) = if kind.takes_value() {
            let (version_id, token) = self
                .split_last(head)
                .ok_or(InvalidReason::MissingValue { keyword: kind })?;
            let value = parse_value(token).ok_or_else(|| InvalidReason::BadValue {
                keyword: kind,
                token: token.to_string(),
            })?;
            (version_id, Some(value))
        } else {
            (head, None)
        };

        let specifier = FormatAssignment::from_parts(kind, value)
            .ok_or(InvalidReason::MissingValue { keyword: kind })?;
        Ok((version_id.to_string(), specifier))
    }
}

/// Base-10 unsigned integer, digits only.
fn parse_value(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Parse a record with a fresh tokenizer.
pub fn parse_record(text: &str) -> ParsedRecord {
    SpecifierParser::new().parse(text)
}
