//! Problems found while reading the record or merging it with the manifest.
//!
//! Invalid lines and unused specifiers are reported and the run goes on;
//! duplicates end the run before anything is written.

use serde::Serialize;
use std::fmt;

use crate::format::{FormatAssignment, SpecifierKind};

/// A record line that does not match `<id> [<value>] <keyword>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidLine {
    /// 1-based line number in the record.
    pub line: usize,
    /// The line as written, comment included.
    pub text: String,
    pub reason: InvalidReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvalidReason {
    /// The last token is not a known keyword.
    UnknownKeyword { token: String },
    /// A value-bearing keyword with nothing before it.
    MissingValue { keyword: SpecifierKind },
    /// The token before a value-bearing keyword is not an integer.
    BadValue { keyword: SpecifierKind, token: String },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKeyword { token } => write!(f, "unrecognized keyword `{token}`"),
            Self::MissingValue { keyword } => write!(f, "`{keyword}` needs a pack format before it"),
            Self::BadValue { keyword, token } => {
                write!(f, "`{token}` is not a valid pack format for `{keyword}`")
            }
        }
    }
}

impl fmt::Display for InvalidLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid line, line {}: {} ({})", self.line, self.text, self.reason)
    }
}

/// Two record lines naming the same version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateSpecifier {
    pub version_id: String,
    pub first_line: usize,
    pub duplicate_line: usize,
}

impl fmt::Display for DuplicateSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` specified on line {} and again on line {}",
            self.version_id, self.first_line, self.duplicate_line
        )
    }
}

/// A record entry whose version is not in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedSpecifier {
    pub version_id: String,
    pub source_line: usize,
    pub specifier: FormatAssignment,
}

impl fmt::Display for UnusedSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` (line {}, {}) matches no version in the manifest",
            self.version_id, self.source_line, self.specifier
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_line_display() {
        let line = InvalidLine {
            line: 7,
            text: "1.20 x verified".to_string(),
            reason: InvalidReason::BadValue {
                keyword: SpecifierKind::Verified,
                token: "x".to_string(),
            },
        };
        assert_eq!(
            line.to_string(),
            "invalid line, line 7: 1.20 x verified (`x` is not a valid pack format for `verified`)"
        );
    }

    #[test]
    fn test_duplicate_display() {
        let dup = DuplicateSpecifier {
            version_id: "1.0".to_string(),
            first_line: 1,
            duplicate_line: 2,
        };
        assert_eq!(dup.to_string(), "`1.0` specified on line 1 and again on line 2");
    }

    #[test]
    fn test_reason_serializes_tagged() {
        let reason = InvalidReason::UnknownKeyword { token: "soon".to_string() };
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json["kind"], "unknown_keyword");
        assert_eq!(json["token"], "soon");
    }
}
