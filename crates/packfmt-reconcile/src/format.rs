//! Pack format values and the record keywords that name them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyword selecting how sure the record is about a release's format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecifierKind {
    Verified,
    Unverified,
    Maybe,
    Unknown,
    None,
}

impl SpecifierKind {
    /// Every kind, in keyword order.
    pub const ALL: [SpecifierKind; 5] = [
        SpecifierKind::Verified,
        SpecifierKind::Unverified,
        SpecifierKind::Maybe,
        SpecifierKind::Unknown,
        SpecifierKind::None,
    ];

    /// The record keyword, always lower case.
    pub fn keyword(&self) -> &'static str {
        match self {
            SpecifierKind::Verified => "verified",
            SpecifierKind::Unverified => "unverified",
            SpecifierKind::Maybe => "maybe",
            SpecifierKind::Unknown => "unknown",
            SpecifierKind::None => "none",
        }
    }

    /// Case-insensitive keyword lookup.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = keyword.to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Whether the keyword is preceded by a numeric argument.
    pub fn takes_value(&self) -> bool {
        matches!(
            self,
            SpecifierKind::Verified | SpecifierKind::Unverified | SpecifierKind::Maybe
        )
    }
}

impl fmt::Display for SpecifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Pack format assigned to a release.
///
/// Value-bearing variants carry the pack format number; `Unknown` and
/// `None` carry nothing, which keeps "value present iff value-bearing kind"
/// true by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatAssignment {
    Verified(u32),
    Unverified(u32),
    Maybe(u32),
    Unknown,
    None,
}

impl FormatAssignment {
    /// Build from a kind and an optional value, `None` if they disagree.
    pub fn from_parts(kind: SpecifierKind, value: Option<u32>) -> Option<Self> {
        match (kind, value) {
            (SpecifierKind::Verified, Some(v)) => Some(Self::Verified(v)),
            (SpecifierKind::Unverified, Some(v)) => Some(Self::Unverified(v)),
            (SpecifierKind::Maybe, Some(v)) => Some(Self::Maybe(v)),
            (SpecifierKind::Unknown, Option::None) => Some(Self::Unknown),
            (SpecifierKind::None, Option::None) => Some(Self::None),
            _ => Option::None,
        }
    }

    pub fn kind(&self) -> SpecifierKind {
        match self {
            Self::Verified(_) => SpecifierKind::Verified,
            Self::Unverified(_) => SpecifierKind::Unverified,
            Self::Maybe(_) => SpecifierKind::Maybe,
            Self::Unknown => SpecifierKind::Unknown,
            Self::None => SpecifierKind::None,
        }
    }

    pub fn value(&self) -> Option<u32> {
        match self {
            Self::Verified(v) | Self::Unverified(v) | Self::Maybe(v) => Some(*v),
            Self::Unknown | Self::None => Option::None,
        }
    }
}

/// Renders the way the generated table spells it: `Verified(15)`, `Unknown`.
impl fmt::Display for FormatAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind() {
            SpecifierKind::Verified => "Verified",
            SpecifierKind::Unverified => "Unverified",
            SpecifierKind::Maybe => "Maybe",
            SpecifierKind::Unknown => "Unknown",
            SpecifierKind::None => "None",
        };
        match self.value() {
            Some(v) => write!(f, "{name}({v})"),
            Option::None => f.write_str(name),
        }
    }
}
