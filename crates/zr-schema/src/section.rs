//! Recognised top-level settings sections

use serde::{Deserialize, Serialize};

/// One of the top-level settings sections the schema knows about.
///
/// The storage key of each section is its camel-case name
/// (`pageMenu`, `sciteBadge`); every other section is a single lowercase word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionName {
    /// Import of PDF annotations
    Annotations,
    /// Inline citation autocomplete
    Autocomplete,
    /// Clipboard copy formats
    Copy,
    /// Item metadata import
    Metadata,
    /// Item notes import
    Notes,
    /// Miscellaneous toggles (autoload, cache, theme)
    Other,
    /// Page context menu
    PageMenu,
    /// Scite.ai badge rendering
    SciteBadge,
    /// Keyboard shortcuts
    Shortcuts,
    /// Zotero item type labels
    Typemap,
    /// Web import defaults
    Webimport,
}

impl SectionName {
    /// All sections, in storage order
    pub const ALL: [SectionName; 11] = [
        SectionName::Annotations,
        SectionName::Autocomplete,
        SectionName::Copy,
        SectionName::Metadata,
        SectionName::Notes,
        SectionName::Other,
        SectionName::PageMenu,
        SectionName::SciteBadge,
        SectionName::Shortcuts,
        SectionName::Typemap,
        SectionName::Webimport,
    ];

    /// Storage key for this section
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Annotations => "annotations",
            Self::Autocomplete => "autocomplete",
            Self::Copy => "copy",
            Self::Metadata => "metadata",
            Self::Notes => "notes",
            Self::Other => "other",
            Self::PageMenu => "pageMenu",
            Self::SciteBadge => "sciteBadge",
            Self::Shortcuts => "shortcuts",
            Self::Typemap => "typemap",
            Self::Webimport => "webimport",
        }
    }

    /// Look up a section by its storage key.
    ///
    /// Matching is exact: stored keys are case-sensitive.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.as_str() == key)
    }

    /// Whether `key` names a recognised section
    #[inline]
    #[must_use]
    pub fn is_recognised(key: &str) -> bool {
        Self::parse(key).is_some()
    }
}

impl std::fmt::Display for SectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
