//! Section keyword catalog — the ordered header table the splitter matches against.
//!
//! Entries are evaluated in priority order and the first keyword found in the
//! upper-cased line wins. Longer synonyms must precede the shorter keyword they
//! contain ("WORK EXPERIENCE" before "EXPERIENCE"), otherwise the shorter one
//! shadows them.

/// Lines longer than this (in characters) are never treated as headers.
pub const DEFAULT_HEADER_MAX_CHARS: usize = 50;

/// Default (keyword, canonical label) table. Every keyword is its own label.
const DEFAULT_KEYWORDS: &[&str] = &[
    "PROFESSIONAL SUMMARY",
    "SUMMARY",
    "OBJECTIVE",
    "WORK EXPERIENCE",
    "PROFESSIONAL EXPERIENCE",
    "EXPERIENCE",
    "EMPLOYMENT HISTORY",
    "EDUCATION",
    "TECHNICAL SKILLS",
    "SKILLS",
    "CERTIFICATIONS",
    "PROJECTS",
    "ACHIEVEMENTS",
    "AWARDS",
    "ADDITIONAL INFORMATION",
];

/// One row of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionKeyword {
    /// Upper-cased substring searched for in candidate header lines.
    pub keyword: String,
    /// Key the section body is stored under in the `SectionMap`.
    pub label: String,
}

/// Read-only header table plus the header length guard.
#[derive(Debug, Clone)]
pub struct SectionCatalog {
    entries: Vec<SectionKeyword>,
    header_max_chars: usize,
}

impl SectionCatalog {
    /// Builds a catalog from (keyword, label) pairs in priority order.
    /// Keywords are upper-cased so matching stays case-insensitive.
    pub fn new<K, L>(pairs: impl IntoIterator<Item = (K, L)>, header_max_chars: usize) -> Self
    where
        K: Into<String>,
        L: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(keyword, label)| SectionKeyword {
                keyword: keyword.into().to_uppercase(),
                label: label.into(),
            })
            .collect();

        Self {
            entries,
            header_max_chars,
        }
    }

    /// The built-in resume catalog with a custom length guard.
    pub fn with_header_max_chars(header_max_chars: usize) -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().map(|k| (*k, *k)), header_max_chars)
    }

    pub fn entries(&self) -> &[SectionKeyword] {
        &self.entries
    }

    pub fn header_max_chars(&self) -> usize {
        self.header_max_chars
    }

    /// Returns the canonical label if `line` is a section header.
    ///
    /// A header is a line of at most `header_max_chars` characters whose
    /// upper-cased form contains a catalog keyword. The length is measured on
    /// the raw line, leading and trailing whitespace included.
    pub fn match_header(&self, line: &str) -> Option<&str> {
        if line.chars().count() > self.header_max_chars {
            return None;
        }

        let upper = line.to_uppercase();
        self.entries
            .iter()
            .find(|entry| upper.contains(entry.keyword.as_str()))
            .map(|entry| entry.label.as_str())
    }
}

impl Default for SectionCatalog {
    fn default() -> Self {
        Self::with_header_max_chars(DEFAULT_HEADER_MAX_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_plain_uppercase_header() {
        let catalog = SectionCatalog::default();
        assert_eq!(catalog.match_header("EDUCATION"), Some("EDUCATION"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let catalog = SectionCatalog::default();
        assert_eq!(catalog.match_header("Education:"), Some("EDUCATION"));
        assert_eq!(catalog.match_header("**Technical Skills**"), Some("TECHNICAL SKILLS"));
    }

    #[test]
    fn test_longer_synonym_wins_over_contained_keyword() {
        let catalog = SectionCatalog::default();
        assert_eq!(catalog.match_header("WORK EXPERIENCE"), Some("WORK EXPERIENCE"));
        assert_eq!(
            catalog.match_header("Professional Summary"),
            Some("PROFESSIONAL SUMMARY")
        );
    }

    #[test]
    fn test_first_keyword_in_priority_order_wins() {
        // Both SUMMARY and SKILLS occur; SUMMARY sits earlier in the table.
        let catalog = SectionCatalog::default();
        assert_eq!(catalog.match_header("Skills Summary"), Some("SUMMARY"));
    }

    #[test]
    fn test_length_guard_boundary_50_vs_51() {
        let catalog = SectionCatalog::default();

        let fifty = format!("{:<50}", "EDUCATION");
        assert_eq!(fifty.chars().count(), 50);
        assert_eq!(catalog.match_header(&fifty), Some("EDUCATION"));

        let fifty_one = format!("{:<51}", "EDUCATION");
        assert_eq!(fifty_one.chars().count(), 51);
        assert_eq!(catalog.match_header(&fifty_one), None);
    }

    #[test]
    fn test_length_guard_counts_characters_not_bytes() {
        // 45 multi-byte glyphs + " SKILLS" = 52 chars but well over 52 bytes
        let catalog = SectionCatalog::with_header_max_chars(52);
        let line = format!("{} SKILLS", "é".repeat(45));
        assert_eq!(catalog.match_header(&line), Some("SKILLS"));
    }

    #[test]
    fn test_long_sentence_mentioning_keyword_is_not_a_header() {
        let catalog = SectionCatalog::default();
        let line = "My education at State University shaped my approach to systems design.";
        assert_eq!(catalog.match_header(line), None);
    }

    #[test]
    fn test_custom_catalog_maps_synonym_to_canonical_label() {
        let catalog = SectionCatalog::new(
            vec![("CAREER HISTORY", "WORK EXPERIENCE"), ("schooling", "EDUCATION")],
            DEFAULT_HEADER_MAX_CHARS,
        );
        assert_eq!(catalog.match_header("Career History"), Some("WORK EXPERIENCE"));
        assert_eq!(catalog.match_header("SCHOOLING"), Some("EDUCATION"));
        assert_eq!(catalog.match_header("EDUCATION"), None);
    }

    #[test]
    fn test_custom_header_limit() {
        let catalog = SectionCatalog::with_header_max_chars(5);
        assert_eq!(catalog.match_header("SKILLS"), None);
    }
}
