//! Section Splitter — partitions generated text into an ordered label → body map.
//!
//! Implemented as a fold over the non-blank lines with two states: no section
//! open yet (lines are dropped) and inside a section (lines accumulate).

use serde::Serialize;

use crate::formatting::catalog::SectionCatalog;

/// One labelled section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionEntry {
    pub label: String,
    pub body: String,
}

/// Ordered mapping from canonical label to raw multi-line body.
///
/// Insertion order is the order in which each label first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SectionMap {
    entries: Vec<SectionEntry>,
}

impl SectionMap {
    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.body.as_str())
    }

    #[cfg(test)]
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionEntry> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stores a closed section. A label seen before keeps its position and
    /// gets the new lines appended to its body.
    fn close_section(&mut self, label: &str, lines: &[&str]) {
        let body = lines.join("\n");

        match self.entries.iter_mut().find(|e| e.label == label) {
            Some(existing) => {
                if existing.body.is_empty() {
                    existing.body = body;
                } else if !body.is_empty() {
                    existing.body.push('\n');
                    existing.body.push_str(&body);
                }
            }
            None => self.entries.push(SectionEntry {
                label: label.to_string(),
                body,
            }),
        }
    }
}

enum SplitState<'a> {
    NoSection,
    InSection { label: &'a str, lines: Vec<&'a str> },
}

/// Splits `text` into sections using the catalog's header table.
///
/// Never fails: text without recognisable headers yields an empty map, which
/// renderers treat as "show verbatim".
pub fn split_sections<'a>(text: &'a str, catalog: &'a SectionCatalog) -> SectionMap {
    let mut sections = SectionMap::default();

    let last = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .fold(SplitState::NoSection, |state, line| {
            match catalog.match_header(line) {
                Some(label) => {
                    if let SplitState::InSection {
                        label: previous,
                        lines,
                    } = state
                    {
                        sections.close_section(previous, &lines);
                    }
                    SplitState::InSection {
                        label,
                        lines: Vec::new(),
                    }
                }
                None => match state {
                    SplitState::NoSection => SplitState::NoSection,
                    SplitState::InSection { label, mut lines } => {
                        lines.push(line.trim());
                        SplitState::InSection { label, lines }
                    }
                },
            }
        });

    // The trailing section only counts if something followed its header.
    if let SplitState::InSection { label, lines } = last {
        if !lines.is_empty() {
            sections.close_section(label, &lines);
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> SectionMap {
        split_sections(text, &SectionCatalog::default())
    }

    #[test]
    fn test_summary_and_education_in_order() {
        let map = split("PROFESSIONAL SUMMARY\nAlice is great.\n\nEDUCATION\nBS CS 2020");

        assert_eq!(
            map.labels().collect::<Vec<_>>(),
            vec!["PROFESSIONAL SUMMARY", "EDUCATION"]
        );
        assert_eq!(map.get("PROFESSIONAL SUMMARY"), Some("Alice is great."));
        assert_eq!(map.get("EDUCATION"), Some("BS CS 2020"));
    }

    #[test]
    fn test_preamble_before_first_header_is_dropped() {
        let map = split("Jane Doe\njane@example.com\n\nSKILLS\nRust, Go");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("SKILLS"), Some("Rust, Go"));
    }

    #[test]
    fn test_no_headers_yields_empty_map() {
        let map = split("Just some prose.\nWith two lines.");
        assert!(map.is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        assert!(split("").is_empty());
        assert!(split("\n\n   \n").is_empty());
    }

    #[test]
    fn test_trailing_header_without_content_is_not_flushed() {
        let map = split("SKILLS\nRust\nADDITIONAL INFORMATION\n\n");
        assert_eq!(map.labels().collect::<Vec<_>>(), vec!["SKILLS"]);
    }

    #[test]
    fn test_intermediate_empty_section_is_kept() {
        let map = split("EDUCATION\nSKILLS\nRust");
        assert_eq!(map.labels().collect::<Vec<_>>(), vec!["EDUCATION", "SKILLS"]);
        assert_eq!(map.get("EDUCATION"), Some(""));
    }

    #[test]
    fn test_repeated_header_merges_into_first_bucket() {
        let map = split("SKILLS\nRust\nEDUCATION\nBS CS\nSKILLS\nGo");
        assert_eq!(map.labels().collect::<Vec<_>>(), vec!["SKILLS", "EDUCATION"]);
        assert_eq!(map.get("SKILLS"), Some("Rust\nGo"));
    }

    #[test]
    fn test_long_line_with_keyword_stays_in_body() {
        let text = "WORK EXPERIENCE\nSenior Engineer at Acme\nMentored juniors on continuing education programs across teams";
        let map = split(text);
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("WORK EXPERIENCE"),
            Some("Senior Engineer at Acme\nMentored juniors on continuing education programs across teams")
        );
    }

    #[test]
    fn test_header_at_exactly_50_chars_opens_section() {
        let header = format!("{:-<50}", "EDUCATION ");
        assert_eq!(header.chars().count(), 50);
        let map = split(&format!("SKILLS\nRust\n{header}\nBS CS"));
        assert_eq!(map.get("EDUCATION"), Some("BS CS"));
        assert_eq!(map.get("SKILLS"), Some("Rust"));
    }

    #[test]
    fn test_line_of_51_chars_with_keyword_is_body_text() {
        let line = format!("{:-<51}", "EDUCATION ");
        assert_eq!(line.chars().count(), 51);
        let map = split(&format!("SKILLS\nRust\n{line}"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("SKILLS"), Some(format!("Rust\n{line}").as_str()));
    }

    #[test]
    fn test_body_lines_are_trimmed() {
        let map = split("SKILLS\n   - Rust   \n\t- Go");
        assert_eq!(map.get("SKILLS"), Some("- Rust\n- Go"));
    }

    #[test]
    fn test_every_non_blank_line_attributed_at_most_once() {
        let text = "intro line\n\nPROFESSIONAL SUMMARY\nline a\nline b\n\nWORK EXPERIENCE\n- line c\n\nSKILLS\nline d\nEDUCATION\nline e";
        let map = split(text);

        let attributed: Vec<&str> = map.iter().flat_map(|e| e.body.lines()).collect();
        let headers: Vec<&str> = text
            .lines()
            .filter(|l| SectionCatalog::default().match_header(l).is_some())
            .collect();

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let count = attributed.iter().filter(|a| **a == line.trim()).count();
            if headers.contains(&line) || line == "intro line" {
                assert_eq!(count, 0, "line {line:?} should not be attributed");
            } else {
                assert_eq!(count, 1, "line {line:?} should appear exactly once");
            }
        }
    }
}
