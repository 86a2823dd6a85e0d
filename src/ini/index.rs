//! Read-only section/key lookup over an `.ini` document

use crate::ini::document::{classify, LineKind};
use std::collections::BTreeMap;

/// Section → key → value, built by scanning top to bottom.
///
/// When a key appears more than once in a section (e.g. repeated
/// `+EncDatasetPath=` lines) the last value wins. That collapse is only a
/// view: the index is rebuilt from an [`IniDocument`](crate::ini::IniDocument)
/// for every read and never written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionIndex {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl SectionIndex {
    /// Scan lines into an index. Entries before the first section header
    /// belong to no section and are skipped.
    ///
    /// Names and values that are not valid UTF-8 are decoded lossily; the
    /// bytes on disk are unaffected.
    pub fn build<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        let mut current: Option<String> = None;

        for line in lines {
            match classify(line) {
                LineKind::Section(name) => {
                    let name = lossy(name);
                    sections.entry(name.clone()).or_default();
                    current = Some(name);
                }
                LineKind::Entry { key, value } => {
                    if let Some(section) = current.as_ref().and_then(|s| sections.get_mut(s)) {
                        section.insert(lossy(key), lossy(value));
                    }
                }
                _ => {}
            }
        }

        SectionIndex { sections }
    }

    /// Section names in lexicographic order.
    pub fn section_names(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }

    pub fn section(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.sections.get(name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_value_wins() {
        let index = SectionIndex::build([
            "[Pelorus.BaseMap]",
            "+EncDatasetPath=US3CA52M.zip",
            "+EncDatasetPath=US5OAKFG.zip",
        ]
        .map(str::as_bytes));
        assert_eq!(
            index.get("Pelorus.BaseMap", "+EncDatasetPath"),
            Some("US5OAKFG.zip")
        );
    }

    #[test]
    fn test_skips_comments_and_orphans() {
        let index = SectionIndex::build([
            "orphan=1",
            "[A]",
            "; k=commented",
            "# k=hashed",
            "k=real",
            "",
        ]
        .map(str::as_bytes));
        assert_eq!(index.section_names(), vec!["A"]);
        assert_eq!(index.section("A").unwrap().len(), 1);
        assert_eq!(index.get("A", "k"), Some("real"));
        assert_eq!(index.get("A", "orphan"), None);
    }

    #[test]
    fn test_sections_sorted_and_merged() {
        let index = SectionIndex::build(
            ["[Zeta]", "a=1", "[Alpha]", "b=2", "[Zeta]", "c=3"].map(str::as_bytes),
        );
        assert_eq!(index.section_names(), vec!["Alpha", "Zeta"]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("Zeta", "a"), Some("1"));
        assert_eq!(index.get("Zeta", "c"), Some("3"));
    }

    #[test]
    fn test_empty_section_listed() {
        let index = SectionIndex::build([b"[Empty]".as_slice()]);
        assert_eq!(index.section_names(), vec!["Empty"]);
        assert!(index.section("Empty").unwrap().is_empty());
        assert!(SectionIndex::build(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_non_utf8_value_is_readable() {
        let index = SectionIndex::build([b"[A]".as_slice(), b"name=Caf\xe9", b"k=v"]);
        assert_eq!(index.get("A", "name"), Some("Caf\u{fffd}"));
        assert_eq!(index.get("A", "k"), Some("v"));
    }
}
