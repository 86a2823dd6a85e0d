//! Line buffer for Unreal `.ini` files
//!
//! Unreal config files look like
//!
//! ```text
//! [/Script/Engine.RendererSettings]
//! r.DefaultFeature.MotionBlur=False
//! ; comment
//! +EncDatasetPath=US3CA52M.zip
//! +EncDatasetPath=US5OAKFG.zip
//! ```
//!
//! [`IniDocument`] is the authoritative copy of such a file: the raw lines,
//! in order. All edits go through it so that comments, blank lines, ordering
//! and repeated `+Key` entries survive untouched. Lookups go through the
//! [`SectionIndex`] built from it.
//!
//! Lines are kept as bytes. Files are not always valid UTF-8 (a Latin-1
//! copyright sign in a comment is common), and lines that are not edited
//! must be written back exactly as read.

use crate::ini::index::SectionIndex;

/// What a single line of an `.ini` file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// Starts with `;` or `#` after trimming.
    Comment,
    /// `[Name]`, carrying `Name`.
    Section(&'a [u8]),
    /// `Key=Value`. The key is everything before the first `=`, the `+`/`-`
    /// array prefixes included.
    Entry { key: &'a [u8], value: &'a [u8] },
    /// Anything else; kept as-is and otherwise ignored.
    Other,
}

/// Classify one raw line. Surrounding ASCII whitespace is ignored.
pub fn classify(line: &[u8]) -> LineKind<'_> {
    let trimmed = line.trim_ascii();
    match trimmed {
        [] => LineKind::Blank,
        [b';' | b'#', ..] => LineKind::Comment,
        [b'[', name @ .., b']'] => LineKind::Section(name),
        _ => match trimmed.iter().position(|&b| b == b'=') {
            Some(idx) if idx > 0 => LineKind::Entry {
                key: &trimmed[..idx],
                value: &trimmed[idx + 1..],
            },
            _ => LineKind::Other,
        },
    }
}

/// How [`IniDocument::set`] applied a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// An existing `key=` line was rewritten.
    Replaced,
    /// The key was added to an existing section.
    Inserted,
    /// The section did not exist and was appended with the key.
    SectionCreated,
}

/// The ordered raw lines of an `.ini` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    lines: Vec<Vec<u8>>,
}

impl IniDocument {
    /// Split file content into lines.
    ///
    /// Trailing line breaks are dropped so that a final newline does not turn
    /// into an empty last line; [`IniDocument::to_bytes`] adds exactly one back.
    pub fn parse(content: &[u8]) -> Self {
        let end = content
            .iter()
            .rposition(|&b| b != b'\n' && b != b'\r')
            .map_or(0, |i| i + 1);
        let content = &content[..end];
        if content.is_empty() {
            return IniDocument::default();
        }
        IniDocument {
            lines: content.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect(),
        }
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the document for writing: lines joined by `\n`, plus one
    /// trailing newline.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.lines.join(&b'\n');
        out.push(b'\n');
        out
    }

    /// Build the read-only lookup view of this document.
    pub fn index(&self) -> SectionIndex {
        SectionIndex::build(self.lines.iter().map(Vec::as_slice))
    }

    /// Set `key` to `value` inside `[section]`.
    ///
    /// The first `key=` line in the section is rewritten in place. A missing
    /// key is inserted right before the header that ends the section, or at
    /// the end of the file for the last section. A missing section is
    /// appended at the end, separated from earlier content by one blank line.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> SetOutcome {
        let new_line = format!("{}={}", key, value).into_bytes();
        let mut in_section = false;
        let mut hit = None;

        for (i, line) in self.lines.iter().enumerate() {
            match classify(line) {
                LineKind::Section(name) => {
                    if in_section {
                        hit = Some((i, SetOutcome::Inserted));
                        break;
                    }
                    in_section = name == section.as_bytes();
                }
                LineKind::Entry { key: existing, .. }
                    if in_section && existing == key.as_bytes() =>
                {
                    hit = Some((i, SetOutcome::Replaced));
                    break;
                }
                _ => {}
            }
        }

        match hit {
            Some((i, SetOutcome::Replaced)) => {
                self.lines[i] = new_line;
                return SetOutcome::Replaced;
            }
            Some((i, outcome)) => {
                self.lines.insert(i, new_line);
                return outcome;
            }
            None if in_section => {
                self.lines.push(new_line);
                return SetOutcome::Inserted;
            }
            None => {}
        }

        if self.lines.last().is_some_and(|l| !l.trim_ascii().is_empty()) {
            self.lines.push(Vec::new());
        }
        self.lines.push(format!("[{}]", section).into_bytes());
        self.lines.push(new_line);
        SetOutcome::SectionCreated
    }

    /// Remove the first `key=` line inside `[section]`.
    ///
    /// Returns false, leaving the document untouched, when there is no such
    /// line. Same-named keys in other sections are never touched.
    pub fn delete(&mut self, section: &str, key: &str) -> bool {
        let mut in_section = false;
        let mut target = None;

        for (i, line) in self.lines.iter().enumerate() {
            match classify(line) {
                LineKind::Section(name) => in_section = name == section.as_bytes(),
                LineKind::Entry { key: existing, .. }
                    if in_section && existing == key.as_bytes() =>
                {
                    target = Some(i);
                    break;
                }
                _ => {}
            }
        }

        match target {
            Some(i) => {
                self.lines.remove(i);
                true
            }
            None => false,
        }
    }
}
