//! State structs for markdown rendering.
//!
//! These structs track context while the renderer walks the pulldown-cmark
//! event stream.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// Paragraph text that marks where the table of contents goes.
const TOC_MARKER: &str = "[[toc]]";

/// State for tracking code block rendering.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    /// Whether we're inside a code block.
    active: bool,
    /// Language of current code block (e.g., "rust", "python").
    language: Option<String>,
    /// Buffer for code block content.
    buffer: String,
}

impl CodeBlockState {
    /// Start a new code block with optional language.
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// End the current code block and return (language, content).
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub(crate) fn push_newline(&mut self) {
        self.buffer.push('\n');
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    /// Whether we're inside the table header row.
    in_head: bool,
    /// Column alignments for current table.
    alignments: Vec<Alignment>,
    /// Current column index in table row.
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Get the alignment style for the current cell.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align: left;""#,
            Some(Alignment::Center) => r#" style="text-align: center;""#,
            Some(Alignment::Right) => r#" style="text-align: right;""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// State for tracking image alt text capture.
#[derive(Default)]
pub(crate) struct ImageState {
    active: bool,
    alt_text: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        self.active = true;
        self.alt_text.clear();
    }

    pub(crate) fn end(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.alt_text)
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// State for detecting the `[[toc]]` placement marker.
///
/// A paragraph is a marker when its only content is plain text reading
/// `[[toc]]` (case-insensitive, surrounding whitespace ignored).
#[derive(Default)]
pub(crate) struct ParagraphState {
    /// Output offset where the current paragraph's `<p>` starts.
    start: Option<usize>,
    /// Plain text of the current paragraph.
    text: String,
    /// Whether the paragraph has held anything besides text.
    mixed: bool,
}

impl ParagraphState {
    pub(crate) fn start(&mut self, offset: usize) {
        self.start = Some(offset);
        self.text.clear();
        self.mixed = false;
    }

    pub(crate) fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Record non-text content (emphasis, links, inline code, ...).
    pub(crate) fn mark_mixed(&mut self) {
        self.mixed = true;
    }

    /// End the paragraph, returning its start offset if it was a TOC marker.
    pub(crate) fn end(&mut self) -> Option<usize> {
        let start = self.start.take()?;
        let is_marker = !self.mixed && self.text.trim().eq_ignore_ascii_case(TOC_MARKER);
        is_marker.then_some(start)
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// A heading ready to be written.
pub(crate) struct CompletedHeading {
    pub(crate) level: u8,
    /// Anchor ID, present only when anchors are enabled.
    pub(crate) id: Option<String>,
    /// Inner HTML with inline formatting.
    pub(crate) html: String,
}

/// State for tracking headings, anchors and table of contents entries.
pub(crate) struct HeadingState {
    /// Whether headings receive slug IDs and ToC entries.
    anchors: bool,
    /// Current heading level being processed (None if not in a heading).
    current_level: Option<u8>,
    /// Buffer for heading plain text (for table of contents and slug).
    text: String,
    /// Buffer for heading HTML (with inline formatting).
    html: String,
    toc: Vec<TocEntry>,
    /// Counter for generating unique heading IDs.
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    pub(crate) fn new(anchors: bool) -> Self {
        Self {
            anchors,
            current_level: None,
            text: String::new(),
            html: String::new(),
            toc: Vec::new(),
            id_counts: HashMap::new(),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub(crate) fn start_heading(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
        self.html.clear();
    }

    /// Complete heading and record its table of contents entry.
    pub(crate) fn complete_heading(&mut self) -> Option<CompletedHeading> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);

        let id = if self.anchors {
            let id = self.generate_id(&text);
            self.toc.push(TocEntry {
                level,
                title: text.trim().to_owned(),
                id: id.clone(),
            });
            Some(id)
        } else {
            None
        };

        Some(CompletedHeading { level, id, html })
    }

    /// Generate a unique ID for a heading.
    fn generate_id(&mut self, text: &str) -> String {
        let base_id = slugify(text);
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}

/// Convert heading text to an anchor slug.
///
/// Trims and lowercases the text, replaces each run of whitespace with a
/// single dash, then drops every character that is not alphanumeric, `_` or
/// `-`.
///
/// # Examples
///
/// ```
/// use md2sp_renderer::slugify;
///
/// assert_eq!(slugify("Setup Guide"), "setup-guide");
/// assert_eq!(slugify("What's New?"), "whats-new");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.trim().chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            if !in_whitespace {
                result.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_alphanumeric() || c == '_' || c == '-' {
            result.push(c);
        }
    }

    result
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
