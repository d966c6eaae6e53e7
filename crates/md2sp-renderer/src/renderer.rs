//! Markdown renderer producing class-marked HTML for SharePoint.

use std::fmt::Write;
use std::sync::Arc;

use pulldown_cmark::{CodeBlockKind, Event, LinkType, Options, Parser, Tag, TagEnd};

use crate::highlight::{SyntaxHighlighter, SyntectHighlighter, highlight_code};
use crate::html;
use crate::linkify::{push_linkified, push_prose};
use crate::state::{
    CodeBlockState, HeadingState, ImageState, ParagraphState, TableState, TocEntry, escape_html,
};
use crate::theme::Theme;
use crate::util::heading_level_to_num;

/// Default heading text for the table of contents block.
pub const DEFAULT_TOC_TITLE: &str = "Table of Contents";

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML with class-only styling.
    pub html: String,
    /// Heading entries collected for the table of contents (all levels).
    ///
    /// Empty unless the table of contents is enabled.
    pub toc: Vec<TocEntry>,
}

/// Markdown renderer with highlighted code blocks and optional table of contents.
///
/// Raw HTML in the source passes through verbatim, bare URLs are autolinked
/// and typographic replacements are applied to prose. Every code block is
/// wrapped in `<pre class="ms-rteElement-CodeHTML">` around the highlighter's
/// output.
///
/// # Example
///
/// ```
/// use md2sp_renderer::SharePointRenderer;
///
/// let result = SharePointRenderer::new()
///     .with_toc("Contents")
///     .render_markdown("# Intro\n\nHello");
/// assert!(result.html.contains(r#"<h1 id="intro">"#));
/// assert_eq!(result.toc[0].id, "intro");
/// ```
pub struct SharePointRenderer {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    paragraph: ParagraphState,
    /// Pending image data (src, title) waiting for alt text.
    pending_image: Option<(String, String)>,
    /// Nesting depth of explicit links; bare URLs are not autolinked inside.
    link_depth: usize,
    theme: Theme,
    /// Table of contents title, `None` when the ToC is disabled.
    toc_title: Option<String>,
    /// Output offset of the first `[[toc]]` marker.
    toc_offset: Option<usize>,
    highlighter: Arc<dyn SyntaxHighlighter>,
}

impl SharePointRenderer {
    /// Create a renderer with the light theme, no table of contents and the
    /// bundled syntect highlighter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::new(false),
            paragraph: ParagraphState::default(),
            pending_image: None,
            link_depth: 0,
            theme: Theme::default(),
            toc_title: None,
            toc_offset: None,
            highlighter: Arc::new(SyntectHighlighter),
        }
    }

    /// Select the color theme used for code highlighting.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Enable heading anchors and a table of contents with the given title.
    #[must_use]
    pub fn with_toc(mut self, title: impl Into<String>) -> Self {
        self.toc_title = Some(title.into());
        self.heading = HeadingState::new(true);
        self
    }

    /// Replace the syntax highlighting engine.
    #[must_use]
    pub fn with_highlighter(mut self, highlighter: Arc<dyn SyntaxHighlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Parser options: tables, strikethrough, task lists and smart punctuation.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Render markdown text using the configured parser options.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        self.render(self.create_parser(markdown))
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        let mut html = std::mem::take(&mut self.output);
        let toc = self.heading.take_toc();
        if let Some(title) = &self.toc_title {
            let mut block = String::new();
            html::toc_block(&toc, title, &mut block);
            let offset = self.toc_offset.take().unwrap_or(0);
            tracing::debug!(entries = toc.len(), offset, "inserting table of contents");
            html.insert_str(offset, &block);
        }

        RenderResult { html, toc }
    }

    /// Push content to output or heading buffer based on context.
    ///
    /// Markup inside an image is dropped; only its text reaches the alt
    /// attribute.
    fn push_inline(&mut self, content: &str) {
        if self.image.is_active() {
            return;
        }
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        if self.paragraph.is_active()
            && !matches!(event, Event::Text(_) | Event::End(TagEnd::Paragraph))
        {
            self.paragraph.mark_mixed();
        }

        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) => self.push_inline(&html),
            Event::InlineHtml(html) => self.inline_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br>\n"),
            Event::Rule => self.output.push_str("<hr>\n"),
            Event::TaskListMarker(checked) => {
                self.output.push_str(if checked {
                    r#"<input type="checkbox" checked disabled> "#
                } else {
                    r#"<input type="checkbox" disabled> "#
                });
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not enabled in parser options
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if !self.code.is_active() {
                    self.paragraph.start(self.output.len());
                    self.output.push_str("<p>");
                }
            }
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the ID is known
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>\n"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(ToOwned::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>\n"),
                Some(n) => writeln!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>\n"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>\n");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead>\n<tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                let href = if link_type == LinkType::Email {
                    format!("mailto:{dest_url}")
                } else {
                    dest_url.to_string()
                };
                let mut link_tag = format!(r#"<a href="{}""#, escape_html(&href));
                if !title.is_empty() {
                    write!(link_tag, r#" title="{}""#, escape_html(&title)).unwrap();
                }
                link_tag.push('>');
                self.link_depth += 1;
                self.push_inline(&link_tag);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected until the end tag
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if !self.code.is_active() {
                    self.output.push_str("</p>\n");
                    self.end_paragraph();
                }
            }
            TagEnd::Heading(_level) => {
                if let Some(heading) = self.heading.complete_heading() {
                    let level = heading.level;
                    match heading.id {
                        Some(id) => writeln!(
                            self.output,
                            r#"<h{level} id="{}">{}</h{level}>"#,
                            escape_html(&id),
                            heading.html.trim()
                        ),
                        None => writeln!(
                            self.output,
                            "<h{level}>{}</h{level}>",
                            heading.html.trim()
                        ),
                    }
                    .unwrap();
                }
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>\n"),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                let highlighted =
                    highlight_code(&*self.highlighter, &content, lang.as_deref(), self.theme);
                html::code_block(&highlighted, &mut self.output);
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
            }
            TagEnd::Item => self.output.push_str("</li>\n"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    let mut img = String::new();
                    html::image(&src, &alt, &title, &mut img);
                    self.push_inline(&img);
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody>\n</table>\n"),
            TagEnd::TableHead => {
                self.output.push_str("</tr>\n</thead>\n<tbody>\n");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>\n"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Link => {
                self.link_depth = self.link_depth.saturating_sub(1);
                self.push_inline("</a>");
            }
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
        }
    }

    /// Finish a paragraph, consuming it if it is a `[[toc]]` marker.
    fn end_paragraph(&mut self) {
        let Some(start) = self.paragraph.end() else {
            return;
        };
        if self.toc_title.is_none() {
            return;
        }
        self.output.truncate(start);
        if self.toc_offset.is_none() {
            self.toc_offset = Some(start);
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
            return;
        }
        if self.image.is_active() {
            self.image.push_str(text);
            return;
        }
        if self.paragraph.is_active() {
            self.paragraph.push_text(text);
        }
        if self.heading.is_active() {
            self.heading.push_text(text);
        }

        let mut html = String::with_capacity(text.len());
        if self.link_depth > 0 {
            push_prose(text, &mut html);
        } else {
            push_linkified(text, &mut html);
        }
        self.push_inline(&html);
    }

    /// Pass raw inline HTML through, tracking raw `<a>` tags so their text
    /// is not autolinked a second time.
    fn inline_html(&mut self, html: &str) {
        match raw_anchor(html) {
            Some(RawAnchor::Open) => self.link_depth += 1,
            Some(RawAnchor::Close) => self.link_depth = self.link_depth.saturating_sub(1),
            None => {}
        }
        self.push_inline(html);
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        let html = format!("<code>{}</code>", escape_html(code));
        self.push_inline(&html);
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_newline();
        } else if self.image.is_active() {
            self.image.push_str(" ");
        } else {
            self.push_inline("\n");
        }
    }
}

enum RawAnchor {
    Open,
    Close,
}

/// Classify a raw inline HTML fragment as an opening or closing `<a>` tag.
fn raw_anchor(html: &str) -> Option<RawAnchor> {
    let tag = html.trim_start().strip_prefix('<')?;
    let (rest, kind) = match tag.strip_prefix('/') {
        Some(rest) => (rest, RawAnchor::Close),
        None => (tag, RawAnchor::Open),
    };
    let mut chars = rest.chars();
    if !chars.next().is_some_and(|c| c.eq_ignore_ascii_case(&'a')) {
        return None;
    }
    match chars.next() {
        Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace() => Some(kind),
        _ => None,
    }
}

impl Default for SharePointRenderer {
    fn default() -> Self {
        Self::new()
    }
}
