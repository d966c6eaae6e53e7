//! Conversion facade: render markdown, then apply inline styles.

use std::sync::Arc;

use md2sp_renderer::{
    DEFAULT_TOC_TITLE, RenderResult, SharePointRenderer, SyntaxHighlighter, SyntectHighlighter,
    Theme,
};

use crate::style::StyleSheet;

/// Options for a single conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Insert a table of contents and give headings anchor IDs.
    pub include_toc: bool,
    /// Title shown above the table of contents.
    pub toc_title: String,
    /// Color theme.
    pub theme: Theme,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            include_toc: false,
            toc_title: DEFAULT_TOC_TITLE.to_owned(),
            theme: Theme::default(),
        }
    }
}

/// Convert markdown to SharePoint-ready HTML.
///
/// # Example
///
/// ```
/// use md2sp_core::{ConvertOptions, convert};
///
/// let html = convert("Hello **world**.", &ConvertOptions::default());
/// assert!(html.contains(r#"<strong style="font-weight: bold;">world</strong>"#));
/// ```
#[must_use]
pub fn convert(markdown: &str, options: &ConvertOptions) -> String {
    Converter::from(options).convert(markdown)
}

/// Reusable conversion settings.
///
/// Each call to [`Converter::convert`] builds a fresh renderer, so a
/// converter can be shared and called repeatedly.
#[derive(Clone)]
pub struct Converter {
    options: ConvertOptions,
    highlighter: Arc<dyn SyntaxHighlighter>,
}

impl Converter {
    /// Create a converter with default options and the bundled highlighter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
            highlighter: Arc::new(SyntectHighlighter),
        }
    }

    /// Enable or disable the table of contents.
    #[must_use]
    pub fn toc(mut self, enabled: bool) -> Self {
        self.options.include_toc = enabled;
        self
    }

    /// Set the table of contents title.
    #[must_use]
    pub fn toc_title(mut self, title: impl Into<String>) -> Self {
        self.options.toc_title = title.into();
        self
    }

    /// Set the color theme.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.options.theme = theme;
        self
    }

    /// Replace the syntax highlighting engine.
    #[must_use]
    pub fn highlighter(mut self, highlighter: Arc<dyn SyntaxHighlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Render markdown to class-only HTML, before inline styles.
    pub fn render(&self, markdown: &str) -> RenderResult {
        let mut renderer = SharePointRenderer::new()
            .with_theme(self.options.theme)
            .with_highlighter(Arc::clone(&self.highlighter));
        if self.options.include_toc {
            renderer = renderer.with_toc(self.options.toc_title.as_str());
        }
        renderer.render_markdown(markdown)
    }

    /// Render markdown and apply inline styles.
    pub fn convert(&self, markdown: &str) -> String {
        let result = self.render(markdown);
        tracing::debug!(
            theme = %self.options.theme,
            toc_entries = result.toc.len(),
            "rendered markdown"
        );
        StyleSheet::new(self.options.theme).apply(&result.html)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&ConvertOptions> for Converter {
    fn from(options: &ConvertOptions) -> Self {
        Self {
            options: options.clone(),
            ..Self::new()
        }
    }
}
