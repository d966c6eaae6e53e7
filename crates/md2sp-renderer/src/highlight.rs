//! Syntax highlighting for fenced code blocks.
//!
//! The [`SyntaxHighlighter`] trait is the seam between the renderer and the
//! highlighting engine. [`SyntectHighlighter`] is the bundled implementation;
//! it emits `<span style="color:...">` markup so colors survive SharePoint's
//! class stripping.
//!
//! [`highlight_code`] wraps any highlighter with the fallback contract: an
//! absent or unrecognized language, or any engine failure, yields the
//! HTML-escaped source with no highlighting markup.

use std::sync::LazyLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::state::escape_html;
use crate::theme::Theme;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Highlighting engine error.
///
/// Never surfaces past [`highlight_code`]; the renderer falls back to plain
/// escaped text.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// The engine failed while highlighting.
    #[error("highlighting engine failed: {0}")]
    Engine(#[from] syntect::Error),
    /// The theme's syntax theme is not bundled with the engine.
    #[error("unknown highlighting theme: {0}")]
    UnknownTheme(String),
}

/// Syntax highlighting engine keyed by language name.
pub trait SyntaxHighlighter: Send + Sync {
    /// Highlight `code` as `language`.
    ///
    /// Returns `Ok(None)` when the language is not recognized. The returned
    /// markup must be HTML-safe: all source text escaped.
    fn highlight(
        &self,
        code: &str,
        language: &str,
        theme: Theme,
    ) -> Result<Option<String>, HighlightError>;
}

/// Syntect-backed highlighter using the bundled syntaxes and themes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntectHighlighter;

impl SyntaxHighlighter for SyntectHighlighter {
    fn highlight(
        &self,
        code: &str,
        language: &str,
        theme: Theme,
    ) -> Result<Option<String>, HighlightError> {
        let Some(syntax) = SYNTAX_SET.find_syntax_by_token(language) else {
            return Ok(None);
        };
        let theme_name = theme.tokens().syntax_theme;
        let syntax_theme = THEME_SET
            .themes
            .get(theme_name)
            .ok_or_else(|| HighlightError::UnknownTheme(theme_name.to_owned()))?;

        let mut highlighter = HighlightLines::new(syntax, syntax_theme);
        let mut html = String::with_capacity(code.len() * 4);
        for line in LinesWithEndings::from(code) {
            let regions = highlighter.highlight_line(line, &SYNTAX_SET)?;
            html.push_str(&styled_line_to_highlighted_html(
                &regions,
                IncludeBackground::No,
            )?);
        }
        Ok(Some(html))
    }
}

/// Code block content after highlighting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightedCode {
    /// HTML-safe markup for the block body.
    pub html: String,
    /// Language the block was highlighted as, `None` for the plain fallback.
    pub language: Option<String>,
}

/// Highlight a code block, falling back to escaped text.
pub fn highlight_code(
    highlighter: &dyn SyntaxHighlighter,
    code: &str,
    language: Option<&str>,
    theme: Theme,
) -> HighlightedCode {
    if let Some(lang) = language {
        match highlighter.highlight(code, lang, theme) {
            Ok(Some(html)) => {
                return HighlightedCode {
                    html,
                    language: Some(lang.to_owned()),
                };
            }
            Ok(None) => {
                tracing::debug!(language = lang, "unrecognized code block language");
            }
            Err(err) => {
                tracing::debug!(language = lang, error = %err, "highlighting failed, using plain text");
            }
        }
    }

    HighlightedCode {
        html: escape_html(code),
        language: None,
    }
}
