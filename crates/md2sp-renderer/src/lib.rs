//! Markdown renderer for SharePoint pages.
//!
//! This crate turns markdown into HTML that carries only class markers, no
//! styles. Inline styles are attached afterwards by `md2sp-core`, which keys
//! off the marker classes exported here.
//!
//! # Architecture
//!
//! [`SharePointRenderer`] walks the pulldown-cmark event stream and delegates
//! code blocks to a [`SyntaxHighlighter`]. The bundled [`SyntectHighlighter`]
//! emits `<span style="color:...">` runs so highlighting survives SharePoint's
//! class stripping. When the table of contents is enabled, headings receive
//! slug IDs and a nested link list is inserted at the first `[[toc]]` marker
//! paragraph (or at the top of the document).
//!
//! # Example
//!
//! ```
//! use md2sp_renderer::{SharePointRenderer, Theme};
//!
//! let result = SharePointRenderer::new()
//!     .with_theme(Theme::Dark)
//!     .render_markdown("# Hello\n\n**Bold** text");
//! assert_eq!(result.html, "<h1>Hello</h1>\n<p><strong>Bold</strong> text</p>\n");
//! ```

mod highlight;
pub mod html;
mod linkify;
mod renderer;
mod state;
mod theme;
mod typography;
mod util;

pub use highlight::{
    HighlightError, HighlightedCode, SyntaxHighlighter, SyntectHighlighter, highlight_code,
};
pub use renderer::{DEFAULT_TOC_TITLE, RenderResult, SharePointRenderer};
pub use state::{TocEntry, escape_html, slugify};
pub use theme::{ParseThemeError, Theme, ThemeTokens};
