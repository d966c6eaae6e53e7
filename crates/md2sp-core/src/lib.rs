//! Markdown to SharePoint HTML conversion.
//!
//! SharePoint pages drop external stylesheets and most classes, so this crate
//! renders markdown with [`md2sp_renderer`] and then moves every visual rule
//! into inline `style` attributes.
//!
//! # Example
//!
//! ```
//! use md2sp_core::{Converter, Theme};
//!
//! let html = Converter::new()
//!     .toc(true)
//!     .theme(Theme::Dark)
//!     .convert("# Intro\n\n## Setup Guide\n");
//! assert!(html.contains(r##"href="#setup-guide""##));
//! ```

mod convert;
mod document;
mod style;

pub use convert::{ConvertOptions, Converter, convert};
pub use document::wrap_document;
pub use md2sp_renderer::{DEFAULT_TOC_TITLE, Theme};
pub use style::{StyleSheet, StyleTarget, apply_inline_styles};
