//! HTML fragments with fixed marker classes.
//!
//! Code blocks and the table of contents are emitted with class-only markup.
//! The marker classes are the contract with the inline-style rewriter, which
//! recognizes them and attaches the matching inline styles.

use std::fmt::Write;

use crate::highlight::HighlightedCode;
use crate::state::{TocEntry, escape_html};

/// Class on the `<pre>` wrapping every code block.
pub const CODE_BLOCK_CLASS: &str = "ms-rteElement-CodeHTML";
/// Class on the table of contents container.
pub const TOC_CLASS: &str = "md2sp-toc";
/// Class on the table of contents title.
pub const TOC_TITLE_CLASS: &str = "md2sp-toc-title";
/// Class on each table of contents list.
pub const TOC_LIST_CLASS: &str = "md2sp-toc-list";
/// Class on each table of contents item.
pub const TOC_ITEM_CLASS: &str = "md2sp-toc-item";
/// Class on each table of contents link.
pub const TOC_LINK_CLASS: &str = "md2sp-toc-link";

/// Deepest heading level listed in the table of contents.
pub const TOC_MAX_LEVEL: u8 = 3;

/// Write a code block wrapper around highlighted (or escaped) content.
pub(crate) fn code_block(code: &HighlightedCode, out: &mut String) {
    match &code.language {
        Some(lang) => write!(
            out,
            r#"<pre class="{CODE_BLOCK_CLASS}"><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            code.html
        )
        .unwrap(),
        None => write!(
            out,
            r#"<pre class="{CODE_BLOCK_CLASS}"><code>{}</code></pre>"#,
            code.html
        )
        .unwrap(),
    }
    out.push('\n');
}

/// Write an image.
pub(crate) fn image(src: &str, alt: &str, title: &str, out: &mut String) {
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    };
    write!(
        out,
        r#"<img src="{}" alt="{}"{title_attr}>"#,
        escape_html(src),
        escape_html(alt)
    )
    .unwrap();
}

/// Write the table of contents block.
///
/// Entries deeper than [`TOC_MAX_LEVEL`] are skipped. Deeper entries nest
/// inside the list item of the preceding shallower entry, even when levels
/// are skipped.
pub(crate) fn toc_block(entries: &[TocEntry], title: &str, out: &mut String) {
    write!(
        out,
        r#"<div class="{TOC_CLASS}"><p class="{TOC_TITLE_CLASS}">{}</p>"#,
        escape_html(title)
    )
    .unwrap();

    let mut levels: Vec<u8> = Vec::new();
    for entry in entries.iter().filter(|e| e.level <= TOC_MAX_LEVEL) {
        match levels.last() {
            None => {
                write!(out, r#"<ul class="{TOC_LIST_CLASS}">"#).unwrap();
                levels.push(entry.level);
            }
            Some(&current) if entry.level > current => {
                write!(out, r#"<ul class="{TOC_LIST_CLASS}">"#).unwrap();
                levels.push(entry.level);
            }
            Some(_) => {
                out.push_str("</li>");
                // Close sub-lists until the parent list is shallower than the entry
                while levels.len() > 1 && levels[levels.len() - 2] >= entry.level {
                    levels.pop();
                    out.push_str("</ul></li>");
                }
                // A shallower entry joining a deeper sub-list sets its level
                if let Some(level) = levels.last_mut() {
                    *level = entry.level;
                }
            }
        }
        write!(
            out,
            r##"<li class="{TOC_ITEM_CLASS}"><a class="{TOC_LINK_CLASS}" href="#{}">{}</a>"##,
            escape_html(&entry.id),
            escape_html(&entry.title)
        )
        .unwrap();
    }

    if !levels.is_empty() {
        out.push_str("</li>");
        while levels.len() > 1 {
            levels.pop();
            out.push_str("</ul></li>");
        }
        out.push_str("</ul>");
    }
    out.push_str("</div>\n");
}
