//! Standalone HTML document wrapper.

use md2sp_renderer::escape_html;

/// Wrap an HTML fragment in a minimal standalone document.
///
/// # Example
///
/// ```
/// use md2sp_core::wrap_document;
///
/// let doc = wrap_document("<p>Hi</p>", "notes");
/// assert!(doc.starts_with("<!DOCTYPE html>\n"));
/// assert!(doc.contains("<title>notes</title>"));
/// ```
#[must_use]
pub fn wrap_document(html: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n  <title>{}</title>\n</head>\n<body>\n{html}\n</body>\n</html>",
        escape_html(title)
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_wrap_document() {
        assert_eq!(
            wrap_document("<p>Hi</p>", "readme"),
            "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n  <title>readme</title>\n</head>\n<body>\n<p>Hi</p>\n</body>\n</html>"
        );
    }

    #[test]
    fn test_title_escaped() {
        let doc = wrap_document("", "a<b>&c");
        assert!(doc.contains("<title>a&lt;b&gt;&amp;c</title>"));
    }
}
