//! Autolinking of bare URLs and e-mail addresses in prose text.

use std::sync::LazyLock;

use regex::Regex;

use crate::state::escape_html;
use crate::typography::replace_symbols;

/// Bare `http(s)://` or `www.` URLs, or e-mail addresses.
///
/// URLs never end in trailing punctuation so that `see https://a.b.` links
/// only `https://a.b`.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:(?:https?://|www\.)[a-z0-9-]+(?:[^\s<>"]*[^\s<>".,:;!?')\]])?|[a-z0-9._%+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,})"#,
    )
    .unwrap()
});

/// Write prose text, turning bare URLs and e-mail addresses into links.
///
/// Text outside links gets typographic replacements; all of it is escaped.
pub(crate) fn push_linkified(text: &str, out: &mut String) {
    let mut last = 0;
    for m in LINK_RE.find_iter(text) {
        push_prose(&text[last..m.start()], out);
        let label = m.as_str();
        let href = link_target(label);
        out.push_str(r#"<a href=""#);
        out.push_str(&escape_html(&href));
        out.push_str(r#"">"#);
        out.push_str(&escape_html(label));
        out.push_str("</a>");
        last = m.end();
    }
    push_prose(&text[last..], out);
}

/// Write prose text with typographic replacements, escaped.
pub(crate) fn push_prose(text: &str, out: &mut String) {
    if !text.is_empty() {
        out.push_str(&escape_html(&replace_symbols(text)));
    }
}

fn link_target(label: &str) -> String {
    let lower = label.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        label.to_owned()
    } else if lower.starts_with("www.") {
        format!("http://{label}")
    } else {
        format!("mailto:{label}")
    }
}
