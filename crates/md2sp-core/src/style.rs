//! Inline-style rewriter.
//!
//! SharePoint strips stylesheets and most classes, so every element that
//! needs a look gets an inline `style` attribute. The rewriter scans rendered
//! HTML for opening tags, classifies each one into at most one
//! [`StyleTarget`] and appends that target's declarations. Text, closing tags
//! and comments are copied byte-for-byte.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::LazyLock;

use md2sp_renderer::html::{
    CODE_BLOCK_CLASS, TOC_CLASS, TOC_ITEM_CLASS, TOC_LINK_CLASS, TOC_LIST_CLASS, TOC_TITLE_CLASS,
};
use md2sp_renderer::{Theme, ThemeTokens};
use regex::Regex;

/// Comments, or tags with quoted attribute values that may contain `>`.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
        .unwrap()
});

/// A single attribute: name, then an optional double-quoted, single-quoted or
/// bare value.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'=<>/`]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

const LINK_COLOR: &str = "#0366d6";

/// Element kinds that receive inline styles.
///
/// Every opening tag maps to at most one target, so no tag is ever styled
/// twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleTarget {
    /// `h1` through `h6`.
    Heading(u8),
    Paragraph,
    /// `strong` and `b`.
    Bold,
    /// `em` and `i`.
    Italic,
    Link,
    /// `ul` and `ol`.
    List,
    ListItem,
    Blockquote,
    Table,
    HeaderCell,
    Cell,
    Rule,
    Image,
    /// `code` outside any `pre`.
    InlineCode,
    /// The `pre` wrapping a rendered code block.
    CodeBlock,
    /// `code` inside a `pre`.
    CodeBlockBody,
    TocContainer,
    TocTitle,
    TocList,
    TocItem,
    TocLink,
}

impl StyleTarget {
    /// Every target, in declaration order.
    pub const ALL: [Self; 26] = [
        Self::Heading(1),
        Self::Heading(2),
        Self::Heading(3),
        Self::Heading(4),
        Self::Heading(5),
        Self::Heading(6),
        Self::Paragraph,
        Self::Bold,
        Self::Italic,
        Self::Link,
        Self::List,
        Self::ListItem,
        Self::Blockquote,
        Self::Table,
        Self::HeaderCell,
        Self::Cell,
        Self::Rule,
        Self::Image,
        Self::InlineCode,
        Self::CodeBlock,
        Self::CodeBlockBody,
        Self::TocContainer,
        Self::TocTitle,
        Self::TocList,
        Self::TocItem,
        Self::TocLink,
    ];

    /// Classify an opening tag.
    ///
    /// Marker classes take precedence over the tag name. Inside a `pre` only
    /// `code` is styled.
    ///
    /// `name` must be lowercase.
    #[must_use]
    pub fn classify(name: &str, class: Option<&str>, in_pre: bool) -> Option<Self> {
        if in_pre {
            return (name == "code").then_some(Self::CodeBlockBody);
        }

        if let Some(target) = class.and_then(|classes| {
            classes
                .split_ascii_whitespace()
                .find_map(Self::from_marker_class)
        }) {
            return Some(target);
        }

        let target = match name {
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "p" => Self::Paragraph,
            "strong" | "b" => Self::Bold,
            "em" | "i" => Self::Italic,
            "a" => Self::Link,
            "ul" | "ol" => Self::List,
            "li" => Self::ListItem,
            "blockquote" => Self::Blockquote,
            "table" => Self::Table,
            "th" => Self::HeaderCell,
            "td" => Self::Cell,
            "hr" => Self::Rule,
            "img" => Self::Image,
            "code" => Self::InlineCode,
            _ => return None,
        };
        Some(target)
    }

    fn from_marker_class(class: &str) -> Option<Self> {
        match class {
            TOC_CLASS => Some(Self::TocContainer),
            TOC_TITLE_CLASS => Some(Self::TocTitle),
            TOC_LIST_CLASS => Some(Self::TocList),
            TOC_ITEM_CLASS => Some(Self::TocItem),
            TOC_LINK_CLASS => Some(Self::TocLink),
            CODE_BLOCK_CLASS => Some(Self::CodeBlock),
            _ => None,
        }
    }

    /// CSS declarations for this target under the given theme tokens.
    #[must_use]
    pub fn declarations(self, t: &ThemeTokens) -> String {
        match self {
            Self::Heading(1) => format!(
                "font-size: 2em; font-weight: bold; margin: 0.67em 0; border-bottom: 1px solid {}; padding-bottom: 0.3em;",
                t.heading_border
            ),
            Self::Heading(2) => format!(
                "font-size: 1.5em; font-weight: bold; margin: 0.83em 0; border-bottom: 1px solid {}; padding-bottom: 0.3em;",
                t.heading_border
            ),
            Self::Heading(3) => "font-size: 1.17em; font-weight: bold; margin: 1em 0;".to_owned(),
            Self::Heading(4) => "font-size: 1em; font-weight: bold; margin: 1.33em 0;".to_owned(),
            Self::Heading(5) => "font-size: 0.83em; font-weight: bold; margin: 1.67em 0;".to_owned(),
            Self::Heading(_) => "font-size: 0.67em; font-weight: bold; margin: 2.33em 0;".to_owned(),
            Self::Paragraph => "margin: 1em 0; line-height: 1.6;".to_owned(),
            Self::Bold => "font-weight: bold;".to_owned(),
            Self::Italic => "font-style: italic;".to_owned(),
            Self::Link => format!("color: {LINK_COLOR}; text-decoration: none;"),
            Self::List => "padding-left: 2em; margin: 1em 0;".to_owned(),
            Self::ListItem => "margin: 0.5em 0;".to_owned(),
            Self::Blockquote => format!(
                "border-left: 4px solid {}; padding: 0 1em; color: {}; margin: 1em 0;",
                t.blockquote_border, t.blockquote_color
            ),
            Self::Table => {
                "border-collapse: collapse; width: 100%; margin: 1em 0; border-spacing: 0;"
                    .to_owned()
            }
            Self::HeaderCell => format!(
                "border: 1px solid {}; padding: 6px 13px; font-weight: bold; background-color: {};",
                t.table_border, t.table_header_background
            ),
            Self::Cell => format!("border: 1px solid {}; padding: 6px 13px;", t.table_border),
            Self::Rule => format!(
                "height: 0.25em; padding: 0; margin: 24px 0; background-color: {}; border: 0;",
                t.rule_color
            ),
            Self::Image => "max-width: 100%; height: auto; display: block; margin: 1em 0;".to_owned(),
            Self::InlineCode => format!(
                "background-color: {}; padding: 0.2em 0.4em; margin: 0; font-size: 85%; border-radius: 3px; font-family: Consolas, Monaco, 'Courier New', monospace;",
                t.inline_code_background
            ),
            Self::CodeBlock => format!(
                "border: 1px solid {}; background-color: {}; color: {}; padding: {}; margin: 10px 0; overflow-x: auto; font-family: 'Consolas', 'Monaco', 'Courier New', monospace; font-size: 13px; line-height: 1.5;",
                t.code_border, t.code_background, t.code_color, t.code_padding
            ),
            Self::CodeBlockBody => {
                "background-color: transparent; padding: 0; border: none; font-family: inherit;"
                    .to_owned()
            }
            Self::TocContainer => format!(
                "background-color: {}; border: 1px solid {}; padding: 1em 1.5em; margin: 1em 0; border-radius: 6px;",
                t.toc_background, t.toc_border
            ),
            Self::TocTitle => "font-size: 1.1em; font-weight: bold; margin: 0 0 0.5em 0;".to_owned(),
            Self::TocList => "list-style-type: none; padding-left: 1.2em; margin: 0.25em 0;".to_owned(),
            Self::TocItem => "margin: 0.25em 0;".to_owned(),
            Self::TocLink => format!("color: {LINK_COLOR}; text-decoration: none; font-weight: 500;"),
        }
    }
}

/// Resolved declarations for every [`StyleTarget`] under one theme.
#[derive(Clone, Debug)]
pub struct StyleSheet {
    rules: HashMap<StyleTarget, String>,
}

impl StyleSheet {
    /// Build the style sheet for a theme.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        let tokens = theme.tokens();
        let rules = StyleTarget::ALL
            .iter()
            .map(|&target| (target, target.declarations(tokens)))
            .collect();
        Self { rules }
    }

    /// Declarations for a target.
    #[must_use]
    pub fn get(&self, target: StyleTarget) -> Option<&str> {
        self.rules.get(&target).map(String::as_str)
    }

    /// Rewrite `html`, adding inline styles to every recognized opening tag.
    #[must_use]
    pub fn apply(&self, html: &str) -> String {
        let mut out = String::with_capacity(html.len() + html.len() / 2);
        let mut last = 0;
        let mut pre_depth = 0usize;
        let mut styled = 0usize;

        for caps in TAG_RE.captures_iter(html) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&html[last..whole.start()]);
            last = whole.end();

            // Comments have no tag name
            let Some(name_match) = caps.get(2) else {
                out.push_str(whole.as_str());
                continue;
            };
            let name = name_match.as_str().to_ascii_lowercase();
            let closing = caps.get(1).is_some_and(|m| !m.is_empty());
            let attrs = caps.get(3).map_or("", |m| m.as_str());

            if closing {
                if name == "pre" {
                    pre_depth = pre_depth.saturating_sub(1);
                }
                out.push_str(whole.as_str());
                continue;
            }

            let tag = OpeningTag::parse(attrs);
            let target = StyleTarget::classify(&name, tag.class, pre_depth > 0);
            if name == "pre" && !tag.self_closing {
                pre_depth += 1;
            }

            match target.and_then(|t| self.get(t)) {
                Some(declarations) => {
                    tag.write_styled(name_match.as_str(), declarations, &mut out);
                    styled += 1;
                }
                None => out.push_str(whole.as_str()),
            }
        }

        out.push_str(&html[last..]);
        tracing::debug!(styled, "applied inline styles");
        out
    }
}

/// Attributes of an opening tag, borrowed from the source HTML.
struct OpeningTag<'a> {
    /// Attribute text with any self-closing slash removed.
    attrs: &'a str,
    self_closing: bool,
    class: Option<&'a str>,
    /// Byte range of the `style` attribute within `attrs`, and its value.
    style: Option<(usize, usize, &'a str)>,
}

impl<'a> OpeningTag<'a> {
    fn parse(raw_attrs: &'a str) -> Self {
        let trimmed = raw_attrs.trim_end();
        let (attrs, self_closing) = match trimmed.strip_suffix('/') {
            Some(rest) => (rest.trim_end(), true),
            None => (trimmed, false),
        };

        let mut class = None;
        let mut style = None;
        for caps in ATTR_RE.captures_iter(attrs) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            if name.as_str().eq_ignore_ascii_case("class") && class.is_none() {
                class = Some(value);
            } else if name.as_str().eq_ignore_ascii_case("style") && style.is_none() {
                style = Some((whole.start(), whole.end(), value));
            }
        }

        Self {
            attrs,
            self_closing,
            class,
            style,
        }
    }

    /// Write the tag with `declarations` added to its style.
    ///
    /// An existing `style` attribute keeps its position; the new declarations
    /// are prepended so the existing ones take precedence.
    fn write_styled(&self, name: &str, declarations: &str, out: &mut String) {
        out.push('<');
        out.push_str(name);
        match self.style {
            Some((start, end, existing)) => {
                let existing = existing.trim();
                out.push_str(&self.attrs[..start]);
                if existing.is_empty() {
                    write!(out, r#"style="{declarations}""#).unwrap();
                } else {
                    write!(
                        out,
                        r#"style="{declarations} {}""#,
                        existing.replace('"', "&quot;")
                    )
                    .unwrap();
                }
                out.push_str(&self.attrs[end..]);
            }
            None => {
                out.push_str(self.attrs);
                write!(out, r#" style="{declarations}""#).unwrap();
            }
        }
        if self.self_closing {
            out.push_str(" /");
        }
        out.push('>');
    }
}

/// Add inline styles for `theme` to every recognized opening tag in `html`.
///
/// # Example
///
/// ```
/// use md2sp_core::apply_inline_styles;
/// use md2sp_renderer::Theme;
///
/// let html = apply_inline_styles(r#"<a href="/x">link</a>"#, Theme::Light);
/// assert_eq!(
///     html,
///     r#"<a href="/x" style="color: #0366d6; text-decoration: none;">link</a>"#
/// );
/// ```
#[must_use]
pub fn apply_inline_styles(html: &str, theme: Theme) -> String {
    StyleSheet::new(theme).apply(html)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn light(html: &str) -> String {
        apply_inline_styles(html, Theme::Light)
    }

    #[test]
    fn test_all_targets_have_rules() {
        let sheet = StyleSheet::new(Theme::Light);
        for target in StyleTarget::ALL {
            assert!(sheet.get(target).is_some_and(|s| !s.is_empty()));
        }
        let unique: HashSet<_> = StyleTarget::ALL.iter().collect();
        assert_eq!(unique.len(), StyleTarget::ALL.len());
    }

    #[test]
    fn test_plain_tags() {
        assert_eq!(
            light("<p>Hi <strong>there</strong></p>"),
            r#"<p style="margin: 1em 0; line-height: 1.6;">Hi <strong style="font-weight: bold;">there</strong></p>"#
        );
    }

    #[test]
    fn test_heading_styled_once() {
        let html = light("<h1>Title</h1>");
        assert_eq!(html.matches("style=").count(), 1);
        assert!(html.starts_with(r#"<h1 style="font-size: 2em;"#));
        assert!(html.contains("border-bottom: 1px solid #eaecef"));
    }

    #[test]
    fn test_heading_keeps_id() {
        assert_eq!(
            light(r#"<h3 id="setup">Setup</h3>"#),
            r#"<h3 id="setup" style="font-size: 1.17em; font-weight: bold; margin: 1em 0;">Setup</h3>"#
        );
    }

    #[test]
    fn test_attributes_preserved_in_order() {
        let html = light(r#"<img src="img.png" alt="alt" title="t">"#);
        assert_eq!(
            html,
            r#"<img src="img.png" alt="alt" title="t" style="max-width: 100%; height: auto; display: block; margin: 1em 0;">"#
        );
    }

    #[test]
    fn test_quoted_angle_bracket_in_attribute() {
        let html = light(r#"<a href="/x" title="a > b">x</a>"#);
        assert_eq!(
            html,
            r#"<a href="/x" title="a > b" style="color: #0366d6; text-decoration: none;">x</a>"#
        );
    }

    #[test]
    fn test_self_closing_tag() {
        assert_eq!(
            light(r#"<img src="a.png"/>"#),
            r#"<img src="a.png" style="max-width: 100%; height: auto; display: block; margin: 1em 0;" />"#
        );
    }

    #[test]
    fn test_existing_style_is_merged() {
        assert_eq!(
            light(r#"<p class="x" style="color: red" data-n="1">t</p>"#),
            r#"<p class="x" style="margin: 1em 0; line-height: 1.6; color: red" data-n="1">t</p>"#
        );
    }

    #[test]
    fn test_existing_single_quoted_style() {
        assert_eq!(
            light(r#"<b style='font-family: "X"'>t</b>"#),
            r#"<b style="font-weight: bold; font-family: &quot;X&quot;">t</b>"#
        );
    }

    #[test]
    fn test_uppercase_tag_name() {
        assert_eq!(
            light("<EM>t</EM>"),
            r#"<EM style="font-style: italic;">t</EM>"#
        );
    }

    #[test]
    fn test_unknown_and_closing_tags_untouched() {
        let input = "<div><span>x</span><thead></thead><input type=\"checkbox\"></div>";
        assert_eq!(light(input), input);
    }

    #[test]
    fn test_text_and_entities_untouched() {
        let input = "a &lt;p&gt; b &amp; c<!-- <p> -->";
        assert_eq!(light(input), input);
    }

    #[test]
    fn test_inline_code() {
        let html = light("<p><code>x</code></p>");
        assert!(html.contains(r#"<code style="background-color: rgba(27, 31, 35, 0.05);"#));
    }

    #[test]
    fn test_code_block_styling() {
        let input = concat!(
            r#"<pre class="ms-rteElement-CodeHTML"><code class="language-rust">"#,
            r#"<span style="color:#a71d5d;">fn</span> main</code></pre><code>y</code>"#
        );
        let html = light(input);
        assert!(html.starts_with(
            r#"<pre class="ms-rteElement-CodeHTML" style="border: 1px solid #666666; background-color: #f5f5f5;"#
        ));
        assert!(html.contains(
            r#"<code class="language-rust" style="background-color: transparent; padding: 0; border: none; font-family: inherit;">"#
        ));
        // Highlighter spans are left alone
        assert!(html.contains(r#"<span style="color:#a71d5d;">fn</span>"#));
        // Inline code after the block is styled as inline
        assert!(html.ends_with(
            r#"</pre><code style="background-color: rgba(27, 31, 35, 0.05); padding: 0.2em 0.4em; margin: 0; font-size: 85%; border-radius: 3px; font-family: Consolas, Monaco, 'Courier New', monospace;">y</code>"#
        ));
    }

    #[test]
    fn test_marker_class_wins_over_tag_name() {
        let html = light(r#"<p class="md2sp-toc-title">Contents</p>"#);
        assert_eq!(
            html,
            r#"<p class="md2sp-toc-title" style="font-size: 1.1em; font-weight: bold; margin: 0 0 0.5em 0;">Contents</p>"#
        );
    }

    #[test]
    fn test_toc_styles_use_theme() {
        let input = r#"<div class="md2sp-toc"></div>"#;
        assert!(light(input).contains("background-color: #f6f8fa"));
        assert!(apply_inline_styles(input, Theme::Dark).contains("background-color: #151b23"));
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            StyleTarget::classify("code", None, true),
            Some(StyleTarget::CodeBlockBody)
        );
        assert_eq!(StyleTarget::classify("span", None, true), None);
        assert_eq!(StyleTarget::classify("a", Some("md2sp-toc-link"), true), None);
        assert_eq!(
            StyleTarget::classify("a", Some("extra md2sp-toc-link"), false),
            Some(StyleTarget::TocLink)
        );
        assert_eq!(
            StyleTarget::classify("ol", None, false),
            Some(StyleTarget::List)
        );
        assert_eq!(StyleTarget::classify("pre", None, false), None);
    }

    #[test]
    fn test_themes_differ_only_in_tokens() {
        let input = "<h2>A</h2><blockquote><p>q</p></blockquote><table><tr><th>h</th><td>d</td></tr></table><hr>";
        let light_html = light(input);
        let dark_html = apply_inline_styles(input, Theme::Dark);
        assert_ne!(light_html, dark_html);

        let strip = |html: &str| TAG_RE.replace_all(html, "<$1$2>").into_owned();
        assert_eq!(strip(&light_html), strip(&dark_html));
    }
}
