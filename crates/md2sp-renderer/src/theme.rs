//! Color themes for SharePoint output.
//!
//! A [`Theme`] is chosen once per conversion and resolves to a fixed
//! [`ThemeTokens`] record. Every theme-dependent color used by the code-block
//! highlighter and the inline-style rewriter comes from that record; all other
//! visual constants are theme-independent.

use std::fmt;
use std::str::FromStr;

/// Output color theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Theme {
    /// Light background (SharePoint default).
    #[default]
    Light,
    /// Dark background.
    Dark,
}

/// Named color and spacing values selected by a [`Theme`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeTokens {
    /// Bottom border of `h1`/`h2`.
    pub heading_border: &'static str,
    /// Code block background.
    pub code_background: &'static str,
    /// Code block border color.
    pub code_border: &'static str,
    /// Code block padding.
    pub code_padding: &'static str,
    /// Code block text color for unhighlighted content.
    pub code_color: &'static str,
    /// Inline `code` background tint.
    pub inline_code_background: &'static str,
    /// Blockquote text color.
    pub blockquote_color: &'static str,
    /// Blockquote left border color.
    pub blockquote_border: &'static str,
    /// Table cell border color.
    pub table_border: &'static str,
    /// Table header cell background.
    pub table_header_background: &'static str,
    /// Horizontal rule color.
    pub rule_color: &'static str,
    /// Table of contents background.
    pub toc_background: &'static str,
    /// Table of contents border color.
    pub toc_border: &'static str,
    /// Name of the bundled syntect theme used for code highlighting.
    pub syntax_theme: &'static str,
}

const LIGHT: ThemeTokens = ThemeTokens {
    heading_border: "#eaecef",
    code_background: "#f5f5f5",
    code_border: "#666666",
    code_padding: "12px",
    code_color: "#24292e",
    inline_code_background: "rgba(27, 31, 35, 0.05)",
    blockquote_color: "#6a737d",
    blockquote_border: "#dfe2e5",
    table_border: "#dfe2e5",
    table_header_background: "#f6f8fa",
    rule_color: "#e1e4e8",
    toc_background: "#f6f8fa",
    toc_border: "#dfe2e5",
    syntax_theme: "InspiredGitHub",
};

const DARK: ThemeTokens = ThemeTokens {
    heading_border: "#3d444d",
    code_background: "#1e1e1e",
    code_border: "#444444",
    code_padding: "12px",
    code_color: "#d4d4d4",
    inline_code_background: "rgba(101, 108, 118, 0.2)",
    blockquote_color: "#9198a1",
    blockquote_border: "#3d444d",
    table_border: "#3d444d",
    table_header_background: "#151b23",
    rule_color: "#3d444d",
    toc_background: "#151b23",
    toc_border: "#3d444d",
    syntax_theme: "base16-ocean.dark",
};

impl Theme {
    /// Resolve the token record for this theme.
    #[must_use]
    pub fn tokens(self) -> &'static ThemeTokens {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
        }
    }

    /// Lowercase theme name as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}' (expected 'light' or 'dark')")]
pub struct ParseThemeError(String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseThemeError(s.to_owned())),
        }
    }
}
