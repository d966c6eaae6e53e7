//! Typographic replacements applied to prose text.
//!
//! Smart quotes, dashes and ellipses come from the parser's smart punctuation
//! option. This module adds the symbol replacements: `(c)`, `(r)`, `(tm)`
//! (case-insensitive) and `+-`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\((?:c|r|tm)\)|\+-").unwrap());

/// Replace typographic shorthands with their symbols.
pub(crate) fn replace_symbols(text: &str) -> Cow<'_, str> {
    SYMBOL_RE.replace_all(text, |caps: &Captures<'_>| {
        match caps[0].to_ascii_lowercase().as_str() {
            "(c)" => "©",
            "(r)" => "®",
            "(tm)" => "™",
            _ => "±",
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols() {
        assert_eq!(replace_symbols("(c) 2024 Acme(TM)"), "© 2024 Acme™");
        assert_eq!(replace_symbols("Brand(R)"), "Brand®");
        assert_eq!(replace_symbols("5 +- 1"), "5 ± 1");
    }

    #[test]
    fn test_plain_text_borrowed() {
        assert!(matches!(replace_symbols("nothing here"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_partial_forms_untouched() {
        assert_eq!(replace_symbols("(cc) (t) c)"), "(cc) (t) c)");
    }
}
