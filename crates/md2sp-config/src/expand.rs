//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Set or clear a variable for one test.
    ///
    /// Tests run in parallel threads; each test owns a distinct variable name,
    /// so no two tests touch the same environment entry.
    fn set_var(name: &str, value: Option<&str>) {
        // SAFETY: the variable is private to the calling test, see above
        unsafe {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }

    #[test]
    fn test_expand_simple_var() {
        set_var("MD2SP_TEST_TITLE", Some("Contents"));
        let result = expand_env("${MD2SP_TEST_TITLE}", "convert.toc_title").unwrap();
        assert_eq!(result, "Contents");
        set_var("MD2SP_TEST_TITLE", None);
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        set_var("MD2SP_UNSET_TITLE", None);
        let result = expand_env("${MD2SP_UNSET_TITLE:-Overview}", "convert.toc_title").unwrap();
        assert_eq!(result, "Overview");
    }

    #[test]
    fn test_expand_missing_var_error() {
        set_var("MD2SP_MISSING_TITLE", None);
        let err = expand_env("${MD2SP_MISSING_TITLE}", "convert.toc_title").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in convert.toc_title: ${MD2SP_MISSING_TITLE} not set"
        );
    }

    #[test]
    fn test_expand_embedded_var() {
        set_var("MD2SP_TEST_PROJECT", Some("Billing"));
        let result = expand_env("${MD2SP_TEST_PROJECT} contents", "convert.toc_title").unwrap();
        assert_eq!(result, "Billing contents");
        set_var("MD2SP_TEST_PROJECT", None);
    }

    #[test]
    fn test_title_without_braces_unchanged() {
        for title in ["Table of Contents", "Costs in $USD", "$HOME notes"] {
            assert_eq!(expand_env(title, "convert.toc_title").unwrap(), title);
        }
    }
}
