//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// A reference without a default whose variable is unset is an error.
/// Bare `$VAR` is left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    if let Some(var) = first_missing_required(value) {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        });
    }

    Ok(shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok()).into_owned())
}

/// Name of the first `${VAR}` reference with no default whose variable is
/// unset.
fn first_missing_required(value: &str) -> Option<&str> {
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let end = after.find('}')?;
        let reference = &after[..end];
        if !reference.contains(":-") && std::env::var_os(reference).is_none() {
            return Some(reference);
        }
        rest = &after[end + 1..];
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUILL_TEST_SIMPLE", "hello");
        }
        let result = expand_env("${QUILL_TEST_SIMPLE}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("QUILL_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUILL_TEST_UNSET");
        }
        let result = expand_env("${QUILL_TEST_UNSET:-/assets}/hero.png", "images.hero").unwrap();
        assert_eq!(result, "/assets/hero.png");
    }

    #[test]
    fn test_expand_with_default_uses_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUILL_TEST_ROOT", "https://cdn.example.com");
        }
        let result = expand_env("${QUILL_TEST_ROOT:-}/hero.png", "images.hero").unwrap();
        assert_eq!(result, "https://cdn.example.com/hero.png");
        unsafe {
            std::env::remove_var("QUILL_TEST_ROOT");
        }
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUILL_TEST_MISSING");
        }
        let err = expand_env("${QUILL_TEST_MISSING}", "compose.sign_in_path").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("QUILL_TEST_MISSING"));
        assert!(err.to_string().contains("compose.sign_in_path"));
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("/images/a.png", "f").unwrap(), "/images/a.png");
        assert_eq!(expand_env("$VAR", "f").unwrap(), "$VAR");
    }
}
