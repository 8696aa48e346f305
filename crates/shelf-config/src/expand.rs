//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Bare `$VAR` is left alone so URLs and tokens containing dollar signs
/// survive unchanged. `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| match std::env::var(name) {
        Ok(val) => Ok(Some(val)),
        Err(_) => Err(UnsetVar(name.to_owned())),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Expand in place, keeping the field path for error reporting.
pub(crate) fn expand_in_place(value: &mut String, field: &str) -> Result<(), ConfigError> {
    *value = expand_env(value, field)?;
    Ok(())
}

struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("SHELF_TEST_EXPAND_SET", "https://cms.example.com");
        }
        let result = expand_env("${SHELF_TEST_EXPAND_SET}/graphql", "cms.url").unwrap();
        assert_eq!(result, "https://cms.example.com/graphql");
        unsafe {
            std::env::remove_var("SHELF_TEST_EXPAND_SET");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SHELF_TEST_EXPAND_UNSET");
        }
        let result = expand_env("${SHELF_TEST_EXPAND_UNSET:-development}", "cms.environment")
            .unwrap();
        assert_eq!(result, "development");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SHELF_TEST_EXPAND_MISSING");
        }
        let err = expand_env("${SHELF_TEST_EXPAND_MISSING}", "cms.token").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("SHELF_TEST_EXPAND_MISSING"));
        assert!(message.contains("cms.token"));
    }

    #[test]
    fn test_expand_without_braces_is_literal() {
        assert_eq!(expand_env("tok$en", "cms.token").unwrap(), "tok$en");
    }

    #[test]
    fn test_expand_in_place_rewrites_value() {
        let mut value = "${SHELF_TEST_EXPAND_IN_PLACE:-0.0.0.0}".to_owned();
        expand_in_place(&mut value, "server.host").unwrap();
        assert_eq!(value, "0.0.0.0");
    }
}
