//! Recipe configuration.
//!
//! Options come from a JSON file, from command-line flags, or both. Keys use
//! the recipe's option names:
//!
//! ```json
//! {
//!   "methodPattern": "org.springframework..* getReasonPhrase()",
//!   "fullyQualifiedTypeName": "org.springframework.http.HttpStatus",
//!   "classpath": ["org.springframework.http.HttpStatus"]
//! }
//! ```
//!
//! Flags override file values. `classpath` is optional; when absent every
//! type resolves.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tugjava_core::error::TugError;
use tugjava_recipes::error::{METHOD_PATTERN_OPTION, TYPE_NAME_OPTION};
use tugjava_recipes::{Classpath, ReplaceMethodCallWithTernary};

/// Options for `replace-method-call-with-ternary`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecipeConfig {
    /// Method signature pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_pattern: Option<String>,
    /// Fully-qualified target type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_type_name: Option<String>,
    /// Types resolvable by templates; absent means unrestricted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classpath: Option<Vec<String>>,
}

impl RecipeConfig {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, TugError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TugError::file_not_found(display.clone()),
            _ => TugError::internal(format!("failed to read {}: {}", display, e)),
        })?;
        Self::from_json(&text).map_err(|message| {
            TugError::invalid_args(format!("invalid recipe config {}: {}", display, message))
        })
    }

    /// Parse config JSON.
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| e.to_string())
    }

    /// Overlay `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: RecipeConfig) -> RecipeConfig {
        RecipeConfig {
            method_pattern: overrides.method_pattern.or(self.method_pattern),
            fully_qualified_type_name: overrides
                .fully_qualified_type_name
                .or(self.fully_qualified_type_name),
            classpath: overrides.classpath.or(self.classpath),
        }
    }

    /// Build the recipe. Missing options are invalid arguments; malformed
    /// ones are invalid configuration.
    pub fn build(&self) -> Result<ReplaceMethodCallWithTernary, TugError> {
        let method_pattern = self
            .method_pattern
            .as_deref()
            .ok_or_else(|| missing(METHOD_PATTERN_OPTION, "--method-pattern"))?;
        let type_name = self
            .fully_qualified_type_name
            .as_deref()
            .ok_or_else(|| missing(TYPE_NAME_OPTION, "--type"))?;
        let recipe = ReplaceMethodCallWithTernary::new(method_pattern, type_name)?;
        Ok(match &self.classpath {
            Some(types) => recipe.with_classpath(Classpath::from_types(types.iter().cloned())),
            None => recipe,
        })
    }
}

fn missing(option: &str, flag: &str) -> TugError {
    TugError::invalid_args_with_details(
        format!("missing required option '{}' (use {} or a config file)", option, flag),
        serde_json::json!({ "option": option }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tugjava_core::error::OutputErrorCode;

    const PATTERN: &str = "org.springframework..* getReasonPhrase()";
    const HTTP_STATUS: &str = "org.springframework.http.HttpStatus";

    fn full() -> RecipeConfig {
        RecipeConfig {
            method_pattern: Some(PATTERN.to_string()),
            fully_qualified_type_name: Some(HTTP_STATUS.to_string()),
            classpath: None,
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn camel_case_keys() {
            let config = RecipeConfig::from_json(
                r#"{"methodPattern": "a.B m()", "fullyQualifiedTypeName": "a.B"}"#,
            )
            .unwrap();
            assert_eq!(config.method_pattern.as_deref(), Some("a.B m()"));
            assert_eq!(config.fully_qualified_type_name.as_deref(), Some("a.B"));
            assert_eq!(config.classpath, None);
        }

        #[test]
        fn rejects_unknown_keys() {
            let err = RecipeConfig::from_json(r#"{"method_pattern": "a.B m()"}"#).unwrap_err();
            assert!(err.contains("method_pattern"), "{}", err);
        }

        #[test]
        fn load_missing_file() {
            let err = RecipeConfig::load(Path::new("/nonexistent/tugj-config.json")).unwrap_err();
            assert_eq!(err.error_code(), OutputErrorCode::ResolutionError);
        }
    }

    mod merging {
        use super::*;

        #[test]
        fn overrides_win() {
            let file = full();
            let flags = RecipeConfig {
                fully_qualified_type_name: Some("a.B".to_string()),
                ..Default::default()
            };
            let merged = file.merge(flags);
            assert_eq!(merged.method_pattern.as_deref(), Some(PATTERN));
            assert_eq!(merged.fully_qualified_type_name.as_deref(), Some("a.B"));
        }

        #[test]
        fn empty_overrides_keep_file() {
            assert_eq!(full().merge(RecipeConfig::default()), full());
        }
    }

    mod building {
        use super::*;

        #[test]
        fn builds_recipe() {
            let recipe = full().build().unwrap();
            assert_eq!(recipe.target().as_str(), HTTP_STATUS);
        }

        #[test]
        fn missing_option_is_invalid_arguments() {
            let config = RecipeConfig {
                method_pattern: Some(PATTERN.to_string()),
                ..Default::default()
            };
            let err = config.build().unwrap_err();
            assert_eq!(err.error_code(), OutputErrorCode::InvalidArguments);
            assert!(err.to_string().contains("fullyQualifiedTypeName"));
        }

        #[test]
        fn malformed_pattern_is_invalid_configuration() {
            let config = RecipeConfig {
                method_pattern: Some("getReasonPhrase".to_string()),
                ..full()
            };
            let err = config.build().unwrap_err();
            assert!(matches!(
                err,
                TugError::InvalidConfiguration { ref option, .. } if option == "methodPattern"
            ));
        }
    }
}
