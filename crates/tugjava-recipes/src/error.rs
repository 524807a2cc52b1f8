// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Recipe configuration errors.

use thiserror::Error;
use tugjava_core::error::TugError;

use crate::method_matcher::PatternError;
use crate::type_name::TypeNameError;

/// Option name of the method pattern.
pub const METHOD_PATTERN_OPTION: &str = "methodPattern";

/// Option name of the target type.
pub const TYPE_NAME_OPTION: &str = "fullyQualifiedTypeName";

/// A recipe option could not be used. Raised when the recipe is built,
/// before any tree is visited.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecipeError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    TypeName(#[from] TypeNameError),
}

impl RecipeError {
    /// The option that was rejected.
    pub fn option(&self) -> &'static str {
        match self {
            RecipeError::Pattern(_) => METHOD_PATTERN_OPTION,
            RecipeError::TypeName(_) => TYPE_NAME_OPTION,
        }
    }
}

impl From<RecipeError> for TugError {
    fn from(err: RecipeError) -> Self {
        TugError::invalid_config(err.option(), err.to_string())
    }
}
