// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Fully-qualified Java type names.

use std::fmt;

use thiserror::Error;

/// Errors from parsing a type name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeNameError {
    /// The name is empty.
    #[error("type name is empty")]
    Empty,

    /// A dot-separated segment is empty (`a..B`, `.B`, `a.`).
    #[error("type name '{name}' has an empty segment")]
    EmptySegment { name: String },

    /// A segment is not a Java identifier.
    #[error("type name '{name}' has invalid segment '{segment}'")]
    InvalidSegment { name: String, segment: String },
}

/// A dotted class name such as `org.springframework.http.HttpStatus`.
///
/// A name without dots denotes a type in the default package; its simple
/// name is the whole name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedTypeName {
    name: String,
}

impl QualifiedTypeName {
    /// Parse and validate a dotted name.
    pub fn parse(name: &str) -> Result<Self, TypeNameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TypeNameError::Empty);
        }
        for segment in name.split('.') {
            if segment.is_empty() {
                return Err(TypeNameError::EmptySegment {
                    name: name.to_string(),
                });
            }
            if !is_java_identifier(segment) {
                return Err(TypeNameError::InvalidSegment {
                    name: name.to_string(),
                    segment: segment.to_string(),
                });
            }
        }
        Ok(QualifiedTypeName {
            name: name.to_string(),
        })
    }

    /// The full dotted name.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The segment after the last dot.
    pub fn simple_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[idx + 1..],
            None => &self.name,
        }
    }

    /// Everything before the last dot; `None` for the default package.
    pub fn package(&self) -> Option<&str> {
        self.name.rfind('.').map(|idx| &self.name[..idx])
    }
}

impl fmt::Display for QualifiedTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Whether `s` is a valid Java identifier (letters, digits, `_` and `$`,
/// not starting with a digit).
pub(crate) fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
