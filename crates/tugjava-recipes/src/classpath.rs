// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The set of types a rewrite may reference.

use std::collections::BTreeSet;

use crate::type_name::QualifiedTypeName;

/// Types available when instantiating templates.
///
/// An unrestricted classpath resolves every type. A restricted one resolves
/// only the types it was built from; a template naming any other type fails
/// to instantiate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classpath {
    known: Option<BTreeSet<String>>,
}

impl Classpath {
    /// A classpath on which every type resolves.
    pub fn unrestricted() -> Self {
        Classpath { known: None }
    }

    /// A classpath containing exactly `types`.
    pub fn from_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Classpath {
            known: Some(types.into_iter().map(Into::into).collect()),
        }
    }

    /// Whether every type resolves.
    pub fn is_unrestricted(&self) -> bool {
        self.known.is_none()
    }

    /// Whether `name` resolves on this classpath.
    pub fn contains(&self, name: &QualifiedTypeName) -> bool {
        match &self.known {
            None => true,
            Some(known) => known.contains(name.as_str()),
        }
    }
}
