// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Import management for compilation units.
//!
//! [`ensure_imported`] is idempotent: requesting the same type any number of
//! times leaves exactly one import for it, and no import at all when the type
//! is already visible without one.

use tugjava_ast::{CompilationUnit, Import};

use crate::type_name::QualifiedTypeName;

const JAVA_LANG: &str = "java.lang";

/// What [`ensure_imported`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// A new import was inserted.
    Added,
    /// An exact or wildcard import already covers the type.
    AlreadyImported,
    /// The type lives in the unit's own package.
    SamePackage,
    /// The type is in `java.lang` and needs no import.
    Implicit,
    /// The type is in the default package and cannot be imported from a
    /// named package.
    NotImportable,
    /// A single-type import of another type with the same simple name
    /// exists; importing would make the name ambiguous.
    Conflict,
}

impl ImportOutcome {
    /// Returns true if an import was inserted.
    pub fn is_added(&self) -> bool {
        matches!(self, ImportOutcome::Added)
    }
}

/// Whether a non-static import of `name` (exact or wildcard) exists.
pub fn is_imported(unit: &CompilationUnit, name: &QualifiedTypeName) -> bool {
    unit.imports.iter().filter(|i| !i.is_static).any(|i| {
        if i.is_wildcard {
            name.package() == Some(i.path.as_str())
        } else {
            i.path == name.as_str()
        }
    })
}

/// A non-static single-type import of a different type whose simple name
/// equals that of `name`.
pub fn conflicting_import<'a>(unit: &'a CompilationUnit, name: &QualifiedTypeName) -> Option<&'a Import> {
    unit.imports.iter().find(|i| {
        !i.is_static
            && !i.is_wildcard
            && i.path != name.as_str()
            && i.path.rsplit('.').next() == Some(name.simple_name())
    })
}

/// Make `name` visible in `unit`, adding an import if needed.
///
/// A new import is placed before the first non-static import whose path
/// sorts after it, otherwise after the last non-static import, otherwise at
/// the end.
pub fn ensure_imported(unit: &mut CompilationUnit, name: &QualifiedTypeName) -> ImportOutcome {
    let Some(package) = name.package() else {
        return if unit.package.is_none() {
            ImportOutcome::SamePackage
        } else {
            ImportOutcome::NotImportable
        };
    };
    if is_imported(unit, name) {
        return ImportOutcome::AlreadyImported;
    }
    // A single-type import shadows same-package and java.lang types too.
    if conflicting_import(unit, name).is_some() {
        return ImportOutcome::Conflict;
    }
    if unit.package.as_deref() == Some(package) {
        return ImportOutcome::SamePackage;
    }
    if package == JAVA_LANG {
        return ImportOutcome::Implicit;
    }

    let position = unit
        .imports
        .iter()
        .position(|i| !i.is_static && i.path.as_str() > name.as_str())
        .or_else(|| {
            unit.imports
                .iter()
                .rposition(|i| !i.is_static)
                .map(|last| last + 1)
        })
        .unwrap_or(unit.imports.len());
    unit.imports.insert(position, Import::single(name.as_str()));
    ImportOutcome::Added
}
