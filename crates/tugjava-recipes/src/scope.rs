// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Enclosing-declaration tracking for traversals.

/// The class and method a traversal is currently inside.
#[derive(Debug, Default, Clone)]
pub(crate) struct ScopeTracker {
    class: Option<String>,
    method: Option<String>,
}

impl ScopeTracker {
    pub(crate) fn enter_class(&mut self, name: &str) {
        self.class = Some(name.to_string());
        self.method = None;
    }

    pub(crate) fn leave_class(&mut self) {
        self.class = None;
        self.method = None;
    }

    pub(crate) fn enter_method(&mut self, name: &str) {
        self.method = Some(name.to_string());
    }

    pub(crate) fn leave_method(&mut self) {
        self.method = None;
    }

    /// `Class.method`, `Class`, or `<unit>` outside any class.
    pub(crate) fn current(&self) -> String {
        match (&self.class, &self.method) {
            (Some(class), Some(method)) => format!("{}.{}", class, method),
            (Some(class), None) => class.clone(),
            (None, Some(method)) => method.clone(),
            (None, None) => "<unit>".to_string(),
        }
    }
}
