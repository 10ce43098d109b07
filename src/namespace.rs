//! Host namespace through which counters are exposed by name.
//!
//! Stands in for the browser's `window`: the host installs its counter under
//! a global such as `analytics` so that outside code can look it up and call
//! `destroy` or `get_clicks` on it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

use crate::domain::click_counter::ClickCounter;
use crate::error::{AppError, Result};

/// Named globals owned by the host.
#[derive(Default)]
pub struct HostNamespace {
    globals: RwLock<HashMap<String, Arc<ClickCounter>>>,
}

impl HostNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `counter` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidGlobalName`] if `name` is not an identifier.
    /// Returns [`AppError::GlobalAlreadyDefined`] if `name` is taken.
    pub fn expose(&self, name: &str, counter: Arc<ClickCounter>) -> Result<()> {
        if !is_valid_global_name(name) {
            return Err(AppError::InvalidGlobalName(name.to_string()));
        }

        let mut globals = self.globals.write().unwrap_or_else(PoisonError::into_inner);
        if globals.contains_key(name) {
            return Err(AppError::GlobalAlreadyDefined(name.to_string()));
        }

        globals.insert(name.to_string(), counter);
        info!(global = name, "Counter exposed");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<ClickCounter>> {
        self.globals
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Like [`get`](Self::get) but fails with [`AppError::GlobalNotFound`].
    pub fn require(&self, name: &str) -> Result<Arc<ClickCounter>> {
        self.get(name)
            .ok_or_else(|| AppError::GlobalNotFound(name.to_string()))
    }

    /// Defined global names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .globals
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

/// Checks that `name` looks like a JavaScript identifier: a letter, `_` or
/// `$`, followed by letters, digits, `_` or `$`.
pub fn is_valid_global_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event_source::Document;
    use crate::infrastructure::diagnostics::NullSink;

    fn counter() -> Arc<ClickCounter> {
        Arc::new(ClickCounter::create(
            Arc::new(Document::new()),
            Arc::new(NullSink::new()),
        ))
    }

    #[test]
    fn test_expose_and_get() {
        let ns = HostNamespace::new();
        let c = counter();

        ns.expose("analytics", c.clone()).unwrap();

        let found = ns.get("analytics").unwrap();
        assert!(Arc::ptr_eq(&found, &c));
        assert!(ns.get("other").is_none());
    }

    #[test]
    fn test_expose_twice_conflicts() {
        let ns = HostNamespace::new();
        ns.expose("analytics", counter()).unwrap();

        let err = ns.expose("analytics", counter()).unwrap_err();
        assert_eq!(err, AppError::GlobalAlreadyDefined("analytics".to_string()));
    }

    #[test]
    fn test_expose_rejects_invalid_names() {
        let ns = HostNamespace::new();

        for bad in ["", "1analytics", "my-analytics", "a b"] {
            let err = ns.expose(bad, counter()).unwrap_err();
            assert_eq!(err, AppError::InvalidGlobalName(bad.to_string()));
        }
        assert!(ns.names().is_empty());
    }

    #[test]
    fn test_require_missing() {
        let ns = HostNamespace::new();
        let err = ns.require("analytics").unwrap_err();
        assert_eq!(err, AppError::GlobalNotFound("analytics".to_string()));
    }

    #[test]
    fn test_names_sorted() {
        let ns = HostNamespace::new();
        ns.expose("zeta", counter()).unwrap();
        ns.expose("analytics", counter()).unwrap();
        ns.expose("$tracker", counter()).unwrap();

        assert_eq!(ns.names(), vec!["$tracker", "analytics", "zeta"]);
    }

    #[test]
    fn test_is_valid_global_name() {
        assert!(is_valid_global_name("analytics"));
        assert!(is_valid_global_name("_a1"));
        assert!(is_valid_global_name("$"));
        assert!(!is_valid_global_name("9lives"));
        assert!(!is_valid_global_name("with.dot"));
    }
}
