//! Realm naming
//!
//! Backend realms are slash-separated paths. A front-end logger named
//! `a.b` lands in realm `<root>/a/b`; the unnamed logger lands in `<root>`.

use std::borrow::Borrow;
use std::fmt;

/// Root realm used when no other root is configured
pub const DEFAULT_ROOT_REALM: &str = "bridge";

/// Hierarchical realm identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Realm(String);

impl Realm {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derive the realm for a dot-separated logger name
    ///
    /// ```
    /// use realm_bridge::core::Realm;
    ///
    /// assert_eq!(Realm::for_logger_name("bridge", "").name(), "bridge");
    /// assert_eq!(Realm::for_logger_name("bridge", "http.server").name(), "bridge/http/server");
    /// ```
    pub fn for_logger_name(root: &str, logger_name: &str) -> Self {
        if logger_name.is_empty() {
            return Self(root.to_string());
        }

        let mut name = String::with_capacity(root.len() + 1 + logger_name.len());
        name.push_str(root);
        name.push('/');
        for c in logger_name.chars() {
            name.push(if c == '.' { '/' } else { c });
        }
        Self(name)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// True if `self` equals `prefix` or lies below it
    pub fn is_within(&self, prefix: &Realm) -> bool {
        match self.0.strip_prefix(prefix.name()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.0.is_empty(),
            None => false,
        }
    }
}

impl fmt::Display for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Realm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Realm {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Realm {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_maps_to_root() {
        assert_eq!(Realm::for_logger_name("bridge", ""), Realm::new("bridge"));
    }

    #[test]
    fn test_dots_become_path_separators() {
        assert_eq!(
            Realm::for_logger_name("bridge", "db.pool.conn").name(),
            "bridge/db/pool/conn"
        );
        assert_eq!(Realm::for_logger_name("bridge", "plain").name(), "bridge/plain");
    }

    #[test]
    fn test_is_within() {
        let root = Realm::new("bridge");
        assert!(Realm::new("bridge").is_within(&root));
        assert!(Realm::new("bridge/http").is_within(&root));
        assert!(!Realm::new("bridgework").is_within(&root));
        assert!(!Realm::new("other").is_within(&root));
    }
}
