use super::{CommFunction, Library, LibrarySource};
use std::collections::HashMap;

/// Builds the registry key for `function` exposed by `library`.
pub fn function_key(library: &str, function: &str) -> String {
    format!("{}_{}", library, function)
}

/// Ordered mapping from function key to communication function.
///
/// Keys keep the position of their first insertion. Re-inserting a key
/// replaces the function in place (last write wins).
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    order: Vec<String>,
    functions: HashMap<String, CommFunction>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots every library the source currently exposes.
    pub fn from_source(source: &dyn LibrarySource) -> Self {
        Self::from_libraries(&source.libraries())
    }

    pub fn from_libraries<'a, I>(libraries: I) -> Self
    where
        I: IntoIterator<Item = &'a Library>,
    {
        let mut registry = Self::new();
        for library in libraries {
            for function in &library.functions {
                registry.insert(function_key(&library.name, function.name()), function.clone());
            }
        }
        registry
    }

    /// Inserts `function` under `key`, returning the function it replaced.
    pub fn insert(&mut self, key: String, function: CommFunction) -> Option<CommFunction> {
        if self.functions.contains_key(&key) {
            log::warn!("Function key {} was already registered, overwriting it.", &key);
        } else {
            self.order.push(key.clone());
        }
        self.functions.insert(key, function)
    }

    pub fn get(&self, key: &str) -> Option<&CommFunction> {
        self.functions.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.functions.contains_key(key)
    }

    /// The first-inserted entry, used when no function is requested.
    pub fn first(&self) -> Option<(&str, &CommFunction)> {
        let key = self.order.first()?;
        self.functions.get(key).map(|f| (key.as_str(), f))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NodeValue;
    use crate::core::error::LibraryError;
    use serde_json::json;

    fn tagged(tag: &'static str) -> impl Fn(NodeValue) -> Result<NodeValue, LibraryError> {
        move |data| Ok(json!({ "tag": tag, "data": data }))
    }

    #[test]
    fn test_empty_source_yields_empty_registry() {
        let registry = FunctionRegistry::from_source(&Vec::<Library>::new());
        assert!(registry.is_empty());
        assert!(registry.first().is_none());
        assert_eq!(registry.keys().count(), 0);
    }

    #[test]
    fn test_keys_follow_library_then_function_order() {
        let libraries = vec![
            Library::new("ssh").function("cmd", tagged("a")).function("put", tagged("b")),
            Library::new("serial").function("write", tagged("c")),
        ];
        let registry = FunctionRegistry::from_libraries(&libraries);

        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec!["ssh_cmd", "ssh_put", "serial_write"]);
        assert_eq!(registry.first().map(|(k, _)| k), Some("ssh_cmd"));
    }

    #[test]
    fn test_duplicate_library_is_last_write_wins() {
        let first = CommFunction::new("cmd_fn", tagged("first"));
        let second = CommFunction::new("cmd_fn", tagged("second"));
        let libraries = vec![
            Library::new("ssh").with(first),
            Library::new("ssh").with(second.clone()),
        ];
        let registry = FunctionRegistry::from_libraries(&libraries);

        assert_eq!(registry.len(), 1);
        let resolved = registry.get("ssh_cmd_fn").unwrap();
        assert!(resolved.same_callable(&second));
        assert_eq!(resolved.call(json!(1)).unwrap()["tag"], json!("second"));
    }

    #[test]
    fn test_overwrite_keeps_first_position() {
        let libraries = vec![
            Library::new("a").function("x", tagged("a1")),
            Library::new("b").function("y", tagged("b1")),
            Library::new("a").function("x", tagged("a2")),
        ];
        let registry = FunctionRegistry::from_libraries(&libraries);

        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec!["a_x", "b_y"]);
        let (key, function) = registry.first().unwrap();
        assert_eq!(key, "a_x");
        assert_eq!(function.call(NodeValue::Null).unwrap()["tag"], json!("a2"));
    }

    #[test]
    fn test_insert_returns_replaced() {
        let mut registry = FunctionRegistry::new();
        assert!(registry.insert("k".into(), CommFunction::new("k", tagged("1"))).is_none());
        assert!(registry.insert("k".into(), CommFunction::new("k", tagged("2"))).is_some());
        assert!(registry.contains("k"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_function_key() {
        assert_eq!(function_key("ssh", "cmd_fn"), "ssh_cmd_fn");
    }
}
