//! Evaluated objects.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::value::{FromValue, Value};

/// An evaluated object: keys in declaration order, each bound to a scalar.
///
/// Class-based objects list inherited keys first, in linearization order;
/// an overriding key keeps the position of the key it overrides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
    index: FxHashMap<String, usize>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(&i) = self.index.get(&key) {
            self.entries[i].1 = value;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Typed lookup; `None` on absence or kind mismatch.
    pub fn get_as<T: FromValue>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(T::from_value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut object = Object::new();
        object.insert("v", Value::Int64(1));
        object.insert("w", Value::Int64(2));
        object.insert("v", Value::Int64(3));
        assert_eq!(object.keys().collect::<Vec<_>>(), ["v", "w"]);
        assert_eq!(object.get("v"), Some(&Value::Int64(3)));
        assert_eq!(object.to_string(), "{v: 3, w: 2}");
    }

    #[test]
    fn test_typed_lookup() {
        let object: Object = [("rate", Value::Double(0.5)), ("name", Value::from("smoke"))]
            .into_iter()
            .collect();
        assert_eq!(object.get_as::<f64>("rate"), Some(0.5));
        assert_eq!(object.get_as::<i64>("rate"), None);
        assert_eq!(object.get_as::<String>("name").as_deref(), Some("smoke"));
        assert!(!object.contains_key("missing"));
    }
}
