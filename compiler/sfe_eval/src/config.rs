//! The bound result of a unit.

use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;

use crate::object::Object;
use crate::value::{FromValue, Value};

/// Variables and objects of one bound unit, read-only once built.
///
/// Objects are handed out as `Arc` so several consumers can hold the same
/// object; a `Config` can be shared across threads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    vars: BTreeMap<String, Value>,
    objects: BTreeMap<String, Arc<Object>>,
}

impl Config {
    pub(crate) fn new(
        vars: BTreeMap<String, Value>,
        objects: BTreeMap<String, Arc<Object>>,
    ) -> Self {
        Config { vars, objects }
    }

    pub fn has_var(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Typed variable lookup.
    ///
    /// `None` when the variable is missing or does not convert to `T`
    /// (see [`FromValue`]).
    pub fn get_var<T: FromValue>(&self, name: &str) -> Option<T> {
        self.vars.get(name).and_then(T::from_value)
    }

    pub fn get_object(&self, name: &str) -> Option<Arc<Object>> {
        self.objects.get(name).cloned()
    }

    pub fn vars(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn objects(&self) -> impl Iterator<Item = (&str, &Arc<Object>)> {
        self.objects.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Write every variable and object, one per line, sorted by name.
    pub fn dump(&self, out: &mut impl io::Write) -> io::Result<()> {
        for (name, value) in &self.vars {
            writeln!(out, "var {name} = {value};")?;
        }
        for (name, object) in &self.objects {
            writeln!(out, "object {name:?} {object};")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Config {
        let vars = [
            ("width".to_owned(), Value::Int64(640)),
            ("title".to_owned(), Value::from("demo")),
        ]
        .into_iter()
        .collect();
        let emitter: Object = [("rate", Value::Double(2.5)), ("loop", Value::Bool(true))]
            .into_iter()
            .collect();
        let objects = [("smoke".to_owned(), Arc::new(emitter))].into_iter().collect();
        Config::new(vars, objects)
    }

    #[test]
    fn test_typed_getters() {
        let config = sample();
        assert!(config.has_var("width"));
        assert!(!config.has_var("height"));
        assert_eq!(config.get_var::<i32>("width"), Some(640));
        assert_eq!(config.get_var::<f64>("width"), Some(640.0));
        assert_eq!(config.get_var::<bool>("width"), None);
        assert_eq!(config.get_var::<String>("title").as_deref(), Some("demo"));
        assert_eq!(config.get_var::<Value>("missing"), None);
    }

    #[test]
    fn test_objects_are_shared() {
        let config = sample();
        let a = config.get_object("smoke").unwrap();
        let b = config.get_object("smoke").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.get_as::<f64>("rate"), Some(2.5));
        assert!(config.get_object("fire").is_none());
    }

    #[test]
    fn test_dump() {
        let mut out = Vec::new();
        sample().dump(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "var title = \"demo\";\nvar width = 640;\nobject \"smoke\" {rate: 2.5, loop: true};\n"
        );
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Config>();
    }
}
