use easel_scene::Rgba;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declarative property bag carried by create/update notifications.
///
/// Props arrive as an arbitrary JSON object; renderers pull out the keys
/// they understand with the typed accessors and ignore the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(Map<String, Value>);

impl Props {
    pub fn new() -> Self {
        Props::default()
    }

    /// Keeps the fields of a JSON object, anything else becomes empty props.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Props(map),
            _ => Props::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn number(&self, key: &str) -> Option<f32> {
        self.0.get(key).and_then(Value::as_f64).map(|v| v as f32)
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Hex color string, parsed. Malformed values read as absent.
    pub fn color(&self, key: &str) -> Option<Rgba> {
        self.string(key).and_then(Rgba::from_hex)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`set`](Props::set), handy for assembling test props.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }
}
