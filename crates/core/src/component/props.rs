use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dynamic positional and keyword arguments for a function component.
///
/// Keyword arguments live in a sorted map, so two `Props` built from the same
/// keywords compare equal whatever order they were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Props {
    #[serde(default)]
    args: Vec<Value>,
    #[serde(default)]
    kwargs: BTreeMap<String, Value>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn with_kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    pub fn kwarg(&self, key: &str) -> Option<&Value> {
        self.kwargs.get(key)
    }

}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn keyword_order_does_not_affect_equality() {
        let a = Props::new()
            .with_arg(1)
            .with_kwarg("orientation", "vertical")
            .with_kwarg("mag", 0.5);
        let b = Props::new()
            .with_arg(1)
            .with_kwarg("mag", 0.5)
            .with_kwarg("orientation", "vertical");

        assert_eq!(a, b);
        assert_eq!(a.kwarg("mag"), Some(&json!(0.5)));
    }

    #[test]
    fn differing_values_are_unequal() {
        let a = Props::new().with_kwarg("mag", 0.5);
        let b = Props::new().with_kwarg("mag", 0.25);
        let c = Props::new().with_arg(0.5);

        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn deserialises_from_json() {
        let props: Props =
            serde_json::from_value(json!({ "kwargs": { "phase": 1.0, "mag": 0.0 } })).unwrap();
        assert_eq!(props.arg(0), None);
        assert_eq!(props.kwarg("phase"), Some(&json!(1.0)));
        assert_eq!(props, Props::new().with_kwarg("mag", 0.0).with_kwarg("phase", 1.0));
    }
}
