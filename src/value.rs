//! Closed JSON value model for the inference pipeline.
//!
//! We convert out of `serde_json::Value` immediately after parsing so the
//! rest of the crate pattern-matches over a closed sum type instead of
//! poking at runtime kinds. Two deliberate differences from serde's model:
//! - `Undefined` exists as a variant. JSON cannot produce it, but the
//!   inferencer and analyzer treat "null or undefined" uniformly, and
//!   synthetic callers (tests, future non-JSON frontends) can.
//! - Objects use an `IndexMap`, so property order is the source document's
//!   key insertion order. Re-running the pipeline on the same text must
//!   yield byte-identical output, and property order is part of that.

use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq)]
pub enum JsonValue {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(IndexMap<String, JsonValue>),
}

impl JsonValue {
    /// Coarse runtime tag, the analog of a dynamic `typeof` probe.
    ///
    /// `null` gets its own tag rather than reproducing JavaScript's
    /// `typeof null == "object"` accident; the union heuristics in the
    /// analyzer read better for it and nothing depends on the quirk.
    pub fn runtime_tag(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Undefined => "undefined",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// True for the two "absent-ish" values that make a property optional.
    pub fn is_nullish(&self) -> bool {
        matches!(self, JsonValue::Null | JsonValue::Undefined)
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            // as_f64 is total for standard serde_json numbers; u64 values
            // beyond 2^53 lose precision, which literal rendering accepts.
            serde_json::Value::Number(n) => JsonValue::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => JsonValue::String(s),
            serde_json::Value::Array(xs) => {
                JsonValue::Array(xs.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(m) => {
                // preserve_order is on, so this iteration is insertion order
                JsonValue::Object(m.into_iter().map(|(k, v)| (k, JsonValue::from(v))).collect())
            }
        }
    }
}

/// Coarse union probe shared by the analyzer and complexity passes: do
/// the immediate elements span more than one runtime tag? Deliberately
/// cheaper than the inferencer's rendered-text dedup — e.g. two objects
/// with different shapes both read as "object" here.
pub fn mixed_runtime_tags(items: &[JsonValue]) -> bool {
    let mut first: Option<&'static str> = None;
    for item in items {
        let tag = item.runtime_tag();
        match first {
            None => first = Some(tag),
            Some(t) if t != tag => return true,
            Some(_) => {}
        }
    }
    false
}

/// Render a JSON number the way a type literal should read: integral
/// values drop the fractional part (`30`, not `30.0`).
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
