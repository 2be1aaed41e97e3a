//! Structural complexity metrics and rendered-output type counts.
//!
//! `complexity_of_value` is one traversal keeping running maxima and
//! counters; it does not look at the inferencer's tree. `TypeCount` is a
//! string-pattern pass over the rendered declaration and is documented as
//! approximate: a strict literal `"null"` also matches the primitive
//! pattern, and numbers inside comments are counted as literals.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::value::{JsonValue, mixed_runtime_tags};

// ------------------------------ Complexity -------------------------------- //

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityMetrics {
    /// Maximum recursion depth reached (root = 0).
    pub depth: u32,
    /// Object keys visited, at any depth.
    pub total_properties: u32,
    /// Object nodes visited, root included.
    pub nested_objects: u32,
    /// Array nodes visited.
    pub arrays: u32,
    /// Object properties whose value is null/undefined.
    pub optional_properties: u32,
    /// Arrays whose immediate elements span more than one runtime tag.
    pub union_types: u32,
}

/// Metrics for raw text: all-zero on invalid JSON, no error surfaced.
pub fn complexity_of_text(text: &str) -> ComplexityMetrics {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(parsed) => complexity_of_value(&parsed.into()),
        Err(_) => ComplexityMetrics::default(),
    }
}

pub fn complexity_of_value(value: &JsonValue) -> ComplexityMetrics {
    let mut m = ComplexityMetrics::default();
    visit(value, 0, &mut m);
    m
}

fn visit(value: &JsonValue, depth: u32, m: &mut ComplexityMetrics) {
    m.depth = m.depth.max(depth);
    match value {
        JsonValue::Object(props) => {
            m.nested_objects += 1;
            for v in props.values() {
                m.total_properties += 1;
                if v.is_nullish() {
                    m.optional_properties += 1;
                }
                visit(v, depth + 1, m);
            }
        }
        JsonValue::Array(items) => {
            m.arrays += 1;
            if mixed_runtime_tags(items) {
                m.union_types += 1;
            }
            for v in items {
                visit(v, depth + 1, m);
            }
        }
        _ => {}
    }
}

// ------------------------------ Type counts ------------------------------- //

static PRIMITIVES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:string|number|boolean|null|undefined)\b").unwrap());
static ARRAYS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\]").unwrap());
static LITERALS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""[^"]*"|\btrue\b|\bfalse\b|-?\d+(?:\.\d+)?"#).unwrap());
static ANYS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bany\b").unwrap());

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    pub primitives: u32,
    pub objects: u32,
    pub arrays: u32,
    pub unions: u32,
    pub literals: u32,
    pub anys: u32,
}

/// Count type-ish tokens in rendered declaration text.
pub fn type_count(rendered: &str) -> TypeCount {
    TypeCount {
        primitives: PRIMITIVES.find_iter(rendered).count() as u32,
        objects: rendered.matches('{').count() as u32,
        arrays: ARRAYS.find_iter(rendered).count() as u32,
        unions: rendered.matches('|').count() as u32,
        literals: LITERALS.find_iter(rendered).count() as u32,
        anys: ANYS.find_iter(rendered).count() as u32,
    }
}

// ------------------------------- Tests ------------------------------------ //
