//! Qualitative analysis of a parsed JSON value.
//!
//! Independent of the inferencer on purpose: this pass re-traverses the
//! value with cheap runtime-tag checks, so its union test is coarser than
//! the inferencer's structural dedup and the two may disagree on edge
//! cases. Each concern stays testable in isolation.

use serde::Serialize;

use crate::value::{JsonValue, mixed_runtime_tags};

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeAnalysis {
    pub root_type: String,
    pub has_nested_objects: bool,
    pub has_arrays: bool,
    pub has_optional_properties: bool,
    pub has_union_types: bool,
    pub has_complex_types: bool,
    pub suggested_improvements: Vec<String>,
    pub type_issues: Vec<String>,
}

/// Analyze raw text. Performs its own parse attempt and degrades to a
/// fixed "unknown" analysis on malformed input; never panics.
pub fn analyze_text(text: &str) -> TypeAnalysis {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(parsed) => analyze_value(&parsed.into()),
        Err(_) => TypeAnalysis {
            root_type: "unknown".to_string(),
            has_nested_objects: false,
            has_arrays: false,
            has_optional_properties: false,
            has_union_types: false,
            has_complex_types: false,
            suggested_improvements: vec![
                "Fix the JSON syntax errors before analyzing".to_string(),
            ],
            type_issues: vec!["Invalid JSON format".to_string()],
        },
    }
}

pub fn analyze_value(value: &JsonValue) -> TypeAnalysis {
    let mut facts = Facts::default();
    walk(value, true, &mut facts);

    let mut suggested = Vec::new();
    if facts.optional_properties {
        suggested.push(
            "Some properties are null or undefined; optional markers (?) keep consumers honest"
                .to_string(),
        );
    }
    if facts.union_types {
        suggested.push(
            "Arrays mix element types; review whether the union is intentional".to_string(),
        );
    }
    if facts.nested_objects {
        suggested.push(
            "Nested objects could be extracted into named interfaces".to_string(),
        );
    }

    TypeAnalysis {
        root_type: match value {
            JsonValue::Array(_) => "array".to_string(),
            other => other.runtime_tag().to_string(),
        },
        has_nested_objects: facts.nested_objects,
        has_arrays: facts.arrays,
        has_optional_properties: facts.optional_properties,
        has_union_types: facts.union_types,
        has_complex_types: facts.union_types,
        suggested_improvements: suggested,
        type_issues: Vec::new(),
    }
}

#[derive(Default)]
struct Facts {
    nested_objects: bool,
    arrays: bool,
    optional_properties: bool,
    union_types: bool,
}

fn walk(value: &JsonValue, is_root: bool, facts: &mut Facts) {
    match value {
        JsonValue::Object(props) => {
            if !is_root {
                facts.nested_objects = true;
            }
            for v in props.values() {
                if v.is_nullish() {
                    facts.optional_properties = true;
                }
                walk(v, false, facts);
            }
        }
        JsonValue::Array(items) => {
            facts.arrays = true;
            if mixed_runtime_tags(items) {
                facts.union_types = true;
            }
            for v in items {
                walk(v, false, facts);
            }
        }
        _ => {}
    }
}
