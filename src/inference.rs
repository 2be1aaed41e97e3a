//! Structural type inference over parsed JSON values.
//!
//! Maps a `JsonValue` to an `InferredType` tree. Total and pure: inference
//! never fails, it degrades to `Any` past the object depth guard instead.
//!
//! Design goals:
//! - Settings are threaded through every recursive call; no ambient state.
//! - Array unions dedup by *rendered type text* in first-occurrence order,
//!   not by deep structural equality (see note on `collapse_elements`).
//! - Exhaustive matches over the closed `JsonValue` sum; adding a variant
//!   is a compile error here, not a silent fallthrough.

use indexmap::IndexMap;

use crate::codegen;
use crate::ir::{InferredType, PrimitiveKind, Property};
use crate::settings::GenerationSettings;
use crate::value::{JsonValue, format_number};

// ------------------------------- Policy ---------------------------------- //

/// Objects nested deeper than this collapse to `Any`. JSON itself cannot
/// cycle, but pathological nesting must not blow the stack.
pub const MAX_OBJECT_DEPTH: usize = 10;

// ------------------------------- Inference -------------------------------- //

/// Infer the type of `value`. Entry point for the root; recursion passes an
/// incremented `depth`.
pub fn infer(value: &JsonValue, settings: &GenerationSettings, depth: usize) -> InferredType {
    match value {
        JsonValue::Null => {
            if settings.use_strict_types {
                literal(PrimitiveKind::Null, "null")
            } else {
                InferredType::Primitive(PrimitiveKind::Null)
            }
        }
        // Not reachable from parsed JSON; synthetic inputs only.
        JsonValue::Undefined => InferredType::Primitive(PrimitiveKind::Undefined),
        JsonValue::Bool(b) => {
            if settings.use_strict_types {
                literal(PrimitiveKind::Boolean, if *b { "true" } else { "false" })
            } else {
                InferredType::Primitive(PrimitiveKind::Boolean)
            }
        }
        JsonValue::Number(n) => {
            if settings.use_strict_types {
                literal(PrimitiveKind::Number, format_number(*n))
            } else {
                InferredType::Primitive(PrimitiveKind::Number)
            }
        }
        JsonValue::String(s) => {
            if settings.use_strict_types {
                literal(PrimitiveKind::String, format!("\"{s}\""))
            } else {
                InferredType::Primitive(PrimitiveKind::String)
            }
        }
        JsonValue::Array(items) => infer_array(items, settings, depth),
        JsonValue::Object(props) => infer_object(props, settings, depth),
    }
}

fn literal(kind: PrimitiveKind, value: impl Into<String>) -> InferredType {
    InferredType::Literal { kind, value: value.into() }
}

fn infer_array(items: &[JsonValue], settings: &GenerationSettings, depth: usize) -> InferredType {
    if items.is_empty() {
        // Empty-array law: `any[]` regardless of settings.
        return InferredType::ArrayOf(Box::new(InferredType::Any));
    }
    let mut distinct = collapse_elements(items, settings, depth);
    if distinct.len() == 1 {
        let ty = distinct.pop().map(|(_, ty)| ty).unwrap_or(InferredType::Any);
        InferredType::ArrayOf(Box::new(ty))
    } else {
        InferredType::UnionArrayOf(distinct.into_values().collect())
    }
}

/// Reduce array elements to their distinct inferred types.
///
/// The dedup key is the *rendered* type text, which treats two object
/// types with identical properties in different key order as distinct
/// union members. That mirrors the observed behavior of the original
/// engine; a canonical structural key would change emitted unions, so we
/// keep it as-is.
fn collapse_elements(
    items: &[JsonValue],
    settings: &GenerationSettings,
    depth: usize,
) -> IndexMap<String, InferredType> {
    let mut distinct: IndexMap<String, InferredType> = IndexMap::new();
    for item in items {
        let ty = infer(item, settings, depth + 1);
        let key = codegen::type_expr(&ty, settings);
        distinct.entry(key).or_insert(ty);
    }
    distinct
}

fn infer_object(
    props: &IndexMap<String, JsonValue>,
    settings: &GenerationSettings,
    depth: usize,
) -> InferredType {
    if depth > MAX_OBJECT_DEPTH {
        return InferredType::Any;
    }
    let properties = props
        .iter()
        .map(|(name, value)| Property {
            name: name.clone(),
            ty: infer(value, settings, depth + 1),
            // Optional law: nullish value + the setting, nothing else.
            optional: settings.use_optional_properties && value.is_nullish(),
            readonly: settings.use_readonly,
        })
        .collect();
    InferredType::Object(properties)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn val(v: serde_json::Value) -> JsonValue {
        v.into()
    }

    fn non_strict() -> GenerationSettings {
        GenerationSettings::default()
    }

    fn strict() -> GenerationSettings {
        GenerationSettings { use_strict_types: true, ..Default::default() }
    }

    #[test]
    fn widened_primitives_by_default() {
        let s = non_strict();
        assert_eq!(infer(&val(json!("abc")), &s, 0), InferredType::Primitive(PrimitiveKind::String));
        assert_eq!(infer(&val(json!(3.5)), &s, 0), InferredType::Primitive(PrimitiveKind::Number));
        assert_eq!(infer(&val(json!(true)), &s, 0), InferredType::Primitive(PrimitiveKind::Boolean));
        assert_eq!(infer(&val(json!(null)), &s, 0), InferredType::Primitive(PrimitiveKind::Null));
    }

    #[test]
    fn strict_mode_produces_literals() {
        let s = strict();
        assert_eq!(
            infer(&val(json!("abc")), &s, 0),
            InferredType::Literal { kind: PrimitiveKind::String, value: "\"abc\"".into() }
        );
        assert_eq!(
            infer(&val(json!(30)), &s, 0),
            InferredType::Literal { kind: PrimitiveKind::Number, value: "30".into() }
        );
        assert_eq!(
            infer(&val(json!(null)), &s, 0),
            InferredType::Literal { kind: PrimitiveKind::Null, value: "null".into() }
        );
    }

    #[test]
    fn empty_array_is_any_array_regardless_of_settings() {
        for s in [non_strict(), strict()] {
            assert_eq!(
                infer(&val(json!([])), &s, 0),
                InferredType::ArrayOf(Box::new(InferredType::Any))
            );
        }
    }

    #[test]
    fn homogeneous_array_collapses_to_single_element_type() {
        let ty = infer(&val(json!([1, 2, 3])), &non_strict(), 0);
        assert_eq!(
            ty,
            InferredType::ArrayOf(Box::new(InferredType::Primitive(PrimitiveKind::Number)))
        );
    }

    #[test]
    fn mixed_array_becomes_union_in_first_occurrence_order() {
        let ty = infer(&val(json!([1, "a", 2, "b"])), &non_strict(), 0);
        let InferredType::UnionArrayOf(members) = ty else { panic!("expected union array") };
        assert_eq!(
            members,
            vec![
                InferredType::Primitive(PrimitiveKind::Number),
                InferredType::Primitive(PrimitiveKind::String),
            ]
        );
    }

    #[test]
    fn object_property_order_matches_source() {
        let ty = infer(&val(json!({"zeta": 1, "alpha": "x"})), &non_strict(), 0);
        let InferredType::Object(props) = ty else { panic!("expected object") };
        let names: Vec<&str> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn null_property_is_optional_only_when_enabled() {
        let on = non_strict();
        let off = GenerationSettings { use_optional_properties: false, ..Default::default() };
        for (settings, expect) in [(&on, true), (&off, false)] {
            let ty = infer(&val(json!({"a": null})), settings, 0);
            let InferredType::Object(props) = ty else { panic!("expected object") };
            assert_eq!(props[0].optional, expect);
        }
    }

    #[test]
    fn depth_guard_collapses_deep_objects_to_any() {
        // 12 nested objects; the guard must trip without panicking.
        let mut v = json!({"leaf": 1});
        for _ in 0..12 {
            v = json!({ "next": v });
        }
        let mut ty = infer(&val(v), &non_strict(), 0);
        let mut saw_any = false;
        loop {
            match ty {
                InferredType::Object(mut props) => {
                    assert_eq!(props.len(), 1);
                    ty = props.remove(0).ty;
                }
                InferredType::Any => {
                    saw_any = true;
                    break;
                }
                other => panic!("unexpected type in chain: {other:?}"),
            }
        }
        assert!(saw_any);
    }

    #[test]
    fn objects_with_reordered_keys_are_distinct_union_members() {
        // Dedup is by rendered text, so key order matters. Known and kept.
        let ty = infer(&val(json!([{"a": 1, "b": 2}, {"b": 2, "a": 1}])), &non_strict(), 0);
        assert!(matches!(ty, InferredType::UnionArrayOf(ref members) if members.len() == 2));
    }
}
