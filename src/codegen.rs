//! Deterministic serialization of an `InferredType` tree into TypeScript
//! declaration text.
//!
//! Everything here is a pure string fold over the IR: same tree + same
//! settings → byte-identical output. The union dedup in `inference` keys
//! on `type_expr`, so this rendering *is* the type's identity downstream.

use crate::ir::{InferredType, Property};
use crate::settings::GenerationSettings;

// ---------------------------- Type expressions ---------------------------- //

/// Render a type as an expression (the right-hand side of a property or
/// alias). Object types render as multi-line literals with a single,
/// non-cumulative indent level; nesting depth does not widen the indent.
pub fn type_expr(ty: &InferredType, settings: &GenerationSettings) -> String {
    match ty {
        InferredType::Primitive(kind) => kind.keyword().to_string(),
        InferredType::Literal { value, .. } => value.clone(),
        InferredType::ArrayOf(elem) => format!("{}[]", type_expr(elem, settings)),
        InferredType::UnionArrayOf(members) => {
            let joined = members
                .iter()
                .map(|m| type_expr(m, settings))
                .collect::<Vec<_>>()
                .join(" | ");
            format!("({joined})[]")
        }
        InferredType::Object(props) => object_literal(props, settings),
        InferredType::Any => "any".to_string(),
    }
}

fn object_literal(props: &[Property], settings: &GenerationSettings) -> String {
    let mut out = String::from("{\n");
    out.push_str(&property_lines(props, settings));
    out.push_str("\n}");
    out
}

fn property_lines(props: &[Property], settings: &GenerationSettings) -> String {
    let indent = " ".repeat(settings.indent_size);
    props
        .iter()
        .map(|p| {
            format!(
                "{indent}{ro}{name}{opt}: {ty};",
                ro = if p.readonly { "readonly " } else { "" },
                name = property_name(&p.name),
                opt = if p.optional { "?" } else { "" },
                ty = type_expr(&p.ty, settings),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quote property names that are not legal identifiers.
fn property_name(name: &str) -> String {
    let legal = !name.is_empty()
        && !name.chars().next().is_some_and(|c| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if legal { name.to_string() } else { format!("\"{name}\"") }
}

// ------------------------------ Declarations ------------------------------ //

/// Render the full declaration for `ty` under `name`: preamble comment,
/// `interface`/`type` body, and the utility-type appendix.
pub fn render_declaration(ty: &InferredType, name: &str, settings: &GenerationSettings) -> String {
    let mut out = String::new();

    if settings.generate_comments {
        out.push_str(&preamble(name, ty));
    }

    let export = if settings.export_interface { "export " } else { "" };
    match ty {
        InferredType::Object(props) => {
            out.push_str(&format!(
                "{export}interface {name} {{\n{}\n}}",
                property_lines(props, settings)
            ));
        }
        other => {
            out.push_str(&format!("{export}type {name} = {};", type_expr(other, settings)));
        }
    }

    // Utility aliases only make sense over a keyed object root.
    if settings.generate_utility_types && matches!(ty, InferredType::Object(_)) {
        out.push_str(&utility_types(name, settings));
    }

    out
}

/// Preamble comment. Deliberately timestamp-free: repeated runs over the
/// same input must stay byte-identical.
fn preamble(name: &str, ty: &InferredType) -> String {
    let shape = match ty {
        InferredType::Object(props) => format!("object with {} properties", props.len()),
        InferredType::ArrayOf(_) | InferredType::UnionArrayOf(_) => "array".to_string(),
        InferredType::Primitive(kind) => kind.keyword().to_string(),
        InferredType::Literal { .. } => "literal".to_string(),
        InferredType::Any => "any".to_string(),
    };
    format!("/**\n * {name}\n * Generated from a JSON sample ({shape}).\n */\n")
}

fn utility_types(name: &str, settings: &GenerationSettings) -> String {
    let export = if settings.export_interface { "export " } else { "" };
    format!(
        "\n\n{export}type Partial{name} = Partial<{name}>;\
         \n{export}type Required{name} = Required<{name}>;\
         \n{export}type {name}Keys = keyof {name};"
    )
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer;
    use crate::value::JsonValue;
    use serde_json::json;

    fn render(v: serde_json::Value, name: &str, settings: &GenerationSettings) -> String {
        let value: JsonValue = v.into();
        let ty = infer(&value, settings, 0);
        render_declaration(&ty, name, settings)
    }

    #[test]
    fn object_root_renders_as_interface() {
        let out = render(json!({"name": "John", "age": 30}), "User", &Default::default());
        assert!(out.contains("interface User {"), "got: {out}");
        assert!(out.contains("name: string;"));
        assert!(out.contains("age: number;"));
    }

    #[test]
    fn empty_array_root_renders_as_any_array_alias() {
        let out = render(json!([]), "Items", &Default::default());
        assert_eq!(out, "type Items = any[];");
    }

    #[test]
    fn mixed_array_renders_parenthesized_union() {
        let out = render(json!([1, "a"]), "Mixed", &Default::default());
        assert_eq!(out, "type Mixed = (number | string)[];");
    }

    #[test]
    fn optional_null_property_keeps_null_type() {
        let out = render(json!({"a": null}), "T", &Default::default());
        assert!(out.contains("a?: null;"), "got: {out}");
    }

    #[test]
    fn readonly_and_export_flags_show_up() {
        let settings = GenerationSettings {
            export_interface: true,
            use_readonly: true,
            ..Default::default()
        };
        let out = render(json!({"id": 1}), "Row", &settings);
        assert!(out.starts_with("export interface Row {"));
        assert!(out.contains("readonly id: number;"));
    }

    #[test]
    fn utility_types_only_for_object_roots() {
        let settings =
            GenerationSettings { generate_utility_types: true, ..Default::default() };
        let obj = render(json!({"a": 1}), "Cfg", &settings);
        assert!(obj.contains("type PartialCfg = Partial<Cfg>;"));
        assert!(obj.contains("type RequiredCfg = Required<Cfg>;"));
        assert!(obj.contains("type CfgKeys = keyof Cfg;"));

        let arr = render(json!([1, 2]), "Cfg", &settings);
        assert!(!arr.contains("Partial<"), "arrays get no utility appendix: {arr}");
    }

    #[test]
    fn strict_string_renders_quoted_literal() {
        let strict = GenerationSettings { use_strict_types: true, ..Default::default() };
        let out = render(json!("abc"), "S", &strict);
        assert_eq!(out, "type S = \"abc\";");
        let widened = render(json!("abc"), "S", &Default::default());
        assert_eq!(widened, "type S = string;");
    }

    #[test]
    fn awkward_keys_are_quoted() {
        let out = render(json!({"content-type": "x", "2fa": true}), "H", &Default::default());
        assert!(out.contains("\"content-type\": string;"));
        assert!(out.contains("\"2fa\": boolean;"));
    }

    #[test]
    fn indent_size_governs_property_indent() {
        let settings = GenerationSettings { indent_size: 4, ..Default::default() };
        let out = render(json!({"a": 1}), "T", &settings);
        assert!(out.contains("\n    a: number;"), "got: {out}");
    }

    #[test]
    fn comment_preamble_is_present_and_stable() {
        let settings = GenerationSettings { generate_comments: true, ..Default::default() };
        let a = render(json!({"a": 1}), "T", &settings);
        let b = render(json!({"a": 1}), "T", &settings);
        assert!(a.starts_with("/**\n * T\n"));
        assert_eq!(a, b);
    }
}
