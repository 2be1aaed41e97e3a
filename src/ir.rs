// Strongly-typed IR for codegen. No JsonValue here.

/// Primitive kinds a leaf can widen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Null,
    Undefined,
    Boolean,
    Number,
    String,
}

impl PrimitiveKind {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Null => "null",
            PrimitiveKind::Undefined => "undefined",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Number => "number",
            PrimitiveKind::String => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InferredType {
    /// Widened primitive (`string`, `number`, ...).
    Primitive(PrimitiveKind),
    /// Literal type, strict mode only. `value` is already rendered
    /// (`"abc"`, `42`, `true`) so codegen emits it verbatim.
    Literal { kind: PrimitiveKind, value: String },
    /// Homogeneous array: every element reduced to one distinct type.
    ArrayOf(Box<InferredType>),
    /// Heterogeneous array, rendered `(A | B)[]`. Members are kept in
    /// first-occurrence order; never fewer than two.
    UnionArrayOf(Vec<InferredType>),
    /// Properties in source key insertion order — stable order for
    /// deterministic codegen.
    Object(Vec<Property>),
    /// Depth-guard fallback; also the element type of empty arrays.
    Any,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub ty: InferredType,
    pub optional: bool,
    pub readonly: bool,
}
