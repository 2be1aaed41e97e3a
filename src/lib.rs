//! Structural type inference and code generation over JSON samples.
//!
//! Given an arbitrary JSON value, synthesize a TypeScript-style type
//! declaration describing its shape: literal or widened types, optionality
//! inference, a recursion depth guard, and optional utility-type aliases.
//! All core functions are pure and synchronous; every data-dependent
//! failure is returned as a value, so callers render error state without
//! catching anything.
//!
//! Pipeline: text -> [`validate::validate_json`] -> parsed value ->
//! { [`inference::infer`] -> [`codegen::render_declaration`],
//!   [`metrics::complexity_of_value`], [`analyze::analyze_value`] }
//! -> [`pipeline::GenerationResult`].

pub mod analyze;
pub mod cli;
pub mod codegen;
pub mod inference;
pub mod ir;
pub mod metrics;
pub mod pipeline;
pub mod settings;
pub mod validate;
pub mod value;

pub use pipeline::{BatchInput, GenerationBatch, GenerationResult, generate_batch, generate_single};
pub use settings::{GenerationSettings, SettingsError};
pub use validate::{JsonValidation, validate_json};
