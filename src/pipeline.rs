//! The generation pipeline and batch coordinator.
//!
//! `generate_single` wires the stages together:
//! text -> validate -> parse -> { infer -> render, complexity, analyze }
//! and wraps the whole run in a timer. Every stage failure related to the
//! *data* comes back as a value on the result; the only `Err` is a
//! settings contract violation.
//!
//! Batch items are independent, immutable, and share nothing, so the
//! coordinator fans them out with rayon. Collection preserves input order.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use uuid::Uuid;

use crate::analyze::{self, TypeAnalysis};
use crate::codegen;
use crate::inference;
use crate::metrics::{self, ComplexityMetrics, TypeCount};
use crate::settings::{GenerationSettings, SettingsError, sanitize_identifier};
use crate::validate::validate_json;
use crate::value::JsonValue;

// ------------------------------- Records ---------------------------------- //

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatistics {
    pub input_size: usize,
    pub output_size: usize,
    pub input_lines: usize,
    pub output_lines: usize,
    /// Milliseconds, measured around the whole pipeline call.
    pub processing_time: f64,
    pub complexity: ComplexityMetrics,
    pub type_count: TypeCount,
}

/// One pipeline run over one input. Created once, never mutated.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub id: String,
    pub input: String,
    pub output: String,
    pub interface_name: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub statistics: GenerationStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<TypeAnalysis>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct BatchInput {
    pub content: String,
    pub label: String,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatistics {
    pub total_generated: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    /// Mean of `complexity.depth` over all items, failed ones counting 0.
    pub average_complexity: f64,
    pub total_input_size: usize,
    pub total_output_size: usize,
    pub success_rate: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationBatch {
    pub id: String,
    pub results: Vec<GenerationResult>,
    pub settings: GenerationSettings,
    pub statistics: BatchStatistics,
}

// ------------------------------ Entry points ------------------------------ //

/// Run the full pipeline over one JSON document.
///
/// `interface_name` overrides the settings default; it is coerced to a
/// legal identifier, falling back to the settings name when nothing
/// survives. The only `Err` is a settings contract violation.
pub fn generate_single(
    json_text: &str,
    interface_name: &str,
    settings: &GenerationSettings,
) -> Result<GenerationResult, SettingsError> {
    settings.validate()?;
    Ok(run_pipeline(json_text, interface_name, settings))
}

/// Run the pipeline over every input; one item's failure never aborts its
/// siblings. Items are fanned out across rayon workers (they share no
/// state); result order matches input order.
pub fn generate_batch(
    items: &[BatchInput],
    settings: &GenerationSettings,
) -> Result<GenerationBatch, SettingsError> {
    settings.validate()?;

    let results: Vec<GenerationResult> = items
        .par_iter()
        .map(|item| run_pipeline(&item.content, &item.label, settings))
        .collect();

    let statistics = aggregate(&results);
    Ok(GenerationBatch {
        id: Uuid::new_v4().to_string(),
        results,
        settings: settings.clone(),
        statistics,
    })
}

// ------------------------------- Pipeline --------------------------------- //

/// Settings are validated by the callers above.
fn run_pipeline(json_text: &str, name_hint: &str, settings: &GenerationSettings) -> GenerationResult {
    let started = Instant::now();
    let interface_name = resolve_name(name_hint, settings);

    let validation = validate_json(json_text);
    let (output, error, complexity, analysis) = if validation.is_valid {
        match serde_json::from_str::<serde_json::Value>(json_text) {
            Ok(parsed) => {
                let value: JsonValue = parsed.into();
                let ty = inference::infer(&value, settings, 0);
                let output = codegen::render_declaration(&ty, &interface_name, settings);
                let complexity = metrics::complexity_of_value(&value);
                let analysis = analyze::analyze_value(&value);
                (output, None, complexity, analysis)
            }
            // validate_json accepted the text, so this arm is dead in
            // practice; kept so a parser disagreement degrades like any
            // other invalid input instead of panicking.
            Err(err) => (String::new(), Some(err.to_string()), Default::default(), analyze::analyze_text(json_text)),
        }
    } else {
        let message = validation
            .errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "invalid JSON".to_string());
        (String::new(), Some(message), Default::default(), analyze::analyze_text(json_text))
    };

    let type_count = metrics::type_count(&output);
    let statistics = GenerationStatistics {
        input_size: json_text.chars().count(),
        output_size: output.chars().count(),
        input_lines: json_text.lines().count(),
        output_lines: output.lines().count(),
        processing_time: started.elapsed().as_secs_f64() * 1000.0,
        complexity,
        type_count,
    };

    GenerationResult {
        id: Uuid::new_v4().to_string(),
        input: json_text.to_string(),
        output,
        interface_name,
        is_valid: error.is_none(),
        error,
        statistics,
        analysis: Some(analysis),
        created_at: Utc::now(),
    }
}

fn resolve_name(hint: &str, settings: &GenerationSettings) -> String {
    sanitize_identifier(hint).unwrap_or_else(|| settings.interface_name.clone())
}

fn aggregate(results: &[GenerationResult]) -> BatchStatistics {
    let total = results.len();
    let valid_count = results.iter().filter(|r| r.is_valid).count();
    let depth_sum: u64 = results.iter().map(|r| u64::from(r.statistics.complexity.depth)).sum();
    BatchStatistics {
        total_generated: total,
        valid_count,
        invalid_count: total - valid_count,
        average_complexity: if total == 0 { 0.0 } else { depth_sum as f64 / total as f64 },
        total_input_size: results.iter().map(|r| r.statistics.input_size).sum(),
        total_output_size: results.iter().map(|r| r.statistics.output_size).sum(),
        success_rate: if total == 0 { 0.0 } else { valid_count as f64 / total as f64 * 100.0 },
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GenerationSettings {
        GenerationSettings::default()
    }

    #[test]
    fn simple_object_scenario() {
        let r = generate_single(r#"{"name":"John","age":30}"#, "User", &settings()).unwrap();
        assert!(r.is_valid);
        assert_eq!(r.interface_name, "User");
        assert!(r.output.contains("interface User {"));
        assert!(r.output.contains("name: string;"));
        assert!(r.output.contains("age: number;"));
        assert_eq!(r.error, None);
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let text = r#"{"a": [1, "x", null], "b": {"c": true}}"#;
        let a = generate_single(text, "T", &settings()).unwrap();
        let b = generate_single(text, "T", &settings()).unwrap();
        assert_eq!(a.output, b.output);
    }

    #[test]
    fn empty_array_scenario() {
        let r = generate_single("[]", "Items", &settings()).unwrap();
        assert_eq!(r.output, "type Items = any[];");
    }

    #[test]
    fn mixed_array_scenario() {
        let r = generate_single(r#"[1,"a"]"#, "Mixed", &settings()).unwrap();
        assert_eq!(r.output, "type Mixed = (number | string)[];");
    }

    #[test]
    fn malformed_input_scenario() {
        let r = generate_single(r#"{"a":}"#, "Bad", &settings()).unwrap();
        assert!(!r.is_valid);
        assert_eq!(r.output, "");
        assert!(r.error.is_some());
        assert_eq!(r.statistics.complexity, ComplexityMetrics::default());
        assert_eq!(r.statistics.output_size, 0);
        let analysis = r.analysis.unwrap();
        assert_eq!(analysis.root_type, "unknown");
    }

    #[test]
    fn statistics_reflect_input_and_output_text() {
        let r = generate_single("{\n  \"a\": 1\n}", "T", &settings()).unwrap();
        assert_eq!(r.statistics.input_lines, 3);
        assert_eq!(r.statistics.input_size, 12);
        assert_eq!(r.statistics.output_lines, r.output.lines().count());
        assert!(r.statistics.processing_time >= 0.0);
    }

    #[test]
    fn name_hint_is_sanitized_with_settings_fallback() {
        let r = generate_single("1", "my type!", &settings()).unwrap();
        assert_eq!(r.interface_name, "mytype");
        let r = generate_single("1", "@@@", &settings()).unwrap();
        assert_eq!(r.interface_name, "Root");
    }

    #[test]
    fn invalid_settings_are_the_only_hard_failure() {
        let bad = GenerationSettings { indent_size: 0, ..Default::default() };
        assert!(generate_single("{}", "T", &bad).is_err());
        assert!(generate_batch(&[], &bad).is_err());
    }

    #[test]
    fn batch_isolates_failures_and_keeps_order() {
        let items = vec![
            BatchInput { content: r#"{"a":1}"#.into(), label: "First".into() },
            BatchInput { content: r#"{"bad":}"#.into(), label: "Second".into() },
            BatchInput { content: "[1,2]".into(), label: "Third".into() },
        ];
        let batch = generate_batch(&items, &settings()).unwrap();
        assert_eq!(batch.results.len(), 3);
        let names: Vec<&str> = batch.results.iter().map(|r| r.interface_name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
        assert!(batch.results[0].is_valid);
        assert!(!batch.results[1].is_valid);
        assert!(batch.results[2].is_valid);

        let s = batch.statistics;
        assert_eq!(s.total_generated, 3);
        assert_eq!(s.valid_count, 2);
        assert_eq!(s.invalid_count, 1);
        assert!((s.success_rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn batch_average_complexity_counts_failures_as_zero() {
        let items = vec![
            // depth 2: root object -> array -> elements
            BatchInput { content: r#"{"a":[1]}"#.into(), label: "A".into() },
            BatchInput { content: "not json".into(), label: "B".into() },
        ];
        let batch = generate_batch(&items, &settings()).unwrap();
        assert!((batch.statistics.average_complexity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_batch_has_zero_rates() {
        let batch = generate_batch(&[], &settings()).unwrap();
        assert_eq!(batch.statistics.total_generated, 0);
        assert_eq!(batch.statistics.success_rate, 0.0);
        assert_eq!(batch.statistics.average_complexity, 0.0);
    }

    #[test]
    fn results_serialize_with_camel_case_names() {
        let r = generate_single("{}", "T", &settings()).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("interfaceName").is_some());
        assert!(json.get("isValid").is_some());
        assert!(json["statistics"].get("inputSize").is_some());
        assert!(json["statistics"]["typeCount"].get("primitives").is_some());
    }
}
