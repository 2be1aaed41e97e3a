//! JSON input validation. All failure is data; this module never panics.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Inputs above this length get a non-fatal performance warning.
const LARGE_INPUT_CHARS: usize = 100_000;

static TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*[}\]]").unwrap());
static SINGLE_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'[^']*'\s*:|:\s*'[^']*'").unwrap());

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JsonValidation {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl JsonValidation {
    fn invalid(issue: ValidationIssue, suggestions: Vec<String>) -> Self {
        Self { is_valid: false, errors: vec![issue], warnings: Vec::new(), suggestions }
    }
}

/// Check that `text` is syntactically valid JSON.
///
/// Empty or whitespace-only input is rejected without a parse attempt.
/// On parse failure the error echoes the parser's message with its
/// 1-based line/column. On success, non-fatal warnings flag tab
/// characters and very large inputs.
pub fn validate_json(text: &str) -> JsonValidation {
    if text.trim().is_empty() {
        return JsonValidation::invalid(
            ValidationIssue {
                message: "input cannot be empty".to_string(),
                line: None,
                column: None,
            },
            vec!["Provide a JSON document to analyze".to_string()],
        );
    }

    match serde_json::from_str::<serde_json::Value>(text) {
        Err(err) => {
            // serde_json positions are already 1-based; 0 means "unknown"
            // (e.g. I/O category errors, which from_str cannot produce).
            let line = (err.line() > 0).then(|| err.line());
            let column = (err.column() > 0).then(|| err.column());
            JsonValidation::invalid(
                ValidationIssue { message: err.to_string(), line, column },
                syntax_suggestions(text),
            )
        }
        Ok(_) => {
            let mut warnings = Vec::new();
            if text.contains('\t') {
                warnings.push("input contains tab characters".to_string());
            }
            if text.chars().count() > LARGE_INPUT_CHARS {
                warnings.push(format!(
                    "input exceeds {LARGE_INPUT_CHARS} characters; generation may be slow"
                ));
            }
            JsonValidation { is_valid: true, errors: Vec::new(), warnings, suggestions: Vec::new() }
        }
    }
}

/// Cheap pattern probes for the two most common hand-written-JSON mistakes.
fn syntax_suggestions(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    if TRAILING_COMMA.is_match(text) {
        out.push("Remove trailing commas before `}` or `]`".to_string());
    }
    if SINGLE_QUOTED.is_match(text) {
        out.push("Use double quotes for keys and string values".to_string());
    }
    out
}
