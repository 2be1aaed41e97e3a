//! Generation settings, threaded explicitly through every pipeline stage.
//!
//! No ambient/global configuration: every recursive call site takes the
//! settings by reference, which keeps the stages referentially transparent
//! and trivially testable.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettings {
    /// Default declaration name; per-call names override it.
    pub interface_name: String,
    /// Mark null/undefined-valued properties with `?`.
    pub use_optional_properties: bool,
    /// Emit a preamble comment block above the declaration.
    pub generate_comments: bool,
    /// Literal types (`"abc"`, `42`, `true`) instead of widened primitives.
    pub use_strict_types: bool,
    /// Prefix declarations with `export`.
    pub export_interface: bool,
    /// Mark every property `readonly`.
    pub use_readonly: bool,
    /// Append `Partial`/`Required`/`keyof` aliases for object roots.
    pub generate_utility_types: bool,
    /// Property indent width in spaces. Cosmetic only.
    pub indent_size: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            interface_name: "Root".to_string(),
            use_optional_properties: true,
            generate_comments: false,
            use_strict_types: false,
            export_interface: false,
            use_readonly: false,
            generate_utility_types: false,
            indent_size: 2,
        }
    }
}

/// The one hard failure in the crate: a caller contract violation.
/// Bad *data* is always reported as a value; bad *settings* are a bug at
/// the call site and surface as an `Err`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("interface name cannot be empty")]
    EmptyInterfaceName,
    #[error("indent size must be between 1 and 16, got {0}")]
    IndentOutOfRange(usize),
}

impl GenerationSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.interface_name.trim().is_empty() {
            return Err(SettingsError::EmptyInterfaceName);
        }
        if self.indent_size == 0 || self.indent_size > 16 {
            return Err(SettingsError::IndentOutOfRange(self.indent_size));
        }
        Ok(())
    }
}

/// Coerce an arbitrary label into a legal TypeScript identifier:
/// keep `[A-Za-z0-9_$]`, prefix `_` when the first kept char is a digit.
/// Returns `None` when nothing survives.
pub fn sanitize_identifier(raw: &str) -> Option<String> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    if kept.is_empty() {
        return None;
    }
    if kept.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        Some(format!("_{kept}"))
    } else {
        Some(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_pass_validation() {
        assert_eq!(GenerationSettings::default().validate(), Ok(()));
    }

    #[test]
    fn zero_indent_is_a_programmer_error() {
        let settings = GenerationSettings { indent_size: 0, ..Default::default() };
        assert_eq!(settings.validate(), Err(SettingsError::IndentOutOfRange(0)));
    }

    #[test]
    fn blank_name_is_a_programmer_error() {
        let settings = GenerationSettings { interface_name: "  ".into(), ..Default::default() };
        assert_eq!(settings.validate(), Err(SettingsError::EmptyInterfaceName));
    }

    #[test]
    fn labels_become_identifiers() {
        assert_eq!(sanitize_identifier("user profile").as_deref(), Some("userprofile"));
        assert_eq!(sanitize_identifier("2fa-config").as_deref(), Some("_2faconfig"));
        assert_eq!(sanitize_identifier("---").as_deref(), None);
    }
}
