use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sqlsyntax_core::TypeKind;

use crate::errors::OptionsError;

/// Length used for `string`/`ansistring` columns declared without one.
pub const DEFAULT_STRING_LENGTH: u32 = 255;

/// When identifiers are wrapped in the dialect's quote characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteIdentifiers {
    #[default]
    Always,
    /// Only reserved words and names that are not plain identifiers.
    WhenNeeded,
}

/// Options that control how a syntax provider renders DDL.
///
/// ```toml
/// default_schema = "dbo"
/// default_string_length = 255
/// quote_identifiers = "always"
///
/// [type_overrides]
/// datetime = "DATETIME2"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxOptions {
    /// Schema applied to tables that do not name one.
    pub default_schema: Option<String>,
    pub default_string_length: u32,
    pub quote_identifiers: QuoteIdentifiers,
    /// Native type templates replacing the dialect's built-in mapping.
    /// Templates may use `{length}`, `{precision}` and `{scale}`.
    pub type_overrides: BTreeMap<TypeKind, String>,
}

impl Default for SyntaxOptions {
    fn default() -> Self {
        Self {
            default_schema: None,
            default_string_length: DEFAULT_STRING_LENGTH,
            quote_identifiers: QuoteIdentifiers::Always,
            type_overrides: BTreeMap::new(),
        }
    }
}

impl SyntaxOptions {
    pub fn from_toml_str(content: &str) -> Result<Self, OptionsError> {
        let options: SyntaxOptions = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.default_string_length == 0 {
            return Err(OptionsError::Invalid(
                "default_string_length must be greater than zero".to_string(),
            ));
        }

        if let Some(schema) = &self.default_schema {
            if schema.trim().is_empty() {
                return Err(OptionsError::Invalid(
                    "default_schema must not be blank".to_string(),
                ));
            }
        }

        for (kind, template) in &self.type_overrides {
            if template.trim().is_empty() {
                return Err(OptionsError::Invalid(format!(
                    "type override for '{kind}' is empty"
                )));
            }
        }

        Ok(())
    }
}
