use std::collections::BTreeMap;

use sqlsyntax_core::{DbType, Error, Result, TypeKind};

/// Native type template for one semantic type kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    /// Template with optional `{length}`, `{precision}` and `{scale}` placeholders.
    pub template: String,
    /// Rendering used for sized kinds declared without a length. When absent
    /// the configured default length is substituted into `template`.
    pub unbounded: Option<String>,
}

impl TypeMapping {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            unbounded: None,
        }
    }

    pub fn sized(template: impl Into<String>, unbounded: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            unbounded: Some(unbounded.into()),
        }
    }
}

/// Semantic type to native type keyword table for a dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMap {
    dialect: &'static str,
    entries: BTreeMap<TypeKind, TypeMapping>,
}

impl TypeMap {
    pub fn new(dialect: &'static str) -> Self {
        Self {
            dialect,
            entries: BTreeMap::new(),
        }
    }

    pub fn with(mut self, kind: TypeKind, mapping: TypeMapping) -> Self {
        self.entries.insert(kind, mapping);
        self
    }

    /// Replace templates with user overrides. An override also applies to
    /// unbounded declarations of its kind.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<TypeKind, String>) {
        for (kind, template) in overrides {
            self.entries.insert(*kind, TypeMapping::new(template.clone()));
        }
    }

    pub fn supports(&self, kind: TypeKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Render the native type for `db_type`.
    pub fn resolve(&self, db_type: &DbType, default_length: u32) -> Result<String> {
        let mapping = self
            .entries
            .get(&db_type.kind())
            .ok_or_else(|| Error::UnsupportedType {
                dialect: self.dialect.to_string(),
                db_type: db_type.to_string(),
            })?;

        let rendered = match db_type {
            DbType::Decimal { precision, scale } => mapping
                .template
                .replace("{precision}", &precision.to_string())
                .replace("{scale}", &scale.to_string()),
            DbType::Binary { length }
            | DbType::String { length }
            | DbType::AnsiString { length } => match (length, &mapping.unbounded) {
                (Some(length), _) => mapping.template.replace("{length}", &length.to_string()),
                (None, Some(unbounded)) => unbounded.clone(),
                (None, None) => mapping
                    .template
                    .replace("{length}", &default_length.to_string()),
            },
            _ => mapping.template.clone(),
        };

        Ok(rendered)
    }
}
