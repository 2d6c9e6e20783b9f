use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::{InstanceType, Metadata, Schema, SchemaObject};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default precision used when `decimal` is written without arguments.
pub const DEFAULT_DECIMAL_PRECISION: u8 = 18;

/// Largest precision accepted for `decimal(p,s)`.
pub const MAX_DECIMAL_PRECISION: u8 = 38;

/// Dialect-neutral column type.
///
/// The textual form (`string(255)`, `decimal(18,2)`, `integer`, ...) is what
/// appears in JSON definitions and option files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DbType {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Decimal { precision: u8, scale: u8 },
    Double,
    Single,
    Date,
    Time,
    DateTime,
    Guid,
    Binary { length: Option<u32> },
    /// Unicode string; `None` falls back to the dialect's default length.
    String { length: Option<u32> },
    AnsiString { length: Option<u32> },
    /// Unbounded unicode text.
    Text,
}

/// Fieldless discriminant of [`DbType`], used to key dialect type maps.
///
/// Serialized as its lowercase name so it can key TOML tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum TypeKind {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Decimal,
    Double,
    Single,
    Date,
    Time,
    DateTime,
    Guid,
    Binary,
    String,
    AnsiString,
    Text,
}

impl TypeKind {
    pub const ALL: [TypeKind; 16] = [
        TypeKind::Boolean,
        TypeKind::TinyInt,
        TypeKind::SmallInt,
        TypeKind::Integer,
        TypeKind::BigInt,
        TypeKind::Decimal,
        TypeKind::Double,
        TypeKind::Single,
        TypeKind::Date,
        TypeKind::Time,
        TypeKind::DateTime,
        TypeKind::Guid,
        TypeKind::Binary,
        TypeKind::String,
        TypeKind::AnsiString,
        TypeKind::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Boolean => "boolean",
            TypeKind::TinyInt => "tinyint",
            TypeKind::SmallInt => "smallint",
            TypeKind::Integer => "integer",
            TypeKind::BigInt => "bigint",
            TypeKind::Decimal => "decimal",
            TypeKind::Double => "double",
            TypeKind::Single => "single",
            TypeKind::Date => "date",
            TypeKind::Time => "time",
            TypeKind::DateTime => "datetime",
            TypeKind::Guid => "guid",
            TypeKind::Binary => "binary",
            TypeKind::String => "string",
            TypeKind::AnsiString => "ansistring",
            TypeKind::Text => "text",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TypeKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeKind> for &'static str {
    fn from(value: TypeKind) -> Self {
        value.as_str()
    }
}

impl FromStr for TypeKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        TypeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == needle)
            .ok_or_else(|| Error::Validation(format!("unknown type name: {value}")))
    }
}

impl DbType {
    /// Unicode string with an explicit length.
    pub fn string(length: u32) -> Self {
        DbType::String {
            length: Some(length),
        }
    }

    pub fn decimal(precision: u8, scale: u8) -> Self {
        DbType::Decimal { precision, scale }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            DbType::Boolean => TypeKind::Boolean,
            DbType::TinyInt => TypeKind::TinyInt,
            DbType::SmallInt => TypeKind::SmallInt,
            DbType::Integer => TypeKind::Integer,
            DbType::BigInt => TypeKind::BigInt,
            DbType::Decimal { .. } => TypeKind::Decimal,
            DbType::Double => TypeKind::Double,
            DbType::Single => TypeKind::Single,
            DbType::Date => TypeKind::Date,
            DbType::Time => TypeKind::Time,
            DbType::DateTime => TypeKind::DateTime,
            DbType::Guid => TypeKind::Guid,
            DbType::Binary { .. } => TypeKind::Binary,
            DbType::String { .. } => TypeKind::String,
            DbType::AnsiString { .. } => TypeKind::AnsiString,
            DbType::Text => TypeKind::Text,
        }
    }

    /// Declared length for sized types.
    pub fn length(&self) -> Option<u32> {
        match self {
            DbType::Binary { length }
            | DbType::String { length }
            | DbType::AnsiString { length } => *length,
            _ => None,
        }
    }

    /// Reject sizes no dialect can declare: zero lengths, decimal precision
    /// outside `1..=38`, and a scale larger than the precision.
    pub fn check_bounds(&self) -> Result<(), Error> {
        if self.length() == Some(0) {
            return Err(Error::Validation(format!("length must be positive: {self}")));
        }
        if let DbType::Decimal { precision, scale } = *self {
            if precision == 0 || precision > MAX_DECIMAL_PRECISION {
                return Err(Error::Validation(format!(
                    "decimal precision must be between 1 and {MAX_DECIMAL_PRECISION}: {self}"
                )));
            }
            if scale > precision {
                return Err(Error::Validation(format!(
                    "decimal scale exceeds precision: {self}"
                )));
            }
        }
        Ok(())
    }

    /// Unicode character kinds, whose literals need the `N` prefix.
    pub fn is_unicode(&self) -> bool {
        matches!(self, DbType::String { .. } | DbType::Text)
    }

    /// Integer kinds usable as identity columns.
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            DbType::TinyInt | DbType::SmallInt | DbType::Integer | DbType::BigInt
        )
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.kind().as_str();
        match self {
            DbType::Decimal { precision, scale } => write!(f, "{name}({precision},{scale})"),
            DbType::Binary { length: Some(length) }
            | DbType::String { length: Some(length) }
            | DbType::AnsiString { length: Some(length) } => write!(f, "{name}({length})"),
            _ => f.write_str(name),
        }
    }
}

impl FromStr for DbType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (base, args) = match trimmed.split_once('(') {
            Some((base, rest)) => {
                let inner = rest.strip_suffix(')').ok_or_else(|| {
                    Error::Validation(format!("unterminated type arguments: {value}"))
                })?;
                let args = inner
                    .split(',')
                    .map(|arg| {
                        arg.trim().parse::<u32>().map_err(|_| {
                            Error::Validation(format!("invalid type argument '{arg}' in {value}"))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                (base, args)
            }
            None => (trimmed, Vec::new()),
        };

        let kind: TypeKind = base.parse()?;
        let sized = |args: &[u32]| -> Result<Option<u32>, Error> {
            match args {
                [] => Ok(None),
                [0] => Err(Error::Validation(format!("length must be positive: {value}"))),
                [length] => Ok(Some(*length)),
                _ => Err(Error::Validation(format!("too many type arguments: {value}"))),
            }
        };

        let plain = |db_type: DbType| -> Result<DbType, Error> {
            if args.is_empty() {
                Ok(db_type)
            } else {
                Err(Error::Validation(format!(
                    "type '{kind}' does not take arguments: {value}"
                )))
            }
        };

        let db_type = match kind {
            TypeKind::Decimal => {
                let narrow = |arg: u32| {
                    u8::try_from(arg).map_err(|_| {
                        Error::Validation(format!("decimal argument out of range: {value}"))
                    })
                };
                match args.as_slice() {
                    [] => DbType::decimal(DEFAULT_DECIMAL_PRECISION, 0),
                    [precision] => DbType::decimal(narrow(*precision)?, 0),
                    [precision, scale] => DbType::decimal(narrow(*precision)?, narrow(*scale)?),
                    _ => {
                        return Err(Error::Validation(format!(
                            "too many type arguments: {value}"
                        )));
                    }
                }
            }
            TypeKind::Binary => DbType::Binary {
                length: sized(&args)?,
            },
            TypeKind::String => DbType::String {
                length: sized(&args)?,
            },
            TypeKind::AnsiString => DbType::AnsiString {
                length: sized(&args)?,
            },
            TypeKind::Boolean => plain(DbType::Boolean)?,
            TypeKind::TinyInt => plain(DbType::TinyInt)?,
            TypeKind::SmallInt => plain(DbType::SmallInt)?,
            TypeKind::Integer => plain(DbType::Integer)?,
            TypeKind::BigInt => plain(DbType::BigInt)?,
            TypeKind::Double => plain(DbType::Double)?,
            TypeKind::Single => plain(DbType::Single)?,
            TypeKind::Date => plain(DbType::Date)?,
            TypeKind::Time => plain(DbType::Time)?,
            TypeKind::DateTime => plain(DbType::DateTime)?,
            TypeKind::Guid => plain(DbType::Guid)?,
            TypeKind::Text => plain(DbType::Text)?,
        };

        db_type.check_bounds()?;
        Ok(db_type)
    }
}

impl TryFrom<String> for DbType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DbType> for String {
    fn from(value: DbType) -> Self {
        value.to_string()
    }
}

impl JsonSchema for DbType {
    fn schema_name() -> String {
        "DbType".to_string()
    }

    fn schema_id() -> Cow<'static, str> {
        Cow::Borrowed(concat!(module_path!(), "::DbType"))
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            metadata: Some(Box::new(Metadata {
                description: Some(
                    "Semantic column type, e.g. `integer`, `string(255)`, `decimal(18,2)`."
                        .to_string(),
                ),
                ..Default::default()
            })),
            ..Default::default()
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sized_and_plain_types() {
        assert_eq!("string(255)".parse::<DbType>(), Ok(DbType::string(255)));
        assert_eq!(
            " String ".parse::<DbType>(),
            Ok(DbType::String { length: None })
        );
        assert_eq!("decimal(18, 2)".parse::<DbType>(), Ok(DbType::decimal(18, 2)));
        assert_eq!("decimal".parse::<DbType>(), Ok(DbType::decimal(18, 0)));
        assert_eq!("DATETIME".parse::<DbType>(), Ok(DbType::DateTime));
        assert_eq!(
            "binary(16)".parse::<DbType>(),
            Ok(DbType::Binary { length: Some(16) })
        );
    }

    #[test]
    fn rejects_malformed_types() {
        assert!(matches!("varchar".parse::<DbType>(), Err(Error::Validation(_))));
        assert!(matches!("integer(4)".parse::<DbType>(), Err(Error::Validation(_))));
        assert!(matches!("string(0)".parse::<DbType>(), Err(Error::Validation(_))));
        assert!(matches!("string(12".parse::<DbType>(), Err(Error::Validation(_))));
        assert!(matches!("decimal(400,2)".parse::<DbType>(), Err(Error::Validation(_))));
        assert!(matches!("decimal(50,2)".parse::<DbType>(), Err(Error::Validation(_))));
        assert!(matches!("decimal(50,60)".parse::<DbType>(), Err(Error::Validation(_))));
        assert!(matches!("decimal(10,12)".parse::<DbType>(), Err(Error::Validation(_))));
        assert!(matches!("decimal(0)".parse::<DbType>(), Err(Error::Validation(_))));
        assert_eq!("decimal(38,38)".parse::<DbType>(), Ok(DbType::decimal(38, 38)));
    }

    #[test]
    fn display_matches_parse_input() {
        for text in ["string(255)", "decimal(10,4)", "guid", "ansistring(50)", "text"] {
            let parsed: DbType = text.parse().expect("parse type");
            assert_eq!(parsed.to_string(), text);
        }
    }
}
