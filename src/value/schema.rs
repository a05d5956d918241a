//! Dialect-aware bindings and column types.
//!
//! The ORM asks a column type three things: how to bind a value for the active
//! dialect, which logical type tag it carries, and which physical column type to
//! emit in generated DDL.

use crate::dialect::Dialect;
use crate::value::{DriverValuer, NullableError, NullableU64};
use sea_query::{ColumnDef, Value};

/// Logical type tag of [`NullableU64`]
pub const UINT64_NULL: &str = "uint64_null";

/// Field metadata consulted when resolving column types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    /// Column name (e.g., "parent_id")
    pub column: &'static str,
    /// Whether the column accepts NULL
    pub nullable: bool,
}

impl Default for FieldMeta {
    fn default() -> Self {
        Self {
            column: "",
            nullable: true,
        }
    }
}

impl FieldMeta {
    /// Nullable field for `column`
    pub fn new(column: &'static str) -> Self {
        Self {
            column,
            ..Default::default()
        }
    }

    /// Mark the field as `NOT NULL`
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Column types with dialect-specific binding and DDL
pub trait DialectType {
    /// Build the parameter binding for `dialect`.
    ///
    /// Returns `Ok(None)` when the dialect is not supported; the caller should
    /// leave the parameter out rather than bind anything.
    ///
    /// # Errors
    ///
    /// Returns the driver encoding error for text-bound dialects.
    fn dialect_value(&self, dialect: &Dialect) -> Result<Option<Value>, NullableError>;

    /// Logical type tag used by schema reflection
    fn logical_type_name() -> &'static str;

    /// Physical column type for generated DDL; empty when the ORM should decide.
    fn physical_column_type(dialect: &Dialect, field: &FieldMeta) -> &'static str;

    /// SeaQuery column definition for `field` under `dialect`.
    fn column_def(dialect: &Dialect, field: &FieldMeta) -> ColumnDef;
}

impl DialectType for NullableU64 {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self), err))]
    fn dialect_value(&self, dialect: &Dialect) -> Result<Option<Value>, NullableError> {
        match dialect {
            // Text columns: go through the driver encoding
            Dialect::Sqlite | Dialect::Mysql => Ok(Some(self.value()?.into())),
            Dialect::Postgres => Ok(Some(Value::BigUnsigned(self.get()))),
            Dialect::Unsupported(name) => {
                log::warn!("no {UINT64_NULL} binding for unsupported dialect {name:?}");
                Ok(None)
            }
        }
    }

    fn logical_type_name() -> &'static str {
        UINT64_NULL
    }

    fn physical_column_type(dialect: &Dialect, _field: &FieldMeta) -> &'static str {
        match dialect {
            Dialect::Sqlite | Dialect::Mysql => "BIGINT UNSIGNED",
            Dialect::Postgres => "numeric",
            Dialect::Unsupported(_) => "",
        }
    }

    fn column_def(dialect: &Dialect, field: &FieldMeta) -> ColumnDef {
        let mut def = ColumnDef::new(field.column);

        match Self::physical_column_type(dialect, field) {
            "" => {
                log::debug!(
                    "dialect {dialect} has no {UINT64_NULL} column type, using big_unsigned"
                );
                def.big_unsigned();
            }
            physical => {
                def.custom(physical);
            }
        }

        if field.nullable {
            def.null();
        } else {
            def.not_null();
        }

        def
    }
}
