//! # Lifeguard Nullable
//!
//! Nullable `u64` column type for Lifeguard.
//!
//! [`NullableU64`] carries an optional unsigned 64-bit integer across four surfaces:
//!
//! - in-memory optional access (`Option<u64>`)
//! - JSON (`null` or a numeric literal), via `serde`
//! - generic driver values ([`DriverValue`]), text-encoded on the way out
//! - dialect-aware `sea_query::Value` bindings and DDL column types ([`DialectType`])
//!
//! ```rust
//! use lifeguard_nullable::{Dialect, DialectType, NullableU64};
//!
//! let id = NullableU64::new(Some(42));
//! assert_eq!(id.marshal_json().unwrap(), b"42");
//! assert_eq!(NullableU64::physical_column_type(&Dialect::Postgres, &Default::default()), "numeric");
//! ```

pub mod config;
pub mod dialect;
pub mod value;

pub use config::NullableConfig;
pub use dialect::Dialect;
pub use value::{
    convert_assign_text, BitStringPolicy, DialectType, DriverScanner, DriverValue, DriverValuer,
    FieldMeta, NullableError, NullableU64, ScanOptions,
};
