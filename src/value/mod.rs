//! Value type system for nullable columns
//!
//! This module provides [`NullableU64`] and the codecs that move it between
//! Rust, JSON, database drivers and `sea_query::Value`.
//!
//! ## Traits
//!
//! - **`DriverScanner`** - Decode a generic [`DriverValue`] into a column type
//! - **`DriverValuer`** - Encode a column type as a generic [`DriverValue`]
//! - **`DialectType`** - Dialect-aware bindings, logical type tag and DDL column type

pub mod driver;
pub mod error;
pub mod nullable_u64;
pub mod schema;


pub use driver::{
    convert_assign_text, BitStringPolicy, DriverScanner, DriverValue, DriverValuer, ScanOptions,
};
pub use error::NullableError;
pub use nullable_u64::NullableU64;
pub use schema::{DialectType, FieldMeta};
