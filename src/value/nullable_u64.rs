//! `NullableU64` - an optional `u64` column value
//!
//! The type stores either a `u64` or nothing. An absent value never carries a
//! stale payload: setting it to `None` drops the previous number, so `Debug` and
//! `PartialEq` only ever see `None` for a NULL column.
//!
//! ## JSON
//!
//! Absent values serialize as `null`, present values as a numeric literal.
//!
//! ```rust
//! use lifeguard_nullable::NullableU64;
//!
//! let mut value = NullableU64::new(Some(u64::MAX));
//! assert_eq!(value.marshal_json().unwrap(), b"18446744073709551615");
//!
//! value.unmarshal_json(b"null").unwrap();
//! assert_eq!(value.get(), None);
//! ```

use crate::value::NullableError;
use sea_query::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Nullable unsigned 64-bit integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NullableU64 {
    value: Option<u64>,
}

impl NullableU64 {
    /// Create a value from an optional integer; `None` yields a NULL value.
    pub fn new(value: Option<u64>) -> Self {
        Self { value }
    }

    /// An absent (NULL) value
    pub const fn null() -> Self {
        Self { value: None }
    }

    /// Either `None` or the stored integer
    pub fn get(&self) -> Option<u64> {
        self.value
    }

    /// Borrow the stored integer, if any
    pub fn get_ref(&self) -> Option<&u64> {
        self.value.as_ref()
    }

    /// Replace the stored value. `None` makes the value NULL.
    pub fn set(&mut self, value: Option<u64>) {
        self.value = value;
    }

    /// Whether a number is present
    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }

    /// Consume the wrapper, returning the stored integer if any
    pub fn into_inner(self) -> Option<u64> {
        self.value
    }

    /// Serialize to JSON bytes: `null` or the decimal literal.
    ///
    /// # Errors
    ///
    /// Returns `NullableError::Decode` only if the JSON encoder itself fails,
    /// which does not happen for an integer or `null`.
    pub fn marshal_json(&self) -> Result<Vec<u8>, NullableError> {
        Ok(serde_json::to_vec(&self.get())?)
    }

    /// Decode JSON bytes into this value.
    ///
    /// Empty input and the literal `null` make the value NULL. Anything else
    /// must be an unsigned integer in `u64` range.
    ///
    /// # Errors
    ///
    /// Returns `NullableError::Decode` for malformed JSON, negative or fractional
    /// numbers, strings and out-of-range integers. The receiver should be
    /// discarded by the caller after an error.
    pub fn unmarshal_json(&mut self, data: &[u8]) -> Result<(), NullableError> {
        if data.is_empty() || data == b"null" {
            self.value = None;
            return Ok(());
        }

        let parsed: Option<u64> = serde_json::from_slice(data)?;
        self.value = parsed;
        Ok(())
    }
}

impl From<Option<u64>> for NullableU64 {
    fn from(value: Option<u64>) -> Self {
        Self::new(value)
    }
}

impl From<Option<&u64>> for NullableU64 {
    fn from(value: Option<&u64>) -> Self {
        Self::new(value.copied())
    }
}

impl From<u64> for NullableU64 {
    fn from(value: u64) -> Self {
        Self::new(Some(value))
    }
}

impl From<NullableU64> for Option<u64> {
    fn from(value: NullableU64) -> Self {
        value.value
    }
}

/// Binds as `Value::BigUnsigned`, the ORM's native `u64` variant.
impl From<NullableU64> for Value {
    fn from(value: NullableU64) -> Self {
        Value::BigUnsigned(value.value)
    }
}

impl fmt::Display for NullableU64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("NULL"),
        }
    }
}

impl Serialize for NullableU64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.get().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NullableU64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<u64>::deserialize(deserializer).map(Self::new)
    }
}
