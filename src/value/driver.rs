//! Driver codec for nullable values
//!
//! Database drivers hand columns over as loosely typed values. [`DriverValue`] is
//! that representation; [`DriverScanner`] decodes it into a column type and
//! [`DriverValuer`] encodes a column type back into it.
//!
//! `NullableU64` always writes decimal text, because the target columns are
//! text-compatible encodings. On the way in, any scalar driver value is first
//! coerced to text ([`convert_assign_text`]) and then parsed.
//!
//! ## Bit strings
//!
//! Some databases return 64-bit values as a fixed-width string of binary digits.
//! With [`BitStringPolicy::LengthHeuristic`] (the default) text that is exactly
//! 64 bytes long is parsed as base 2, and everything else as base 10. A genuine
//! 64-digit decimal numeral cannot be told apart from a bit string by length
//! alone; it would be misread. Use [`BitStringPolicy::DecimalOnly`] when the
//! driver never produces bit strings.

use crate::value::{NullableError, NullableU64};
use chrono::{DateTime, SecondsFormat, Utc};
use sea_query::Value;

/// Width of a bit-string encoded `u64`
pub const BIT_STRING_WIDTH: usize = 64;

/// Loosely typed value exchanged with a database driver
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    /// SQL NULL
    Null,
    /// Signed integer column
    Integer(i64),
    /// Floating-point column
    Real(f64),
    /// Text column
    Text(String),
    /// Raw bytes, expected to hold UTF-8 digits when scanned
    Bytes(Vec<u8>),
    /// Boolean column
    Boolean(bool),
    /// Timestamp column, normalised to UTC
    Time(DateTime<Utc>),
}

impl DriverValue {
    /// Whether this is the NULL sentinel
    pub fn is_null(&self) -> bool {
        matches!(self, DriverValue::Null)
    }
}

impl From<&str> for DriverValue {
    fn from(value: &str) -> Self {
        DriverValue::Text(value.to_string())
    }
}

impl From<String> for DriverValue {
    fn from(value: String) -> Self {
        DriverValue::Text(value)
    }
}

impl From<Vec<u8>> for DriverValue {
    fn from(value: Vec<u8>) -> Self {
        DriverValue::Bytes(value)
    }
}

impl From<i64> for DriverValue {
    fn from(value: i64) -> Self {
        DriverValue::Integer(value)
    }
}

impl From<f64> for DriverValue {
    fn from(value: f64) -> Self {
        DriverValue::Real(value)
    }
}

impl From<bool> for DriverValue {
    fn from(value: bool) -> Self {
        DriverValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for DriverValue {
    fn from(value: DateTime<Utc>) -> Self {
        DriverValue::Time(value)
    }
}

impl<T: Into<DriverValue>> From<Option<T>> for DriverValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DriverValue::Null, Into::into)
    }
}

/// Text binding of a driver value; NULL binds as a typed string NULL.
impl From<DriverValue> for Value {
    fn from(value: DriverValue) -> Self {
        match value {
            DriverValue::Null => Value::String(None),
            DriverValue::Integer(v) => Value::BigInt(Some(v)),
            DriverValue::Real(v) => Value::Double(Some(v)),
            DriverValue::Text(v) => Value::String(Some(v)),
            DriverValue::Bytes(v) => Value::Bytes(Some(v)),
            DriverValue::Boolean(v) => Value::Bool(Some(v)),
            DriverValue::Time(v) => Value::ChronoDateTimeUtc(Some(v.into())),
        }
    }
}

/// How text read from a driver is mapped to a radix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BitStringPolicy {
    /// Exactly 64 bytes of text is parsed as base 2, anything else as base 10
    #[default]
    LengthHeuristic,
    /// Always base 10
    DecimalOnly,
}

/// Options applied by [`DriverScanner::scan_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Radix selection for scanned text
    pub bit_strings: BitStringPolicy,
}

impl ScanOptions {
    /// Options that never switch to base 2
    pub fn decimal_only() -> Self {
        Self {
            bit_strings: BitStringPolicy::DecimalOnly,
        }
    }

    fn radix_for(&self, text: &str) -> u32 {
        match self.bit_strings {
            BitStringPolicy::LengthHeuristic if text.len() == BIT_STRING_WIDTH => 2,
            BitStringPolicy::LengthHeuristic | BitStringPolicy::DecimalOnly => 10,
        }
    }
}

/// Decode a driver value into a column type
pub trait DriverScanner {
    /// Scan with the default [`ScanOptions`].
    ///
    /// # Errors
    ///
    /// Returns `NullableError::Conversion` if the value cannot be decoded.
    fn scan(&mut self, raw: DriverValue) -> Result<(), NullableError> {
        self.scan_with(raw, &ScanOptions::default())
    }

    /// Scan with explicit options.
    ///
    /// # Errors
    ///
    /// Returns `NullableError::Conversion` if the value cannot be decoded.
    fn scan_with(&mut self, raw: DriverValue, options: &ScanOptions) -> Result<(), NullableError>;
}

/// Encode a column type as a driver value
pub trait DriverValuer {
    /// # Errors
    ///
    /// Implementations return an error if the value has no driver representation.
    fn value(&self) -> Result<DriverValue, NullableError>;
}

/// Coerce a non-NULL driver value to its text form.
///
/// - `Text` is returned as-is
/// - `Bytes` must be valid UTF-8
/// - `Integer` and `Real` use their shortest decimal form; a `Real` is never
///   written in exponent notation, so whole floats such as `1e6` scan as
///   `1000000` (Go's `convertAssign` would produce `1e+06` and reject it)
/// - `Boolean` becomes `true` / `false`
/// - `Time` is written as RFC 3339 in UTC
///
/// # Errors
///
/// Returns `NullableError::Conversion` for `Null` and for non-UTF-8 bytes.
pub fn convert_assign_text(raw: DriverValue) -> Result<String, NullableError> {
    match raw {
        DriverValue::Null => Err(NullableError::Conversion(
            "converting NULL to string is unsupported".to_string(),
        )),
        DriverValue::Text(s) => Ok(s),
        DriverValue::Bytes(bytes) => String::from_utf8(bytes).map_err(|e| {
            NullableError::Conversion(format!("driver bytes are not valid UTF-8: {e}"))
        }),
        DriverValue::Integer(v) => Ok(v.to_string()),
        DriverValue::Real(v) => Ok(v.to_string()),
        DriverValue::Boolean(v) => Ok(v.to_string()),
        DriverValue::Time(t) => Ok(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
    }
}

/// Parse unsigned digits in the given radix. Signs are not accepted.
fn parse_unsigned(text: &str, radix: u32) -> Result<u64, NullableError> {
    if text.starts_with('+') {
        return Err(NullableError::Conversion(format!(
            "parsing {text:?}: invalid syntax"
        )));
    }
    u64::from_str_radix(text, radix)
        .map_err(|e| NullableError::Conversion(format!("parsing {text:?} (base {radix}): {e}")))
}

impl DriverScanner for NullableU64 {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self), err))]
    fn scan_with(&mut self, raw: DriverValue, options: &ScanOptions) -> Result<(), NullableError> {
        if raw.is_null() {
            self.set(None);
            return Ok(());
        }

        let scanned = convert_assign_text(raw)?;
        log::trace!("scanning nullable u64 from text {scanned:?}");

        let radix = options.radix_for(&scanned);
        if radix == 2 {
            log::debug!("treating {BIT_STRING_WIDTH}-byte driver text as a bit string");
        }

        let parsed = parse_unsigned(&scanned, radix)?;
        self.set(Some(parsed));
        Ok(())
    }
}

impl DriverValuer for NullableU64 {
    fn value(&self) -> Result<DriverValue, NullableError> {
        Ok(match self.get() {
            Some(v) => DriverValue::Text(v.to_string()),
            None => DriverValue::Null,
        })
    }
}

/// Decode a `sea_query::Value` read back from the ORM.
///
/// Unsigned integers are taken directly; every other supported variant goes
/// through the driver scan path, so strings and bit strings behave exactly as
/// they do for raw driver values.
impl TryFrom<Value> for NullableU64 {
    type Error = NullableError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let raw: DriverValue = match value {
            Value::TinyUnsigned(v) => return Ok(Self::new(v.map(u64::from))),
            Value::SmallUnsigned(v) => return Ok(Self::new(v.map(u64::from))),
            Value::Unsigned(v) => return Ok(Self::new(v.map(u64::from))),
            Value::BigUnsigned(v) => return Ok(Self::new(v)),
            Value::Bool(v) => v.into(),
            Value::TinyInt(v) => v.map(i64::from).into(),
            Value::SmallInt(v) => v.map(i64::from).into(),
            Value::Int(v) => v.map(i64::from).into(),
            Value::BigInt(v) => v.into(),
            Value::Float(v) => v.map(f64::from).into(),
            Value::Double(v) => v.into(),
            Value::String(v) => v.into(),
            Value::Char(v) => v.map(|c| c.to_string()).into(),
            Value::Bytes(v) => v.into(),
            Value::ChronoDateTimeUtc(v) => v.map(|t| DateTime::<Utc>::clone(&t)).into(),
            other => {
                return Err(NullableError::Conversion(format!(
                    "unsupported value for nullable u64: {other:?}"
                )))
            }
        };

        let mut nullable = Self::null();
        nullable.scan(raw)?;
        Ok(nullable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scanned(raw: impl Into<DriverValue>) -> Result<NullableU64, NullableError> {
        let mut value = NullableU64::new(Some(999));
        value.scan(raw.into())?;
        Ok(value)
    }

    // Scan

    #[test]
    fn test_scan_null_invalidates() {
        let value = scanned(DriverValue::Null).unwrap();
        assert_eq!(value, NullableU64::null());
        assert_eq!(value.value(), Ok(DriverValue::Null));
    }

    #[test]
    fn test_scan_decimal_text() {
        assert_eq!(scanned("42").unwrap().get(), Some(42));
        assert_eq!(scanned("18446744073709551615").unwrap().get(), Some(u64::MAX));
    }

    #[test]
    fn test_scan_bit_string() {
        let all_ones = "1".repeat(64);
        assert_eq!(scanned(all_ones.as_str()).unwrap().get(), Some(u64::MAX));

        let one = format!("{}1", "0".repeat(63));
        assert_eq!(scanned(one).unwrap().get(), Some(1));
    }

    #[test]
    fn test_scan_bit_string_rejects_non_binary_digits() {
        let digits = "2".repeat(64);
        assert!(matches!(scanned(digits), Err(NullableError::Conversion(_))));
    }

    #[test]
    fn test_scan_decimal_only_policy() {
        let zeros = "0".repeat(64);
        let mut value = NullableU64::null();
        value.scan_with(DriverValue::Text(zeros), &ScanOptions::decimal_only()).unwrap();
        assert_eq!(value.get(), Some(0));

        let ones = "1".repeat(64);
        let result = value.scan_with(DriverValue::Text(ones), &ScanOptions::decimal_only());
        assert!(matches!(result, Err(NullableError::Conversion(_))));
    }

    #[test]
    fn test_scan_bytes() {
        assert_eq!(scanned(b"1234".to_vec()).unwrap().get(), Some(1234));
        assert!(matches!(scanned(vec![0xffu8, 0xfe]), Err(NullableError::Conversion(_))));
    }

    #[test]
    fn test_scan_integer_kinds() {
        assert_eq!(scanned(7i64).unwrap().get(), Some(7));
        assert!(matches!(scanned(-7i64), Err(NullableError::Conversion(_))));
    }

    #[test]
    fn test_scan_real() {
        assert_eq!(scanned(42.0f64).unwrap().get(), Some(42));
        assert!(matches!(scanned(1.5f64), Err(NullableError::Conversion(_))));
    }

    #[test]
    fn test_scan_bool_and_time_fail_to_parse() {
        assert!(matches!(scanned(true), Err(NullableError::Conversion(_))));
        let t = Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap();
        assert!(matches!(scanned(t), Err(NullableError::Conversion(_))));
    }

    #[test]
    fn test_scan_rejects_sign_and_garbage() {
        for text in ["+42", "-1", "", "4 2", "0x10", "18446744073709551616"] {
            assert!(
                matches!(scanned(text), Err(NullableError::Conversion(_))),
                "{text:?} should not scan"
            );
        }
    }

    #[test]
    fn test_scan_error_keeps_previous_value() {
        let mut value = NullableU64::new(Some(5));
        let result = value.scan(DriverValue::Text("abc".to_string()));
        assert!(matches!(result, Err(NullableError::Conversion(_))));
        assert_eq!(value.get(), Some(5));

        let result = value.scan(DriverValue::Bytes(vec![0xff]));
        assert!(matches!(result, Err(NullableError::Conversion(_))));
        assert_eq!(value.get(), Some(5));
    }

    #[test]
    fn test_scan_large_real_is_accepted() {
        assert_eq!(scanned(1e6f64).unwrap().get(), Some(1_000_000));
    }

    #[test]
    fn test_scan_option_conversion() {
        assert_eq!(scanned(None::<String>).unwrap(), NullableU64::null());
        assert_eq!(scanned(Some("5")).unwrap().get(), Some(5));
    }

    // Value

    #[test]
    fn test_value_is_decimal_text() {
        let value = NullableU64::new(Some(u64::MAX));
        assert_eq!(
            value.value(),
            Ok(DriverValue::Text("18446744073709551615".to_string()))
        );
    }

    // Text coercion

    #[test]
    fn test_convert_assign_text() {
        assert_eq!(convert_assign_text("abc".into()).unwrap(), "abc");
        assert_eq!(convert_assign_text(12i64.into()).unwrap(), "12");
        assert_eq!(convert_assign_text(2.5f64.into()).unwrap(), "2.5");
        assert_eq!(convert_assign_text(false.into()).unwrap(), "false");
        let t = Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap();
        assert_eq!(convert_assign_text(t.into()).unwrap(), "2024-01-20T12:00:00Z");
        assert!(convert_assign_text(DriverValue::Null).is_err());
    }

    // sea_query::Value

    #[test]
    fn test_try_from_sea_query_unsigned() {
        assert_eq!(
            NullableU64::try_from(Value::BigUnsigned(Some(u64::MAX))),
            Ok(NullableU64::new(Some(u64::MAX)))
        );
        assert_eq!(
            NullableU64::try_from(Value::Unsigned(Some(5))),
            Ok(NullableU64::new(Some(5)))
        );
        assert_eq!(NullableU64::try_from(Value::BigUnsigned(None)), Ok(NullableU64::null()));
    }

    #[test]
    fn test_try_from_sea_query_text_and_nulls() {
        assert_eq!(
            NullableU64::try_from(Value::String(Some("123".to_string()))),
            Ok(NullableU64::new(Some(123)))
        );
        assert_eq!(NullableU64::try_from(Value::String(None)), Ok(NullableU64::null()));
        assert_eq!(NullableU64::try_from(Value::Int(None)), Ok(NullableU64::null()));
    }

    #[test]
    fn test_try_from_sea_query_signed() {
        assert_eq!(
            NullableU64::try_from(Value::BigInt(Some(10))),
            Ok(NullableU64::new(Some(10)))
        );
        assert!(matches!(
            NullableU64::try_from(Value::Int(Some(-1))),
            Err(NullableError::Conversion(_))
        ));
    }

    #[test]
    fn test_driver_value_into_sea_query() {
        assert_eq!(Value::from(DriverValue::Null), Value::String(None));
        assert_eq!(
            Value::from(DriverValue::Text("1".to_string())),
            Value::String(Some("1".to_string()))
        );
    }
}
