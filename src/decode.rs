//! Strict decoding of the platform's loosely-typed JSON object model.
//!
//! Every decodable kind declares its full set of recognized keys as an
//! [`ObjectShape`]; opening a JSON value against a shape yields a
//! [`FieldReader`] with typed accessors. In strict mode any key outside the
//! declared set fails the decode, so schema drift on the server is surfaced
//! instead of silently dropping data.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{Result, VropsError};

pub(crate) type JsonMap = Map<String, Value>;

/// How keys outside a declared schema are treated during decode.
///
/// Strict mode is the default and matches the platform contract: the full
/// key set of every kind is known, so an unrecognized key means the server
/// schema has drifted. Lenient mode skips unknown keys; declared keys are
/// still type-checked and required keys are still enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Reject any key outside the declared schema.
    #[default]
    Strict,
    /// Skip keys outside the declared schema.
    Lenient,
}

impl DecodeMode {
    pub(crate) fn rejects_unknown_keys(self) -> bool {
        matches!(self, DecodeMode::Strict)
    }
}

/// Declared key set for one decodable kind.
///
/// Required keys must be present; optional keys may be absent. Together they
/// are the exhaustive set of recognized keys for the kind.
pub(crate) struct ObjectShape {
    kind: &'static str,
    required: &'static [&'static str],
    optional: &'static [&'static str],
}

impl ObjectShape {
    pub(crate) const fn new(
        kind: &'static str,
        required: &'static [&'static str],
        optional: &'static [&'static str],
    ) -> Self {
        Self {
            kind,
            required,
            optional,
        }
    }

    fn recognizes(&self, key: &str) -> bool {
        self.required.contains(&key) || self.optional.contains(&key)
    }

    /// Open `value` as an object of this shape.
    ///
    /// Fails with `MalformedInput` when `value` is not an object, with
    /// `UnsupportedField` on the first undeclared key (strict mode only),
    /// and with `MissingField` when a required key is absent. Unknown keys
    /// are checked before required ones.
    pub(crate) fn open<'v>(&self, value: &'v Value, mode: DecodeMode) -> Result<FieldReader<'v>> {
        let map = value
            .as_object()
            .ok_or(VropsError::MalformedInput { kind: self.kind })?;

        if mode.rejects_unknown_keys() {
            for key in map.keys() {
                if !self.recognizes(key) {
                    return Err(VropsError::UnsupportedField {
                        kind: self.kind,
                        key: key.clone(),
                    });
                }
            }
        }

        for &key in self.required {
            if !map.contains_key(key) {
                return Err(VropsError::MissingField {
                    kind: self.kind,
                    key,
                });
            }
        }

        Ok(FieldReader {
            kind: self.kind,
            map,
        })
    }
}

/// Typed access to the fields of one opened object.
///
/// Getters return `Ok(None)` for absent keys and `TypeMismatch` for keys
/// holding a value of the wrong JSON type.
#[derive(Debug)]
pub(crate) struct FieldReader<'v> {
    kind: &'static str,
    map: &'v JsonMap,
}

impl<'v> FieldReader<'v> {
    fn mismatch(&self, key: &'static str, expected: &'static str) -> VropsError {
        VropsError::TypeMismatch {
            kind: self.kind,
            key,
            expected,
        }
    }

    /// The raw value of `key`, if present.
    pub(crate) fn raw(&self, key: &str) -> Option<&'v Value> {
        self.map.get(key)
    }

    /// The raw value of a key the shape declares as required.
    pub(crate) fn required(&self, key: &'static str) -> Result<&'v Value> {
        self.map.get(key).ok_or(VropsError::MissingField {
            kind: self.kind,
            key,
        })
    }

    pub(crate) fn string(&self, key: &'static str) -> Result<Option<String>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.mismatch(key, "string")),
        }
    }

    pub(crate) fn number(&self, key: &'static str) -> Result<Option<f64>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.mismatch(key, "number")),
        }
    }

    pub(crate) fn boolean(&self, key: &'static str) -> Result<Option<bool>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(self.mismatch(key, "boolean")),
        }
    }

    /// A millisecond-since-epoch timestamp field.
    pub(crate) fn timestamp_ms(&self, key: &'static str) -> Result<Option<DateTime<Utc>>> {
        match self.number(key)? {
            None => Ok(None),
            Some(ms) => datetime_from_epoch_ms(ms)
                .map(Some)
                .ok_or_else(|| self.mismatch(key, "millisecond timestamp")),
        }
    }

    /// An array field; absent decodes as the empty slice.
    pub(crate) fn array(&self, key: &'static str) -> Result<&'v [Value]> {
        match self.map.get(key) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(self.mismatch(key, "array")),
        }
    }
}

/// Convert the platform's millisecond-since-epoch float to a UTC timestamp.
///
/// `seconds = floor(ms / 1000)`; the fractional remainder of the same
/// division becomes nanoseconds, rounded. Returns `None` for values outside
/// the representable range.
pub(crate) fn datetime_from_epoch_ms(ms: f64) -> Option<DateTime<Utc>> {
    let seconds = (ms / 1000.0).floor();
    let mut secs = seconds as i64;
    let mut nanos = ((ms / 1000.0 - seconds) * 1e9).round() as u32;
    if nanos >= 1_000_000_000 {
        secs += 1;
        nanos -= 1_000_000_000;
    }
    DateTime::from_timestamp(secs, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static SHAPE: ObjectShape =
        ObjectShape::new("Sample", &["name"], &["score", "active", "seen", "tags"]);

    #[test]
    fn test_typed_fields_recovered() {
        let value = json!({
            "name": "vm-1",
            "score": 99.5,
            "active": true,
            "seen": 1_600_000_000_000.0_f64,
            "tags": ["a", "b"]
        });
        let obj = SHAPE.open(&value, DecodeMode::Strict).unwrap();

        assert_eq!(obj.string("name").unwrap().as_deref(), Some("vm-1"));
        assert_eq!(obj.number("score").unwrap(), Some(99.5));
        assert_eq!(obj.boolean("active").unwrap(), Some(true));
        assert_eq!(obj.array("tags").unwrap().len(), 2);

        let seen = obj.timestamp_ms("seen").unwrap().unwrap();
        assert_eq!(seen.timestamp(), 1_600_000_000);
        assert_eq!(seen.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_fractional_millisecond_timestamp() {
        let ts = datetime_from_epoch_ms(1_600_000_000_250.0).unwrap();
        assert_eq!(ts.timestamp(), 1_600_000_000);
        assert_eq!(ts.timestamp_subsec_nanos(), 250_000_000);
    }

    #[test]
    fn test_absent_fields_are_none() {
        let value = json!({"name": "vm-1"});
        let obj = SHAPE.open(&value, DecodeMode::Strict).unwrap();

        assert_eq!(obj.string("score").unwrap(), None);
        assert_eq!(obj.boolean("active").unwrap(), None);
        assert_eq!(obj.timestamp_ms("seen").unwrap(), None);
        assert!(obj.array("tags").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_key_rejected_in_strict_mode() {
        let value = json!({"name": "vm-1", "bogus": 1});
        let err = SHAPE.open(&value, DecodeMode::Strict).unwrap_err();
        match err {
            VropsError::UnsupportedField { kind, key } => {
                assert_eq!(kind, "Sample");
                assert_eq!(key, "bogus");
            }
            other => panic!("expected UnsupportedField, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_key_skipped_in_lenient_mode() {
        let value = json!({"name": "vm-1", "bogus": 1});
        let obj = SHAPE.open(&value, DecodeMode::Lenient).unwrap();
        assert_eq!(obj.string("name").unwrap().as_deref(), Some("vm-1"));
    }

    #[test]
    fn test_required_key_enforced_in_both_modes() {
        let value = json!({"score": 1.0});
        for mode in [DecodeMode::Strict, DecodeMode::Lenient] {
            let err = SHAPE.open(&value, mode).unwrap_err();
            assert!(matches!(
                err,
                VropsError::MissingField {
                    kind: "Sample",
                    key: "name"
                }
            ));
        }
    }

    #[test]
    fn test_non_object_input_is_malformed() {
        for value in [json!([1, 2]), json!("text"), json!(42), Value::Null] {
            let err = SHAPE.open(&value, DecodeMode::Strict).unwrap_err();
            assert!(matches!(err, VropsError::MalformedInput { kind: "Sample" }));
        }
    }

    #[test]
    fn test_type_mismatch_names_key_and_expectation() {
        let value = json!({"name": 42});
        let obj_err = SHAPE
            .open(&value, DecodeMode::Strict)
            .unwrap()
            .string("name")
            .unwrap_err();
        match obj_err {
            VropsError::TypeMismatch {
                kind,
                key,
                expected,
            } => {
                assert_eq!(kind, "Sample");
                assert_eq!(key, "name");
                assert_eq!(expected, "string");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }
}
