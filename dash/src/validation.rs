// Rust Dash Library
// Written for Dash in 2022 by
//     The Dash Core Developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! Field validation.
//!
//! Predicates for the field shapes payloads are built from, assertions that turn a failed
//! predicate into [`Error::InvalidArgument`], and [`JsonRecord`], a field-named reader over
//! the JSON form of a payload.

use serde_json::{Map, Value};

use crate::Error;

/// Size of a compact recoverable ECDSA signature.
pub const COMPACT_SIGNATURE_SIZE: usize = 65;

/// Parses a hex field into a fixed-size type, naming the field in errors.
pub trait FromHexField: Sized {
    /// Parses `s`, which is expected to be the display-order hex of the value.
    fn from_hex_field(field: &'static str, s: &str) -> Result<Self, Error>;
}

/// Whether `value` is a JSON integer that is not negative.
pub fn is_unsigned_integer(value: &Value) -> bool { value.as_u64().is_some() }

/// Whether `s` is an even-length string of lowercase hex digits.
pub fn is_hex_string(s: &str) -> bool {
    s.len() % 2 == 0 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Whether `s` is the hex form of a 32-byte hash.
pub fn is_sha256_hex_string(s: &str) -> bool { s.len() == 64 && is_hex_string(s) }

/// Whether `buffer` is exactly `len` bytes long.
pub fn is_buffer_of_length(buffer: &[u8], len: usize) -> bool { buffer.len() == len }

/// Fails unless `s` is a hex string.
pub fn expect_hex_string(field: &'static str, s: &str) -> Result<(), Error> {
    if is_hex_string(s) {
        Ok(())
    } else {
        Err(Error::invalid_argument(field, "a lowercase hex string", format!("{:?}", s)))
    }
}

/// Fails unless `s` is the hex form of exactly `len` bytes.
pub fn expect_hex_string_of_length(field: &'static str, s: &str, len: usize) -> Result<(), Error> {
    expect_hex_string(field, s)?;
    if s.len() == len * 2 {
        Ok(())
    } else {
        Err(Error::invalid_argument(
            field,
            format!("{} hex characters", len * 2),
            format!("{} characters", s.len()),
        ))
    }
}

/// Fails unless `s` is the hex form of a 32-byte hash.
pub fn expect_sha256_hex_string(field: &'static str, s: &str) -> Result<(), Error> {
    if is_sha256_hex_string(s) {
        return Ok(());
    }
    expect_hex_string_of_length(field, s, 32)
}

/// Fails unless `s` is the hex form of a 20-byte key identifier.
pub fn expect_key_id_hex_string(field: &'static str, s: &str) -> Result<(), Error> {
    expect_hex_string_of_length(field, s, 20)
}

/// Fails unless `buffer` is exactly `len` bytes long.
pub fn expect_buffer_of_length(field: &'static str, buffer: &[u8], len: usize) -> Result<(), Error> {
    if is_buffer_of_length(buffer, len) {
        Ok(())
    } else {
        Err(Error::invalid_argument(
            field,
            format!("{} bytes", len),
            format!("{} bytes", buffer.len()),
        ))
    }
}

/// Fails unless `signature` is empty (unsigned) or a full compact signature.
pub fn expect_compact_signature(field: &'static str, signature: &[u8]) -> Result<(), Error> {
    if signature.is_empty() {
        return Ok(());
    }
    expect_buffer_of_length(field, signature, COMPACT_SIGNATURE_SIZE)
}

/// Fails if `value` exceeds `max`.
pub fn expect_at_most(field: &'static str, value: u64, max: u64) -> Result<(), Error> {
    if value <= max {
        Ok(())
    } else {
        Err(Error::invalid_argument(field, format!("at most {}", max), value.to_string()))
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

/// Field-named access to the JSON form of a payload.
#[derive(Clone, Copy, Debug)]
pub struct JsonRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> JsonRecord<'a> {
    /// Wraps a JSON object.
    pub fn new(value: &'a Value) -> Result<Self, Error> {
        match value {
            Value::Object(fields) => Ok(JsonRecord {
                fields,
            }),
            other => Err(Error::invalid_argument("payload", "a JSON object", describe(other))),
        }
    }

    /// The raw value of `field`, if present and not null.
    pub fn optional(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    fn required(&self, field: &'static str) -> Result<&'a Value, Error> {
        self.optional(field).ok_or_else(|| Error::invalid_argument(field, "a value", "nothing"))
    }

    /// An unsigned integer.
    pub fn u64(&self, field: &'static str) -> Result<u64, Error> {
        let value = self.required(field)?;
        if !is_unsigned_integer(value) {
            return Err(Error::invalid_argument(field, "an unsigned integer", describe(value)));
        }
        value.as_u64().ok_or_else(|| Error::invalid_argument(field, "an unsigned integer", describe(value)))
    }

    /// An unsigned integer that fits in 32 bits.
    pub fn u32(&self, field: &'static str) -> Result<u32, Error> {
        let value = self.u64(field)?;
        u32::try_from(value).map_err(|_| {
            Error::invalid_argument(field, "an unsigned 32-bit integer", value.to_string())
        })
    }

    /// An unsigned integer that fits in 16 bits.
    pub fn u16(&self, field: &'static str) -> Result<u16, Error> {
        let value = self.u64(field)?;
        u16::try_from(value).map_err(|_| {
            Error::invalid_argument(field, "an unsigned 16-bit integer", value.to_string())
        })
    }

    /// An unsigned integer that fits in 8 bits.
    pub fn u8(&self, field: &'static str) -> Result<u8, Error> {
        let value = self.u64(field)?;
        u8::try_from(value)
            .map_err(|_| Error::invalid_argument(field, "an unsigned 8-bit integer", value.to_string()))
    }

    /// A string.
    pub fn string(&self, field: &'static str) -> Result<&'a str, Error> {
        let value = self.required(field)?;
        value.as_str().ok_or_else(|| Error::invalid_argument(field, "a string", describe(value)))
    }

    /// Arbitrary-length bytes given as hex.
    pub fn hex_bytes(&self, field: &'static str) -> Result<Vec<u8>, Error> {
        let s = self.string(field)?;
        expect_hex_string(field, s)?;
        hex::decode(s).map_err(|e| Error::invalid_argument(field, "a hex string", e.to_string()))
    }

    /// A fixed-size hash, key identifier or byte string given as display-order hex.
    pub fn parse<T: FromHexField>(&self, field: &'static str) -> Result<T, Error> {
        T::from_hex_field(field, self.string(field)?)
    }

    /// A compact signature; a missing, null or empty field reads as unsigned.
    pub fn signature(&self, field: &'static str) -> Result<Vec<u8>, Error> {
        if self.optional(field).is_none() {
            return Ok(Vec::new());
        }
        let signature = self.hex_bytes(field)?;
        expect_compact_signature(field, &signature)?;
        Ok(signature)
    }
}
