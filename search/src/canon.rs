//! Canonical JSON writer for everything that gets hashed.
//!
//! Output rules:
//!
//! 1. Object keys in lexicographic byte order, whatever order the
//!    `serde_json::Map` iterates in (so `preserve_order` anywhere in the
//!    build cannot change a digest).
//! 2. Compact: no whitespace between tokens.
//! 3. Strings escaped per RFC 8259; non-ASCII passes through as UTF-8.
//! 4. Numbers must be integers (`i64` or `u64`). Floats are rejected.

use std::io::Write;

/// Failure to produce canonical bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A number had no exact integer form.
    NonIntegerNumber { raw: String },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonIntegerNumber { raw } => {
                write!(f, "canonical JSON only admits integers, got {raw}")
            }
        }
    }
}

impl std::error::Error for CanonError {}

/// Serialize `value` to canonical JSON bytes.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is a float.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut writer = CanonicalWriter { out: Vec::new() };
    writer.value(value)?;
    Ok(writer.out)
}

struct CanonicalWriter {
    out: Vec<u8>,
}

impl CanonicalWriter {
    fn value(&mut self, value: &serde_json::Value) -> Result<(), CanonError> {
        use serde_json::Value;
        match value {
            Value::Null => self.out.extend_from_slice(b"null"),
            Value::Bool(true) => self.out.extend_from_slice(b"true"),
            Value::Bool(false) => self.out.extend_from_slice(b"false"),
            Value::Number(n) => self.number(n)?,
            Value::String(s) => self.string(s),
            Value::Array(items) => {
                self.out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.push(b',');
                    }
                    self.value(item)?;
                }
                self.out.push(b']');
            }
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
                self.out.push(b'{');
                for (i, (key, item)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        self.out.push(b',');
                    }
                    self.string(key);
                    self.out.push(b':');
                    self.value(item)?;
                }
                self.out.push(b'}');
            }
        }
        Ok(())
    }

    fn number(&mut self, n: &serde_json::Number) -> Result<(), CanonError> {
        // Writing into a Vec cannot fail.
        if let Some(i) = n.as_i64() {
            let _ = write!(self.out, "{i}");
        } else if let Some(u) = n.as_u64() {
            let _ = write!(self.out, "{u}");
        } else {
            return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
        }
        Ok(())
    }

    fn string(&mut self, s: &str) {
        self.out.push(b'"');
        for ch in s.chars() {
            match ch {
                '"' => self.out.extend_from_slice(b"\\\""),
                '\\' => self.out.extend_from_slice(b"\\\\"),
                '\n' => self.out.extend_from_slice(b"\\n"),
                '\r' => self.out.extend_from_slice(b"\\r"),
                '\t' => self.out.extend_from_slice(b"\\t"),
                c if u32::from(c) < 0x20 => {
                    let _ = write!(self.out, "\\u{:04x}", u32::from(c));
                }
                c => {
                    let mut utf8 = [0u8; 4];
                    self.out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                }
            }
        }
        self.out.push(b'"');
    }
}
