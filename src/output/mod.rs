//! Output rendering
//!
//! Results are written as pretty-printed JSON (two-space indentation) so they
//! can be read by a human and parsed back by a machine.

use crate::DemoError;
use serde::Serialize;
use std::io::Write;

/// Serializes `value` as indented JSON
pub fn to_pretty_json<T: Serialize>(value: &T, what: &'static str) -> Result<String, DemoError> {
    serde_json::to_string_pretty(value).map_err(|source| DemoError::Json { what, source })
}

/// Writes `value` as indented JSON followed by a newline
pub fn write_json<W, T>(out: &mut W, value: &T, what: &'static str) -> Result<(), DemoError>
where
    W: Write,
    T: Serialize,
{
    let json = to_pretty_json(value, what)?;
    writeln!(out, "{}", json)?;
    Ok(())
}
