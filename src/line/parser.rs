//! Line format parser
//!
//! Splits one physical line into id and body, and composes the inverse.
//! Line numbers are carried through purely for error reporting.

use crate::error::{Result, StoreError};

/// Extract the record id from a line
///
/// The id must open the line as `[digits]`. A missing `[` means the line
/// carries no id at all; an unclosed bracket, an empty id, a non-digit
/// character or an overflowing value all count as corruption.
pub fn extract_id(line: &str, line_no: usize) -> Result<i64> {
    if !line.starts_with('[') {
        return Err(StoreError::MissedObjectId { line: line_no });
    }
    let closed_at = line
        .find(']')
        .ok_or(StoreError::CorruptedObjectId { line: line_no })?;

    let digits = &line[1..closed_at];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::CorruptedObjectId { line: line_no });
    }
    digits
        .parse::<i64>()
        .map_err(|_| StoreError::CorruptedObjectId { line: line_no })
}

/// Extract the record body from a line
///
/// The body is everything after the first `]`; empty or whitespace-only
/// bodies are rejected.
pub fn extract_body(line: &str, line_no: usize) -> Result<&str> {
    let closed_at = line
        .find(']')
        .ok_or(StoreError::CorruptedObjectId { line: line_no })?;

    let body = &line[closed_at + 1..];
    if body.trim().is_empty() {
        return Err(StoreError::MissedObjectData { line: line_no });
    }
    Ok(body)
}

/// Compose the physical line for an id and body
pub fn build_line(id: i64, body: &str) -> String {
    format!("[{}]{}", id, body)
}
