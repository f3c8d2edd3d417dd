use std::{error::Error, fmt::Display};

use super::Record;

pub type MacResult<T> = Result<T, InvalidMacAddress>;

/// A value that does not decompose into 6, 3 or 1 hex groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMacAddress {
    value: String,
}

impl InvalidMacAddress {
    pub fn new(value: &str) -> Self {
        Self { value: value.to_owned() }
    }

    pub fn value(&self) -> &str {
        self.value.as_ref()
    }
}

impl Error for InvalidMacAddress {}

impl Display for InvalidMacAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid MAC address: {}", self.value)
    }
}

/// A configured field whose value is not a MAC address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    pub field: String,
    pub error: InvalidMacAddress,
}

impl InvalidField {
    pub fn new(field: &str, error: InvalidMacAddress) -> Self {
        Self { field: field.to_owned(), error }
    }
}

impl Error for InvalidField {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

impl Display for InvalidField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field {}: {}", self.field, self.error)
    }
}

/// A record that could not be rewritten. The record is handed back untouched
/// so the caller can decide to drop it, keep it or stop.
#[derive(Debug)]
pub struct TransformError {
    pub record: Record,
    pub field: String,
    pub error: InvalidMacAddress,
}

impl TransformError {
    pub fn new(record: Record, invalid: InvalidField) -> Self {
        Self { record, field: invalid.field, error: invalid.error }
    }
}

impl Error for TransformError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

impl Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field {}: {}", self.field, self.error)
    }
}
