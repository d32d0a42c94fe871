//! Validation of invoice submissions
//!
//! This module turns raw form fields into a typed [`InvoiceForm`] or a
//! structured set of per-field messages. It never fails hard on bad input.

pub mod extractor;
pub mod schema;
pub mod validators;

pub use extractor::InvoiceSubmission;
pub use schema::{InvoiceForm, InvoiceFormData, validate};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name to list of human-readable messages
///
/// Serializes as a plain JSON object, e.g.
/// `{"amount": ["Please enter an amount greater than $0."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding exactly one message
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Append a message for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the failing fields, sorted
    pub fn fields(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
