//! Field coercions and validators for invoice submissions
//!
//! Coercions turn raw form text into the typed values the schema checks.
//! Validators are plugged into the `validator` derive on the schema.

use crate::core::invoice::{InvoiceStatus, to_cents};
use std::borrow::Cow;
use validator::ValidationError;

pub const CUSTOMER_MESSAGE: &str = "Please select a customer.";
pub const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";
pub const STATUS_MESSAGE: &str = "Please select a status.";

/// Filter: trim surrounding whitespace, missing becomes empty
pub fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// Coerce form text to a number the way numeric form coercion does
///
/// Missing or blank input becomes `0.0`, unparseable input becomes NaN.
pub fn coerce_number(value: Option<&str>) -> f64 {
    let Some(raw) = value else {
        return 0.0;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    raw.parse::<f64>().unwrap_or(f64::NAN)
}

/// Validator: amount must be a finite number above zero whose cent value fits
pub fn positive_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount > 0.0 && to_cents(amount).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("amount").with_message(Cow::Borrowed(AMOUNT_MESSAGE)))
    }
}

/// Validator: status must be exactly one of the known values
pub fn known_status(status: &str) -> Result<(), ValidationError> {
    status
        .parse::<InvoiceStatus>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("status").with_message(Cow::Borrowed(STATUS_MESSAGE)))
}
