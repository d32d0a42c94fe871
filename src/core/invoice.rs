//! Invoice domain types and money conversion

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Settlement state of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known statuses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown invoice status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for InvoiceStatus {
    type Err = UnknownStatus;

    /// Exact match only: `"Paid"` or `" paid"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A persisted invoice row
///
/// `amount` is stored in minor units (cents). `id` and `date` are assigned
/// at insert time and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl Invoice {
    /// Amount rendered in major units, e.g. `1550` -> `"15.50"`
    pub fn formatted_amount(&self) -> String {
        format_cents(self.amount)
    }

    /// Case-insensitive substring match used by the invoice list search
    ///
    /// `needle` must already be lowercase. An empty needle matches everything.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.customer_id.to_lowercase().contains(needle)
            || self.status.as_str().contains(needle)
            || self.formatted_amount().contains(needle)
            || self.date.format("%Y-%m-%d").to_string().contains(needle)
    }
}

/// Row to insert; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Mutable columns of an existing row
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
}

/// Convert an amount in major units to minor units: `round(amount * 100)`
///
/// Returns `None` when the amount is not finite or the result does not fit
/// in an `i64`.
pub fn to_cents(amount: f64) -> Option<i64> {
    if !amount.is_finite() {
        return None;
    }
    let cents = (amount * 100.0).round();
    // i64::MAX is not exactly representable; stay strictly below 2^63
    if cents.is_finite() && cents.abs() < 9_223_372_036_854_775_808.0 {
        Some(cents as i64)
    } else {
        None
    }
}

/// Render minor units as a major-unit decimal string with two places
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
