//! Invoice submission schema
//!
//! Raw form fields go through [`validate`], which either produces a typed
//! [`InvoiceForm`] or a [`FieldErrors`] map. Malformed input is an expected
//! outcome here, never a panic.

use super::FieldErrors;
use super::validators::{
    AMOUNT_MESSAGE, STATUS_MESSAGE, coerce_number, known_status, positive_amount, trimmed,
};
use crate::core::invoice::{InvoiceChanges, InvoiceStatus, NewInvoice, to_cents};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Raw invoice fields as submitted by a form
///
/// Every field is optional: a missing field is a validation failure, not a
/// decoding failure. `id` and `date` are never accepted from the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceFormData {
    #[serde(rename = "customerId", default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl InvoiceFormData {
    pub fn new(
        customer_id: impl Into<String>,
        amount: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            amount: Some(amount.into()),
            status: Some(status.into()),
        }
    }

    /// Decode an `application/x-www-form-urlencoded` body
    ///
    /// The first occurrence of a key wins; unknown keys are ignored.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in form_urlencoded::parse(body) {
            let slot = match key.as_ref() {
                "customerId" => &mut form.customer_id,
                "amount" => &mut form.amount,
                "status" => &mut form.status,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        form
    }
}

/// Coerced values checked by the `validator` derive
#[derive(Debug, Validate)]
struct InvoiceSchema {
    #[validate(length(min = 1, message = "Please select a customer."))]
    customer_id: String,
    #[validate(custom(function = "positive_amount"))]
    amount: f64,
    #[validate(custom(function = "known_status"))]
    status: String,
}

impl InvoiceSchema {
    fn coerce(raw: &InvoiceFormData) -> Self {
        Self {
            customer_id: trimmed(raw.customer_id.as_deref()),
            amount: coerce_number(raw.amount.as_deref()),
            status: raw.status.clone().unwrap_or_default(),
        }
    }
}

/// A validated invoice submission
///
/// Both the create and the update shape carry the same three fields; they
/// differ only in what they are turned into.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceForm {
    pub customer_id: String,
    /// Amount in major units as entered
    pub amount: f64,
    /// `round(amount * 100)`
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

impl InvoiceForm {
    /// Creation shape: the caller supplies the insert date
    pub fn into_new_invoice(self, date: NaiveDate) -> NewInvoice {
        NewInvoice {
            customer_id: self.customer_id,
            amount: self.amount_in_cents,
            status: self.status,
            date,
        }
    }

    /// Update shape: only the mutable columns
    pub fn into_changes(self) -> InvoiceChanges {
        InvoiceChanges {
            customer_id: self.customer_id,
            amount: self.amount_in_cents,
            status: self.status,
        }
    }
}

fn wire_name(field: &str) -> &str {
    match field {
        "customer_id" => "customerId",
        other => other,
    }
}

/// Validate raw form fields
pub fn validate(raw: &InvoiceFormData) -> Result<InvoiceForm, FieldErrors> {
    let schema = InvoiceSchema::coerce(raw);

    if let Err(report) = schema.validate() {
        let mut errors = FieldErrors::new();
        for (field, failures) in report.field_errors() {
            for failure in failures.iter() {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| failure.code.to_string());
                errors.add(wire_name(field.as_ref()), message);
            }
        }
        return Err(errors);
    }

    let status = schema
        .status
        .parse::<InvoiceStatus>()
        .map_err(|_| FieldErrors::single("status", STATUS_MESSAGE))?;
    let amount_in_cents =
        to_cents(schema.amount).ok_or_else(|| FieldErrors::single("amount", AMOUNT_MESSAGE))?;

    Ok(InvoiceForm {
        customer_id: schema.customer_id,
        amount: schema.amount,
        amount_in_cents,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::super::validators::CUSTOMER_MESSAGE;
    use super::*;

    #[test]
    fn test_valid_submission() {
        let form = validate(&InvoiceFormData::new("cust-1", "15.50", "pending")).unwrap();
        assert_eq!(form.customer_id, "cust-1");
        assert_eq!(form.amount, 15.5);
        assert_eq!(form.amount_in_cents, 1550);
        assert_eq!(form.status, InvoiceStatus::Pending);
    }

    #[test]
    fn test_amount_in_cents_is_rounded() {
        let form = validate(&InvoiceFormData::new("cust-1", "19.99", "paid")).unwrap();
        assert_eq!(form.amount_in_cents, 1999);
    }

    #[test]
    fn test_empty_submission_reports_every_field() {
        let errors = validate(&InvoiceFormData::default()).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("customerId"), Some(&[CUSTOMER_MESSAGE.to_string()][..]));
        assert_eq!(errors.get("amount"), Some(&[AMOUNT_MESSAGE.to_string()][..]));
        assert_eq!(errors.get("status"), Some(&[STATUS_MESSAGE.to_string()][..]));
    }

    #[test]
    fn test_customer_rule_message_matches_constant() {
        let schema = InvoiceSchema {
            customer_id: String::new(),
            amount: 1.0,
            status: "paid".to_string(),
        };
        let report = schema.validate().unwrap_err();
        let errors = report.field_errors();
        let failures = errors["customer_id"];

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].message.as_deref(), Some(CUSTOMER_MESSAGE));
    }

    #[test]
    fn test_blank_customer_rejected() {
        let errors = validate(&InvoiceFormData::new("   ", "10", "paid")).unwrap_err();
        assert_eq!(errors.fields(), vec!["customerId"]);
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        for amount in ["0", "-5", "", "abc", "NaN", "inf"] {
            let errors = validate(&InvoiceFormData::new("cust-1", amount, "paid")).unwrap_err();
            assert_eq!(errors.fields(), vec!["amount"], "amount {:?}", amount);
        }
    }

    #[test]
    fn test_status_outside_enum_rejected() {
        for status in ["", "PAID", "overdue", " pending"] {
            let errors = validate(&InvoiceFormData::new("cust-1", "10", status)).unwrap_err();
            assert_eq!(errors.fields(), vec!["status"], "status {:?}", status);
        }
    }

    #[test]
    fn test_from_urlencoded_first_value_wins() {
        let form = InvoiceFormData::from_urlencoded(
            b"customerId=c%201&amount=12.5&status=paid&status=pending&extra=x",
        );
        assert_eq!(form.customer_id.as_deref(), Some("c 1"));
        assert_eq!(form.amount.as_deref(), Some("12.5"));
        assert_eq!(form.status.as_deref(), Some("paid"));
    }

    #[test]
    fn test_from_urlencoded_missing_fields_stay_none() {
        let form = InvoiceFormData::from_urlencoded(b"amount=3");
        assert_eq!(form.customer_id, None);
        assert_eq!(form.status, None);
    }

    #[test]
    fn test_shapes_carry_cents() {
        let form = validate(&InvoiceFormData::new("cust-9", "2", "paid")).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let new_invoice = form.clone().into_new_invoice(date);
        assert_eq!(new_invoice.amount, 200);
        assert_eq!(new_invoice.date, date);

        let changes = form.into_changes();
        assert_eq!(changes.customer_id, "cust-9");
        assert_eq!(changes.status, InvoiceStatus::Paid);
    }
}
