//! Shared test harness for invoice store backends
//!
//! Provides row builders and the `invoice_store_tests!` macro, which
//! generates the `InvoiceStore` contract suite for any backend.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//!
//! invoice_store_tests!(InMemoryInvoiceStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod store_tests;

use chrono::NaiveDate;
use dashboard::core::invoice::{InvoiceChanges, InvoiceStatus, NewInvoice};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A pending invoice for `customer` dated `date`
pub fn new_invoice(customer: &str, amount: i64, date: NaiveDate) -> NewInvoice {
    NewInvoice {
        customer_id: customer.to_string(),
        amount,
        status: InvoiceStatus::Pending,
        date,
    }
}

pub fn changes(customer: &str, amount: i64, status: InvoiceStatus) -> InvoiceChanges {
    InvoiceChanges {
        customer_id: customer.to_string(),
        amount,
        status,
    }
}
