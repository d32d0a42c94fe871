//! Core module containing the invoice domain, its validation and storage seam

pub mod clock;
pub mod error;
pub mod invoice;
pub mod query;
pub mod service;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, DashboardError, DashboardResult, StorageError};
pub use invoice::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};
pub use query::{PaginatedResponse, PaginationMeta, SearchParams};
pub use service::InvoiceStore;
pub use validation::{FieldErrors, InvoiceForm, InvoiceFormData};
