//! # Invoice Dashboard
//!
//! The invoice side of a billing dashboard: form validation, the create /
//! update / delete actions, route revalidation and the debounced search box.
//!
//! ## Features
//!
//! - **Form validation**: raw form fields checked field by field, amounts stored in cents
//! - **Actions as values**: every mutation returns an [`actions::ActionOutcome`]
//! - **Revalidation**: successful mutations drop cached list pages
//! - **Debounced search**: one URL rewrite per pause in typing
//! - **Storage backends**: in-memory, or PostgreSQL with the `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! let app = DashboardBuilder::new()
//!     .with_store(InMemoryInvoiceStore::new())
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod actions;
pub mod cache;
pub mod config;
pub mod core;
pub mod search;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        clock::{Clock, FixedClock, SystemClock},
        error::{ConfigError, DashboardError, DashboardResult, StorageError},
        invoice::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice},
        query::{PaginatedResponse, PaginationMeta, SearchParams},
        service::InvoiceStore,
        validation::{FieldErrors, InvoiceForm, InvoiceFormData, InvoiceSubmission, validate},
    };

    // === Actions ===
    pub use crate::actions::{ActionOutcome, ActionState, FailureKind, INVOICES_ROUTE, InvoiceActions};

    // === Cache ===
    pub use crate::cache::{Revalidator, RouteCache};

    // === Search ===
    pub use crate::search::{Location, Navigator, SearchController};

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceStore;

    // === Config ===
    pub use crate::config::DashboardConfig;

    // === Server ===
    pub use crate::server::{DashboardBuilder, DashboardHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use uuid::Uuid;
}
