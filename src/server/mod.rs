//! Server module for building the dashboard HTTP server
//!
//! This module provides a `DashboardBuilder` that registers:
//! - the invoice list, search and page count routes
//! - the create / update / delete form routes
//! - health check routes

pub mod builder;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::DashboardBuilder;
pub use handlers::{AppState, PageCount};
pub use host::DashboardHost;
pub use router::build_invoice_routes;
