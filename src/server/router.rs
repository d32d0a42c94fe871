//! Router builder for the invoice routes

use super::handlers::{
    AppState, count_pages, create_invoice, delete_invoice, get_invoice, list_invoices,
    update_invoice,
};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

/// Build the invoice routes
///
/// - GET /dashboard/invoices - List and search invoices
/// - POST /dashboard/invoices - Create an invoice from a form
/// - GET /dashboard/invoices/pages - Page count for a search
/// - GET /dashboard/invoices/{id} - Get an invoice by ID
/// - DELETE /dashboard/invoices/{id} - Delete an invoice
/// - POST|PUT /dashboard/invoices/{id}/edit - Update an invoice from a form
/// - POST /dashboard/invoices/{id}/delete - Delete an invoice from a form
pub fn build_invoice_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/dashboard/invoices",
            get(list_invoices).post(create_invoice),
        )
        .route("/dashboard/invoices/pages", get(count_pages))
        .route(
            "/dashboard/invoices/{id}",
            get(get_invoice).delete(delete_invoice),
        )
        .route(
            "/dashboard/invoices/{id}/edit",
            post(update_invoice).put(update_invoice),
        )
        .route("/dashboard/invoices/{id}/delete", post(delete_invoice))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-dashboard"
    }))
}
