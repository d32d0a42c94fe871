//! HTTP handlers for the invoice routes
//!
//! Reads go through the [`RouteCache`]; mutations delegate to
//! [`InvoiceActions`] and turn the [`ActionOutcome`] into a response.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::actions::{ActionOutcome, FailureKind, INVOICES_ROUTE, InvoiceActions};
use crate::cache::RouteCache;
use crate::core::error::DashboardError;
use crate::core::invoice::Invoice;
use crate::core::query::{PaginatedResponse, PaginationMeta, SearchParams, total_pages};
use crate::core::service::InvoiceStore;
use crate::core::validation::InvoiceSubmission;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InvoiceStore>,
    pub cache: Arc<RouteCache>,
    pub actions: InvoiceActions,
    pub items_per_page: usize,
}

/// Response for the page count endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCount {
    pub total_pages: usize,
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::Redirect(to) => Redirect::to(&to).into_response(),
            ActionOutcome::Completed(state) => (StatusCode::OK, Json(state)).into_response(),
            ActionOutcome::Rejected { kind, state } => {
                let status = match kind {
                    FailureKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
                    FailureKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, Json(state)).into_response()
            }
        }
    }
}

/// Serve `key` under the invoice route from the cache, awaiting `compute` on a miss
async fn cached<F>(state: &AppState, key: String, compute: F) -> Result<Value, DashboardError>
where
    F: std::future::Future<Output = Result<Value, DashboardError>>,
{
    if let Some(hit) = state.cache.get(INVOICES_ROUTE, &key) {
        tracing::trace!(key = %key, "route cache hit");
        return Ok(hit);
    }

    let generation = state.cache.generation(INVOICES_ROUTE);
    let value = compute.await?;
    if !state.cache.put(INVOICES_ROUTE, generation, key, value.clone()) {
        tracing::debug!("route revalidated while rendering; response not cached");
    }
    Ok(value)
}

/// List invoices matching `query`, one page at a time
///
/// GET /dashboard/invoices?query=&page=
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, DashboardError> {
    let value = cached(&state, params.cache_key(), async {
        let query = params.query();
        let page = params.page();
        let limit = state.items_per_page;

        let data = state.store.search(query, page, limit).await?;
        let total = state.store.count(query).await?;

        let response = PaginatedResponse {
            data,
            pagination: PaginationMeta::new(page, limit, total),
        };
        Ok(serde_json::to_value(response)?)
    })
    .await?;

    Ok(Json(value))
}

/// Number of pages for `query`
///
/// GET /dashboard/invoices/pages?query=
pub async fn count_pages(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, DashboardError> {
    let key = format!("pages:query={}", params.query());
    let value = cached(&state, key, async {
        let total = state.store.count(params.query()).await?;
        let count = PageCount {
            total_pages: total_pages(total, state.items_per_page),
        };
        Ok(serde_json::to_value(count)?)
    })
    .await?;

    Ok(Json(value))
}

/// Fetch one invoice, e.g. to pre-fill the edit form
///
/// GET /dashboard/invoices/{id}
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, DashboardError> {
    state
        .store
        .get(&id)
        .await?
        .map(Json)
        .ok_or(DashboardError::NotFound { id })
}

/// POST /dashboard/invoices
pub async fn create_invoice(
    State(state): State<AppState>,
    InvoiceSubmission(form): InvoiceSubmission,
) -> ActionOutcome {
    state.actions.create_invoice(&form).await
}

/// POST|PUT /dashboard/invoices/{id}/edit
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    InvoiceSubmission(form): InvoiceSubmission,
) -> ActionOutcome {
    state.actions.update_invoice(id, &form).await
}

/// POST /dashboard/invoices/{id}/delete, DELETE /dashboard/invoices/{id}
pub async fn delete_invoice(State(state): State<AppState>, Path(id): Path<Uuid>) -> ActionOutcome {
    state.actions.delete_invoice(id).await
}
