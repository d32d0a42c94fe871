//! Axum extractor for invoice form submissions
//!
//! `InvoiceSubmission` reads a form-encoded body into [`InvoiceFormData`]
//! without rejecting on missing or malformed fields: judging the fields is
//! the schema's job, not the extractor's.

use super::schema::InvoiceFormData;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};

/// Raw invoice fields taken from the request body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_invoice(
///     State(state): State<AppState>,
///     InvoiceSubmission(form): InvoiceSubmission,
/// ) -> ActionOutcome {
///     state.actions.create_invoice(&form).await
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InvoiceSubmission(pub InvoiceFormData);

impl InvoiceSubmission {
    pub fn into_inner(self) -> InvoiceFormData {
        self.0
    }
}

impl std::ops::Deref for InvoiceSubmission {
    type Target = InvoiceFormData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequest<S> for InvoiceSubmission
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Only a body that cannot be read at all is rejected
        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Ok(Self(InvoiceFormData::from_urlencoded(&body)))
    }
}
