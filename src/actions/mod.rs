//! Invoice form actions
//!
//! The three mutation handlers behind the invoice forms. Each one validates
//! raw fields, performs at most one storage call and reports the outcome as
//! a value. Navigation is never performed here: a successful create or update
//! returns [`ActionOutcome::Redirect`] and the route layer carries it out.
//!
//! | action | validation failure | storage failure | success |
//! |---|---|---|---|
//! | create | field errors + "Missing Fields. Failed to Create Invoice." | "Database Error: Failed to Create Invoice." | revalidate, redirect |
//! | update | field errors + "Missing Fields. Failed to Update Invoice." | "Database Error: Failed to Update Invoice." | revalidate, redirect |
//! | delete | - | "Database Error: Failed to Delete Invoice." | revalidate, "Deleted Invoice." |

use crate::cache::Revalidator;
use crate::core::clock::Clock;
use crate::core::service::InvoiceStore;
use crate::core::validation::{FieldErrors, InvoiceFormData, validate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Route listing every invoice; revalidated after each mutation
pub const INVOICES_ROUTE: &str = "/dashboard/invoices";

pub const CREATE_MISSING_FIELDS: &str = "Missing Fields. Failed to Create Invoice.";
pub const CREATE_DATABASE_ERROR: &str = "Database Error: Failed to Create Invoice.";
pub const UPDATE_MISSING_FIELDS: &str = "Missing Fields. Failed to Update Invoice.";
pub const UPDATE_DATABASE_ERROR: &str = "Database Error: Failed to Update Invoice.";
pub const DELETE_DATABASE_ERROR: &str = "Database Error: Failed to Delete Invoice.";
pub const DELETED: &str = "Deleted Invoice.";

/// State handed back to the form after an attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionState {
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionState {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: FieldErrors::new(),
            message: Some(message.into()),
        }
    }

    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors,
            message: Some(message.into()),
        }
    }
}

/// Why an action was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Storage,
}

/// Result of running an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Mutation succeeded; the caller should navigate to this route
    Redirect(String),
    /// Mutation succeeded; show this state in place
    Completed(ActionState),
    /// Nothing was changed
    Rejected { kind: FailureKind, state: ActionState },
}

impl ActionOutcome {
    fn rejected(kind: FailureKind, state: ActionState) -> Self {
        ActionOutcome::Rejected { kind, state }
    }

    /// Whether the mutation went through
    pub fn is_success(&self) -> bool {
        !matches!(self, ActionOutcome::Rejected { .. })
    }

    /// State to render, if the outcome carries one
    pub fn state(&self) -> Option<&ActionState> {
        match self {
            ActionOutcome::Redirect(_) => None,
            ActionOutcome::Completed(state) | ActionOutcome::Rejected { state, .. } => Some(state),
        }
    }
}

/// The invoice mutation handlers and their collaborators
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    revalidator: Arc<dyn Revalidator>,
    clock: Arc<dyn Clock>,
}

impl InvoiceActions {
    pub fn new(
        store: Arc<dyn InvoiceStore>,
        revalidator: Arc<dyn Revalidator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            revalidator,
            clock,
        }
    }

    /// Validate and insert a new invoice dated today
    #[tracing::instrument(skip_all)]
    pub async fn create_invoice(&self, form: &InvoiceFormData) -> ActionOutcome {
        let validated = match validate(form) {
            Ok(validated) => validated,
            Err(errors) => {
                tracing::debug!(fields = ?errors.fields(), "invoice rejected by validation");
                return ActionOutcome::rejected(
                    FailureKind::Validation,
                    ActionState::invalid(errors, CREATE_MISSING_FIELDS),
                );
            }
        };

        let date = self.clock.today();
        match self.store.insert(validated.into_new_invoice(date)).await {
            Ok(invoice) => {
                tracing::info!(id = %invoice.id, amount = invoice.amount, "invoice created");
                self.revalidator.invalidate(INVOICES_ROUTE);
                ActionOutcome::Redirect(INVOICES_ROUTE.to_string())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create invoice");
                ActionOutcome::rejected(
                    FailureKind::Storage,
                    ActionState::message(CREATE_DATABASE_ERROR),
                )
            }
        }
    }

    /// Validate and overwrite customer, amount and status of an invoice
    ///
    /// An id matching no row still counts as success.
    #[tracing::instrument(skip(self, form))]
    pub async fn update_invoice(&self, id: Uuid, form: &InvoiceFormData) -> ActionOutcome {
        let validated = match validate(form) {
            Ok(validated) => validated,
            Err(errors) => {
                tracing::debug!(fields = ?errors.fields(), "invoice update rejected by validation");
                return ActionOutcome::rejected(
                    FailureKind::Validation,
                    ActionState::invalid(errors, UPDATE_MISSING_FIELDS),
                );
            }
        };

        match self.store.update(&id, validated.into_changes()).await {
            Ok(affected) => {
                tracing::info!(affected, "invoice updated");
                self.revalidator.invalidate(INVOICES_ROUTE);
                ActionOutcome::Redirect(INVOICES_ROUTE.to_string())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to update invoice");
                ActionOutcome::rejected(
                    FailureKind::Storage,
                    ActionState::message(UPDATE_DATABASE_ERROR),
                )
            }
        }
    }

    /// Delete an invoice; deleting a missing id is not an error
    #[tracing::instrument(skip(self))]
    pub async fn delete_invoice(&self, id: Uuid) -> ActionOutcome {
        match self.store.delete(&id).await {
            Ok(affected) => {
                tracing::info!(affected, "invoice deleted");
                self.revalidator.invalidate(INVOICES_ROUTE);
                ActionOutcome::Completed(ActionState::message(DELETED))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to delete invoice");
                ActionOutcome::rejected(
                    FailureKind::Storage,
                    ActionState::message(DELETE_DATABASE_ERROR),
                )
            }
        }
    }
}
