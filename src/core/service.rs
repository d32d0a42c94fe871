//! Service trait for invoice persistence

use crate::core::error::StorageError;
use crate::core::invoice::{Invoice, InvoiceChanges, NewInvoice};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage collaborator for invoices
///
/// Each method performs a single statement against the `invoices` table.
/// Values always travel as bound parameters. Implementations report "no
/// such row" through affected-row counts or `None`, never as an error.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a row; the store assigns the id
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice, StorageError>;

    /// Get an invoice by id
    async fn get(&self, id: &Uuid) -> Result<Option<Invoice>, StorageError>;

    /// Overwrite customer, amount and status of the row with that id
    ///
    /// Returns the number of affected rows (0 or 1).
    async fn update(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64, StorageError>;

    /// Delete the row with that id
    ///
    /// Returns the number of affected rows (0 or 1).
    async fn delete(&self, id: &Uuid) -> Result<u64, StorageError>;

    /// One page of invoices matching `query`, newest first
    ///
    /// Matching is a case-insensitive substring test on customer id, status,
    /// amount in major units and date. `page` starts at 1.
    async fn search(
        &self,
        query: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<Invoice>, StorageError>;

    /// Number of invoices matching `query`
    async fn count(&self, query: &str) -> Result<usize, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::invoice::InvoiceStatus;
    use crate::storage::InMemoryInvoiceStore;
    use chrono::NaiveDate;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_store_behind_arc_dyn() {
        let store: Arc<dyn InvoiceStore> = Arc::new(InMemoryInvoiceStore::new());

        let created = store
            .insert(NewInvoice {
                customer_id: "c".to_string(),
                amount: 100,
                status: InvoiceStatus::Paid,
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(store.get(&created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(store.count("paid").await.unwrap(), 1);
        assert_eq!(store.delete(&created.id).await.unwrap(), 1);
    }
}
