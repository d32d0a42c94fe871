//! In-memory implementation of InvoiceStore for testing and development

use crate::core::error::StorageError;
use crate::core::invoice::{Invoice, InvoiceChanges, NewInvoice};
use crate::core::query::page_offset;
use crate::core::service::InvoiceStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const BACKEND: &str = "in-memory";

/// In-memory invoice store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<Uuid, Invoice>>>,
}

impl InMemoryInvoiceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with rows (ids are kept as given)
    pub fn with_invoices(invoices: impl IntoIterator<Item = Invoice>) -> Self {
        let map = invoices.into_iter().map(|inv| (inv.id, inv)).collect();
        Self {
            invoices: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.invoices.read().map(|m| m.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned(e: impl std::fmt::Display) -> StorageError {
        StorageError::Unavailable {
            backend: format!("{} (lock poisoned: {})", BACKEND, e),
        }
    }

    /// Matching rows sorted newest first, ties broken by id for a stable order
    fn matching(&self, query: &str) -> Result<Vec<Invoice>, StorageError> {
        let invoices = self.invoices.read().map_err(Self::poisoned)?;
        let needle = query.to_lowercase();

        let mut rows: Vec<Invoice> = invoices
            .values()
            .filter(|inv| inv.matches(&needle))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice, StorageError> {
        let mut invoices = self.invoices.write().map_err(Self::poisoned)?;

        let row = Invoice {
            id: Uuid::new_v4(),
            customer_id: invoice.customer_id,
            amount: invoice.amount,
            status: invoice.status,
            date: invoice.date,
        };
        invoices.insert(row.id, row.clone());

        Ok(row)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Invoice>, StorageError> {
        let invoices = self.invoices.read().map_err(Self::poisoned)?;

        Ok(invoices.get(id).cloned())
    }

    async fn update(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64, StorageError> {
        let mut invoices = self.invoices.write().map_err(Self::poisoned)?;

        let Some(row) = invoices.get_mut(id) else {
            return Ok(0);
        };
        row.customer_id = changes.customer_id;
        row.amount = changes.amount;
        row.status = changes.status;

        Ok(1)
    }

    async fn delete(&self, id: &Uuid) -> Result<u64, StorageError> {
        let mut invoices = self.invoices.write().map_err(Self::poisoned)?;

        Ok(u64::from(invoices.remove(id).is_some()))
    }

    async fn search(
        &self,
        query: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<Invoice>, StorageError> {
        Ok(self
            .matching(query)?
            .into_iter()
            .skip(page_offset(page, per_page))
            .take(per_page)
            .collect())
    }

    async fn count(&self, query: &str) -> Result<usize, StorageError> {
        Ok(self.matching(query)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::invoice::InvoiceStatus;
    use chrono::NaiveDate;

    fn new_invoice(customer_id: &str, amount: i64, day: u32) -> NewInvoice {
        NewInvoice {
            customer_id: customer_id.to_string(),
            amount,
            status: InvoiceStatus::Pending,
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let store = InMemoryInvoiceStore::new();
        let a = store.insert(new_invoice("c1", 100, 1)).await.unwrap();
        let b = store.insert(new_invoice("c1", 100, 1)).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn test_update_changes_only_mutable_columns() {
        let store = InMemoryInvoiceStore::new();
        let created = store.insert(new_invoice("c1", 100, 1)).await.unwrap();

        let affected = store
            .update(
                &created.id,
                InvoiceChanges {
                    customer_id: "c2".to_string(),
                    amount: 250,
                    status: InvoiceStatus::Paid,
                },
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let updated = store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.customer_id, "c2");
        assert_eq!(updated.amount, 250);
        assert_eq!(updated.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn test_update_unknown_id_affects_nothing() {
        let store = InMemoryInvoiceStore::new();
        let affected = store
            .update(
                &Uuid::new_v4(),
                InvoiceChanges {
                    customer_id: "c".to_string(),
                    amount: 1,
                    status: InvoiceStatus::Paid,
                },
            )
            .await
            .unwrap();
        assert_eq!(affected, 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = InMemoryInvoiceStore::new();
        let created = store.insert(new_invoice("c1", 100, 1)).await.unwrap();

        assert_eq!(store.delete(&created.id).await.unwrap(), 1);
        assert_eq!(store.delete(&created.id).await.unwrap(), 0);
        assert!(store.get(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_filters_sorts_and_pages() {
        let store = InMemoryInvoiceStore::new();
        for day in 1..=8 {
            store.insert(new_invoice("lee", 100 * day as i64, day)).await.unwrap();
        }
        store.insert(new_invoice("delba", 999, 9)).await.unwrap();

        assert_eq!(store.count("").await.unwrap(), 9);
        assert_eq!(store.count("LEE").await.unwrap(), 8);

        let first = store.search("lee", 1, 6).await.unwrap();
        assert_eq!(first.len(), 6);
        assert_eq!(first[0].date, NaiveDate::from_ymd_opt(2024, 5, 8).unwrap());
        assert!(first.windows(2).all(|w| w[0].date >= w[1].date));

        let second = store.search("lee", 2, 6).await.unwrap();
        assert_eq!(second.len(), 2);

        let by_amount = store.search("9.99", 1, 6).await.unwrap();
        assert_eq!(by_amount.len(), 1);
        assert_eq!(by_amount[0].customer_id, "delba");
    }
}
