//! Macro-generated test suite for the `InvoiceStore` contract.
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_insert_assigns_id`: the store picks the id, fields round-trip
//! - `test_get_nonexistent`: unknown id returns None
//! - `test_update_existing`: customer, amount and status change; date does not
//! - `test_update_nonexistent`: zero rows affected, no error
//! - `test_delete_twice`: second delete affects zero rows
//!
//! ## Search
//! - `test_search_matches_fields`: customer, status, amount and date
//! - `test_search_is_case_insensitive`
//! - `test_search_orders_newest_first`
//! - `test_search_paginates`: pages and totals with a page size of 6
//! - `test_search_treats_wildcards_literally`
//!
//! ## Edge Cases
//! - `test_concurrent_inserts`: parallel inserts from spawned tasks

/// Generate a full `InvoiceStore` conformance test suite.
///
/// `$factory` must evaluate to an empty store implementing
/// `InvoiceStore + Clone + 'static`. It is re-evaluated for each test.
#[macro_export]
macro_rules! invoice_store_tests {
    ($factory:expr) => {
        mod invoice_store_contract_tests {
            use super::*;
            use dashboard::core::invoice::InvoiceStatus;
            use dashboard::core::service::InvoiceStore;
            use uuid::Uuid;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_insert_assigns_id() {
                let store = $factory;
                let created = store
                    .insert(new_invoice("cust-1", 1550, day(2024, 3, 1)))
                    .await
                    .unwrap();

                assert_ne!(created.id, Uuid::nil());
                assert_eq!(created.customer_id, "cust-1");
                assert_eq!(created.amount, 1550);
                assert_eq!(created.status, InvoiceStatus::Pending);
                assert_eq!(created.date, day(2024, 3, 1));

                let fetched = store.get(&created.id).await.unwrap();
                assert_eq!(fetched, Some(created));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                assert_eq!(store.get(&Uuid::new_v4()).await.unwrap(), None);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let store = $factory;
                let created = store
                    .insert(new_invoice("cust-1", 100, day(2024, 1, 5)))
                    .await
                    .unwrap();
                let other = store
                    .insert(new_invoice("cust-2", 200, day(2024, 1, 6)))
                    .await
                    .unwrap();

                let affected = store
                    .update(&created.id, changes("cust-9", 999, InvoiceStatus::Paid))
                    .await
                    .unwrap();
                assert_eq!(affected, 1);

                let updated = store.get(&created.id).await.unwrap().unwrap();
                assert_eq!(updated.customer_id, "cust-9");
                assert_eq!(updated.amount, 999);
                assert_eq!(updated.status, InvoiceStatus::Paid);
                assert_eq!(updated.date, day(2024, 1, 5));

                assert_eq!(store.get(&other.id).await.unwrap(), Some(other));
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;
                let affected = store
                    .update(&Uuid::new_v4(), changes("cust-1", 1, InvoiceStatus::Paid))
                    .await
                    .unwrap();
                assert_eq!(affected, 0);
            }

            #[tokio::test]
            async fn test_delete_twice() {
                let store = $factory;
                let created = store
                    .insert(new_invoice("cust-1", 100, day(2024, 1, 5)))
                    .await
                    .unwrap();

                assert_eq!(store.delete(&created.id).await.unwrap(), 1);
                assert_eq!(store.delete(&created.id).await.unwrap(), 0);
                assert_eq!(store.get(&created.id).await.unwrap(), None);
            }

            // ==================================================================
            // Search
            // ==================================================================

            async fn seeded() -> impl InvoiceStore {
                let store = $factory;
                store
                    .insert(new_invoice("lee-robinson", 1550, day(2024, 2, 10)))
                    .await
                    .unwrap();
                store
                    .insert(new_invoice("delba", 20000, day(2023, 12, 6)))
                    .await
                    .unwrap();
                let paid = store
                    .insert(new_invoice("amy", 875, day(2024, 1, 20)))
                    .await
                    .unwrap();
                store
                    .update(&paid.id, changes("amy", 875, InvoiceStatus::Paid))
                    .await
                    .unwrap();
                store
            }

            async fn customers(store: &impl InvoiceStore, query: &str) -> Vec<String> {
                store
                    .search(query, 1, 6)
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|inv| inv.customer_id)
                    .collect()
            }

            #[tokio::test]
            async fn test_search_matches_fields() {
                let store = seeded().await;

                assert_eq!(customers(&store, "lee").await, vec!["lee-robinson"]);
                assert_eq!(customers(&store, "paid").await, vec!["amy"]);
                assert_eq!(customers(&store, "15.50").await, vec!["lee-robinson"]);
                assert_eq!(customers(&store, "2023-12").await, vec!["delba"]);
                assert_eq!(store.count("pending").await.unwrap(), 2);
            }

            #[tokio::test]
            async fn test_search_is_case_insensitive() {
                let store = seeded().await;
                assert_eq!(customers(&store, "DELBA").await, vec!["delba"]);
                assert_eq!(customers(&store, "Paid").await, vec!["amy"]);
            }

            #[tokio::test]
            async fn test_search_orders_newest_first() {
                let store = seeded().await;
                assert_eq!(
                    customers(&store, "").await,
                    vec!["lee-robinson", "amy", "delba"]
                );
                assert_eq!(store.count("").await.unwrap(), 3);
            }

            #[tokio::test]
            async fn test_search_paginates() {
                let store = $factory;
                for n in 1..=13u32 {
                    store
                        .insert(new_invoice(&format!("cust-{n:02}"), 100, day(2024, 1, n)))
                        .await
                        .unwrap();
                }

                let first = store.search("cust", 1, 6).await.unwrap();
                assert_eq!(first.len(), 6);
                assert_eq!(first[0].customer_id, "cust-13");

                let last = store.search("cust", 3, 6).await.unwrap();
                assert_eq!(last.len(), 1);
                assert_eq!(last[0].customer_id, "cust-01");

                assert!(store.search("cust", 4, 6).await.unwrap().is_empty());
                assert_eq!(store.count("cust").await.unwrap(), 13);
            }

            #[tokio::test]
            async fn test_search_treats_wildcards_literally() {
                let store = seeded().await;
                assert!(customers(&store, "%").await.is_empty());
                assert!(customers(&store, "_").await.is_empty());
                assert_eq!(store.count("%").await.unwrap(), 0);
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let store = $factory;
                let mut handles = Vec::new();
                for n in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .insert(new_invoice(&format!("parallel-{n}"), 100, day(2024, 5, 1)))
                            .await
                            .unwrap()
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                assert_eq!(store.count("parallel").await.unwrap(), 10);
            }
        }
    };
}
