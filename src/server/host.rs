//! Server host holding the dashboard state
//!
//! The host owns the store, the route cache and the actions wired to both,
//! independently of how they are exposed over HTTP.

use crate::actions::InvoiceActions;
use crate::cache::{Revalidator, RouteCache};
use crate::config::DashboardConfig;
use crate::core::clock::Clock;
use crate::core::service::InvoiceStore;
use crate::server::handlers::AppState;
use std::sync::Arc;

/// Host context containing all dashboard state
///
/// # Example
///
/// ```rust,ignore
/// let host = DashboardHost::new(config, store, Arc::new(SystemClock));
/// let app = build_invoice_routes(host.app_state());
/// ```
pub struct DashboardHost {
    /// Loaded configuration
    pub config: Arc<DashboardConfig>,

    /// Invoice persistence
    pub store: Arc<dyn InvoiceStore>,

    /// Rendered list responses, revalidated by the actions
    pub cache: Arc<RouteCache>,

    /// Create / update / delete handlers
    pub actions: InvoiceActions,
}

impl DashboardHost {
    /// Wire the actions to `store` and a fresh route cache
    pub fn new(config: DashboardConfig, store: Arc<dyn InvoiceStore>, clock: Arc<dyn Clock>) -> Self {
        let cache = Arc::new(RouteCache::with_limit(config.cache.max_entries_per_route));
        let revalidator: Arc<dyn Revalidator> = cache.clone();
        let actions = InvoiceActions::new(store.clone(), revalidator, clock);

        Self {
            config: Arc::new(config),
            store,
            cache,
            actions,
        }
    }

    /// State handed to the HTTP handlers
    pub fn app_state(&self) -> AppState {
        AppState {
            store: self.store.clone(),
            cache: self.cache.clone(),
            actions: self.actions.clone(),
            items_per_page: self.config.items_per_page(),
        }
    }
}
