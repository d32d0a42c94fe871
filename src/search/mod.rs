//! Search box behavior for the invoice list
//!
//! Keystrokes are debounced and then turned into a `replace` navigation that
//! carries the term in `query` and resets `page` to `1`.

pub mod controller;
pub mod params;

pub use controller::{Debouncer, Navigator, SEARCH_DEBOUNCE, SearchController, SearchState};
pub use params::{Location, PAGE_PARAM, QUERY_PARAM, UrlSearchParams};
