//! URL query rewriting for the search box

use serde::{Deserialize, Serialize};

pub const QUERY_PARAM: &str = "query";
pub const PAGE_PARAM: &str = "page";

/// Ordered, possibly repeated `key=value` pairs of a URL query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSearchParams {
    pairs: Vec<(String, String)>,
}

impl UrlSearchParams {
    /// Parse a query string, with or without the leading `?`
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the first `key` in place and drop later ones, or append
    pub fn set(&mut self, key: &str, value: &str) {
        let mut seen = false;
        self.pairs.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            *v = value.to_string();
            true
        });
        if !seen {
            self.pairs.push((key.to_string(), value.to_string()));
        }
    }

    /// Remove every `key`
    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serialize as `application/x-www-form-urlencoded`, without `?`
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// Current location as seen by the search box
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    /// Query string without the leading `?`
    pub search: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>, search: impl AsRef<str>) -> Self {
        let search = search.as_ref();
        Self {
            pathname: pathname.into(),
            search: search.strip_prefix('?').unwrap_or(search).to_string(),
        }
    }

    /// Split an href like `/dashboard/invoices?page=2`
    pub fn from_href(href: &str) -> Self {
        match href.split_once('?') {
            Some((path, search)) => Self::new(path, search),
            None => Self::new(href, ""),
        }
    }

    pub fn params(&self) -> UrlSearchParams {
        UrlSearchParams::parse(&self.search)
    }

    /// Term the search box starts with
    pub fn initial_term(&self) -> String {
        self.params().get(QUERY_PARAM).unwrap_or_default().to_string()
    }

    pub fn href(&self) -> String {
        format!("{}?{}", self.pathname, self.search)
    }

    /// Location after searching for `term`
    ///
    /// `query` is set to the term when non-empty and removed otherwise;
    /// `page` always goes back to `1`. Other parameters are kept.
    pub fn with_search_term(&self, term: &str) -> Self {
        let mut params = self.params();
        if term.is_empty() {
            params.delete(QUERY_PARAM);
        } else {
            params.set(QUERY_PARAM, term);
        }
        params.set(PAGE_PARAM, "1");

        Self {
            pathname: self.pathname.clone(),
            search: params.to_query_string(),
        }
    }
}
