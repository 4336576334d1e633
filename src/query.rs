//! Filtered, paginated search over a store.
//!
//! A search parses its filter once, evaluates it against every user in
//! insertion order, and slices the matches into one page. The result
//! envelope carries the total number of matches regardless of paging.
//!
//! ```rust
//! use scim_directory::query::{QueryExecutor, SearchRequest};
//! use scim_directory::resource::UserCandidate;
//! use scim_directory::storage::{InMemoryStore, ResourceStore};
//!
//! let store = InMemoryStore::new();
//! for name in ["joe", "joel", "ann"] {
//!     store.create(&UserCandidate::new(name)).unwrap();
//! }
//!
//! let executor = QueryExecutor::new(&store);
//! let page = executor
//!     .search(&SearchRequest::filtered("userName eq 'joe' or userName eq 'joel'"))
//!     .unwrap();
//! assert_eq!(page.total_results, 2);
//! assert_eq!(page.resources.len(), 2);
//! ```

use crate::error::DirectoryResult;
use crate::filter::Filter;
use crate::resource::User;
use crate::storage::ResourceStore;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Parameters of one search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Filter expression; absent or blank matches every user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// 1-based index of the first result; values below 1 are treated as 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,
    /// Requested page size; capped at the configured maximum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl SearchRequest {
    /// A request for the first page of every user.
    pub fn all() -> Self {
        Self::default()
    }

    /// A request for the first page of users matching `filter`.
    pub fn filtered(filter: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            ..Self::default()
        }
    }

    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = Some(start_index);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    /// Users on this page, in insertion order
    pub resources: Vec<User>,
    /// Number of users matching the filter across all pages
    pub total_results: usize,
    /// Effective 1-based index of the first user on this page
    pub start_index: usize,
    /// Number of users actually on this page
    pub items_per_page: usize,
}

/// Runs searches against a store.
pub struct QueryExecutor<'a, S: ResourceStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ResourceStore + ?Sized> QueryExecutor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Execute a search.
    ///
    /// A malformed filter fails with a validation error before any user is
    /// examined. No matches is not an error: the page is empty and the total
    /// is zero.
    pub fn search(&self, request: &SearchRequest) -> DirectoryResult<ListResponse> {
        let config = self.store.config();
        let filter = Filter::parse(request.filter.as_deref(), config)?;
        trace!("Search filter parsed as {}", filter);

        let policy = config.match_policy;
        let matches = if filter.is_match_all() {
            self.store.select(&|_| true)
        } else {
            self.store.select(&|user| filter.matches(user, &policy))
        };

        let total_results = matches.len();
        let start_index = request.start_index.unwrap_or(1).max(1);
        let count = config.effective_items_per_page(request.count);

        let resources: Vec<User> = matches
            .into_iter()
            .skip(start_index - 1)
            .take(count)
            .collect();

        debug!(
            "Search matched {} users, returning {} from index {}",
            total_results,
            resources.len(),
            start_index
        );

        Ok(ListResponse {
            items_per_page: resources.len(),
            resources,
            total_results,
            start_index,
        })
    }
}
