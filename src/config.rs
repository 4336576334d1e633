//! Configuration for directory instances.
//!
//! A [`DirectoryConfig`] is fixed when a store is constructed. It decides how
//! userName uniqueness treats letter case, how filter comparisons treat case
//! for each attribute type, how ids are generated, and the paging and filter
//! limits applied to searches.
//!
//! ```rust
//! use scim_directory::config::{CaseSensitivity, DirectoryConfig, IdStrategy};
//!
//! let config = DirectoryConfig::default()
//!     .with_user_name_case(CaseSensitivity::Insensitive)
//!     .with_id_strategy(IdStrategy::Sequential)
//!     .with_default_items_per_page(25);
//!
//! assert_eq!(config.match_policy.user_name, CaseSensitivity::Insensitive);
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Default page size for searches that do not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 100;

/// Upper bound on the page size a caller may request.
pub const MAX_ITEMS_PER_PAGE: usize = 1000;

/// Maximum accepted filter length in bytes.
pub const MAX_FILTER_LENGTH: usize = 4096;

/// Maximum accepted parenthesis nesting in a filter.
pub const MAX_FILTER_DEPTH: usize = 32;

/// How string values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseSensitivity {
    /// Byte-for-byte equality
    #[default]
    Exact,
    /// Equality after Unicode lowercasing
    Insensitive,
}

impl CaseSensitivity {
    /// Reduce a value to the form used for comparison and indexing.
    pub fn normalize<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            CaseSensitivity::Exact => Cow::Borrowed(value),
            CaseSensitivity::Insensitive => Cow::Owned(value.to_lowercase()),
        }
    }

    /// Whether two values are equal under this policy.
    pub fn equals(&self, left: &str, right: &str) -> bool {
        match self {
            CaseSensitivity::Exact => left == right,
            CaseSensitivity::Insensitive => self.normalize(left) == self.normalize(right),
        }
    }

    /// Whether `haystack` contains `needle` under this policy.
    pub fn contains(&self, haystack: &str, needle: &str) -> bool {
        self.normalize(haystack).contains(self.normalize(needle).as_ref())
    }

    /// Whether `value` starts with `prefix` under this policy.
    pub fn starts_with(&self, value: &str, prefix: &str) -> bool {
        self.normalize(value).starts_with(self.normalize(prefix).as_ref())
    }
}

/// String comparison policy used by filter evaluation, per attribute type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPolicy {
    /// Policy for `userName` comparisons
    pub user_name: CaseSensitivity,
    /// Policy for other text attributes (name parts, emails)
    pub text: CaseSensitivity,
}

/// How new resource ids are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdStrategy {
    /// Random UUID v4 strings
    #[default]
    Uuid,
    /// Decimal counter starting at 1, never reused
    Sequential,
}

/// Configuration for a directory instance.
///
/// When deserialized without a `matchPolicy`, the userName comparison policy
/// follows `userNameCase`, the same as [`DirectoryConfig::with_user_name_case`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawDirectoryConfig")]
pub struct DirectoryConfig {
    /// Case policy of the userName uniqueness index
    pub user_name_case: CaseSensitivity,

    /// Case policy of filter comparisons
    pub match_policy: MatchPolicy,

    /// Id generation strategy
    pub id_strategy: IdStrategy,

    /// Page size used when a search does not specify one
    pub default_items_per_page: usize,

    /// Largest page size a search may return
    pub max_items_per_page: usize,

    /// Longest filter string accepted, in bytes
    pub max_filter_length: usize,

    /// Deepest parenthesis nesting accepted in a filter
    pub max_filter_depth: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            user_name_case: CaseSensitivity::Exact,
            match_policy: MatchPolicy::default(),
            id_strategy: IdStrategy::Uuid,
            default_items_per_page: DEFAULT_ITEMS_PER_PAGE,
            max_items_per_page: MAX_ITEMS_PER_PAGE,
            max_filter_length: MAX_FILTER_LENGTH,
            max_filter_depth: MAX_FILTER_DEPTH,
        }
    }
}

/// Wire form of [`DirectoryConfig`]; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawDirectoryConfig {
    user_name_case: Option<CaseSensitivity>,
    match_policy: Option<MatchPolicy>,
    id_strategy: Option<IdStrategy>,
    default_items_per_page: Option<usize>,
    max_items_per_page: Option<usize>,
    max_filter_length: Option<usize>,
    max_filter_depth: Option<usize>,
}

impl From<RawDirectoryConfig> for DirectoryConfig {
    fn from(raw: RawDirectoryConfig) -> Self {
        let defaults = DirectoryConfig::default();
        let mut config = match raw.user_name_case {
            Some(case) => defaults.with_user_name_case(case),
            None => defaults,
        };

        if let Some(policy) = raw.match_policy {
            config.match_policy = policy;
        }
        if let Some(strategy) = raw.id_strategy {
            config.id_strategy = strategy;
        }
        if let Some(count) = raw.default_items_per_page {
            config = config.with_default_items_per_page(count);
        }
        if let Some(count) = raw.max_items_per_page {
            config = config.with_max_items_per_page(count);
        }
        if let Some(length) = raw.max_filter_length {
            config.max_filter_length = length;
        }
        if let Some(depth) = raw.max_filter_depth {
            config.max_filter_depth = depth;
        }
        config
    }
}

impl DirectoryConfig {
    /// Set the userName case policy.
    ///
    /// Filter comparisons on `userName` follow the same policy unless
    /// [`with_match_policy`](Self::with_match_policy) is called afterwards.
    pub fn with_user_name_case(mut self, case: CaseSensitivity) -> Self {
        self.user_name_case = case;
        self.match_policy.user_name = case;
        self
    }

    /// Set the filter comparison policy.
    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    /// Set the id generation strategy.
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    /// Set the default page size, clamped to at least 1.
    pub fn with_default_items_per_page(mut self, count: usize) -> Self {
        self.default_items_per_page = count.max(1);
        self
    }

    /// Set the maximum page size, clamped to at least 1.
    pub fn with_max_items_per_page(mut self, count: usize) -> Self {
        self.max_items_per_page = count.max(1);
        self
    }

    /// Set the filter length and nesting limits.
    pub fn with_filter_limits(mut self, max_length: usize, max_depth: usize) -> Self {
        self.max_filter_length = max_length;
        self.max_filter_depth = max_depth;
        self
    }

    /// Page size to use for a request, applying the default and the cap.
    pub fn effective_items_per_page(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_items_per_page)
            .min(self.max_items_per_page)
    }
}
