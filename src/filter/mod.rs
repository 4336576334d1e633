//! Filter expressions over users.
//!
//! A [`Filter`] is either the match-everything filter (the result of an
//! absent, empty or whitespace-only filter string) or a parsed
//! [`Expression`] tree. Parsing and evaluation are pure functions; the tree
//! is immutable once built and can be shared freely between threads.
//!
//! ```rust
//! use scim_directory::config::DirectoryConfig;
//! use scim_directory::filter::Filter;
//!
//! let config = DirectoryConfig::default();
//! let filter = Filter::parse(Some("userName eq 'joe' or userName eq 'joel'"), &config).unwrap();
//! assert!(!filter.is_match_all());
//!
//! assert!(Filter::parse(Some("   "), &config).unwrap().is_match_all());
//! assert!(Filter::parse(Some("userName gt 'joe'"), &config).is_err());
//! ```

pub mod ast;
pub mod evaluator;
pub mod parser;

pub use ast::{Attribute, Comparison, Expression, Literal, Operator};

use crate::config::{DirectoryConfig, MAX_FILTER_DEPTH, MAX_FILTER_LENGTH, MatchPolicy};
use crate::error::{ValidationError, ValidationResult};
use crate::resource::User;
use std::fmt;
use std::str::FromStr;

/// A parsed search filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every user
    MatchAll,
    /// Matches users satisfying the expression
    Expression(Expression),
}

impl Filter {
    /// Parse an optional filter string under the limits of `config`.
    pub fn parse(input: Option<&str>, config: &DirectoryConfig) -> ValidationResult<Self> {
        match input {
            Some(text) if !text.trim().is_empty() => parser::parse_expression(
                text,
                config.max_filter_length,
                config.max_filter_depth,
            )
            .map(Filter::Expression),
            _ => Ok(Filter::MatchAll),
        }
    }

    /// Whether this filter accepts every user without evaluation.
    pub fn is_match_all(&self) -> bool {
        matches!(self, Filter::MatchAll)
    }

    /// Whether `user` passes this filter.
    pub fn matches(&self, user: &User, policy: &MatchPolicy) -> bool {
        match self {
            Filter::MatchAll => true,
            Filter::Expression(expression) => evaluator::evaluate(expression, user, policy),
        }
    }
}

impl FromStr for Filter {
    type Err = ValidationError;

    /// Parse with the default length and depth limits.
    fn from_str(input: &str) -> ValidationResult<Self> {
        if input.trim().is_empty() {
            return Ok(Filter::MatchAll);
        }
        parser::parse_expression(input, MAX_FILTER_LENGTH, MAX_FILTER_DEPTH).map(Filter::Expression)
    }
}

impl From<Expression> for Filter {
    fn from(expression: Expression) -> Self {
        Filter::Expression(expression)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::MatchAll => write!(f, "*"),
            Filter::Expression(expression) => write!(f, "{}", expression),
        }
    }
}
