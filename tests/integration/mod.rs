//! Integration tests against the public directory API.

pub mod concurrency;
pub mod directory_lifecycle;
pub mod search;
