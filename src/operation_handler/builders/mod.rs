//! Builder utilities for operation handler types
//!
//! Convenience constructors for [`OperationRequest`](super::OperationRequest).

pub mod request;

// Builder implementations are available through impl blocks on core types
