//! REST API client module for the football data service.
//!
//! This module provides the `ApiClient` for fetching fixtures, predictions,
//! and team statistics. Every read operation is cache-checked against the
//! shared [`crate::cache::CacheManager`] before touching the network, and
//! every transport or decode failure is recovered locally to an explicit
//! empty result - callers never see an `Err` from the read operations.
//!
//! The upstream authenticates with a fixed `x-apisports-key` header; there
//! is no token refresh or rotation.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
