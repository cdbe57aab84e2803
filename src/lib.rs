//! pitchcache - a cache-first data layer for football match analysis.
//!
//! The crate retrieves fixtures, predictions, and team statistics from the
//! API-Football service, keeps every result in a durable local cache to
//! minimize calls against the rate-limited upstream, and chains the lookups
//! for a single fixture into one [`analysis::MatchAnalysis`] that includes
//! an AI-generated tactical report.
//!
//! Layering, leaf first:
//! - [`cache`]: timestamped key/value store with pluggable freshness policy
//! - [`api`]: authenticated upstream client, cache-checked per request
//! - [`stats`]: season-fallback policy on top of the statistics endpoint
//! - [`narrative`]: generative tactical reports with degraded fallbacks
//! - [`analysis`]: the per-fixture orchestration

pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod narrative;
pub mod stats;
