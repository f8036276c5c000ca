//! # Medienwald Backend Library
//!
//! Medienwald discovers audio and video files below one or more root paths,
//! keeps them in an in-memory index and serves them as a browsable folder
//! hierarchy plus range-aware streams over a REST API.
//!
//! ## Architecture
//!
//! The application is built using:
//! - **Axum**: HTTP server and routing
//! - **Tokio**: Async runtime; discovery walks run on the blocking pool
//! - **walkdir / globset**: Directory traversal with system-directory exclusions
//! - **Serde**: Serialization/deserialization for JSON APIs
//!
//! ## Core Components
//!
//! - [`paths`]: Path normalization, root detection, reversible file ids
//! - [`index`]: The process-wide media index, swapped atomically per scan
//! - [`hierarchy`]: Folder/file children of any path prefix with aggregate counts
//! - [`scanner`]: Discovery of media files below the scan roots
//! - [`routes`]: HTTP API endpoint handlers
//! - [`config`], [`error`], [`metrics`], [`middleware`], [`state`], [`types`]
//!
//! The hierarchy is never stored. Every browse request derives it from the flat
//! list of records by string-prefix operations on normalized directories.

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod index;
pub mod metrics;
pub mod middleware;
pub mod paths;
pub mod routes;
pub mod scanner;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
