//! Integration and unit tests for the Medienwald backend.
//!
//! ## Test Modules
//!
//! - **paths_tests**: Path normalization, root detection, ids and breadcrumbs
//! - **index_tests**: Snapshot replacement and lookups in the media index
//! - **hierarchy_tests**: Folder derivation, aggregate counts and ordering
//! - **scanner_tests**: Discovery on real temporary directory trees
//! - **api_tests**: HTTP endpoints end to end through the router
//! - **error_tests**: Error mapping and request validation
//! - **config_tests**: Configuration defaults, overrides and validation
//!
//! Individual test modules can be run with:
//! ```bash
//! cargo test hierarchy_tests
//! ```

pub mod error_tests;
pub mod index_tests;
