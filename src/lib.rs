//! # kiln - incremental builds for small C projects
//!
//! kiln finds the C sources of a project, recompiles the ones that are newer
//! than their object files (all at once, one compiler process each), waits
//! for every compiler to finish and links everything under the object tree
//! into one executable named after the project directory.
//!
//! ## Quick Start
//!
//! ```bash
//! kiln          # debug build into obj/
//! kiln release  # -O3 build into obj_opt/
//! kiln clean    # remove object trees, the executable and logs/*.log
//! ```
//!
//! ## Module Organization
//!
//! - [`build`] - Scanner, staleness checks, dispatch, link and clean
//! - [`config`] - `kiln.toml` parsing
//! - [`error`] - Build error type and exit codes
//! - [`ui`] - Status lines and progress

/// Incremental build pipeline.
pub mod build;

/// Configuration file parsing (`kiln.toml`).
pub mod config;

/// Error taxonomy.
pub mod error;

/// Terminal status output.
pub mod ui;
