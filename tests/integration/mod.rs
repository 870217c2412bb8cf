//! Integration test suite for qxs
//!
//! End-to-end tests of query resolution and of the `qxs` binary. All namespace
//! data comes from temporary files or inline config; nothing touches the network.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **resolution**: library resolution over file and inline namespaces
//! - **cli**: the `qxs` binary driven through `assert_cmd`

mod common;

mod cli;
mod resolution;
