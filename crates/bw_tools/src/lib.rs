//! # BW Tools
//!
//! The `bw-oracle` command-line front end for `bw_core`:
//! - RON scenarios expanded into snapshots and area graphs
//! - A JSON-lines request protocol on stdin/stdout
//! - Scenario validation

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod protocol;
pub mod runner;
pub mod scenario;
pub mod validate;
