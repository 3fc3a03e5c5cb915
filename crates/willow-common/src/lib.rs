//! Common utilities for the willow DOM toolkit.
//!
//! This crate provides shared infrastructure used by the parser and the
//! selector engine:
//! - **Warning System** - colored terminal output for constructs that are
//!   deliberately handled best-effort (dropped markup declarations,
//!   unsupported pseudo-classes)

pub mod warning;
