//! Shared utilities for ravel
//!
//! Currently limited to logging setup shared by hosts embedding the terminal
//! pipeline.

pub mod tracing;
