//! Runtime configuration for ravel
//!
//! Settings are immutable after construction and are cloned into the
//! components that need them.

pub mod settings;

pub use settings::*;
