//! Core domain types, errors, and constants for `ravel`.
//!
//! This crate establishes the data model shared by the translation pipeline and
//! the input layer. Everything here is produced or consumed at the boundary
//! with the external component framework.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing the configuration, translation, input and dispatch failures.
//! - **`view`**: The immutable-per-snapshot view tree (`ViewNode`, `Element`,
//!   `EventBinding`).
//! - **`attributes`**: Ordered, case-insensitive attribute storage with typed
//!   parsing at the translator boundary.
//! - **`events`**: Structured event payloads dispatched back by handler id.
//! - **`focus`**: Read-only snapshots of focusable nodes.
//! - **`highlight`**: The highlighted-code payload carried inside attributes.
//! - **`constants`**: Attribute names and event kinds that form the inbound
//!   view-tree contract.

pub mod attributes;
pub mod constants;
pub mod errors;
pub mod events;
pub mod focus;
pub mod highlight;
pub mod view;

pub use self::{
    attributes::Attributes,
    constants::*,
    errors::{Error, Result},
    events::{EventArgs, EventKind},
    focus::FocusTargetSnapshot,
    highlight::HighlightedCode,
    view::{Element, EventBinding, ViewNode},
};
