//! View-tree-to-terminal translation for ravel
//!
//! This crate turns the framework-produced view tree into terminal drawables:
//! - Renderable capability and the concrete widgets middleware build
//! - Chain-of-responsibility translation pipeline
//! - Shared child-conversion helpers
//! - Per-pass registry of animated renderables
//! - Built-in middleware, including the scrollable translator

pub mod helpers;
pub mod middleware;
pub mod pipeline;
pub mod registry;
pub mod renderable;
pub mod widgets;

#[cfg(test)]
pub(crate) mod testing;

pub use helpers::{is_block_node, normalize_text, translate_children, translate_children_flow};
pub use pipeline::{Middleware, Next, TranslationContext, Translator};
pub use registry::AnimatedRegistry;
pub use renderable::{AnimatedRenderable, Renderable, RenderableRef};
