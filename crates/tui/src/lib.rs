//! Terminal host for ravel
//!
//! This crate connects translated view trees to a live terminal:
//! - Focus traversal over focusable nodes
//! - Keyboard polling, per-target edit buffers and event dispatch
//! - Key source and painter over crossterm/ratatui
//! - The host loop tying snapshots, animation ticks and input together

pub mod app;
pub mod dispatch;
pub mod focus;
pub mod keyboard;
pub mod terminal;

pub use app::App;
pub use dispatch::{handler_id, EventDispatcher};
pub use focus::{collect_targets, FocusManager, FocusSubscription, RenderRequester};
pub use keyboard::{Edit, EditBuffers, KeyboardEventManager};
pub use terminal::{CrosstermKeys, KeySource, Painter, TerminalPainter};

use ravel_config::Settings;

/// Validate `settings` and install the tracing subscriber
pub fn init(settings: &Settings) -> anyhow::Result<()> {
    settings.validate()?;
    ravel_utils::tracing::init(&settings.log)
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
