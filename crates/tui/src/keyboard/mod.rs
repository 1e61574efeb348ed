//! Keyboard input loop.
//!
//! Keys are handled strictly one at a time: a key's focus move, buffer edit
//! and dispatches all finish before the next key is read.
//! - Tab / Shift+Tab move focus
//! - Enter activates the focused target (click, then change)
//! - Backspace and printable characters edit the focused target's buffer

mod buffers;

pub use buffers::{Edit, EditBuffers};

use crate::dispatch::{handler_id, EventDispatcher};
use crate::focus::{FocusManager, FocusSubscription};
use crate::terminal::KeySource;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ravel_core::{Error, EventArgs, FocusTargetSnapshot, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct KeyboardEventManager<S> {
    source: S,
    focus: Arc<FocusManager>,
    buffers: Arc<EditBuffers>,
    dispatcher: Arc<dyn EventDispatcher>,
    poll_interval: Duration,
    _buffer_sync: FocusSubscription,
}

impl<S: KeySource> KeyboardEventManager<S> {
    /// Build the loop and keep `buffers` in step with focus changes for as
    /// long as the manager lives
    pub fn new(
        source: S,
        focus: Arc<FocusManager>,
        buffers: Arc<EditBuffers>,
        dispatcher: Arc<dyn EventDispatcher>,
        poll_interval: Duration,
    ) -> Self {
        let subscriber = buffers.clone();
        let buffer_sync = focus.subscribe(move |target| subscriber.on_focus_changed(target));
        Self {
            source,
            focus,
            buffers,
            dispatcher,
            poll_interval,
            _buffer_sync: buffer_sync,
        }
    }

    pub fn buffers(&self) -> &Arc<EditBuffers> {
        &self.buffers
    }

    /// Poll for keys until cancelled or the input stream closes
    pub async fn run(mut self, cancel: CancellationToken) -> Result<()> {
        info!(poll_interval = ?self.poll_interval, "keyboard loop started");
        loop {
            if cancel.is_cancelled() {
                break;
            }
            match self.source.next_key().await {
                Ok(Some(key)) => match self.handle_key(key, &cancel).await {
                    Ok(()) => {}
                    Err(e) if e.is_cancelled() => break,
                    Err(e) => return Err(e),
                },
                Ok(None) => {
                    if !self.idle(&cancel).await {
                        break;
                    }
                }
                Err(e) if e.is_cancelled() => break,
                Err(e) if e.is_transient_io() => {
                    debug!(error = %e, "transient input error, retrying");
                    if !self.idle(&cancel).await {
                        break;
                    }
                }
                Err(e @ Error::Terminal { .. }) => {
                    info!(error = %e, "input stream closed");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        info!("keyboard loop stopped");
        Ok(())
    }

    /// Wait one poll interval; false when cancelled meanwhile
    async fn idle(&self, cancel: &CancellationToken) -> bool {
        tokio::select! {
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(self.poll_interval) => true,
        }
    }

    /// Handle one key press. Only cancellation escapes as an error.
    pub async fn handle_key(&self, key: KeyEvent, cancel: &CancellationToken) -> Result<()> {
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }
        match key.code {
            KeyCode::BackTab => self.move_focus(false).await,
            KeyCode::Tab => {
                self.move_focus(!key.modifiers.contains(KeyModifiers::SHIFT))
                    .await
            }
            KeyCode::Enter => self.activate(cancel).await,
            KeyCode::Backspace => self.edit(Edit::Backspace, cancel).await,
            KeyCode::Char(c)
                if !c.is_control()
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.edit(Edit::Insert(c), cancel).await
            }
            _ => Ok(()),
        }
    }

    async fn move_focus(&self, forward: bool) -> Result<()> {
        let moved = if forward {
            self.focus.focus_next().await
        } else {
            self.focus.focus_previous().await
        };
        match moved {
            Err(e) if e.is_cancelled() => Err(e),
            Err(e) => {
                warn!(error = %e, "focus update failed");
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }

    async fn activate(&self, cancel: &CancellationToken) -> Result<()> {
        let Some(target) = self.focus.try_get_focused_target() else {
            return Ok(());
        };
        let value = self.buffers.value(&target);

        self.dispatch(
            &target,
            EventArgs::Click {
                value: value.clone(),
            },
            cancel,
        )
        .await?;
        self.dispatch(&target, EventArgs::Change { value }, cancel)
            .await
    }

    async fn edit(&self, edit: Edit, cancel: &CancellationToken) -> Result<()> {
        let Some(target) = self.focus.try_get_focused_target() else {
            return Ok(());
        };
        match self.buffers.apply(&target, edit) {
            Some(value) => {
                self.dispatch(&target, EventArgs::Input { value }, cancel)
                    .await
            }
            None => Ok(()),
        }
    }

    /// Send `args` to the target's binding of the same kind, if it has one.
    /// Handler failures are logged; cancellation is passed on.
    async fn dispatch(
        &self,
        target: &FocusTargetSnapshot,
        args: EventArgs,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let event = args.event_name();
        let Some(binding) = target.binding(args.kind()) else {
            return Ok(());
        };
        let id = match handler_id(binding) {
            Ok(id) => id,
            Err(e) => {
                warn!(event, key = %target.key, error = %e, "dispatch rejected");
                return Ok(());
            }
        };

        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        match self.dispatcher.dispatch(id, args, cancel).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_cancelled() => Err(e),
            Err(e) => {
                warn!(event, handler_id = id.get(), error = %e, "event handler failed");
                Ok(())
            }
        }
    }
}
