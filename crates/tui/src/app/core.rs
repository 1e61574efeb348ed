use super::render::{RenderChannel, RenderRequest};
use crate::dispatch::EventDispatcher;
use crate::focus::FocusManager;
use crate::keyboard::{EditBuffers, KeyboardEventManager};
use crate::terminal::{KeySource, Painter};
use anyhow::Context;
use ravel_config::Settings;
use ravel_core::{Result, ViewNode};
use ravel_render::{AnimatedRegistry, RenderableRef, Translator};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Focus moves waiting on a repaint at any one time
const RENDER_REQUEST_CAPACITY: usize = 8;

/// Ties snapshots, focus, input and painting together
pub struct App<P> {
    translator: Translator,
    registry: AnimatedRegistry,
    focus: Arc<FocusManager>,
    buffers: Arc<EditBuffers>,
    painter: P,
    snapshot: Option<ViewNode>,
    frame: Option<RenderableRef>,
    render_requests: mpsc::Receiver<RenderRequest>,
    poll_interval: Duration,
    animation_interval: Duration,
}

impl<P: Painter> App<P> {
    pub fn new(translator: Translator, painter: P, settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let (channel, render_requests) = RenderChannel::new(RENDER_REQUEST_CAPACITY);
        let focus = FocusManager::new(settings.render.auto_focus)
            .with_render_requester(Arc::new(channel));

        Ok(Self {
            translator,
            registry: AnimatedRegistry::new(),
            focus: Arc::new(focus),
            buffers: Arc::new(EditBuffers::new()),
            painter,
            snapshot: None,
            frame: None,
            render_requests,
            poll_interval: settings.input.poll_interval(),
            animation_interval: settings.render.animation_interval(),
        })
    }

    pub fn focus(&self) -> &Arc<FocusManager> {
        &self.focus
    }

    pub fn buffers(&self) -> &Arc<EditBuffers> {
        &self.buffers
    }

    /// Animated renderables of the frame on screen
    pub fn registry(&self) -> &AnimatedRegistry {
        &self.registry
    }

    pub fn painter(&self) -> &P {
        &self.painter
    }

    /// Keyboard loop sharing this host's focus and edit buffers
    pub fn keyboard<S: KeySource>(
        &self,
        source: S,
        dispatcher: Arc<dyn EventDispatcher>,
    ) -> KeyboardEventManager<S> {
        KeyboardEventManager::new(
            source,
            self.focus.clone(),
            self.buffers.clone(),
            dispatcher,
            self.poll_interval,
        )
    }

    /// Take a new view tree: refresh focus targets, drop edit buffers of
    /// vanished targets, then translate and paint.
    pub fn apply_snapshot(&mut self, root: ViewNode) -> Result<()> {
        self.focus.update_targets(&root);
        self.buffers.retain(&self.focus.keys());
        self.snapshot = Some(root);
        self.render()
    }

    /// Translate the current snapshot with the current focus and paint it.
    /// A failed translation leaves the previous frame in place.
    pub fn render(&mut self) -> Result<()> {
        let Some(root) = &self.snapshot else {
            return Ok(());
        };
        let focused = self.focus.current_key();
        let mut registry = AnimatedRegistry::new();
        let frame = self
            .translator
            .translate_with_focus(root, &mut registry, focused.as_deref())?;

        debug!(animated = registry.len(), "render pass complete");
        self.registry = registry;
        self.frame = Some(frame);
        self.repaint()
    }

    /// Repaint period for the frame on screen: the fastest rate its animated
    /// renderables ask for, never faster than the configured interval
    pub fn animation_period(&self) -> Duration {
        self.registry
            .refresh_interval()
            .map_or(self.animation_interval, |wanted| wanted.max(self.animation_interval))
    }

    /// Paint the current frame again without translating
    pub fn repaint(&mut self) -> Result<()> {
        match &self.frame {
            Some(frame) => self.painter.paint(frame.as_ref()),
            None => Ok(()),
        }
    }

    /// Drive the host until cancelled, the snapshot stream ends or the
    /// keyboard loop stops.
    pub async fn run<S>(
        mut self,
        mut snapshots: mpsc::Receiver<ViewNode>,
        keyboard: KeyboardEventManager<S>,
        cancel: CancellationToken,
    ) -> anyhow::Result<()>
    where
        S: KeySource + 'static,
    {
        let input_cancel = cancel.child_token();
        let mut input = tokio::spawn(keyboard.run(input_cancel.clone()));
        let mut input_done = false;

        let mut period = self.animation_period();
        let mut animation = ticker(period);
        info!("host loop started");

        let outcome = loop {
            tokio::select! {
                _ = cancel.cancelled() => break Ok(()),

                snapshot = snapshots.recv() => match snapshot {
                    Some(root) => {
                        if let Err(e) = self.apply_snapshot(root) {
                            error!(error = %e, "render pass failed, keeping previous frame");
                        }
                        retime(&mut animation, &mut period, self.animation_period());
                    }
                    None => {
                        info!("snapshot stream closed");
                        break Ok(());
                    }
                },

                Some(ack) = self.render_requests.recv() => {
                    if let Err(e) = self.render() {
                        error!(error = %e, "focus render failed, keeping previous frame");
                    }
                    let _ = ack.send(());
                    retime(&mut animation, &mut period, self.animation_period());
                }

                _ = animation.tick() => {
                    if !self.registry.is_empty() {
                        if let Err(e) = self.repaint() {
                            warn!(error = %e, "animation repaint failed");
                        }
                    }
                }

                joined = &mut input => {
                    input_done = true;
                    break match joined {
                        Ok(result) => result.context("keyboard loop failed"),
                        Err(e) => {
                            Err(anyhow::Error::new(e).context("keyboard task did not complete"))
                        }
                    };
                }
            }
        };

        input_cancel.cancel();
        // unblock a keyboard loop waiting on a focus render
        self.render_requests.close();
        while let Ok(ack) = self.render_requests.try_recv() {
            drop(ack);
        }
        if !input_done {
            if let Err(e) = input.await {
                warn!(error = %e, "keyboard task did not shut down cleanly");
            }
        }

        info!("host loop stopped");
        outcome
    }
}

fn ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Restart `animation` when the frame on screen wants a different period
fn retime(animation: &mut Interval, period: &mut Duration, wanted: Duration) {
    if wanted != *period {
        debug!(?wanted, "animation period changed");
        *period = wanted;
        *animation = ticker(wanted);
    }
}
