use async_trait::async_trait;
use crossterm::{
    event::{self, Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use ravel_config::RenderSettings;
use ravel_core::{Error, Result};
use ravel_render::Renderable;
use std::io;
use std::time::Duration;

/// Non-blocking source of key presses
#[async_trait]
pub trait KeySource: Send + Sync {
    /// The next pending key, or `None` when nothing is waiting. A closed
    /// input stream is reported as an end-of-file terminal error.
    async fn next_key(&mut self) -> Result<Option<KeyEvent>>;
}

/// Receives each finished renderable tree for output
pub trait Painter: Send {
    fn paint(&mut self, root: &dyn Renderable) -> Result<()>;
}

/// Keys read from the process terminal through crossterm
#[derive(Debug, Default)]
pub struct CrosstermKeys;

fn join_error(operation: &str, e: tokio::task::JoinError) -> Error {
    Error::terminal(operation, io::Error::other(e))
}

#[async_trait]
impl KeySource for CrosstermKeys {
    async fn next_key(&mut self) -> Result<Option<KeyEvent>> {
        // poll/read block, so they run on the blocking pool
        let ready = tokio::task::spawn_blocking(|| event::poll(Duration::ZERO))
            .await
            .map_err(|e| join_error("poll", e))?
            .map_err(|e| Error::terminal("poll", e))?;
        if !ready {
            return Ok(None);
        }

        let event = tokio::task::spawn_blocking(event::read)
            .await
            .map_err(|e| join_error("read", e))?
            .map_err(|e| Error::terminal("read", e))?;
        Ok(match event {
            Event::Key(key) => Some(key),
            _ => None,
        })
    }
}

/// Paints onto stderr in raw mode, optionally on the alternate screen.
/// The terminal is restored when the painter is dropped.
pub struct TerminalPainter {
    terminal: Terminal<CrosstermBackend<io::Stderr>>,
    alternate_screen: bool,
}

impl TerminalPainter {
    pub fn new(settings: &RenderSettings) -> Result<Self> {
        enable_raw_mode().map_err(|e| Error::terminal("enable raw mode", e))?;
        let mut stderr = io::stderr();
        if settings.alternate_screen {
            execute!(stderr, EnterAlternateScreen)
                .map_err(|e| Error::terminal("enter alternate screen", e))?;
        }

        let terminal = Terminal::new(CrosstermBackend::new(stderr))
            .map_err(|e| Error::terminal("create terminal", e))?;

        Ok(Self {
            terminal,
            alternate_screen: settings.alternate_screen,
        })
    }
}

impl Painter for TerminalPainter {
    fn paint(&mut self, root: &dyn Renderable) -> Result<()> {
        self.terminal
            .draw(|frame| {
                let area = frame.area();
                root.render(area, frame.buffer_mut());
            })
            .map_err(|e| Error::terminal("draw", e))?;
        Ok(())
    }
}

impl Drop for TerminalPainter {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        if self.alternate_screen {
            let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        }
        let _ = self.terminal.show_cursor();
    }
}
