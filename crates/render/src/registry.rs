//! Per-pass set of renderables that need periodic repaint.
//!
//! The registry is cleared when a translation pass starts, not when it ends,
//! so early returns inside middleware never leave stale members behind for
//! the next pass.

use crate::renderable::AnimatedRenderable;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct AnimatedRegistry {
    members: Vec<Arc<dyn AnimatedRenderable>>,
}

/// Position in the registry a middleware can roll back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

impl AnimatedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, renderable: Arc<dyn AnimatedRenderable>) {
        self.members.push(renderable);
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.members.len())
    }

    /// Drop members registered after `checkpoint`; used when a subtree that
    /// registered animations is abandoned in favour of another middleware
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.members.truncate(checkpoint.0);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn AnimatedRenderable>> {
        self.members.iter()
    }

    /// Fastest refresh interval requested by any member
    pub fn refresh_interval(&self) -> Option<Duration> {
        self.members.iter().map(|m| m.refresh_interval()).min()
    }
}
