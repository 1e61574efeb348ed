use parking_lot::Mutex;
use ravel_core::FocusTargetSnapshot;
use std::collections::{HashMap, HashSet};

/// One keystroke's effect on an edit buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Backspace,
    Insert(char),
}

#[derive(Debug, Default)]
struct Tables {
    buffers: HashMap<String, String>,
    dirty: HashSet<String>,
}

impl Tables {
    fn buffer_for(&mut self, target: &FocusTargetSnapshot) -> &mut String {
        self.buffers
            .entry(target.key.clone())
            .or_insert_with(|| target.initial_value().to_string())
    }
}

/// Per-target text buffers keyed by focus key.
///
/// A buffer follows the view-supplied `value` until the user edits it; from
/// then on the local edits win. Buffers and the dirty set share one lock.
#[derive(Debug, Default)]
pub struct EditBuffers {
    tables: Mutex<Tables>,
}

impl EditBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reseed the newly focused target from its initial value unless it has
    /// been edited
    pub fn on_focus_changed(&self, target: Option<&FocusTargetSnapshot>) {
        let Some(target) = target else {
            return;
        };
        let mut tables = self.tables.lock();
        if !tables.dirty.contains(&target.key) {
            tables
                .buffers
                .insert(target.key.clone(), target.initial_value().to_string());
        }
    }

    /// Current value, creating the buffer on first use
    pub fn value(&self, target: &FocusTargetSnapshot) -> String {
        self.tables.lock().buffer_for(target).clone()
    }

    /// Apply `edit`; returns the new value when the buffer changed
    pub fn apply(&self, target: &FocusTargetSnapshot, edit: Edit) -> Option<String> {
        let mut tables = self.tables.lock();
        let buffer = tables.buffer_for(target);
        let changed = match edit {
            Edit::Backspace => buffer.pop().is_some(),
            Edit::Insert(c) => {
                buffer.push(c);
                true
            }
        };
        if !changed {
            return None;
        }
        let value = buffer.clone();
        tables.dirty.insert(target.key.clone());
        Some(value)
    }

    pub fn is_dirty(&self, key: &str) -> bool {
        self.tables.lock().dirty.contains(key)
    }

    /// Drop buffers whose key is not in `keys`
    pub fn retain<S: AsRef<str>>(&self, keys: &[S]) {
        let live: HashSet<&str> = keys.iter().map(|k| k.as_ref()).collect();
        let mut tables = self.tables.lock();
        tables.buffers.retain(|key, _| live.contains(key.as_str()));
        tables.dirty.retain(|key| live.contains(key.as_str()));
    }

    pub fn len(&self) -> usize {
        self.tables.lock().buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
