//! Keyboard focus over the focusable nodes of the latest view tree.
//!
//! Targets are rebuilt from every snapshot. The focused key always names a
//! target of the most recent snapshot: when it disappears focus moves to the
//! target now at the same position, or to nothing when none remain.

use async_trait::async_trait;
use parking_lot::Mutex;
use ravel_core::{Error, FocusTargetSnapshot, Result, ViewNode};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace, warn};

/// Asks the host for a fresh render and resolves once it has been painted
#[async_trait]
pub trait RenderRequester: Send + Sync {
    async fn request_render(&self) -> Result<()>;
}

type Listener = Arc<dyn Fn(Option<&FocusTargetSnapshot>) + Send + Sync>;
type Listeners = Mutex<Vec<(u64, Listener)>>;

/// Keeps a focus listener registered; dropping it unsubscribes
#[must_use = "dropping the subscription removes the listener"]
pub struct FocusSubscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl std::fmt::Debug for FocusSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusSubscription").field("id", &self.id).finish()
    }
}

impl Drop for FocusSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.lock().retain(|(id, _)| *id != self.id);
        }
    }
}

#[derive(Debug, Default)]
struct FocusState {
    targets: Vec<FocusTargetSnapshot>,
    current: Option<String>,
}

impl FocusState {
    fn index_of(&self, key: &str) -> Option<usize> {
        self.targets.iter().position(|t| t.key == key)
    }

    fn current_index(&self) -> Option<usize> {
        self.current.as_deref().and_then(|key| self.index_of(key))
    }

    fn target_at(&self, index: Option<usize>) -> Option<FocusTargetSnapshot> {
        index.and_then(|i| self.targets.get(i)).cloned()
    }
}

pub struct FocusManager {
    state: Mutex<FocusState>,
    listeners: Arc<Listeners>,
    next_listener: AtomicU64,
    render: Option<Arc<dyn RenderRequester>>,
    auto_focus: bool,
}

impl std::fmt::Debug for FocusManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("FocusManager")
            .field("targets", &state.targets.len())
            .field("current", &state.current)
            .field("auto_focus", &self.auto_focus)
            .finish()
    }
}

/// Focusable elements of `root` in traversal order.
///
/// Nodes with `data-focus-order` come first, ascending; the rest follow in
/// document order. Nodes without a key are skipped, as is every node after
/// the first that reuses a key. An unparsable order counts as unordered.
pub fn collect_targets(root: &ViewNode) -> Vec<FocusTargetSnapshot> {
    let Some(root) = root.as_element() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for element in std::iter::once(root).chain(root.descendants()) {
        if !element.is_focusable() {
            continue;
        }
        let target = match FocusTargetSnapshot::from_element(element) {
            Ok(target) => target,
            Err(e) => {
                warn!(error = %e, "focusable node skipped");
                continue;
            }
        };
        if !seen.insert(target.key.clone()) {
            warn!(key = %target.key, "focus key used by more than one node, keeping the first");
            continue;
        }
        let order = target.focus_order().unwrap_or_else(|e| {
            warn!(key = %target.key, error = %e, "focus order ignored");
            None
        });
        ordered.push((order, target));
    }

    // stable sort keeps document order among equal positions
    ordered.sort_by_key(|(order, _)| (order.is_none(), order.unwrap_or_default()));
    ordered.into_iter().map(|(_, target)| target).collect()
}

impl FocusManager {
    pub fn new(auto_focus: bool) -> Self {
        Self {
            state: Mutex::new(FocusState::default()),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener: AtomicU64::new(0),
            render: None,
            auto_focus,
        }
    }

    #[must_use]
    pub fn with_render_requester(mut self, render: Arc<dyn RenderRequester>) -> Self {
        self.render = Some(render);
        self
    }

    /// Called synchronously, outside any internal lock, whenever the focused
    /// key changes. The listener stays registered while the returned
    /// subscription is alive.
    pub fn subscribe<F>(&self, listener: F) -> FocusSubscription
    where
        F: Fn(Option<&FocusTargetSnapshot>) + Send + Sync + 'static,
    {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, Arc::new(listener)));
        FocusSubscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Rebuild the traversal order from a new snapshot
    pub fn update_targets(&self, root: &ViewNode) {
        let targets = collect_targets(root);

        let changed = {
            let mut state = self.state.lock();
            let previous_key = state.current.take();
            let previous_index = previous_key.as_deref().and_then(|key| state.index_of(key));
            state.targets = targets;

            state.current = match previous_key.as_deref() {
                Some(key) if state.index_of(key).is_some() => Some(key.to_string()),
                Some(_) => previous_index
                    .map(|i| i.min(state.targets.len().saturating_sub(1)))
                    .and_then(|i| state.targets.get(i))
                    .map(|t| t.key.clone()),
                None if self.auto_focus => state.targets.first().map(|t| t.key.clone()),
                None => None,
            };

            debug!(
                targets = state.targets.len(),
                focused = ?state.current,
                "focus targets updated"
            );
            (state.current != previous_key).then(|| state.target_at(state.current_index()))
        };

        if let Some(target) = changed {
            self.notify(target.as_ref());
        }
    }

    /// Move focus forward, wrapping from the last target to the first
    pub async fn focus_next(&self) -> Result<()> {
        self.step(true).await
    }

    /// Move focus backward, wrapping from the first target to the last
    pub async fn focus_previous(&self) -> Result<()> {
        self.step(false).await
    }

    async fn step(&self, forward: bool) -> Result<()> {
        let target = {
            let mut state = self.state.lock();
            let len = state.targets.len();
            if len == 0 {
                return Ok(());
            }
            let next = match (state.current_index(), forward) {
                (Some(i), true) => (i + 1) % len,
                (Some(i), false) => (i + len - 1) % len,
                (None, true) => 0,
                (None, false) => len - 1,
            };
            let target = state.targets[next].clone();
            if state.current.as_deref() == Some(target.key.as_str()) {
                return Ok(());
            }
            state.current = Some(target.key.clone());
            target
        };

        trace!(key = %target.key, "focus moved");
        self.notify(Some(&target));
        if let Some(render) = &self.render {
            render.request_render().await?;
        }
        Ok(())
    }

    /// Focus the target with `key`; unknown keys are a configuration error
    pub fn focus_key(&self, key: &str) -> Result<()> {
        let target = {
            let mut state = self.state.lock();
            let index = state
                .index_of(key)
                .ok_or_else(|| Error::configuration(format!("no focusable node has key '{key}'")))?;
            if state.current.as_deref() == Some(key) {
                return Ok(());
            }
            state.current = Some(key.to_string());
            state.targets[index].clone()
        };
        self.notify(Some(&target));
        Ok(())
    }

    pub fn try_get_focused_target(&self) -> Option<FocusTargetSnapshot> {
        let state = self.state.lock();
        state.target_at(state.current_index())
    }

    pub fn current_key(&self) -> Option<String> {
        self.state.lock().current.clone()
    }

    /// Keys of the current targets in traversal order
    pub fn keys(&self) -> Vec<String> {
        self.state
            .lock()
            .targets
            .iter()
            .map(|t| t.key.clone())
            .collect()
    }

    fn notify(&self, target: Option<&FocusTargetSnapshot>) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use ravel_core::{Element, ATTR_FOCUSABLE, ATTR_FOCUS_KEY, ATTR_FOCUS_ORDER};
    use std::sync::atomic::AtomicUsize;

    fn focusable(key: &str) -> Element {
        Element::new("input")
            .unwrap()
            .attr(ATTR_FOCUSABLE, "true")
            .attr(ATTR_FOCUS_KEY, key)
    }

    fn tree(keys: &[&str]) -> ViewNode {
        Element::new("div")
            .unwrap()
            .children_from(keys.iter().map(|k| focusable(k).into()))
            .into()
    }

    fn manager(keys: &[&str]) -> FocusManager {
        let manager = FocusManager::new(false);
        manager.update_targets(&tree(keys));
        manager
    }

    #[tokio::test]
    async fn test_next_wraps_from_last_to_first() {
        let focus = manager(&["A", "B", "C"]);
        focus.focus_key("C").unwrap();
        focus.focus_next().await.unwrap();
        assert_eq!(focus.current_key().as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_previous_wraps_from_first_to_last() {
        let focus = manager(&["A", "B", "C"]);
        focus.focus_key("A").unwrap();
        focus.focus_previous().await.unwrap();
        assert_eq!(focus.current_key().as_deref(), Some("C"));
    }

    #[tokio::test]
    async fn test_first_move_without_focus() {
        let focus = manager(&["A", "B"]);
        assert!(focus.try_get_focused_target().is_none());
        focus.focus_previous().await.unwrap();
        assert_eq!(focus.current_key().as_deref(), Some("B"));
    }

    #[test]
    fn test_auto_focus_picks_first_target() {
        let focus = FocusManager::new(true);
        focus.update_targets(&tree(&["x", "y"]));
        assert_eq!(focus.current_key().as_deref(), Some("x"));
    }

    #[test]
    fn test_explicit_order_precedes_document_order() {
        let root: ViewNode = Element::new("div")
            .unwrap()
            .child(focusable("plain"))
            .child(focusable("second").attr(ATTR_FOCUS_ORDER, "2"))
            .child(focusable("first").attr(ATTR_FOCUS_ORDER, "1"))
            .into();
        let keys: Vec<_> = collect_targets(&root)
            .into_iter()
            .map(|t| t.key)
            .collect();
        assert_eq!(keys, vec!["first", "second", "plain"]);
    }

    #[test]
    fn test_duplicate_keys_keep_the_first_node() {
        let focus = manager(&["A", "B"]);
        focus.focus_key("B").unwrap();
        focus.update_targets(&tree(&["dup", "dup"]));
        assert_eq!(focus.keys(), vec!["dup"]);
        // "B" vanished, so focus moves to the target at its old position
        assert_eq!(focus.current_key().as_deref(), Some("dup"));
    }

    #[test]
    fn test_nodes_without_key_are_skipped() {
        let root: ViewNode = Element::new("form")
            .unwrap()
            .child(Element::new("button").unwrap().attr(ATTR_FOCUSABLE, "true"))
            .child(focusable("kept"))
            .into();
        let keys: Vec<_> = collect_targets(&root).into_iter().map(|t| t.key).collect();
        assert_eq!(keys, vec!["kept"]);
    }

    #[test]
    fn test_rejected_nodes_never_keep_stale_focus() {
        let focus = manager(&["name"]);
        focus.focus_key("name").unwrap();
        let keyless: ViewNode = Element::new("form")
            .unwrap()
            .child(Element::new("input").unwrap().attr(ATTR_FOCUSABLE, "true"))
            .into();
        focus.update_targets(&keyless);
        assert!(focus.keys().is_empty());
        assert_eq!(focus.current_key(), None);
    }

    #[test]
    fn test_unparsable_order_counts_as_unordered() {
        let root: ViewNode = Element::new("div")
            .unwrap()
            .child(focusable("odd").attr(ATTR_FOCUS_ORDER, "soon"))
            .child(focusable("first").attr(ATTR_FOCUS_ORDER, "1"))
            .into();
        let keys: Vec<_> = collect_targets(&root).into_iter().map(|t| t.key).collect();
        assert_eq!(keys, vec!["first", "odd"]);
    }

    #[test]
    fn test_vanished_focus_moves_to_same_position() {
        let focus = manager(&["A", "B", "C"]);
        focus.focus_key("B").unwrap();
        focus.update_targets(&tree(&["A", "C"]));
        assert_eq!(focus.current_key().as_deref(), Some("C"));

        focus.update_targets(&tree(&["A"]));
        assert_eq!(focus.current_key().as_deref(), Some("A"));

        focus.update_targets(&tree(&[]));
        assert_eq!(focus.current_key(), None);
        assert!(focus.try_get_focused_target().is_none());
    }

    #[test]
    fn test_listeners_fire_on_change_only() {
        let focus = manager(&["A", "B"]);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let _subscription = focus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        focus.focus_key("A").unwrap();
        focus.focus_key("A").unwrap();
        focus.update_targets(&tree(&["A", "B"]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(focus.focus_key("missing").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropped_subscription_stops_notifications() {
        let focus = manager(&["A", "B"]);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let subscription = focus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(focus.listener_count(), 1);

        drop(subscription);
        assert_eq!(focus.listener_count(), 0);
        focus.focus_key("B").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[derive(Default)]
    struct CountingRenderer(AtomicUsize);

    #[async_trait]
    impl RenderRequester for CountingRenderer {
        async fn request_render(&self) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_focus_moves_request_a_render() {
        let renderer = Arc::new(CountingRenderer::default());
        let focus = FocusManager::new(false).with_render_requester(renderer.clone());
        focus.update_targets(&tree(&["A", "B"]));
        focus.focus_next().await.unwrap();
        focus.focus_next().await.unwrap();
        assert_eq!(renderer.0.load(Ordering::SeqCst), 2);
    }

    proptest! {
        /// Stepping forward n times from index i lands on (i + n) mod len,
        /// and stepping back the same amount returns to i.
        #[test]
        fn prop_traversal_wraps(len in 1usize..8, start in 0usize..8, steps in 0usize..20) {
            let start = start % len;
            let keys: Vec<String> = (0..len).map(|i| format!("k{i}")).collect();
            let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            let focus = manager(&key_refs);
            focus.focus_key(&keys[start]).unwrap();

            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            runtime.block_on(async {
                for _ in 0..steps {
                    focus.focus_next().await.unwrap();
                }
            });
            prop_assert_eq!(focus.current_key(), Some(keys[(start + steps) % len].clone()));

            runtime.block_on(async {
                for _ in 0..steps {
                    focus.focus_previous().await.unwrap();
                }
            });
            prop_assert_eq!(focus.current_key(), Some(keys[start].clone()));
        }
    }
}
