//! Chain-of-responsibility translation from view nodes to renderables.
//!
//! Middleware run in registration order. Each one either returns a renderable
//! or hands the node to `next`, the remainder of the chain. Children are
//! translated by calling back into [`TranslationContext::translate`], which
//! re-enters the chain from the top, so ordering guarantees hold per call
//! rather than per tree depth.

use crate::middleware;
use crate::registry::AnimatedRegistry;
use crate::renderable::RenderableRef;
use ravel_core::{Error, Result, ViewNode};
use std::fmt;
use tracing::trace;

/// Deepest nesting a single pass will follow before giving up
pub const MAX_DEPTH: usize = 256;

pub trait Middleware: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn translate(
        &self,
        cx: &mut TranslationContext<'_>,
        node: &ViewNode,
        next: Next<'_>,
    ) -> Result<RenderableRef>;
}

/// The rest of the chain after the current middleware
#[derive(Clone, Copy)]
pub struct Next<'a> {
    remaining: &'a [Box<dyn Middleware>],
}

impl<'a> Next<'a> {
    fn new(remaining: &'a [Box<dyn Middleware>]) -> Self {
        Self { remaining }
    }

    /// Delegate `node` to the remaining middleware
    pub fn run(self, cx: &mut TranslationContext<'_>, node: &ViewNode) -> Result<RenderableRef> {
        match self.remaining.split_first() {
            Some((head, rest)) => {
                trace!(middleware = head.name(), node = %node.describe(), "translating");
                head.translate(cx, node, Next::new(rest))
            }
            None => Err(Error::unhandled_node(node.describe())),
        }
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.remaining.iter().map(|m| m.name()))
            .finish()
    }
}

/// State threaded through one translation pass
pub struct TranslationContext<'a> {
    translator: &'a Translator,
    animated: &'a mut AnimatedRegistry,
    focused_key: Option<&'a str>,
    depth: usize,
}

impl<'a> TranslationContext<'a> {
    /// Translate `node` through the full chain, starting from the first
    /// middleware
    pub fn translate(&mut self, node: &ViewNode) -> Result<RenderableRef> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::translation(format!(
                "view tree nests deeper than {MAX_DEPTH} levels at {}",
                node.describe()
            )));
        }
        let translator: &'a Translator = self.translator;
        self.depth += 1;
        let result = Next::new(&translator.middleware).run(self, node);
        self.depth -= 1;
        result
    }

    /// Registry of animated renderables discovered during this pass
    pub fn animated(&mut self) -> &mut AnimatedRegistry {
        &mut *self.animated
    }

    /// Focus key the host currently considers focused, if any
    pub fn focused_key(&self) -> Option<&str> {
        self.focused_key
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Ordered middleware chain, fixed at construction
#[derive(Debug)]
pub struct Translator {
    middleware: Vec<Box<dyn Middleware>>,
}

impl Translator {
    /// Build a chain. An empty chain is a configuration error.
    pub fn new(middleware: Vec<Box<dyn Middleware>>) -> Result<Self> {
        if middleware.is_empty() {
            return Err(Error::configuration(
                "translation pipeline needs at least one middleware",
            ));
        }
        Ok(Self { middleware })
    }

    /// Chain with every built-in middleware, ending in the generic fallback
    pub fn with_default_middleware() -> Self {
        Self {
            middleware: middleware::default_middleware(),
        }
    }

    pub fn middleware_names(&self) -> Vec<&'static str> {
        self.middleware.iter().map(|m| m.name()).collect()
    }

    /// Translate a whole tree. The registry is cleared first and holds the
    /// animated renderables of this pass afterwards.
    pub fn translate(
        &self,
        node: &ViewNode,
        animated: &mut AnimatedRegistry,
    ) -> Result<RenderableRef> {
        self.translate_with_focus(node, animated, None)
    }

    pub fn translate_with_focus(
        &self,
        node: &ViewNode,
        animated: &mut AnimatedRegistry,
        focused_key: Option<&str>,
    ) -> Result<RenderableRef> {
        animated.clear();
        let mut cx = TranslationContext {
            translator: self,
            animated,
            focused_key,
            depth: 0,
        };
        cx.translate(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Spinner, SpinnerStyle, Text};
    use proptest::prelude::*;
    use ravel_core::Element;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts invocations and either answers or delegates
    #[derive(Debug)]
    struct Probe {
        calls: Arc<AtomicUsize>,
        handles: bool,
    }

    impl Probe {
        fn boxed(handles: bool) -> (Box<dyn Middleware>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Box::new(Probe {
                    calls: calls.clone(),
                    handles,
                }),
                calls,
            )
        }
    }

    impl Middleware for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn translate(
            &self,
            cx: &mut TranslationContext<'_>,
            node: &ViewNode,
            next: Next<'_>,
        ) -> Result<RenderableRef> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.handles {
                Ok(Arc::new(Text::new("handled")))
            } else {
                next.run(cx, node)
            }
        }
    }

    /// Translates every child of an element and registers a spinner
    #[derive(Debug)]
    struct Recursive;

    impl Middleware for Recursive {
        fn name(&self) -> &'static str {
            "recursive"
        }

        fn translate(
            &self,
            cx: &mut TranslationContext<'_>,
            node: &ViewNode,
            next: Next<'_>,
        ) -> Result<RenderableRef> {
            let Some(element) = node.as_element() else {
                return next.run(cx, node);
            };
            for child in element.children() {
                cx.translate(child)?;
            }
            let spinner = Arc::new(Spinner::new(SpinnerStyle::Dots, None));
            cx.animated().register(spinner.clone());
            Ok(spinner)
        }
    }

    fn node() -> ViewNode {
        Element::new("div").unwrap().into()
    }

    #[test]
    fn test_empty_chain_is_a_configuration_error() {
        assert!(matches!(
            Translator::new(Vec::new()),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_unhandled_node_names_the_node() {
        let (probe, calls) = Probe::boxed(false);
        let translator = Translator::new(vec![probe]).unwrap();
        let err = translator
            .translate(&node(), &mut AnimatedRegistry::new())
            .unwrap_err();
        assert!(matches!(&err, Error::UnhandledNode { node } if node == "<div>"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_direct_return_short_circuits_later_middleware() {
        let (first, first_calls) = Probe::boxed(false);
        let (second, second_calls) = Probe::boxed(true);
        let (third, third_calls) = Probe::boxed(true);
        let translator = Translator::new(vec![first, second, third]).unwrap();

        translator
            .translate(&node(), &mut AnimatedRegistry::new())
            .unwrap();

        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
        assert_eq!(third_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_children_reenter_the_chain_from_the_top() {
        let (probe, calls) = Probe::boxed(false);
        let translator = Translator::new(vec![probe, Box::new(Recursive)]).unwrap();
        let tree: ViewNode = Element::new("div")
            .unwrap()
            .child(Element::new("a").unwrap())
            .child(Element::new("b").unwrap().child(Element::new("c").unwrap()))
            .into();

        let mut registry = AnimatedRegistry::new();
        translator.translate(&tree, &mut registry).unwrap();

        // root, a, b, c each pass through the probe once
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_registry_is_cleared_on_entry() {
        let translator = Translator::new(vec![Box::new(Recursive)]).unwrap();
        let mut registry = AnimatedRegistry::new();
        translator.translate(&node(), &mut registry).unwrap();
        translator.translate(&node(), &mut registry).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_runaway_nesting_is_reported() {
        let translator = Translator::new(vec![Box::new(Recursive)]).unwrap();
        let mut tree = Element::new("leaf").unwrap();
        for _ in 0..MAX_DEPTH {
            tree = Element::new("div").unwrap().child(tree);
        }
        let err = translator
            .translate(&tree.into(), &mut AnimatedRegistry::new())
            .unwrap_err();
        assert!(matches!(err, Error::Translation { .. }));
    }

    proptest! {
        /// If the last middleware never delegates, the unhandled-node error
        /// can never surface regardless of what precedes it.
        #[test]
        fn prop_terminal_handler_prevents_fallback_error(
            delegating in proptest::collection::vec(any::<bool>(), 0..6)
        ) {
            let mut chain: Vec<Box<dyn Middleware>> = delegating
                .iter()
                .map(|handles| Probe::boxed(*handles).0)
                .collect();
            chain.push(Probe::boxed(true).0);
            let translator = Translator::new(chain).unwrap();
            let result = translator.translate(&node(), &mut AnimatedRegistry::new());
            prop_assert!(result.is_ok());
        }

        /// Exactly the middleware up to and including the first handler run.
        #[test]
        fn prop_first_handler_wins(
            handles in proptest::collection::vec(any::<bool>(), 1..8)
        ) {
            let probes: Vec<_> = handles.iter().map(|h| Probe::boxed(*h)).collect();
            let counters: Vec<_> = probes.iter().map(|(_, c)| c.clone()).collect();
            let translator = Translator::new(probes.into_iter().map(|(m, _)| m).collect()).unwrap();
            let _ = translator.translate(&node(), &mut AnimatedRegistry::new());

            let first = handles.iter().position(|h| *h);
            for (index, counter) in counters.iter().enumerate() {
                let expected = match first {
                    Some(first) if index > first => 0,
                    _ => 1,
                };
                prop_assert_eq!(counter.load(Ordering::SeqCst), expected);
            }
        }
    }
}
