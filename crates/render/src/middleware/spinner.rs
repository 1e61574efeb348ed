use crate::pipeline::{Middleware, Next, TranslationContext};
use crate::renderable::RenderableRef;
use crate::widgets::{Spinner, SpinnerStyle};
use ravel_core::{Result, ViewNode, ATTR_MESSAGE, ATTR_SPINNER, ATTR_SPINNER_STYLE};
use std::sync::Arc;
use tracing::debug;

/// `data-spinner` elements. The spinner is registered for periodic repaint.
#[derive(Debug, Default)]
pub struct SpinnerMiddleware;

impl Middleware for SpinnerMiddleware {
    fn name(&self) -> &'static str {
        "spinner"
    }

    fn translate(
        &self,
        cx: &mut TranslationContext<'_>,
        node: &ViewNode,
        next: Next<'_>,
    ) -> Result<RenderableRef> {
        let Some(element) = node.as_element().filter(|e| e.attributes().flag(ATTR_SPINNER)) else {
            return next.run(cx, node);
        };

        let style = match element.attributes().parse_opt::<SpinnerStyle>(ATTR_SPINNER_STYLE) {
            Ok(style) => style.unwrap_or_default(),
            Err(e) => {
                debug!(node = %node.describe(), error = %e, "spinner attributes rejected");
                return next.run(cx, node);
            }
        };
        let message = element.attributes().get(ATTR_MESSAGE).map(str::to_string);

        let spinner = Arc::new(Spinner::new(style, message));
        cx.animated().register(spinner.clone());
        Ok(spinner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::FallbackMiddleware;
    use crate::pipeline::Translator;
    use crate::registry::AnimatedRegistry;
    use crate::renderable::Renderable;
    use ravel_core::Element;
    use std::time::Duration;

    fn chain() -> Translator {
        Translator::new(vec![Box::new(SpinnerMiddleware), Box::new(FallbackMiddleware)]).unwrap()
    }

    #[test]
    fn test_spinner_is_registered() {
        let node = Element::new("div")
            .unwrap()
            .attr(ATTR_SPINNER, "true")
            .attr(ATTR_SPINNER_STYLE, "line")
            .attr(ATTR_MESSAGE, "Loading");
        let mut registry = AnimatedRegistry::new();
        let rendered = chain().translate(&node.into(), &mut registry).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.refresh_interval(), Some(Duration::from_millis(130)));
        assert_eq!(rendered.width(), "- Loading".len() as u16);
    }

    #[test]
    fn test_unknown_style_delegates() {
        let node = Element::new("div")
            .unwrap()
            .attr(ATTR_SPINNER, "")
            .attr(ATTR_SPINNER_STYLE, "bounce")
            .child(ViewNode::text("fallback"));
        let mut registry = AnimatedRegistry::new();
        chain().translate(&node.into(), &mut registry).unwrap();
        assert!(registry.is_empty());
    }
}
