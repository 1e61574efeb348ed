use crate::pipeline::{Middleware, Next, TranslationContext};
use crate::renderable::RenderableRef;
use crate::widgets::CodeBlock;
use ravel_core::{HighlightedCode, Result, ViewNode, ATTR_CODE_PAYLOAD};
use std::sync::Arc;
use tracing::debug;

/// Elements carrying an encoded highlighted-code payload
#[derive(Debug, Default)]
pub struct CodeBlockMiddleware;

impl Middleware for CodeBlockMiddleware {
    fn name(&self) -> &'static str {
        "code-block"
    }

    fn translate(
        &self,
        cx: &mut TranslationContext<'_>,
        node: &ViewNode,
        next: Next<'_>,
    ) -> Result<RenderableRef> {
        let Some(payload) = node
            .as_element()
            .and_then(|e| e.attributes().get(ATTR_CODE_PAYLOAD))
        else {
            return next.run(cx, node);
        };

        match HighlightedCode::decode(payload) {
            Ok(code) => Ok(Arc::new(CodeBlock::new(&code))),
            Err(e) => {
                debug!(node = %node.describe(), error = %e, "undecodable code payload");
                next.run(cx, node)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Translator;
    use crate::registry::AnimatedRegistry;
    use crate::testing::render_lines;
    use ravel_core::{Element, Error};

    fn chain() -> Translator {
        Translator::new(vec![Box::new(CodeBlockMiddleware)]).unwrap()
    }

    #[test]
    fn test_payload_renders_lines() {
        let payload = HighlightedCode::new(["fn main() {}", "// done"])
            .with_line_numbers(true)
            .encode()
            .unwrap();
        let node = Element::new("pre").unwrap().attr(ATTR_CODE_PAYLOAD, payload);
        let rendered = chain()
            .translate(&node.into(), &mut AnimatedRegistry::new())
            .unwrap();
        assert_eq!(
            render_lines(rendered.as_ref(), 20),
            vec!["1 │ fn main() {}", "2 │ // done"]
        );
    }

    #[test]
    fn test_bad_payload_delegates() {
        let node = Element::new("pre").unwrap().attr(ATTR_CODE_PAYLOAD, "%%%");
        let err = chain()
            .translate(&node.into(), &mut AnimatedRegistry::new())
            .unwrap_err();
        assert!(matches!(err, Error::UnhandledNode { .. }));
    }
}
