//! Built-in middleware.
//!
//! Each middleware recognises one attribute or tag convention of the inbound
//! view tree. Anything it cannot parse cleanly is handed to `next` untouched.

mod block;
mod code;
mod container;
mod focusable;
mod scrollable;
mod spinner;
mod styled;
mod text;

pub use block::{BlockMiddleware, FallbackMiddleware};
pub use code::CodeBlockMiddleware;
pub use container::{ColumnsMiddleware, PanelMiddleware};
pub use focusable::FocusableMiddleware;
pub use scrollable::ScrollableMiddleware;
pub use spinner::SpinnerMiddleware;
pub use styled::StyledTextMiddleware;
pub use text::{LineBreakMiddleware, TextNodeMiddleware};

use crate::pipeline::Middleware;

/// Every built-in middleware in registration order. The fallback is last,
/// so unknown elements render their children instead of failing.
pub fn default_middleware() -> Vec<Box<dyn Middleware>> {
    vec![
        Box::new(TextNodeMiddleware),
        Box::new(LineBreakMiddleware),
        Box::new(SpinnerMiddleware),
        Box::new(CodeBlockMiddleware),
        Box::new(ScrollableMiddleware),
        Box::new(PanelMiddleware),
        Box::new(ColumnsMiddleware),
        Box::new(FocusableMiddleware),
        Box::new(StyledTextMiddleware),
        Box::new(BlockMiddleware),
        Box::new(FallbackMiddleware),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let names: Vec<_> = default_middleware().iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec![
                "text-node",
                "line-break",
                "spinner",
                "code-block",
                "scrollable",
                "panel",
                "columns",
                "focusable",
                "styled-text",
                "block",
                "fallback",
            ]
        );
    }
}
