pub mod code;
pub mod field;
pub mod layout;
pub mod panel;
pub mod scroll;
pub mod spinner;
pub mod text;

pub use code::CodeBlock;
pub use field::{Field, FieldKind};
pub use layout::{Columns, Flow, FlowItem, Inline, Placement, Stack};
pub use panel::Panel;
pub use scroll::{ScrollGeometry, ScrollableView, Scrollbar, ScrollbarStyle};
pub use spinner::{Spinner, SpinnerStyle};
pub use text::{Blank, Text};
