//! Attribute names and event kinds shared with the component framework.
// Focus contract
pub const ATTR_FOCUSABLE: &str = "data-focusable";
pub const ATTR_FOCUS_KEY: &str = "data-focus-key";
pub const ATTR_FOCUS_ORDER: &str = "data-focus-order";
pub const ATTR_FOCUSED: &str = "data-focused";

// Edit buffer seed
pub const ATTR_VALUE: &str = "value";

// Scrollable container
pub const ATTR_SCROLLABLE: &str = "data-scrollable";
pub const ATTR_ITEMS_COUNT: &str = "itemsCount";
pub const ATTR_OFFSET: &str = "offset";
pub const ATTR_PAGE_SIZE: &str = "pageSize";
pub const ATTR_EMBEDDED_MODE: &str = "embeddedMode";

// Scrollbar marker
pub const ATTR_SCROLLBAR: &str = "data-scrollbar";
pub const ATTR_TRACK_CHAR: &str = "trackChar";
pub const ATTR_THUMB_CHAR: &str = "thumbChar";
pub const ATTR_TRACK_COLOR: &str = "trackColor";
pub const ATTR_THUMB_COLOR: &str = "thumbColor";
pub const ATTR_MIN_THUMB_HEIGHT: &str = "minThumbHeight";

// Presentation hints
pub const ATTR_SPINNER: &str = "data-spinner";
pub const ATTR_SPINNER_STYLE: &str = "data-spinner-style";
pub const ATTR_MESSAGE: &str = "data-message";
pub const ATTR_PANEL: &str = "data-panel";
pub const ATTR_TITLE: &str = "data-title";
pub const ATTR_BORDER_COLOR: &str = "data-border-color";
pub const ATTR_COLUMNS: &str = "data-columns";
pub const ATTR_CODE_PAYLOAD: &str = "data-code-payload";
pub const ATTR_FOREGROUND: &str = "data-fg";
pub const ATTR_BACKGROUND: &str = "data-bg";
pub const ATTR_DISPLAY: &str = "data-display";

// Event kinds, lowercase as bound by the framework
pub const EVENT_CLICK: &str = "onclick";
pub const EVENT_CHANGE: &str = "onchange";
pub const EVENT_INPUT: &str = "oninput";
