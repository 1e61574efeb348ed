mod core;
mod render;

pub use self::core::App;
