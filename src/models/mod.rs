pub mod canvas_spec;
pub mod config;

pub use canvas_spec::CanvasSpec;
pub use config::{AppConfig, EdgeModeSetting};
