pub mod canvas;

pub use canvas::{handle_canvas, handle_config, handle_not_found};
