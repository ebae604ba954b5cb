//! Dithercanvas
//!
//! Draws an image onto a canvas and presents a Floyd-Steinberg dithered copy
//! beside it. The dithering itself lives in the `step-dither` crate; this
//! library exposes the surface, pipeline and HTTP modules for the binary and
//! for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod surface;
