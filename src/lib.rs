//! Device, normalized device and world coordinates for a raster canvas.
//!
//! [`TransformEngine`] converts points between the four spaces and keeps a
//! single selected pixel painted on a [`Canvas`]. The [`run`] front end
//! presents a [`PixelCanvas`] in a window and feeds it pointer and keyboard
//! input.

mod app;
mod app_state;
pub mod canvas;
pub mod config;
pub mod coords;
pub mod engine;
pub mod error;
mod event_handler;
pub mod input;
mod renderer;
pub mod report;
mod state;
mod update_logic;
mod vertex;

// Re-export the main public interface
pub use app::run;
pub use canvas::{Canvas, PixelCanvas};
pub use config::Config;
pub use coords::{
    CoordinateTransform, Device, DeviceExtent, NdcCentered, NdcCorner, Point2D, World,
    WorldBounds,
};
pub use engine::TransformEngine;
pub use error::{Error, Result};
pub use input::{InputEvent, Outcome};
pub use report::ConversionResult;
