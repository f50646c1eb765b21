//! Error types for the coordinate pipeline and its surroundings.

use crate::coords::Axis;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A typed coordinate could not be read as a number.
    #[error("invalid {axis} coordinate {input:?}: please enter a valid number")]
    InvalidInput { axis: Axis, input: String },

    /// A world coordinate lies outside the configured bounds.
    #[error("{axis} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        axis: Axis,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The device extent cannot be normalized (a dimension of one pixel or less).
    #[error("degenerate device extent {width}x{height}: both dimensions must exceed one pixel")]
    DegenerateExtent { width: u32, height: u32 },

    #[error("invalid world bounds: {0}")]
    InvalidBounds(String),

    #[error("failed to read config file: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("failed to write snapshot: {0}")]
    Snapshot(#[from] image::ImageError),
}
