mod raster;

pub use raster::PixelCanvas;

use crate::coords::DeviceExtent;

/// A raster surface the engine paints its selected pixel into.
pub trait Canvas {
    /// Current pixel dimensions. Queried on every operation, never cached.
    fn extent(&self) -> DeviceExtent;

    fn clear(&mut self);

    /// Lights a single pixel. Coordinates outside the extent are the
    /// canvas's to clip.
    fn paint_pixel(&mut self, x: i32, y: i32);
}
