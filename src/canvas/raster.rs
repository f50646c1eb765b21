use super::Canvas;
use crate::coords::DeviceExtent;
use crate::error::Result;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// An in-memory RGBA raster.
///
/// Keeps a dirty flag so the presenter only re-uploads after a change.
pub struct PixelCanvas {
    image: RgbaImage,
    extent: DeviceExtent,
    background: Rgba<u8>,
    foreground: Rgba<u8>,
    dirty: bool,
}

impl PixelCanvas {
    pub fn new(extent: DeviceExtent, background: [u8; 4], foreground: [u8; 4]) -> Self {
        let background = Rgba(background);
        Self {
            image: RgbaImage::from_pixel(extent.width(), extent.height(), background),
            extent,
            background,
            foreground: Rgba(foreground),
            dirty: true,
        }
    }

    /// Reallocates the raster. The previous contents are lost.
    pub fn resize(&mut self, extent: DeviceExtent) {
        if extent == self.extent {
            return;
        }
        self.image = RgbaImage::from_pixel(extent.width(), extent.height(), self.background);
        self.extent = extent;
        self.dirty = true;
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.extent.width() && y < self.extent.height() {
            Some(self.image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Coordinates of every pixel that differs from the background.
    pub fn lit_pixels(&self) -> Vec<(u32, u32)> {
        self.image
            .enumerate_pixels()
            .filter(|(_, _, px)| **px != self.background)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Returns whether the raster changed since the last call, and resets the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the raster to disk; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image.save(path.as_ref())?;
        log::info!("Saved {} canvas to {}", self.extent, path.as_ref().display());
        Ok(())
    }
}

impl Canvas for PixelCanvas {
    fn extent(&self) -> DeviceExtent {
        self.extent
    }

    fn clear(&mut self) {
        for px in self.image.pixels_mut() {
            *px = self.background;
        }
        self.dirty = true;
    }

    fn paint_pixel(&mut self, x: i32, y: i32) {
        if !self.extent.contains_pixel(x, y) {
            log::trace!("Clipped pixel ({}, {}) outside {} canvas", x, y, self.extent);
            return;
        }
        self.image.put_pixel(x as u32, y as u32, self.foreground);
        self.dirty = true;
    }
}
