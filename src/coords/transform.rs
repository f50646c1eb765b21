use super::{
    round_half_up, Device, DeviceExtent, NdcCentered, NdcCorner, Point2D, World, WorldBounds,
};

/// The conversions between the four spaces for one bounds/extent pair.
///
/// Cheap to build; the engine makes a fresh one per call so a resized canvas
/// is always picked up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    pub bounds: WorldBounds,
    pub extent: DeviceExtent,
}

impl CoordinateTransform {
    pub fn new(bounds: WorldBounds, extent: DeviceExtent) -> Self {
        Self { bounds, extent }
    }

    /// Points outside the raster map outside [0, 1]; nothing is clamped.
    pub fn device_to_ndc_corner(&self, p: Point2D<Device>) -> Point2D<NdcCorner> {
        Point2D::new(
            p.x / self.extent.max_x(),
            1.0 - p.y / self.extent.max_y(),
        )
    }

    pub fn ndc_corner_to_world(&self, p: Point2D<NdcCorner>) -> Point2D<World> {
        let b = &self.bounds;
        Point2D::new(
            p.x * b.width() + b.x_min(),
            p.y * b.height() + b.y_min(),
        )
    }

    pub fn world_to_ndc_corner(&self, p: Point2D<World>) -> Point2D<NdcCorner> {
        let b = &self.bounds;
        Point2D::new(
            (p.x - b.x_min()) / b.width(),
            (p.y - b.y_min()) / b.height(),
        )
    }

    pub fn world_to_ndc_centered(&self, p: Point2D<World>) -> Point2D<NdcCentered> {
        let b = &self.bounds;
        Point2D::new(
            2.0 * (p.x - b.x_min()) / b.width() - 1.0,
            2.0 * (p.y - b.y_min()) / b.height() - 1.0,
        )
    }

    pub fn ndc_centered_to_world(&self, p: Point2D<NdcCentered>) -> Point2D<World> {
        let b = &self.bounds;
        Point2D::new(
            b.x_min() + ((p.x + 1.0) / 2.0) * b.width(),
            b.y_min() + ((p.y + 1.0) / 2.0) * b.height(),
        )
    }

    /// Lands on a whole pixel. The result may fall outside the raster if
    /// the input lies outside [-1, 1].
    pub fn ndc_centered_to_device(&self, p: Point2D<NdcCentered>) -> Point2D<Device> {
        Point2D::new(
            round_half_up(((p.x + 1.0) / 2.0) * self.extent.max_x()),
            round_half_up(((1.0 - p.y) / 2.0) * self.extent.max_y()),
        )
    }

    /// Direct path, without going through corner NDC first.
    pub fn device_to_ndc_centered(&self, p: Point2D<Device>) -> Point2D<NdcCentered> {
        Point2D::new(
            (p.x / self.extent.max_x()) * 2.0 - 1.0,
            (1.0 - p.y / self.extent.max_y()) * 2.0 - 1.0,
        )
    }

    pub fn device_to_world(&self, p: Point2D<Device>) -> Point2D<World> {
        self.ndc_corner_to_world(self.device_to_ndc_corner(p))
    }

    pub fn world_to_device(&self, p: Point2D<World>) -> Point2D<Device> {
        self.ndc_centered_to_device(self.world_to_ndc_centered(p))
    }
}
