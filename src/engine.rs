//! The coordinate transform engine.
//!
//! Owns the world bounds and the currently selected pixel. The device extent
//! always comes from the canvas passed into each call.

use crate::canvas::Canvas;
use crate::coords::{CoordinateTransform, Device, Point2D, World, WorldBounds};
use crate::error::Result;
use crate::input::{parse_world_point, InputEvent, Outcome};
use crate::report::ConversionResult;

pub struct TransformEngine {
    bounds: WorldBounds,
    selected: Option<Point2D<Device>>,
}

impl TransformEngine {
    pub fn new(bounds: WorldBounds) -> Self {
        Self {
            bounds,
            selected: None,
        }
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    /// Replaces the world bounds. The selected device pixel is kept.
    ///
    /// For embedders that re-configure a running engine; the bundled window
    /// keeps the bounds it was started with.
    pub fn set_bounds(&mut self, bounds: WorldBounds) {
        log::info!("World bounds changed from {} to {}", self.bounds, bounds);
        self.bounds = bounds;
    }

    pub fn selected(&self) -> Option<Point2D<Device>> {
        self.selected
    }

    /// Snapshot of the pipeline for the canvas as it is right now.
    pub fn transform<C: Canvas + ?Sized>(&self, canvas: &C) -> CoordinateTransform {
        CoordinateTransform::new(self.bounds, canvas.extent())
    }

    /// Converts a device point for display without selecting or painting it.
    pub fn preview<C: Canvas + ?Sized>(&self, canvas: &C, point: Point2D<Device>) -> ConversionResult {
        Self::convert_device(&self.transform(canvas), point)
    }

    pub fn select_from_device<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        point: Point2D<Device>,
    ) -> ConversionResult {
        let result = Self::convert_device(&self.transform(canvas), point);
        self.select(canvas, point);
        log::debug!("Selected device point {} -> world {}", point, result.world);
        result
    }

    /// Fails without touching the selection or the canvas if `point` lies
    /// outside the bounds.
    pub fn select_from_world<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        point: Point2D<World>,
    ) -> Result<ConversionResult> {
        self.bounds.check(&point)?;

        let t = self.transform(canvas);
        let ndc_centered = t.world_to_ndc_centered(point);
        let device = t.ndc_centered_to_device(ndc_centered);
        let result = ConversionResult {
            world: point,
            ndc_corner: t.world_to_ndc_corner(point),
            ndc_centered,
            device,
        };
        self.select(canvas, device);
        log::debug!("Selected world point {} -> device {}", point, device);
        Ok(result)
    }

    pub fn dispatch<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        event: InputEvent,
    ) -> Result<Outcome> {
        match event {
            InputEvent::PointerMoved(point) => Ok(Outcome::Preview(self.preview(canvas, point))),
            InputEvent::Clicked(point) => {
                Ok(Outcome::Selected(self.select_from_device(canvas, point)))
            }
            InputEvent::SetWorldPoint { x, y } => {
                let point = parse_world_point(&x, &y)?;
                self.select_from_world(canvas, point).map(Outcome::Selected)
            }
        }
    }

    /// Paints the selection again, e.g. after the canvas was reallocated.
    pub fn redraw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.clear();
        if let Some(point) = self.selected {
            let (x, y) = point.to_pixel();
            canvas.paint_pixel(x, y);
        }
    }

    fn select<C: Canvas + ?Sized>(&mut self, canvas: &mut C, point: Point2D<Device>) {
        self.selected = Some(point);
        self.redraw(canvas);
    }

    fn convert_device(t: &CoordinateTransform, point: Point2D<Device>) -> ConversionResult {
        let ndc_corner = t.device_to_ndc_corner(point);
        let world = t.ndc_corner_to_world(ndc_corner);
        ConversionResult {
            world,
            ndc_corner,
            ndc_centered: t.world_to_ndc_centered(world),
            device: point,
        }
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new(WorldBounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelCanvas;
    use crate::coords::{Axis, DeviceExtent};
    use crate::error::Error;

    fn canvas(width: u32, height: u32) -> PixelCanvas {
        PixelCanvas::new(
            DeviceExtent::new(width, height).unwrap(),
            [0, 0, 0, 255],
            [255, 255, 255, 255],
        )
    }

    #[test]
    fn test_nothing_selected_initially() {
        let engine = TransformEngine::default();
        assert_eq!(engine.selected(), None);
        assert_eq!(engine.bounds(), &WorldBounds::default());
    }

    #[test]
    fn test_select_center_from_world() {
        let mut engine = TransformEngine::default();
        let mut c = canvas(500, 500);

        let result = engine
            .select_from_world(&mut c, Point2D::new(25.0, 25.0))
            .unwrap();

        assert_eq!(result.ndc_centered, Point2D::new(0.0, 0.0));
        assert_eq!(result.ndc_corner, Point2D::new(0.5, 0.5));
        assert_eq!(result.device, Point2D::new(250.0, 250.0));
        assert_eq!(result.world.to_string(), "(25.000, 25.000)");
        assert_eq!(engine.selected(), Some(Point2D::new(250.0, 250.0)));
        assert_eq!(c.lit_pixels(), vec![(250, 250)]);
    }

    #[test]
    fn test_world_bounds_are_inclusive() {
        let mut engine = TransformEngine::default();
        let mut c = canvas(500, 500);

        let low = engine.select_from_world(&mut c, Point2D::new(0.0, 0.0)).unwrap();
        assert_eq!(low.device, Point2D::new(0.0, 499.0));
        assert_eq!(low.ndc_centered, Point2D::new(-1.0, -1.0));

        let high = engine.select_from_world(&mut c, Point2D::new(50.0, 50.0)).unwrap();
        assert_eq!(high.device, Point2D::new(499.0, 0.0));
        assert_eq!(c.lit_pixels(), vec![(499, 0)]);
    }

    #[test]
    fn test_out_of_range_leaves_state_untouched() {
        let mut engine = TransformEngine::default();
        let mut c = canvas(500, 500);
        engine.select_from_world(&mut c, Point2D::new(10.0, 10.0)).unwrap();
        let before = engine.selected();
        let lit_before = c.lit_pixels();
        c.take_dirty();

        let err = engine
            .select_from_world(&mut c, Point2D::new(51.0, 0.0))
            .unwrap_err();
        match err {
            Error::OutOfRange {
                axis,
                value,
                min,
                max,
            } => {
                assert_eq!(axis, Axis::X);
                assert_eq!(value, 51.0);
                assert_eq!((min, max), (0.0, 50.0));
            }
            other => panic!("expected out of range, got {other:?}"),
        }

        assert_eq!(engine.selected(), before);
        assert_eq!(c.lit_pixels(), lit_before);
        assert!(!c.is_dirty());
    }

    #[test]
    fn test_select_from_device() {
        let mut engine = TransformEngine::default();
        let mut c = canvas(500, 500);

        let result = engine.select_from_device(&mut c, Point2D::new(0.0, 499.0));
        assert_eq!(result.world, Point2D::new(0.0, 0.0));
        assert_eq!(result.ndc_corner, Point2D::new(0.0, 0.0));
        assert_eq!(result.ndc_centered, Point2D::new(-1.0, -1.0));
        assert_eq!(result.device, Point2D::new(0.0, 499.0));
        assert_eq!(engine.selected(), Some(Point2D::new(0.0, 499.0)));
        assert_eq!(c.lit_pixels(), vec![(0, 499)]);
    }

    #[test]
    fn test_only_one_pixel_is_ever_lit() {
        let mut engine = TransformEngine::default();
        let mut c = canvas(64, 48);

        engine.select_from_device(&mut c, Point2D::new(3.0, 4.0));
        engine.select_from_device(&mut c, Point2D::new(40.0, 20.0));
        assert_eq!(c.lit_pixels(), vec![(40, 20)]);

        engine.select_from_world(&mut c, Point2D::new(50.0, 0.0)).unwrap();
        assert_eq!(c.lit_pixels(), vec![(63, 47)]);
    }

    #[test]
    fn test_preview_does_not_select_or_paint() {
        let engine = TransformEngine::default();
        let c = canvas(500, 500);

        let result = engine.preview(&c, Point2D::new(499.0, 0.0));
        assert_eq!(result.world, Point2D::new(50.0, 50.0));
        assert_eq!(engine.selected(), None);
        assert!(c.lit_pixels().is_empty());
    }

    #[test]
    fn test_extent_is_read_live() {
        let engine = TransformEngine::default();
        let mut c = canvas(500, 500);
        let p = Point2D::new(99.0, 0.0);
        let before = engine.preview(&c, p);

        c.resize(DeviceExtent::new(100, 100).unwrap());
        let after = engine.preview(&c, p);

        assert!(before.world.x < 10.0);
        assert_eq!(after.world.x, 50.0);
    }

    #[test]
    fn test_dispatch() {
        let mut engine = TransformEngine::default();
        let mut c = canvas(500, 500);

        let outcome = engine
            .dispatch(&mut c, InputEvent::PointerMoved(Point2D::new(10.0, 10.0)))
            .unwrap();
        assert!(matches!(outcome, Outcome::Preview(_)));
        assert_eq!(engine.selected(), None);

        let outcome = engine
            .dispatch(&mut c, InputEvent::Clicked(Point2D::new(10.0, 10.0)))
            .unwrap();
        assert!(matches!(outcome, Outcome::Selected(_)));
        assert_eq!(engine.selected(), Some(Point2D::new(10.0, 10.0)));

        let outcome = engine
            .dispatch(
                &mut c,
                InputEvent::SetWorldPoint {
                    x: "25".into(),
                    y: "25".into(),
                },
            )
            .unwrap();
        assert_eq!(outcome.result().device, Point2D::new(250.0, 250.0));
    }

    #[test]
    fn test_dispatch_invalid_input_does_not_select() {
        let mut engine = TransformEngine::default();
        let mut c = canvas(500, 500);
        engine.select_from_device(&mut c, Point2D::new(1.0, 1.0));

        let err = engine
            .dispatch(
                &mut c,
                InputEvent::SetWorldPoint {
                    x: "ten".into(),
                    y: "25".into(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { axis: Axis::X, .. }));
        assert_eq!(engine.selected(), Some(Point2D::new(1.0, 1.0)));
        assert_eq!(c.lit_pixels(), vec![(1, 1)]);
    }

    #[test]
    fn test_redraw_after_resize() {
        let mut engine = TransformEngine::default();
        let mut c = canvas(500, 500);
        engine.select_from_device(&mut c, Point2D::new(30.0, 40.0));

        c.resize(DeviceExtent::new(200, 200).unwrap());
        assert!(c.lit_pixels().is_empty());

        engine.redraw(&mut c);
        assert_eq!(c.lit_pixels(), vec![(30, 40)]);
    }

    #[test]
    fn test_out_of_canvas_selection_is_clipped_by_canvas() {
        let mut engine = TransformEngine::default();
        let mut c = canvas(50, 50);
        let result = engine.select_from_device(&mut c, Point2D::new(80.0, 10.0));

        assert!(result.ndc_corner.x > 1.0);
        assert_eq!(engine.selected(), Some(Point2D::new(80.0, 10.0)));
        assert!(c.lit_pixels().is_empty());
    }

    #[test]
    fn test_set_bounds_keeps_selection() {
        let mut engine = TransformEngine::default();
        let mut c = canvas(101, 101);
        engine.select_from_device(&mut c, Point2D::new(50.0, 50.0));

        engine.set_bounds(WorldBounds::new(-1.0, 1.0, -1.0, 1.0).unwrap());
        assert_eq!(engine.selected(), Some(Point2D::new(50.0, 50.0)));
        let result = engine.preview(&c, Point2D::new(50.0, 50.0));
        assert_eq!(result.world, Point2D::new(0.0, 0.0));
    }
}
