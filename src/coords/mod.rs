//! Coordinate spaces used by the transform pipeline.
//!
//! Conventions:
//! - Device: pixels, origin at top-left, +Y down.
//! - Corner NDC: [0, 1] on both axes, origin at bottom-left, +Y up.
//! - Centered NDC: [-1, 1] on both axes, origin at the center, +Y up.
//! - World: the user-defined rectangle described by [`WorldBounds`], +Y up.

mod transform;

pub use transform::CoordinateTransform;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Marker trait for the spaces a [`Point2D`] can live in.
pub trait Space: Copy + fmt::Debug + PartialEq {
    /// Decimal places used when the point is displayed.
    const PRECISION: usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Device;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NdcCorner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NdcCentered;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct World;

impl Space for Device {
    const PRECISION: usize = 0;
}

impl Space for NdcCorner {
    const PRECISION: usize = 3;
}

impl Space for NdcCentered {
    const PRECISION: usize = 3;
}

impl Space for World {
    const PRECISION: usize = 3;
}

/// A position tagged with the coordinate space it belongs to.
///
/// The tag is zero-sized; it only keeps points of different spaces from
/// being passed where another space is expected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Point2D<S> {
    pub x: f64,
    pub y: f64,
    #[serde(skip)]
    space: PhantomData<S>,
}

impl<S> Point2D<S> {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }
}

impl<S: Space> fmt::Display for Point2D<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = S::PRECISION;
        write!(f, "({:.precision$}, {:.precision$})", self.x, self.y)
    }
}

impl Point2D<Device> {
    /// Snap a raw pointer position (possibly fractional) to the pixel under it.
    pub fn from_cursor(x: f64, y: f64) -> Self {
        Self::new(round_half_up(x), round_half_up(y))
    }

    /// The pixel this point addresses, saturating at the `i32` range.
    pub fn to_pixel(&self) -> (i32, i32) {
        (round_half_up(self.x) as i32, round_half_up(self.y) as i32)
    }
}

impl Point2D<NdcCorner> {
    pub fn to_centered(&self) -> Point2D<NdcCentered> {
        Point2D::new(self.x * 2.0 - 1.0, self.y * 2.0 - 1.0)
    }
}

impl Point2D<NdcCentered> {
    pub fn to_corner(&self) -> Point2D<NdcCorner> {
        Point2D::new((self.x + 1.0) / 2.0, (self.y + 1.0) / 2.0)
    }
}

/// Rounds to the nearest integer, with halves going towards positive infinity.
///
/// `2.5` becomes `3.0` and `-2.5` becomes `-2.0`.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("X"),
            Axis::Y => f.write_str("Y"),
        }
    }
}

/// The extent of the world coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWorldBounds")]
pub struct WorldBounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

#[derive(Deserialize)]
struct RawWorldBounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl TryFrom<RawWorldBounds> for WorldBounds {
    type Error = Error;

    fn try_from(raw: RawWorldBounds) -> Result<Self> {
        Self::new(raw.x_min, raw.x_max, raw.y_min, raw.y_max)
    }
}

impl WorldBounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        if ![x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidBounds(format!(
                "limits must be finite, got X: [{x_min}, {x_max}], Y: [{y_min}, {y_max}]"
            )));
        }
        if x_max <= x_min {
            return Err(Error::InvalidBounds(format!(
                "x_max ({x_max}) must be greater than x_min ({x_min})"
            )));
        }
        if y_max <= y_min {
            return Err(Error::InvalidBounds(format!(
                "y_max ({y_max}) must be greater than y_min ({y_min})"
            )));
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: &Point2D<World>) -> bool {
        self.check(point).is_ok()
    }

    /// Like [`contains`](Self::contains), but reports the first offending axis.
    pub fn check(&self, point: &Point2D<World>) -> Result<()> {
        if !(self.x_min..=self.x_max).contains(&point.x) {
            return Err(Error::OutOfRange {
                axis: Axis::X,
                value: point.x,
                min: self.x_min,
                max: self.x_max,
            });
        }
        if !(self.y_min..=self.y_max).contains(&point.y) {
            return Err(Error::OutOfRange {
                axis: Axis::Y,
                value: point.y,
                min: self.y_min,
                max: self.y_max,
            });
        }
        Ok(())
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 50.0,
            y_min: 0.0,
            y_max: 50.0,
        }
    }
}

impl fmt::Display for WorldBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X: [{}, {}], Y: [{}, {}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

/// Pixel dimensions of a raster. Both dimensions are always greater than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceExtent {
    width: u32,
    height: u32,
}

impl DeviceExtent {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width <= 1 || height <= 1 {
            return Err(Error::DegenerateExtent { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Largest device x, i.e. `width - 1`.
    pub fn max_x(&self) -> f64 {
        f64::from(self.width - 1)
    }

    /// Largest device y, i.e. `height - 1`.
    pub fn max_y(&self) -> f64 {
        f64::from(self.height - 1)
    }

    pub fn contains_pixel(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }
}

impl fmt::Display for DeviceExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(249.5), 250.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.49), 0.0);
        assert_eq!(round_half_up(7.0), 7.0);
    }

    #[test]
    fn test_bounds_validation() {
        assert!(WorldBounds::new(0.0, 50.0, 0.0, 50.0).is_ok());
        assert!(matches!(
            WorldBounds::new(10.0, 10.0, 0.0, 1.0),
            Err(Error::InvalidBounds(_))
        ));
        assert!(matches!(
            WorldBounds::new(0.0, 1.0, 5.0, -5.0),
            Err(Error::InvalidBounds(_))
        ));
        assert!(matches!(
            WorldBounds::new(0.0, f64::INFINITY, 0.0, 1.0),
            Err(Error::InvalidBounds(_))
        ));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = WorldBounds::default();
        assert!(bounds.contains(&Point2D::new(0.0, 0.0)));
        assert!(bounds.contains(&Point2D::new(50.0, 50.0)));
        assert!(!bounds.contains(&Point2D::new(50.0001, 25.0)));
        assert!(!bounds.contains(&Point2D::new(f64::NAN, 25.0)));

        match bounds.check(&Point2D::new(25.0, -1.0)) {
            Err(Error::OutOfRange {
                axis,
                value,
                min,
                max,
            }) => {
                assert_eq!(axis, Axis::Y);
                assert_eq!(value, -1.0);
                assert_eq!((min, max), (0.0, 50.0));
            }
            other => panic!("expected out of range, got {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_extent() {
        assert!(DeviceExtent::new(500, 500).is_ok());
        assert!(matches!(
            DeviceExtent::new(1, 500),
            Err(Error::DegenerateExtent { width: 1, height: 500 })
        ));
        assert!(matches!(
            DeviceExtent::new(500, 0),
            Err(Error::DegenerateExtent { .. })
        ));
    }

    #[test]
    fn test_extent_contains_pixel() {
        let extent = DeviceExtent::new(4, 3).unwrap();
        assert!(extent.contains_pixel(0, 0));
        assert!(extent.contains_pixel(3, 2));
        assert!(!extent.contains_pixel(4, 2));
        assert!(!extent.contains_pixel(-1, 0));
    }

    #[test]
    fn test_point_display_precision() {
        assert_eq!(Point2D::<World>::new(25.0, 12.3456).to_string(), "(25.000, 12.346)");
        assert_eq!(Point2D::<Device>::new(250.0, 3.0).to_string(), "(250, 3)");
    }

    #[test]
    fn test_cursor_snapping() {
        let p = Point2D::<Device>::from_cursor(10.5, 3.2);
        assert_eq!(p, Point2D::new(11.0, 3.0));
        assert_eq!(p.to_pixel(), (11, 3));
    }

    #[test]
    fn test_ndc_conventions() {
        let corner = Point2D::<NdcCorner>::new(0.25, 1.0);
        assert_eq!(corner.to_centered(), Point2D::new(-0.5, 1.0));
        assert_eq!(corner.to_centered().to_corner(), corner);
    }

    #[test]
    fn test_bounds_deserialize_validates() {
        let ok: WorldBounds =
            serde_json::from_str(r#"{"x_min": -1, "x_max": 1, "y_min": 0, "y_max": 2}"#).unwrap();
        assert_eq!(ok.width(), 2.0);

        let bad = serde_json::from_str::<WorldBounds>(
            r#"{"x_min": 3, "x_max": 1, "y_min": 0, "y_max": 2}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_point_serializes_without_space_tag() {
        let json = serde_json::to_string(&Point2D::<World>::new(1.5, 2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":2.0}"#);
    }
}
