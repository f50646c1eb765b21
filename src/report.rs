use crate::coords::{Device, NdcCentered, NdcCorner, Point2D, World};
use serde::Serialize;
use std::fmt;

/// One logical point expressed in all four spaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConversionResult {
    pub world: Point2D<World>,
    pub ndc_corner: Point2D<NdcCorner>,
    pub ndc_centered: Point2D<NdcCentered>,
    pub device: Point2D<Device>,
}

impl ConversionResult {
    /// Single-line form, short enough for a window title.
    pub fn summary(&self) -> String {
        format!(
            "World {} | NDC {} | Centered NDC {} | Device {}",
            self.world, self.ndc_corner, self.ndc_centered, self.device
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "World coordinates:        {}", self.world)?;
        writeln!(f, "NDC coordinates:          {}", self.ndc_corner)?;
        writeln!(f, "Centered NDC coordinates: {}", self.ndc_centered)?;
        write!(f, "Device coordinates:       {}", self.device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> ConversionResult {
        ConversionResult {
            world: Point2D::new(25.0, 25.0),
            ndc_corner: Point2D::new(0.5, 0.5),
            ndc_centered: Point2D::new(0.0, 0.0),
            device: Point2D::new(250.0, 250.0),
        }
    }

    #[test]
    fn test_panel_text() {
        let text = center().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("(25.000, 25.000)"));
        assert!(lines[1].ends_with("(0.500, 0.500)"));
        assert!(lines[2].ends_with("(0.000, 0.000)"));
        assert!(lines[3].ends_with("(250, 250)"));
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            center().summary(),
            "World (25.000, 25.000) | NDC (0.500, 0.500) | Centered NDC (0.000, 0.000) | Device (250, 250)"
        );
    }

    #[test]
    fn test_json() {
        let value: serde_json::Value = serde_json::from_str(&center().to_json().unwrap()).unwrap();
        assert_eq!(value["world"]["x"], 25.0);
        assert_eq!(value["ndc_centered"]["y"], 0.0);
        assert_eq!(value["device"]["x"], 250.0);
    }
}
