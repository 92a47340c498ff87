//! Measurement line.

use super::{EntityId, EntityKind, EntityTrait, format_quantity, new_entity_id};
use crate::geometry;
use kurbo::Point;
use serde::{Deserialize, Serialize};

fn default_line_color() -> String {
    MeasureLine::DEFAULT_COLOR.to_string()
}

/// A straight measurement between two points.
///
/// `length` and `unit` are derived from the plan scale. They stay `None`
/// for lines drawn while uncalibrated and for calibration reference lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureLine {
    pub(crate) id: EntityId,
    /// Start point in image pixels.
    pub start: Point,
    /// End point in image pixels.
    pub end: Point,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_line_color")]
    pub color: String,
    /// Real-world length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl MeasureLine {
    pub const DEFAULT_COLOR: &'static str = "#ef4444";
    pub const REFERENCE_NAME: &'static str = "Reference";

    /// Create a new, unmeasured line with a fresh id.
    pub fn new(start: Point, end: Point, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            start,
            end,
            name: name.into(),
            color: color.into(),
            length: None,
            unit: None,
        }
    }

    /// Length of the line in pixels.
    pub fn pixel_length(&self) -> f64 {
        geometry::distance(self.start, self.end)
    }

    /// Stamp the real-world length for the given scale.
    pub fn measure(&mut self, scale: f64, unit: &str) {
        self.length = Some(geometry::pixels_to_unit(self.pixel_length(), scale));
        self.unit = Some(unit.to_string());
    }

    /// Drop any derived length.
    pub fn clear_measurement(&mut self) {
        self.length = None;
        self.unit = None;
    }

    /// Whether the line carries a real-world length.
    pub fn is_measured(&self) -> bool {
        self.length.is_some()
    }

    /// Formatted length such as `3.25 m`, if measured.
    pub fn length_label(&self) -> Option<String> {
        let length = self.length?;
        Some(format_quantity(length, self.unit.as_deref().unwrap_or_default()))
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }
}

impl EntityTrait for MeasureLine {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Line
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn color(&self) -> &str {
        &self.color
    }

    fn set_color(&mut self, color: String) {
        self.color = color;
    }
}
