//! Area polygon.

use super::{EntityId, EntityKind, EntityTrait, format_quantity, new_entity_id};
use crate::geometry;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

fn default_polygon_color() -> String {
    AreaPolygon::DEFAULT_COLOR.to_string()
}

/// A closed area traced point by point.
///
/// The point order is the drawing order and defines the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaPolygon {
    pub(crate) id: EntityId,
    pub points: Vec<Point>,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_polygon_color")]
    pub color: String,
    /// Real-world area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// Area unit label, e.g. `sq m`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl AreaPolygon {
    pub const DEFAULT_COLOR: &'static str = "#10b981";

    /// Create a new polygon without a derived area.
    pub fn new(points: Vec<Point>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            points,
            name: name.into(),
            color: color.into(),
            area: None,
            unit: None,
        }
    }

    /// Area label for a linear unit: `m` becomes `sq m`.
    pub fn area_unit(unit: &str) -> String {
        format!("sq {}", unit)
    }

    /// Recompute the derived area for the given scale.
    pub fn measure(&mut self, scale: f64, unit: &str) {
        self.area = Some(geometry::polygon_area(&self.points, scale));
        self.unit = Some(Self::area_unit(unit));
    }

    /// Formatted area such as `12.50 sq m`, if measured.
    pub fn area_label(&self) -> Option<String> {
        let area = self.area?;
        Some(format_quantity(area, self.unit.as_deref().unwrap_or_default()))
    }

    /// Bounding box in pixels, `None` when there are no points.
    pub fn bounds(&self) -> Option<Rect> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold(Rect::from_points(first, first), |rect, &p| rect.union_pt(p)),
        )
    }
}

impl EntityTrait for AreaPolygon {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Polygon
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

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(200.0, 0.0),
            Point::new(200.0, 100.0),
            Point::new(0.0, 100.0),
        ]
    }

    #[test]
    fn test_polygon_measure() {
        let mut poly = AreaPolygon::new(room(), "Kitchen", AreaPolygon::DEFAULT_COLOR);
        assert!(poly.area.is_none());

        poly.measure(50.0, "m");
        assert_eq!(poly.area, Some(8.0));
        assert_eq!(poly.unit.as_deref(), Some("sq m"));
        assert_eq!(poly.area_label().as_deref(), Some("8.00 sq m"));
    }

    #[test]
    fn test_polygon_bounds() {
        let poly = AreaPolygon::new(room(), "Kitchen", AreaPolygon::DEFAULT_COLOR);
        assert_eq!(poly.bounds(), Some(Rect::new(0.0, 0.0, 200.0, 100.0)));

        let empty = AreaPolygon::new(Vec::new(), "", "");
        assert!(empty.bounds().is_none());
    }

    #[test]
    fn test_polygon_defaults_on_load() {
        let poly: AreaPolygon = serde_json::from_str(
            r#"{"id":"p1","points":[{"x":0,"y":0},{"x":1,"y":0},{"x":1,"y":1}]}"#,
        )
        .unwrap();
        assert_eq!(poly.id(), "p1");
        assert_eq!(poly.color, AreaPolygon::DEFAULT_COLOR);
        assert!(poly.area.is_none());
    }
}
