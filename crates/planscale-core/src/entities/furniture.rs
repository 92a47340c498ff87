//! Placed furniture footprint.

use super::{EntityId, EntityKind, EntityTrait, new_entity_id};
use crate::geometry::{normalize_rotation, unit_to_pixels};
use crate::library::FurnitureTemplate;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Rotations within this many degrees of 90/270 count as a quarter turn.
const QUARTER_TURN_TOLERANCE: f64 = 1.0;

/// A furniture footprint placed on the plan.
///
/// `template_id` is only a relation: the template may have been deleted
/// since, so the item carries its own name, size and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureItem {
    pub(crate) id: EntityId,
    pub template_id: String,
    pub name: String,
    /// Real-world width in meters.
    pub width: f64,
    /// Real-world depth in meters.
    pub depth: f64,
    /// Top-left corner in image pixels.
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees, kept in `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,
    pub color: String,
}

impl FurnitureItem {
    /// Create an item from a template at the given top-left position.
    pub fn from_template(template: &FurnitureTemplate, position: Point) -> Self {
        Self {
            id: new_entity_id(),
            template_id: template.id.clone(),
            name: template.name.clone(),
            width: template.width,
            depth: template.depth,
            x: position.x,
            y: position.y,
            rotation: 0.0,
            color: template.default_color.clone(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Set the rotation, normalized into `[0, 360)`.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = normalize_rotation(degrees);
    }

    /// Rotate by a relative amount of degrees.
    pub fn rotate_by(&mut self, degrees: f64) {
        self.set_rotation(self.rotation + degrees);
    }

    /// Whether the item is turned (roughly) a quarter turn either way.
    pub fn is_quarter_turned(&self) -> bool {
        let rotation = normalize_rotation(self.rotation);
        (rotation - 90.0).abs() < QUARTER_TURN_TOLERANCE
            || (rotation - 270.0).abs() < QUARTER_TURN_TOLERANCE
    }

    /// Unrotated size in pixels as `(width, depth)`.
    pub fn pixel_size(&self, scale: f64) -> (f64, f64) {
        (unit_to_pixels(self.width, scale), unit_to_pixels(self.depth, scale))
    }

    /// Pixel-space hit box; width and depth swap on a quarter turn.
    pub fn footprint(&self, scale: f64) -> Rect {
        let (width_px, depth_px) = self.pixel_size(scale);
        let (box_w, box_h) = if self.is_quarter_turned() {
            (depth_px, width_px)
        } else {
            (width_px, depth_px)
        };
        Rect::new(self.x, self.y, self.x + box_w, self.y + box_h)
    }
}

impl EntityTrait for FurnitureItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Furniture
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
    use crate::library::FurnitureLibrary;

    fn sofa() -> FurnitureItem {
        let library = FurnitureLibrary::new();
        let template = library.template("sofa-3seat").unwrap();
        FurnitureItem::from_template(template, Point::new(10.0, 20.0))
    }

    #[test]
    fn test_from_template() {
        let item = sofa();
        assert_eq!(item.template_id, "sofa-3seat");
        assert_eq!(item.name, "3-Seat Sofa");
        assert_eq!(item.width, 2.4);
        assert_eq!(item.depth, 0.9);
        assert_eq!(item.position(), Point::new(10.0, 20.0));
        assert_eq!(item.rotation, 0.0);
        assert_eq!(item.color, "#6b7280");
    }

    #[test]
    fn test_rotation_normalized() {
        let mut item = sofa();
        item.rotate_by(-90.0);
        assert_eq!(item.rotation, 270.0);
        item.rotate_by(180.0);
        assert_eq!(item.rotation, 90.0);
        item.set_rotation(450.0);
        assert_eq!(item.rotation, 90.0);
    }

    #[test]
    fn test_footprint_swaps_on_quarter_turn() {
        let mut item = sofa();
        item.width = 2.0;
        item.depth = 1.0;

        let flat = item.footprint(100.0);
        assert_eq!(flat, Rect::new(10.0, 20.0, 210.0, 120.0));

        item.set_rotation(90.0);
        let turned = item.footprint(100.0);
        assert_eq!(turned, Rect::new(10.0, 20.0, 110.0, 220.0));

        item.set_rotation(45.0);
        assert!(!item.is_quarter_turned());
    }
}
