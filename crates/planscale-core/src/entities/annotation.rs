//! Text annotation.

use super::{EntityId, EntityKind, EntityTrait, new_entity_id};
use crate::geometry::normalize_rotation;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A free text note pinned to the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub(crate) id: EntityId,
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Font size in pixels.
    pub font_size: f64,
    pub color: String,
    /// Background fill, `None` = transparent.
    pub background_color: Option<String>,
    /// Rotation in degrees, kept in `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,
}

impl Annotation {
    pub const DEFAULT_TEXT: &'static str = "New text";
    pub const DEFAULT_FONT_SIZE: f64 = 14.0;
    pub const DEFAULT_COLOR: &'static str = "#1e293b";

    /// Create an annotation with default text and styling at `position`.
    pub fn new(position: Point) -> Self {
        Self::with_text(position, Self::DEFAULT_TEXT)
    }

    pub fn with_text(position: Point, text: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            text: text.into(),
            x: position.x,
            y: position.y,
            font_size: Self::DEFAULT_FONT_SIZE,
            color: Self::DEFAULT_COLOR.to_string(),
            background_color: None,
            rotation: 0.0,
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

    pub fn has_background(&self) -> bool {
        self.background_color.is_some()
    }
}

impl EntityTrait for Annotation {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Annotation
    }

    fn name(&self) -> &str {
        &self.text
    }

    fn set_name(&mut self, name: String) {
        self.text = name;
    }

    fn color(&self) -> &str {
        &self.color
    }

    fn set_color(&mut self, color: String) {
        self.color = color;
    }
}
