//! Entity definitions for a calibrated plan.

mod annotation;
mod furniture;
mod line;
mod polygon;

pub use annotation::Annotation;
pub use furniture::FurnitureItem;
pub use line::MeasureLine;
pub use polygon::AreaPolygon;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for entities and templates.
///
/// Ids are opaque strings: freshly created entities get a UUID, loaded
/// projects keep whatever ids they were saved with.
pub type EntityId = String;

/// Generate a fresh entity id.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}

/// The four kinds of entity a plan holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Line,
    Polygon,
    Furniture,
    Annotation,
}

/// Identity, name and color shared by every entity kind.
///
/// This is what lets a single UI control rename, recolor or delete an
/// entity without knowing its kind.
pub trait EntityTrait {
    /// Get the unique identifier.
    fn id(&self) -> &str;

    /// Which collection the entity lives in.
    fn kind(&self) -> EntityKind;

    /// Display name. Annotations use their text.
    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    /// Primary color as a CSS-style string (e.g. `#ef4444`).
    fn color(&self) -> &str;

    fn set_color(&mut self, color: String);
}

/// Tagged union over all entity kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Line(MeasureLine),
    Polygon(AreaPolygon),
    Furniture(FurnitureItem),
    Annotation(Annotation),
}

impl Entity {
    pub fn as_trait(&self) -> &dyn EntityTrait {
        match self {
            Entity::Line(e) => e,
            Entity::Polygon(e) => e,
            Entity::Furniture(e) => e,
            Entity::Annotation(e) => e,
        }
    }

    pub fn as_trait_mut(&mut self) -> &mut dyn EntityTrait {
        match self {
            Entity::Line(e) => e,
            Entity::Polygon(e) => e,
            Entity::Furniture(e) => e,
            Entity::Annotation(e) => e,
        }
    }

    pub fn id(&self) -> &str {
        self.as_trait().id()
    }

    pub fn kind(&self) -> EntityKind {
        self.as_trait().kind()
    }
}

impl From<MeasureLine> for Entity {
    fn from(line: MeasureLine) -> Self {
        Entity::Line(line)
    }
}

impl From<AreaPolygon> for Entity {
    fn from(polygon: AreaPolygon) -> Self {
        Entity::Polygon(polygon)
    }
}

impl From<FurnitureItem> for Entity {
    fn from(item: FurnitureItem) -> Self {
        Entity::Furniture(item)
    }
}

impl From<Annotation> for Entity {
    fn from(annotation: Annotation) -> Self {
        Entity::Annotation(annotation)
    }
}

/// Format a real-world quantity the way the measurement list shows it.
pub fn format_quantity(value: f64, unit: &str) -> String {
    format!("{:.2} {}", value, unit)
}
