//! Furniture template catalog.
//!
//! A fixed built-in catalog plus user-defined templates, and a short
//! most-recently-used list for quick access.

use crate::entities::{EntityId, FurnitureItem};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum number of recently used templates to keep.
pub const MAX_RECENT_ITEMS: usize = 5;

/// Version of the persisted library layout.
pub const LIBRARY_STATE_VERSION: u32 = 1;

/// Template id that legacy and unknown furniture falls back to.
pub const CUSTOM_TEMPLATE_ID: &str = "custom";

/// Icon used when an item's template no longer exists.
const FALLBACK_ICON: &str = "📦";

/// A furniture template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureTemplate {
    pub id: EntityId,
    pub name: String,
    /// Width in meters.
    pub width: f64,
    /// Depth in meters.
    pub depth: f64,
    /// Emoji or icon identifier.
    pub icon: String,
    pub default_color: String,
    pub category: String,
    pub is_built_in: bool,
}

/// Fields a user supplies when creating a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    pub width: f64,
    pub depth: f64,
    pub icon: String,
    pub default_color: String,
    pub category: String,
}

impl Default for NewTemplate {
    fn default() -> Self {
        Self {
            name: String::new(),
            width: 1.0,
            depth: 1.0,
            icon: FALLBACK_ICON.to_string(),
            default_color: "#6b7280".to_string(),
            category: "custom".to_string(),
        }
    }
}

/// A catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FurnitureCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Categories in display order.
pub const FURNITURE_CATEGORIES: [FurnitureCategory; 6] = [
    FurnitureCategory { id: "bedroom", name: "Bedroom", icon: "🛏️" },
    FurnitureCategory { id: "living", name: "Living Room", icon: "🛋️" },
    FurnitureCategory { id: "kitchen", name: "Kitchen/Dining", icon: "🍽️" },
    FurnitureCategory { id: "office", name: "Office", icon: "💼" },
    FurnitureCategory { id: "bathroom", name: "Bathroom", icon: "🚿" },
    FurnitureCategory { id: "custom", name: "Custom", icon: "📦" },
];

/// (id, name, width, depth, icon, default color, category)
type BuiltIn = (&'static str, &'static str, f64, f64, &'static str, &'static str, &'static str);

const BUILT_IN_TEMPLATES: [BuiltIn; 25] = [
    ("bed-single", "Single Bed", 0.9, 1.9, "🛏️", "#3b82f6", "bedroom"),
    ("bed-double", "Double Bed", 1.4, 1.9, "🛏️", "#3b82f6", "bedroom"),
    ("bed-queen", "Queen Bed", 1.5, 2.0, "🛏️", "#3b82f6", "bedroom"),
    ("bed-king", "King Bed", 1.8, 2.0, "🛏️", "#3b82f6", "bedroom"),
    ("wardrobe", "Wardrobe", 1.2, 0.6, "🚪", "#78716c", "bedroom"),
    ("nightstand", "Nightstand", 0.5, 0.4, "🪑", "#a8a29e", "bedroom"),
    ("sofa-2seat", "2-Seat Sofa", 1.6, 0.9, "🛋️", "#6b7280", "living"),
    ("sofa-3seat", "3-Seat Sofa", 2.4, 0.9, "🛋️", "#6b7280", "living"),
    ("armchair", "Armchair", 0.9, 0.85, "🪑", "#6b7280", "living"),
    ("coffee-table", "Coffee Table", 1.2, 0.6, "🪵", "#854d0e", "living"),
    ("tv-stand", "TV Stand", 1.5, 0.45, "📺", "#1c1917", "living"),
    ("dining-table-4", "Dining Table (4)", 1.2, 0.8, "🪑", "#854d0e", "kitchen"),
    ("dining-table-6", "Dining Table (6)", 1.8, 0.9, "🪑", "#854d0e", "kitchen"),
    ("dining-chair", "Dining Chair", 0.45, 0.45, "🪑", "#a8a29e", "kitchen"),
    ("fridge", "Refrigerator", 0.7, 0.7, "🧊", "#e5e5e5", "kitchen"),
    ("stove", "Stove/Oven", 0.6, 0.6, "🍳", "#404040", "kitchen"),
    ("desk-small", "Small Desk", 1.2, 0.6, "🖥️", "#d97706", "office"),
    ("desk-large", "Large Desk", 1.8, 0.8, "🖥️", "#d97706", "office"),
    ("office-chair", "Office Chair", 0.6, 0.6, "💺", "#1e293b", "office"),
    ("bookshelf", "Bookshelf", 0.8, 0.3, "📚", "#78716c", "office"),
    ("toilet", "Toilet", 0.4, 0.65, "🚽", "#fafafa", "bathroom"),
    ("bathtub", "Bathtub", 0.7, 1.7, "🛁", "#fafafa", "bathroom"),
    ("shower", "Shower", 0.9, 0.9, "🚿", "#e5e5e5", "bathroom"),
    ("sink-bathroom", "Bathroom Sink", 0.6, 0.45, "🚰", "#fafafa", "bathroom"),
    (CUSTOM_TEMPLATE_ID, "Custom", 1.0, 1.0, "📦", "#ef4444", "custom"),
];

fn built_in_templates() -> Vec<FurnitureTemplate> {
    BUILT_IN_TEMPLATES
        .iter()
        .map(|&(id, name, width, depth, icon, color, category)| FurnitureTemplate {
            id: id.to_string(),
            name: name.to_string(),
            width,
            depth,
            icon: icon.to_string(),
            default_color: color.to_string(),
            category: category.to_string(),
            is_built_in: true,
        })
        .collect()
}

fn new_template_id() -> EntityId {
    format!("custom-{}", Uuid::new_v4().simple())
}

/// Library errors.
#[derive(Debug, Error, PartialEq)]
pub enum LibraryError {
    #[error("Template name must not be empty")]
    EmptyName,
    #[error("Template dimensions must be positive: {width} x {depth}")]
    InvalidDimensions { width: f64, depth: f64 },
    #[error("Built-in template cannot be modified: {0}")]
    BuiltIn(String),
    #[error("Template not found: {0}")]
    NotFound(String),
}

fn validate(name: &str, width: f64, depth: f64) -> Result<(), LibraryError> {
    if name.trim().is_empty() {
        return Err(LibraryError::EmptyName);
    }
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(width) || !positive(depth) {
        return Err(LibraryError::InvalidDimensions { width, depth });
    }
    Ok(())
}

/// The persisted part of the library (user templates and recency).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryState {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub custom_templates: Vec<FurnitureTemplate>,
    #[serde(default)]
    pub recent_template_ids: Vec<EntityId>,
}

/// Display data for a placed item, resolved against the library.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFurniture {
    pub name: String,
    pub width: f64,
    pub depth: f64,
    pub icon: String,
    pub color: String,
    /// Whether the item's template still exists.
    pub has_template: bool,
}

/// Built-in plus user-defined furniture templates.
#[derive(Debug, Clone)]
pub struct FurnitureLibrary {
    built_in: Vec<FurnitureTemplate>,
    custom: Vec<FurnitureTemplate>,
    recent: Vec<EntityId>,
}

impl Default for FurnitureLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FurnitureLibrary {
    /// Create a library with only the built-in catalog.
    pub fn new() -> Self {
        Self {
            built_in: built_in_templates(),
            custom: Vec::new(),
            recent: Vec::new(),
        }
    }

    /// Restore a library from its persisted state.
    ///
    /// Persisted templates are forced to user-owned, and recency entries
    /// are deduplicated and capped.
    pub fn from_state(state: LibraryState) -> Self {
        let mut library = Self::new();
        library.custom = state
            .custom_templates
            .into_iter()
            .filter(|t| library.built_in.iter().all(|b| b.id != t.id))
            .map(|mut t| {
                t.is_built_in = false;
                t
            })
            .collect();
        for id in state.recent_template_ids.into_iter().rev() {
            library.add_to_recent(&id);
        }
        library
    }

    /// Snapshot of the persisted part of the library.
    pub fn state(&self) -> LibraryState {
        LibraryState {
            version: LIBRARY_STATE_VERSION,
            custom_templates: self.custom.clone(),
            recent_template_ids: self.recent.clone(),
        }
    }

    /// Add a user template and return its id.
    pub fn add_template(&mut self, template: NewTemplate) -> Result<EntityId, LibraryError> {
        validate(&template.name, template.width, template.depth)?;

        let id = new_template_id();
        self.custom.push(FurnitureTemplate {
            id: id.clone(),
            name: template.name,
            width: template.width,
            depth: template.depth,
            icon: template.icon,
            default_color: template.default_color,
            category: template.category,
            is_built_in: false,
        });
        log::debug!("Added furniture template {}", id);
        Ok(id)
    }

    /// Edit a user template. The edit is dropped if it leaves the template
    /// invalid; the id and ownership cannot change.
    pub fn update_template(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut FurnitureTemplate),
    ) -> Result<(), LibraryError> {
        self.ensure_not_built_in(id)?;
        let slot = self
            .custom
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))?;

        let mut edited = slot.clone();
        f(&mut edited);
        validate(&edited.name, edited.width, edited.depth)?;
        edited.id = slot.id.clone();
        edited.is_built_in = false;
        *slot = edited;
        Ok(())
    }

    /// Remove a user template; it also leaves the recency list.
    pub fn remove_template(&mut self, id: &str) -> Result<FurnitureTemplate, LibraryError> {
        self.ensure_not_built_in(id)?;
        let index = self
            .custom
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))?;
        self.recent.retain(|rid| rid != id);
        Ok(self.custom.remove(index))
    }

    /// Copy any template (built-in or not) into a new user template.
    pub fn duplicate_template(&mut self, id: &str) -> Result<EntityId, LibraryError> {
        let source = self
            .template(id)
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))?
            .clone();
        self.add_template(NewTemplate {
            name: format!("{} (Copy)", source.name),
            width: source.width,
            depth: source.depth,
            icon: source.icon,
            default_color: source.default_color,
            category: source.category,
        })
    }

    /// Move a template to the front of the recency list.
    pub fn add_to_recent(&mut self, id: &str) {
        self.recent.retain(|rid| rid != id);
        self.recent.insert(0, id.to_string());
        self.recent.truncate(MAX_RECENT_ITEMS);
    }

    /// Recently used ids, most recent first.
    pub fn recent_ids(&self) -> &[EntityId] {
        &self.recent
    }

    /// Recently used templates that still exist, most recent first.
    pub fn recent_templates(&self) -> Vec<&FurnitureTemplate> {
        self.recent.iter().filter_map(|id| self.template(id)).collect()
    }

    /// All templates, built-in first.
    pub fn all_templates(&self) -> impl Iterator<Item = &FurnitureTemplate> {
        self.built_in.iter().chain(self.custom.iter())
    }

    pub fn custom_templates(&self) -> &[FurnitureTemplate] {
        &self.custom
    }

    pub fn template(&self, id: &str) -> Option<&FurnitureTemplate> {
        self.all_templates().find(|t| t.id == id)
    }

    pub fn templates_by_category(&self, category: &str) -> Vec<&FurnitureTemplate> {
        self.all_templates().filter(|t| t.category == category).collect()
    }

    /// Case-insensitive name search. A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&FurnitureTemplate> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.all_templates()
            .filter(|t| t.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn categories(&self) -> &'static [FurnitureCategory] {
        &FURNITURE_CATEGORIES
    }

    /// Display data for an item, falling back to the item's own fields
    /// when its template is gone.
    pub fn resolve_item(&self, item: &FurnitureItem) -> ResolvedFurniture {
        let template = self.template(&item.template_id);
        ResolvedFurniture {
            name: item.name.clone(),
            width: item.width,
            depth: item.depth,
            icon: template
                .map(|t| t.icon.clone())
                .unwrap_or_else(|| FALLBACK_ICON.to_string()),
            color: item.color.clone(),
            has_template: template.is_some(),
        }
    }

    fn ensure_not_built_in(&self, id: &str) -> Result<(), LibraryError> {
        if self.built_in.iter().any(|t| t.id == id) {
            return Err(LibraryError::BuiltIn(id.to_string()));
        }
        Ok(())
    }
}
