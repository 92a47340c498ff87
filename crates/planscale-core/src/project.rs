//! Project file format.
//!
//! A project is the persisted slice of a plan: the four entity collections
//! plus the calibration. Older files stored furniture with a `type` field
//! instead of a `templateId`; those records are migrated on load.

use crate::entities::{Annotation, AreaPolygon, FurnitureItem, MeasureLine};
use crate::geometry::normalize_rotation;
use crate::library::CUSTOM_TEMPLATE_ID;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

/// Unit used when a project does not name one.
pub const DEFAULT_UNIT: &str = "m";

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

/// An explicit `null` reads the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn null_as_default_unit<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|unit| unit.unwrap_or_else(default_unit))
}

/// Errors from reading or writing a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Malformed project: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Failed to serialize project: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Everything a project file holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub lines: Vec<MeasureLine>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub polygons: Vec<AreaPolygon>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub furniture: Vec<FurnitureItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: Vec<Annotation>,
    /// Pixels per unit, `None` while uncalibrated.
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default = "default_unit", deserialize_with = "null_as_default_unit")]
    pub unit: String,
}

impl Default for ProjectData {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            polygons: Vec::new(),
            furniture: Vec::new(),
            annotations: Vec::new(),
            scale: None,
            unit: default_unit(),
        }
    }
}

impl ProjectData {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ProjectError> {
        serde_json::to_string_pretty(self).map_err(ProjectError::Serialize)
    }

    /// Parse a project, migrating legacy furniture and normalizing values.
    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        let mut value: Value = serde_json::from_str(json).map_err(ProjectError::Parse)?;
        let migrated = migrate_furniture(&mut value);
        if migrated > 0 {
            log::info!("Migrated {} legacy furniture record(s)", migrated);
        }

        let mut data: ProjectData = serde_json::from_value(value).map_err(ProjectError::Parse)?;
        data.normalize();
        data.warn_duplicate_ids();
        Ok(data)
    }

    /// Whether the project holds no entities at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.polygons.is_empty()
            && self.furniture.is_empty()
            && self.annotations.is_empty()
    }

    /// Total number of entities across all collections.
    pub fn entity_count(&self) -> usize {
        self.lines.len() + self.polygons.len() + self.furniture.len() + self.annotations.len()
    }

    fn normalize(&mut self) {
        if !self.scale.is_some_and(|s| s.is_finite() && s > 0.0) {
            self.scale = None;
        }
        if self.unit.trim().is_empty() {
            self.unit = default_unit();
        }
        for item in &mut self.furniture {
            item.rotation = normalize_rotation(item.rotation);
        }
        for annotation in &mut self.annotations {
            annotation.rotation = normalize_rotation(annotation.rotation);
        }
    }

    fn warn_duplicate_ids(&self) {
        let mut seen = HashSet::new();
        let ids = self
            .lines
            .iter()
            .map(|e| e.id.as_str())
            .chain(self.polygons.iter().map(|e| e.id.as_str()))
            .chain(self.furniture.iter().map(|e| e.id.as_str()))
            .chain(self.annotations.iter().map(|e| e.id.as_str()));
        for id in ids {
            if !seen.insert(id) {
                log::warn!("Duplicate entity id in project: {}", id);
            }
        }
    }
}

/// Template id for a legacy furniture `type`.
///
/// `toilet` maps to `desk-small`: old files used that type for desks.
pub fn legacy_template_id(legacy_type: &str) -> &'static str {
    match legacy_type {
        "bed" => "bed-queen",
        "sofa" => "sofa-3seat",
        "table" => "dining-table-4",
        "toilet" => "desk-small",
        _ => CUSTOM_TEMPLATE_ID,
    }
}

/// Rewrite legacy furniture records in place. Returns how many changed.
fn migrate_furniture(project: &mut Value) -> usize {
    let Some(items) = project.get_mut("furniture").and_then(Value::as_array_mut) else {
        return 0;
    };

    let mut migrated = 0;
    for record in items.iter_mut().filter_map(Value::as_object_mut) {
        if record.contains_key("templateId") {
            continue;
        }
        let template_id = match record.remove("type") {
            Some(legacy) => {
                migrated += 1;
                legacy_template_id(legacy.as_str().unwrap_or_default())
            }
            None => CUSTOM_TEMPLATE_ID,
        };
        record.insert("templateId".to_string(), Value::String(template_id.to_string()));
        drop_unknown_keys(record);
    }
    migrated
}

/// Legacy records only carry over the fields a furniture item knows.
fn drop_unknown_keys(record: &mut Map<String, Value>) {
    const KNOWN: [&str; 9] = [
        "id", "templateId", "name", "width", "depth", "x", "y", "rotation", "color",
    ];
    record.retain(|key, _| KNOWN.contains(&key.as_str()));
}
