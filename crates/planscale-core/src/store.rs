//! Entity collections, calibration and selection.

use crate::entities::{
    Annotation, AreaPolygon, Entity, EntityId, EntityKind, EntityTrait, FurnitureItem,
    MeasureLine,
};
use crate::geometry::normalize_rotation;
use crate::project::{DEFAULT_UNIT, ProjectData};
use crate::tools::Mode;

/// All entities of a plan plus its calibration.
///
/// Mode and selection live here too but are transient: they are not part
/// of [`snapshot`](Self::snapshot) and survive undo/redo untouched.
#[derive(Debug, Clone)]
pub struct EntityStore {
    lines: Vec<MeasureLine>,
    polygons: Vec<AreaPolygon>,
    furniture: Vec<FurnitureItem>,
    annotations: Vec<Annotation>,
    /// Pixels per unit.
    scale: Option<f64>,
    unit: String,
    mode: Mode,
    selected_furniture_id: Option<EntityId>,
    selected_annotation_id: Option<EntityId>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            polygons: Vec::new(),
            furniture: Vec::new(),
            annotations: Vec::new(),
            scale: None,
            unit: DEFAULT_UNIT.to_string(),
            mode: Mode::View,
            selected_furniture_id: None,
            selected_annotation_id: None,
        }
    }

    pub fn lines(&self) -> &[MeasureLine] {
        &self.lines
    }

    pub fn polygons(&self) -> &[AreaPolygon] {
        &self.polygons
    }

    pub fn furniture(&self) -> &[FurnitureItem] {
        &self.furniture
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn is_calibrated(&self) -> bool {
        self.scale.is_some()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Total number of entities.
    pub fn len(&self) -> usize {
        self.lines.len() + self.polygons.len() + self.furniture.len() + self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- Calibration ---

    /// Set a new calibration and re-derive every line length and polygon
    /// area from it.
    ///
    /// Non-positive or non-finite scales are ignored and return `false`.
    pub(crate) fn recalibrate(&mut self, scale: f64, unit: &str) -> bool {
        if !(scale.is_finite() && scale > 0.0) {
            log::warn!("Ignoring invalid scale {}", scale);
            return false;
        }
        self.scale = Some(scale);
        self.unit = unit.to_string();
        for line in &mut self.lines {
            line.measure(scale, unit);
        }
        for polygon in &mut self.polygons {
            polygon.measure(scale, unit);
        }
        true
    }

    // --- Lines ---

    pub fn add_line(&mut self, line: MeasureLine) -> EntityId {
        let id = line.id.clone();
        self.lines.push(line);
        id
    }

    pub fn line(&self, id: &str) -> Option<&MeasureLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Edit a line in place. The id cannot change; the length is
    /// re-derived when the plan is calibrated.
    pub fn update_line(&mut self, id: &str, f: impl FnOnce(&mut MeasureLine)) -> bool {
        let (scale, unit) = (self.scale, self.unit.clone());
        let Some(line) = self.lines.iter_mut().find(|l| l.id == id) else {
            return false;
        };
        f(line);
        line.id = id.to_string();
        if let Some(scale) = scale {
            line.measure(scale, &unit);
        }
        true
    }

    pub fn remove_line(&mut self, id: &str) -> Option<MeasureLine> {
        let index = self.lines.iter().position(|l| l.id == id)?;
        Some(self.lines.remove(index))
    }

    /// Replace all lines, measuring them against the current scale.
    pub fn set_lines(&mut self, mut lines: Vec<MeasureLine>) {
        if let Some(scale) = self.scale {
            for line in &mut lines {
                line.measure(scale, &self.unit);
            }
        }
        self.lines = lines;
    }

    // --- Polygons ---

    pub fn add_polygon(&mut self, polygon: AreaPolygon) -> EntityId {
        let id = polygon.id.clone();
        self.polygons.push(polygon);
        id
    }

    pub fn polygon(&self, id: &str) -> Option<&AreaPolygon> {
        self.polygons.iter().find(|p| p.id == id)
    }

    /// Edit a polygon in place; the area is re-derived when calibrated.
    pub fn update_polygon(&mut self, id: &str, f: impl FnOnce(&mut AreaPolygon)) -> bool {
        let (scale, unit) = (self.scale, self.unit.clone());
        let Some(polygon) = self.polygons.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        f(polygon);
        polygon.id = id.to_string();
        if let Some(scale) = scale {
            polygon.measure(scale, &unit);
        }
        true
    }

    pub fn remove_polygon(&mut self, id: &str) -> Option<AreaPolygon> {
        let index = self.polygons.iter().position(|p| p.id == id)?;
        Some(self.polygons.remove(index))
    }

    /// Replace all polygons, measuring them against the current scale.
    pub fn set_polygons(&mut self, mut polygons: Vec<AreaPolygon>) {
        if let Some(scale) = self.scale {
            for polygon in &mut polygons {
                polygon.measure(scale, &self.unit);
            }
        }
        self.polygons = polygons;
    }

    // --- Furniture ---

    pub fn add_furniture(&mut self, mut item: FurnitureItem) -> EntityId {
        item.rotation = normalize_rotation(item.rotation);
        let id = item.id.clone();
        self.furniture.push(item);
        id
    }

    pub fn furniture_item(&self, id: &str) -> Option<&FurnitureItem> {
        self.furniture.iter().find(|f| f.id == id)
    }

    /// Edit a furniture item in place; rotation is re-normalized.
    pub fn update_furniture(&mut self, id: &str, f: impl FnOnce(&mut FurnitureItem)) -> bool {
        let Some(item) = self.furniture.iter_mut().find(|f| f.id == id) else {
            return false;
        };
        f(item);
        item.id = id.to_string();
        item.rotation = normalize_rotation(item.rotation);
        true
    }

    pub fn remove_furniture(&mut self, id: &str) -> Option<FurnitureItem> {
        let index = self.furniture.iter().position(|f| f.id == id)?;
        if self.selected_furniture_id.as_deref() == Some(id) {
            self.selected_furniture_id = None;
        }
        Some(self.furniture.remove(index))
    }

    pub fn set_furniture(&mut self, mut furniture: Vec<FurnitureItem>) {
        for item in &mut furniture {
            item.rotation = normalize_rotation(item.rotation);
        }
        self.furniture = furniture;
        self.prune_selection();
    }

    // --- Annotations ---

    pub fn add_annotation(&mut self, mut annotation: Annotation) -> EntityId {
        annotation.rotation = normalize_rotation(annotation.rotation);
        let id = annotation.id.clone();
        self.annotations.push(annotation);
        id
    }

    pub fn annotation(&self, id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// Edit an annotation in place; rotation is re-normalized.
    pub fn update_annotation(&mut self, id: &str, f: impl FnOnce(&mut Annotation)) -> bool {
        let Some(annotation) = self.annotations.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        f(annotation);
        annotation.id = id.to_string();
        annotation.rotation = normalize_rotation(annotation.rotation);
        true
    }

    pub fn remove_annotation(&mut self, id: &str) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id == id)?;
        if self.selected_annotation_id.as_deref() == Some(id) {
            self.selected_annotation_id = None;
        }
        Some(self.annotations.remove(index))
    }

    pub fn set_annotations(&mut self, mut annotations: Vec<Annotation>) {
        for annotation in &mut annotations {
            annotation.rotation = normalize_rotation(annotation.rotation);
        }
        self.annotations = annotations;
        self.prune_selection();
    }

    // --- Selection ---

    pub fn selected_furniture_id(&self) -> Option<&str> {
        self.selected_furniture_id.as_deref()
    }

    pub fn selected_annotation_id(&self) -> Option<&str> {
        self.selected_annotation_id.as_deref()
    }

    /// Select a furniture item (or clear with `None`). Unknown ids are
    /// ignored and return `false`.
    pub fn select_furniture(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) if self.furniture_item(id).is_none() => false,
            _ => {
                self.selected_furniture_id = id.map(str::to_string);
                true
            }
        }
    }

    /// Select an annotation (or clear with `None`).
    pub fn select_annotation(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) if self.annotation(id).is_none() => false,
            _ => {
                self.selected_annotation_id = id.map(str::to_string);
                true
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_furniture_id = None;
        self.selected_annotation_id = None;
    }

    fn prune_selection(&mut self) {
        if let Some(id) = self.selected_furniture_id.clone() {
            if self.furniture_item(&id).is_none() {
                self.selected_furniture_id = None;
            }
        }
        if let Some(id) = self.selected_annotation_id.clone() {
            if self.annotation(&id).is_none() {
                self.selected_annotation_id = None;
            }
        }
    }

    // --- Any kind ---

    /// Which collection holds `id`.
    pub fn kind_of(&self, id: &str) -> Option<EntityKind> {
        self.entity(id).map(|e| e.kind())
    }

    /// Look up an entity of any kind.
    pub fn entity(&self, id: &str) -> Option<&dyn EntityTrait> {
        if let Some(e) = self.line(id) {
            return Some(e);
        }
        if let Some(e) = self.polygon(id) {
            return Some(e);
        }
        if let Some(e) = self.furniture_item(id) {
            return Some(e);
        }
        self.annotation(id).map(|e| e as &dyn EntityTrait)
    }

    pub fn entity_mut(&mut self, id: &str) -> Option<&mut dyn EntityTrait> {
        if let Some(e) = self.lines.iter_mut().find(|e| e.id == id) {
            return Some(e);
        }
        if let Some(e) = self.polygons.iter_mut().find(|e| e.id == id) {
            return Some(e);
        }
        if let Some(e) = self.furniture.iter_mut().find(|e| e.id == id) {
            return Some(e);
        }
        self.annotations
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| e as &mut dyn EntityTrait)
    }

    /// Rename any entity. For annotations this replaces the text.
    pub fn rename_any(&mut self, id: &str, name: &str) -> bool {
        match self.entity_mut(id) {
            Some(entity) => {
                entity.set_name(name.to_string());
                true
            }
            None => false,
        }
    }

    pub fn recolor_any(&mut self, id: &str, color: &str) -> bool {
        match self.entity_mut(id) {
            Some(entity) => {
                entity.set_color(color.to_string());
                true
            }
            None => false,
        }
    }

    /// Delete any entity, returning it.
    pub fn delete_any(&mut self, id: &str) -> Option<Entity> {
        match self.kind_of(id)? {
            EntityKind::Line => self.remove_line(id).map(Entity::from),
            EntityKind::Polygon => self.remove_polygon(id).map(Entity::from),
            EntityKind::Furniture => self.remove_furniture(id).map(Entity::from),
            EntityKind::Annotation => self.remove_annotation(id).map(Entity::from),
        }
    }

    /// All entities as owned values, lines first.
    pub fn entities(&self) -> Vec<Entity> {
        self.lines
            .iter()
            .cloned()
            .map(Entity::from)
            .chain(self.polygons.iter().cloned().map(Entity::from))
            .chain(self.furniture.iter().cloned().map(Entity::from))
            .chain(self.annotations.iter().cloned().map(Entity::from))
            .collect()
    }

    // --- Persistence ---

    /// Copy of the persisted slice.
    pub fn snapshot(&self) -> ProjectData {
        ProjectData {
            lines: self.lines.clone(),
            polygons: self.polygons.clone(),
            furniture: self.furniture.clone(),
            annotations: self.annotations.clone(),
            scale: self.scale,
            unit: self.unit.clone(),
        }
    }

    /// Replace the persisted slice. Mode is kept; a selection that no
    /// longer resolves is cleared.
    pub fn restore(&mut self, data: ProjectData) {
        self.lines = data.lines;
        self.polygons = data.polygons;
        self.furniture = data.furniture;
        self.annotations = data.annotations;
        self.scale = data.scale.filter(|s| s.is_finite() && *s > 0.0);
        self.unit = data.unit;
        self.prune_selection();
    }

    /// Back to an empty, uncalibrated plan in view mode.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
