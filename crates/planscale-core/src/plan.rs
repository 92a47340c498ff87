//! The plan: store, history, drawing and calibration in one owned value.

use crate::calibration::{Calibration, CalibrationError};
use crate::config::PlanConfig;
use crate::entities::{Entity, EntityId, EntityKind, FurnitureItem, MeasureLine};
use crate::history::History;
use crate::input::{Modifiers, PointerEvent, Shortcut};
use crate::library::FurnitureLibrary;
use crate::project::{ProjectData, ProjectError};
use crate::scale_bar::ScaleBar;
use crate::store::EntityStore;
use crate::tools::{Commit, DrawContext, Interaction, Mode};
use kurbo::{Point, Size};
use thiserror::Error;

/// Something with pixel dimensions, used to centre new furniture.
pub trait ImageBitmap {
    /// `(width, height)` in pixels.
    fn dimensions(&self) -> (f64, f64);
}

impl ImageBitmap for Size {
    fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

/// Plan errors.
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("The plan has no scale yet, calibrate it first")]
    NotCalibrated,
    #[error("Unknown furniture template: {0}")]
    UnknownTemplate(String),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

/// What a pointer event led to.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEvent {
    /// An entity was added to the store.
    Committed { id: EntityId, kind: EntityKind },
    /// A reference line is waiting for its real-world length.
    ReferenceDrawn,
}

fn draw_context<'a>(store: &'a EntityStore, config: &'a PlanConfig) -> DrawContext<'a> {
    DrawContext {
        mode: store.mode(),
        scale: store.scale(),
        unit: store.unit(),
        line_count: store.lines().len(),
        polygon_count: store.polygons().len(),
        config,
    }
}

/// A floor plan being measured.
#[derive(Debug, Clone)]
pub struct Plan {
    store: EntityStore,
    history: History,
    interaction: Interaction,
    calibration: Calibration,
    config: PlanConfig,
}

impl Default for Plan {
    fn default() -> Self {
        Self::new()
    }
}

impl Plan {
    pub fn new() -> Self {
        Self::with_config(PlanConfig::default())
    }

    pub fn with_config(config: PlanConfig) -> Self {
        Self {
            store: EntityStore::new(),
            history: History::with_limit(config.history_limit),
            interaction: Interaction::new(),
            calibration: Calibration::new(),
            config,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.store.mode()
    }

    pub fn is_calibrated(&self) -> bool {
        self.store.is_calibrated()
    }

    // --- Modes and drawing ---

    /// Switch mode. Measuring, tracing areas and annotating need a scale.
    ///
    /// Any draft is discarded, and so is a pending reference line unless
    /// the new mode is still calibration.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), PlanError> {
        if mode.requires_scale() && !self.store.is_calibrated() {
            return Err(PlanError::NotCalibrated);
        }
        if mode != Mode::Calibrate {
            self.calibration.cancel();
        }
        self.interaction.cancel();
        self.store.set_mode(mode);
        Ok(())
    }

    /// Feed a pointer event in image-pixel coordinates.
    pub fn handle_pointer(&mut self, event: PointerEvent, modifiers: Modifiers) -> Option<PlanEvent> {
        let ctx = draw_context(&self.store, &self.config);
        let commit = self.interaction.handle_pointer(event, modifiers, &ctx)?;
        self.apply_commit(commit)
    }

    /// Close the polygon being traced. Returns the new polygon's id.
    pub fn finish_polygon(&mut self) -> Option<EntityId> {
        let ctx = draw_context(&self.store, &self.config);
        let commit = self.interaction.finish_polygon(&ctx)?;
        match self.apply_commit(commit)? {
            PlanEvent::Committed { id, .. } => Some(id),
            PlanEvent::ReferenceDrawn => None,
        }
    }

    /// Drop the current draft.
    pub fn cancel_drawing(&mut self) {
        self.interaction.cancel();
    }

    fn apply_commit(&mut self, commit: Commit) -> Option<PlanEvent> {
        let (id, kind) = match commit {
            Commit::Line(line) => {
                log::debug!("Committing line {}", line.name);
                (self.edit(|store| store.add_line(line)), EntityKind::Line)
            }
            Commit::Polygon(polygon) => {
                log::debug!("Committing polygon {}", polygon.name);
                (self.edit(|store| store.add_polygon(polygon)), EntityKind::Polygon)
            }
            Commit::Annotation(annotation) => {
                let id = self.edit(|store| store.add_annotation(annotation));
                self.store.select_annotation(Some(&id));
                (id, EntityKind::Annotation)
            }
            Commit::Reference(reference) => {
                return self
                    .calibration
                    .on_reference_line_drawn(reference)
                    .then_some(PlanEvent::ReferenceDrawn);
            }
        };
        Some(PlanEvent::Committed { id, kind })
    }

    /// Draft measurement or reference line.
    pub fn draft_line(&self) -> Option<&MeasureLine> {
        self.interaction.draft_line()
    }

    /// Points of the polygon being traced.
    pub fn draft_polygon(&self) -> &[Point] {
        self.interaction.draft_polygon()
    }

    /// Reference line waiting for its real-world length.
    pub fn pending_reference(&self) -> Option<&MeasureLine> {
        self.calibration.reference()
    }

    // --- Calibration ---

    /// Enter calibration and forget any earlier reference line.
    pub fn begin_calibration(&mut self) {
        self.calibration.begin();
        self.interaction.cancel();
        self.store.set_mode(Mode::Calibrate);
    }

    /// Calibrate from the pending reference line. Switches to measure mode
    /// on success and returns the new scale.
    pub fn apply_calibration(&mut self, distance: f64, unit: &str) -> Result<f64, PlanError> {
        let before = self.store.snapshot();
        let scale = self.calibration.apply(distance, unit, &mut self.store)?;
        self.record_if_changed(before);
        self.set_mode(Mode::Measure)?;
        Ok(scale)
    }

    /// Like [`apply_calibration`](Self::apply_calibration) with a typed-in
    /// distance.
    pub fn apply_calibration_input(&mut self, text: &str, unit: &str) -> Result<f64, PlanError> {
        let before = self.store.snapshot();
        let scale = self.calibration.apply_input(text, unit, &mut self.store)?;
        self.record_if_changed(before);
        self.set_mode(Mode::Measure)?;
        Ok(scale)
    }

    /// Abandon the pending reference line.
    pub fn cancel_calibration(&mut self) {
        self.calibration.cancel();
        self.interaction.cancel();
    }

    // --- Edits ---

    /// Run a mutation against the store, recording an undo step if the
    /// persisted state changed.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut EntityStore) -> R) -> R {
        let before = self.store.snapshot();
        let result = f(&mut self.store);
        self.record_if_changed(before);
        result
    }

    fn record_if_changed(&mut self, before: ProjectData) {
        if self.store.snapshot() != before {
            self.history.record(before);
        }
    }

    pub fn rename_any(&mut self, id: &str, name: &str) -> bool {
        self.edit(|store| store.rename_any(id, name))
    }

    pub fn recolor_any(&mut self, id: &str, color: &str) -> bool {
        self.edit(|store| store.recolor_any(id, color))
    }

    pub fn delete_any(&mut self, id: &str) -> Option<Entity> {
        self.edit(|store| store.delete_any(id))
    }

    pub fn select_furniture(&mut self, id: Option<&str>) -> bool {
        self.store.select_furniture(id)
    }

    pub fn select_annotation(&mut self, id: Option<&str>) -> bool {
        self.store.select_annotation(id)
    }

    /// Place a furniture item from a template, centred on the image.
    ///
    /// The new item is selected, the plan returns to view mode and the
    /// template moves to the front of the library's recent list.
    pub fn place_furniture(
        &mut self,
        template_id: &str,
        library: &mut FurnitureLibrary,
        image: &dyn ImageBitmap,
    ) -> Result<EntityId, PlanError> {
        let scale = self.store.scale().ok_or(PlanError::NotCalibrated)?;
        let template = library
            .template(template_id)
            .ok_or_else(|| PlanError::UnknownTemplate(template_id.to_string()))?;

        let (image_width, image_height) = image.dimensions();
        let position = Point::new(
            image_width / 2.0 - template.width * scale / 2.0,
            image_height / 2.0 - template.depth * scale / 2.0,
        );
        let item = FurnitureItem::from_template(template, position);
        log::debug!("Placing {} at ({:.1}, {:.1})", item.name, position.x, position.y);

        let id = self.edit(|store| store.add_furniture(item));
        self.store.select_furniture(Some(&id));
        self.set_mode(Mode::View)?;
        library.add_to_recent(template_id);
        Ok(id)
    }

    // --- Project ---

    /// Current persisted state.
    pub fn project(&self) -> ProjectData {
        self.store.snapshot()
    }

    /// Replace the plan with a project file. The load can be undone; on
    /// error nothing changes.
    pub fn load_project(&mut self, json: &str) -> Result<(), ProjectError> {
        let data = ProjectData::from_json(json)?;
        log::info!(
            "Loaded project: {} entities, scale {:?} px/{}",
            data.entity_count(),
            data.scale,
            data.unit
        );
        self.edit(|store| {
            store.restore(data);
            store.clear_selection();
        });
        self.after_restore();
        Ok(())
    }

    /// Serialize the plan to project JSON.
    pub fn save_project(&self) -> Result<String, ProjectError> {
        self.store.snapshot().to_json()
    }

    /// Start over with an empty, uncalibrated plan. Can be undone.
    pub fn reset(&mut self) {
        log::info!("Resetting plan");
        self.edit(EntityStore::reset);
        self.interaction = Interaction::new();
        self.calibration = Calibration::new();
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo(self.store.snapshot()) else {
            return false;
        };
        self.store.restore(previous);
        self.after_restore();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo(self.store.snapshot()) else {
            return false;
        };
        self.store.restore(next);
        self.after_restore();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Drafts refer to the old state; a mode may no longer be allowed.
    fn after_restore(&mut self) {
        self.interaction.cancel();
        if self.mode().requires_scale() && !self.store.is_calibrated() {
            self.store.set_mode(Mode::View);
        }
    }

    /// Run a keyboard command. Returns whether it did anything.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> bool {
        match shortcut {
            Shortcut::Undo => self.undo(),
            Shortcut::Redo => self.redo(),
            Shortcut::Cancel => {
                let was_busy = self.interaction.is_drawing() || self.calibration.is_awaiting_distance();
                self.cancel_calibration();
                was_busy
            }
            Shortcut::FinishPolygon => self.finish_polygon().is_some(),
        }
    }

    /// Scale bar for the current calibration at `zoom`.
    pub fn scale_bar(&self, zoom: f64) -> Option<ScaleBar> {
        let scale = self.store.scale()?;
        ScaleBar::compute_with_target(scale, zoom, self.store.unit(), self.config.scale_bar_target_width)
    }
}
