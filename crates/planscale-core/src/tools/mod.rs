//! Drawing modes and the pointer state machine.
//!
//! The state machine only tracks drafts. Finished entities come back as a
//! [`Commit`] for the caller to add to the store, so every commit goes
//! through the same recorded path.

use crate::config::PlanConfig;
use crate::entities::{Annotation, AreaPolygon, MeasureLine};
use crate::geometry::{polygon_area, snap_to_axis};
use crate::input::{Modifiers, PointerEvent};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Editor modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mode {
    /// No drawing; pan and zoom only.
    #[default]
    View,
    /// Draw a reference line of known length.
    Calibrate,
    /// Draw measurement lines.
    Measure,
    /// Trace a polygon point by point.
    Area,
    /// Click to drop a text note.
    Annotate,
}

impl Mode {
    /// Modes that need a scale before they can be entered.
    pub fn requires_scale(self) -> bool {
        matches!(self, Mode::Measure | Mode::Area | Mode::Annotate)
    }
}

/// What the state machine needs to know about the plan to name and
/// measure new entities. The mode is owned by the store and read from here.
#[derive(Debug, Clone, Copy)]
pub struct DrawContext<'a> {
    pub mode: Mode,
    pub scale: Option<f64>,
    pub unit: &'a str,
    pub line_count: usize,
    pub polygon_count: usize,
    pub config: &'a PlanConfig,
}

/// A finished interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    Line(MeasureLine),
    Polygon(AreaPolygon),
    Annotation(Annotation),
    /// A calibration reference line; never stored as a measurement.
    Reference(MeasureLine),
}

/// Draft being drawn.
#[derive(Debug, Clone, Default)]
pub enum DrawState {
    #[default]
    Idle,
    /// A line between pointer-down and pointer-up.
    Line(MeasureLine),
    /// Polygon points collected so far.
    Polygon(Vec<Point>),
}

/// Turns pointer input into drafts and commits for the current mode.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: DrawState,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current draft.
    pub fn cancel(&mut self) {
        if !matches!(self.state, DrawState::Idle) {
            log::debug!("Discarding draft");
        }
        self.state = DrawState::Idle;
    }

    pub fn is_drawing(&self) -> bool {
        !matches!(self.state, DrawState::Idle)
    }

    /// The line being dragged, if any.
    pub fn draft_line(&self) -> Option<&MeasureLine> {
        match &self.state {
            DrawState::Line(line) => Some(line),
            _ => None,
        }
    }

    /// Points of the polygon being traced (empty when not tracing).
    pub fn draft_polygon(&self) -> &[Point] {
        match &self.state {
            DrawState::Polygon(points) => points,
            _ => &[],
        }
    }

    /// Feed a pointer event. Returns a commit when an entity is finished.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        modifiers: Modifiers,
        ctx: &DrawContext<'_>,
    ) -> Option<Commit> {
        match event {
            PointerEvent::Down { position, button } if button.is_primary() => {
                self.pointer_down(position, ctx)
            }
            PointerEvent::Move { position } => {
                self.pointer_move(position, modifiers);
                None
            }
            PointerEvent::Up { button, .. } if button.is_primary() => self.pointer_up(ctx),
            _ => None,
        }
    }

    fn pointer_down(&mut self, point: Point, ctx: &DrawContext<'_>) -> Option<Commit> {
        match ctx.mode {
            Mode::View => None,
            Mode::Calibrate | Mode::Measure => {
                let name = if ctx.mode == Mode::Calibrate {
                    MeasureLine::REFERENCE_NAME.to_string()
                } else {
                    format!("Measurement {}", ctx.line_count + 1)
                };
                self.state = DrawState::Line(MeasureLine::new(
                    point,
                    point,
                    name,
                    ctx.config.line_color.clone(),
                ));
                None
            }
            Mode::Area => {
                match &mut self.state {
                    DrawState::Polygon(points) => points.push(point),
                    _ => self.state = DrawState::Polygon(vec![point]),
                }
                None
            }
            Mode::Annotate => {
                let defaults = &ctx.config.annotation;
                let mut annotation = Annotation::with_text(point, defaults.text.clone());
                annotation.font_size = defaults.font_size;
                annotation.color = defaults.color.clone();
                Some(Commit::Annotation(annotation))
            }
        }
    }

    fn pointer_move(&mut self, raw: Point, modifiers: Modifiers) {
        if let DrawState::Line(line) = &mut self.state {
            line.end = if modifiers.shift {
                raw
            } else {
                snap_to_axis(line.start, raw)
            };
        }
    }

    fn pointer_up(&mut self, ctx: &DrawContext<'_>) -> Option<Commit> {
        // Polygon points survive pointer-up.
        if !matches!(self.state, DrawState::Line(_)) {
            return None;
        }
        let DrawState::Line(mut line) = std::mem::take(&mut self.state) else {
            return None;
        };

        if line.pixel_length() < ctx.config.min_drag_distance {
            log::debug!("Discarding line shorter than {}px", ctx.config.min_drag_distance);
            return None;
        }

        match ctx.mode {
            Mode::Calibrate => Some(Commit::Reference(line)),
            Mode::Measure => match ctx.scale {
                Some(scale) => {
                    line.measure(scale, ctx.unit);
                    Some(Commit::Line(line))
                }
                None => {
                    log::debug!("Discarding measurement drawn without a scale");
                    None
                }
            },
            _ => None,
        }
    }

    /// Close the polygon being traced.
    ///
    /// Fewer than three points discards the draft. Without a scale nothing
    /// is committed and the draft is left in place.
    pub fn finish_polygon(&mut self, ctx: &DrawContext<'_>) -> Option<Commit> {
        if !matches!(self.state, DrawState::Polygon(_)) {
            return None;
        }
        let point_count = self.draft_polygon().len();
        if point_count < 3 {
            log::debug!("Discarding polygon with {} point(s)", point_count);
            self.state = DrawState::Idle;
            return None;
        }
        let Some(scale) = ctx.scale else {
            log::debug!("Cannot close polygon without a scale");
            return None;
        };
        let DrawState::Polygon(points) = std::mem::take(&mut self.state) else {
            return None;
        };

        let area = polygon_area(&points, scale);
        let mut polygon = AreaPolygon::new(
            points,
            format!("Area {}", ctx.polygon_count + 1),
            ctx.config.area_color.clone(),
        );
        polygon.area = Some(area);
        polygon.unit = Some(AreaPolygon::area_unit(ctx.unit));
        Some(Commit::Polygon(polygon))
    }
}
