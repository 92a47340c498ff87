//! Engine configuration.

use crate::entities::{Annotation, AreaPolygon, MeasureLine};
use crate::history::MAX_UNDO_HISTORY;
use crate::scale_bar::DEFAULT_TARGET_WIDTH;
use serde::{Deserialize, Serialize};

/// Drags shorter than this many pixels are treated as clicks.
pub const MIN_DRAG_DISTANCE: f64 = 5.0;

/// Styling for newly created annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnotationDefaults {
    pub text: String,
    pub font_size: f64,
    pub color: String,
}

impl Default for AnnotationDefaults {
    fn default() -> Self {
        Self {
            text: Annotation::DEFAULT_TEXT.to_string(),
            font_size: Annotation::DEFAULT_FONT_SIZE,
            color: Annotation::DEFAULT_COLOR.to_string(),
        }
    }
}

/// Plan configuration. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanConfig {
    /// Minimum pointer travel, in image pixels, for a line to be kept.
    pub min_drag_distance: f64,
    /// Maximum number of undo steps.
    pub history_limit: usize,
    pub line_color: String,
    pub area_color: String,
    pub annotation: AnnotationDefaults,
    /// Preferred on-screen length of the scale bar in pixels.
    pub scale_bar_target_width: f64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            min_drag_distance: MIN_DRAG_DISTANCE,
            history_limit: MAX_UNDO_HISTORY,
            line_color: MeasureLine::DEFAULT_COLOR.to_string(),
            area_color: AreaPolygon::DEFAULT_COLOR.to_string(),
            annotation: AnnotationDefaults::default(),
            scale_bar_target_width: DEFAULT_TARGET_WIDTH,
        }
    }
}

impl PlanConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
