//! Scale bar sizing.

use crate::geometry::nice_scale_value;

/// Preferred on-screen length of the bar in pixels.
pub const DEFAULT_TARGET_WIDTH: f64 = 120.0;

/// A scale bar ready to draw: a round real-world value and its on-screen
/// width at the current zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBar {
    /// Bar length in screen pixels (rounded).
    pub width: f64,
    /// Real-world length the bar represents, in `unit`.
    pub value: f64,
    /// Display unit, possibly converted from the plan unit.
    pub unit: String,
}

impl ScaleBar {
    /// Compute the bar for `scale` pixels per unit at `zoom`.
    ///
    /// Returns `None` when the plan is uncalibrated or the inputs are not
    /// positive.
    pub fn compute(scale: f64, zoom: f64, unit: &str) -> Option<Self> {
        Self::compute_with_target(scale, zoom, unit, DEFAULT_TARGET_WIDTH)
    }

    pub fn compute_with_target(scale: f64, zoom: f64, unit: &str, target: f64) -> Option<Self> {
        let screen_scale = scale * zoom;
        if !(screen_scale.is_finite() && screen_scale > 0.0 && target > 0.0) {
            return None;
        }

        let value = nice_scale_value(target / screen_scale);
        if value <= 0.0 {
            return None;
        }
        let width = (value * screen_scale).round();
        let (value, unit) = display_unit(value, unit);
        Some(Self { width, value, unit })
    }

    /// Text such as `5 m` or `2.5 cm`.
    pub fn label(&self) -> String {
        format!("{} {}", format_value(self.value), self.unit)
    }
}

/// Switch to a more readable unit for very small or very large values.
fn display_unit(value: f64, unit: &str) -> (f64, String) {
    let (value, unit) = match unit {
        "m" if value < 1.0 => (value * 100.0, "cm"),
        "m" if value >= 1000.0 => (value / 1000.0, "km"),
        "cm" if value >= 100.0 => (value / 100.0, "m"),
        "ft" if value >= 5280.0 => (value / 5280.0, "mi"),
        _ => (value, unit),
    };
    (value, unit.to_string())
}

fn format_value(value: f64) -> String {
    // Unit conversions can leave float noise like 50.00000000000001.
    let rounded = (value * 1e6).round() / 1e6;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_meters() {
        // 120 / 50 = 2.4 m -> 2 m, 100 px
        let bar = ScaleBar::compute(50.0, 1.0, "m").unwrap();
        assert_eq!(bar.value, 2.0);
        assert_eq!(bar.width, 100.0);
        assert_eq!(bar.label(), "2 m");
    }

    #[test]
    fn test_zoom_changes_value() {
        let bar = ScaleBar::compute(50.0, 4.0, "m").unwrap();
        // 120 / 200 = 0.6 -> 0.5 m -> 50 cm
        assert_eq!(bar.width, 100.0);
        assert_eq!(bar.unit, "cm");
        assert_eq!(bar.label(), "50 cm");
    }

    #[test]
    fn test_large_conversions() {
        let bar = ScaleBar::compute(0.01, 1.0, "m").unwrap();
        assert_eq!(bar.label(), "10 km");

        let bar = ScaleBar::compute(0.5, 1.0, "cm").unwrap();
        assert_eq!(bar.label(), "2 m");

        let bar = ScaleBar::compute(0.01, 1.0, "ft").unwrap();
        assert_eq!(bar.unit, "mi");
    }

    #[test]
    fn test_other_units_untouched() {
        let bar = ScaleBar::compute(10.0, 1.0, "in").unwrap();
        assert_eq!(bar.label(), "10 in");
    }

    #[test]
    fn test_invalid_input() {
        assert!(ScaleBar::compute(0.0, 1.0, "m").is_none());
        assert!(ScaleBar::compute(10.0, -1.0, "m").is_none());
        assert!(ScaleBar::compute(f64::NAN, 1.0, "m").is_none());
    }
}
