//! Scale calibration from a reference line of known length.

use crate::entities::MeasureLine;
use crate::project::DEFAULT_UNIT;
use crate::store::EntityStore;
use thiserror::Error;

/// Calibration errors. The pending reference is kept on error so the
/// user can correct the distance.
#[derive(Debug, Error, PartialEq)]
pub enum CalibrationError {
    #[error("Distance must be a positive number, got {0:?}")]
    InvalidDistance(String),
    #[error("No reference line has been drawn")]
    NoReferenceLine,
}

/// Where the calibration protocol is.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CalibrationState {
    #[default]
    Idle,
    /// A reference line was drawn and waits for its real-world length.
    AwaitingDistance { reference: MeasureLine },
}

/// Two-step calibration: draw a reference line, then enter its length.
#[derive(Debug, Clone, Default)]
pub struct Calibration {
    state: CalibrationState,
}

impl Calibration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CalibrationState {
        &self.state
    }

    /// The reference line waiting for a distance.
    pub fn reference(&self) -> Option<&MeasureLine> {
        match &self.state {
            CalibrationState::AwaitingDistance { reference } => Some(reference),
            CalibrationState::Idle => None,
        }
    }

    pub fn is_awaiting_distance(&self) -> bool {
        self.reference().is_some()
    }

    /// Start over, dropping any pending reference.
    pub fn begin(&mut self) {
        self.state = CalibrationState::Idle;
    }

    /// Hold a freshly drawn reference line. Degenerate lines are ignored
    /// and return `false`.
    pub fn on_reference_line_drawn(&mut self, reference: MeasureLine) -> bool {
        let length = reference.pixel_length();
        if !(length.is_finite() && length > 0.0) {
            log::debug!("Ignoring degenerate reference line");
            return false;
        }
        log::debug!("Reference line drawn, {:.1}px", length);
        self.state = CalibrationState::AwaitingDistance { reference };
        true
    }

    /// Apply a real-world length to the pending reference line.
    ///
    /// On success the store gets the new scale and unit, every line and
    /// polygon is re-measured, and the new scale is returned.
    pub fn apply(
        &mut self,
        distance: f64,
        unit: &str,
        store: &mut EntityStore,
    ) -> Result<f64, CalibrationError> {
        let reference = self.reference().ok_or(CalibrationError::NoReferenceLine)?;
        if !(distance.is_finite() && distance > 0.0) {
            return Err(CalibrationError::InvalidDistance(distance.to_string()));
        }

        let scale = reference.pixel_length() / distance;
        let unit = if unit.trim().is_empty() { DEFAULT_UNIT } else { unit };
        if !store.recalibrate(scale, unit) {
            return Err(CalibrationError::InvalidDistance(distance.to_string()));
        }

        log::info!("Calibrated: {:.4} px/{}", scale, unit);
        self.state = CalibrationState::Idle;
        Ok(scale)
    }

    /// Like [`apply`](Self::apply), parsing the distance from user text.
    pub fn apply_input(
        &mut self,
        text: &str,
        unit: &str,
        store: &mut EntityStore,
    ) -> Result<f64, CalibrationError> {
        if !self.is_awaiting_distance() {
            return Err(CalibrationError::NoReferenceLine);
        }
        let distance = parse_distance(text)?;
        self.apply(distance, unit, store)
    }

    /// Abandon calibration; the current scale is unchanged.
    pub fn cancel(&mut self) {
        self.state = CalibrationState::Idle;
    }
}

/// Parse a user-entered distance.
pub fn parse_distance(text: &str) -> Result<f64, CalibrationError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(CalibrationError::InvalidDistance(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AreaPolygon;
    use kurbo::Point;

    fn reference(length: f64) -> MeasureLine {
        MeasureLine::new(Point::new(0.0, 0.0), Point::new(length, 0.0), "Reference", "#ef4444")
    }

    #[test]
    fn test_apply_sets_scale_and_remeasures() {
        let mut store = EntityStore::new();
        store.add_line(reference(50.0));
        store.add_polygon(AreaPolygon::new(
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0), Point::new(0.0, 100.0)],
            "Room",
            AreaPolygon::DEFAULT_COLOR,
        ));

        let mut calibration = Calibration::new();
        assert!(calibration.on_reference_line_drawn(reference(200.0)));
        assert!(calibration.is_awaiting_distance());

        let scale = calibration.apply(4.0, "m", &mut store).unwrap();
        assert_eq!(scale, 50.0);
        assert_eq!(store.scale(), Some(50.0));
        assert_eq!(store.lines()[0].length, Some(1.0));
        assert_eq!(store.polygons()[0].area, Some(4.0));
        assert_eq!(*calibration.state(), CalibrationState::Idle);
    }

    #[test]
    fn test_reference_not_stored() {
        let mut store = EntityStore::new();
        let mut calibration = Calibration::new();
        calibration.on_reference_line_drawn(reference(100.0));
        calibration.apply(1.0, "m", &mut store).unwrap();
        assert!(store.lines().is_empty());
    }

    #[test]
    fn test_invalid_distance_keeps_reference() {
        let mut store = EntityStore::new();
        let mut calibration = Calibration::new();
        calibration.on_reference_line_drawn(reference(100.0));

        for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                calibration.apply(bad, "m", &mut store),
                Err(CalibrationError::InvalidDistance(_))
            ));
        }
        assert!(calibration.is_awaiting_distance());
        assert_eq!(store.scale(), None);
    }

    #[test]
    fn test_apply_without_reference() {
        let mut store = EntityStore::new();
        let mut calibration = Calibration::new();
        assert_eq!(
            calibration.apply(1.0, "m", &mut store),
            Err(CalibrationError::NoReferenceLine)
        );
        assert_eq!(
            calibration.apply_input("1", "m", &mut store),
            Err(CalibrationError::NoReferenceLine)
        );
    }

    #[test]
    fn test_degenerate_reference_ignored() {
        let mut calibration = Calibration::new();
        assert!(!calibration.on_reference_line_drawn(reference(0.0)));
        assert_eq!(*calibration.state(), CalibrationState::Idle);
    }

    #[test]
    fn test_apply_input() {
        let mut store = EntityStore::new();
        let mut calibration = Calibration::new();
        calibration.on_reference_line_drawn(reference(300.0));

        assert_eq!(
            calibration.apply_input("abc", "m", &mut store),
            Err(CalibrationError::InvalidDistance("abc".to_string()))
        );
        assert_eq!(calibration.apply_input(" 1.5 ", "ft", &mut store), Ok(200.0));
        assert_eq!(store.unit(), "ft");
    }

    #[test]
    fn test_cancel_keeps_scale() {
        let mut store = EntityStore::new();
        store.recalibrate(10.0, "m");
        let mut calibration = Calibration::new();
        calibration.on_reference_line_drawn(reference(100.0));

        calibration.cancel();
        assert!(!calibration.is_awaiting_distance());
        assert_eq!(store.scale(), Some(10.0));
    }

    #[test]
    fn test_parse_distance() {
        assert_eq!(parse_distance("2"), Ok(2.0));
        assert_eq!(parse_distance("\t0.25\n"), Ok(0.25));
        assert!(parse_distance("").is_err());
        assert!(parse_distance("0").is_err());
        assert!(parse_distance("-1").is_err());
        assert!(parse_distance("inf").is_err());
    }
}
