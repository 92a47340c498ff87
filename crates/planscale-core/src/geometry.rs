//! Geometry kernel: distances, areas and unit conversion.
//!
//! Everything here is pure. Coordinates are image pixels, `scale` is pixels
//! per real-world unit.

use kurbo::Point;

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// Area of a simple polygon in square units, using the shoelace formula.
///
/// Returns `0.0` for fewer than three points. The winding order does not
/// matter.
pub fn polygon_area(points: &[Point], scale: f64) -> f64 {
    let len = points.len();
    if len < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for (i, p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % len];
        sum += p1.x * p2.y;
        sum -= p2.x * p1.y;
    }

    (sum.abs() / 2.0) / (scale * scale)
}

/// Convert a pixel length into real-world units.
///
/// A zero scale yields `0.0` instead of infinity.
pub fn pixels_to_unit(pixels: f64, scale: f64) -> f64 {
    if scale == 0.0 {
        return 0.0;
    }
    pixels / scale
}

/// Convert a real-world length into pixels.
pub fn unit_to_pixels(units: f64, scale: f64) -> f64 {
    units * scale
}

/// Round a raw length to a value that reads well on a scale bar.
///
/// The leading digit is bucketed to 1, 2, 5 or 10 with breakpoints at
/// 1.5, 3.5 and 7.5 (so 7.5 goes up to 10, not down to 5).
pub fn nice_scale_value(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }

    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let normalized = raw / magnitude;

    let digit = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };

    digit * magnitude
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    // `%` is exact, so angles already in range come back unchanged.
    let remainder = degrees % 360.0;
    let normalized = if remainder < 0.0 { remainder + 360.0 } else { remainder };
    // -0.0 and tiny negatives that round up to 360 both collapse to 0.
    if normalized >= 360.0 || normalized == 0.0 {
        0.0
    } else {
        normalized
    }
}

/// Lock `raw` onto the horizontal or vertical axis through `start`,
/// whichever has the larger absolute delta.
pub fn snap_to_axis(start: Point, raw: Point) -> Point {
    let dx = (raw.x - start.x).abs();
    let dy = (raw.y - start.y).abs();
    if dx > dy {
        Point::new(raw.x, start.y)
    } else {
        Point::new(start.x, raw.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ]
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Point::new(-1.0, -1.0), Point::new(-4.0, -5.0)), 5.0);
        let p = Point::new(10.0, 10.0);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn test_polygon_area_degenerate() {
        assert_eq!(polygon_area(&[], 1.0), 0.0);
        assert_eq!(polygon_area(&[Point::new(0.0, 0.0)], 1.0), 0.0);
        assert_eq!(
            polygon_area(&[Point::new(0.0, 0.0), Point::new(10.0, 10.0)], 1.0),
            0.0
        );
    }

    #[test]
    fn test_polygon_area_square_and_scale() {
        assert_eq!(polygon_area(&square(10.0), 1.0), 100.0);
        assert_eq!(polygon_area(&square(10.0), 2.0), 25.0);
    }

    #[test]
    fn test_polygon_area_triangle() {
        let triangle = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ];
        assert_eq!(polygon_area(&triangle, 1.0), 50.0);
    }

    #[test]
    fn test_polygon_area_winding_invariant() {
        let mut points = square(10.0);
        points.reverse();
        assert_eq!(polygon_area(&points, 1.0), 100.0);
    }

    #[test]
    fn test_polygon_area_non_convex() {
        // L-shape: 10x10 square with the 5x5 top-right corner removed.
        let l_shape = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 5.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert_eq!(polygon_area(&l_shape, 1.0), 75.0);
    }

    #[test]
    fn test_pixels_to_unit() {
        assert_eq!(pixels_to_unit(100.0, 10.0), 10.0);
        assert_eq!(pixels_to_unit(50.0, 2.0), 25.0);
        assert_eq!(pixels_to_unit(0.0, 10.0), 0.0);
        assert_eq!(pixels_to_unit(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_nice_scale_value() {
        assert_eq!(nice_scale_value(0.7), 0.5);
        assert_eq!(nice_scale_value(1.2), 1.0);
        assert_eq!(nice_scale_value(1.8), 2.0);
        assert_eq!(nice_scale_value(3.5), 5.0);
        assert_eq!(nice_scale_value(8.0), 10.0);
        assert_eq!(nice_scale_value(12.0), 10.0);
        assert_eq!(nice_scale_value(45.0), 50.0);
        assert_eq!(nice_scale_value(73.0), 50.0);
        assert_eq!(nice_scale_value(76.0), 100.0);
        assert_eq!(nice_scale_value(350.0), 500.0);
        assert_eq!(nice_scale_value(800.0), 1000.0);
    }

    #[test]
    fn test_nice_scale_value_edges() {
        assert_eq!(nice_scale_value(0.0), 0.0);
        assert_eq!(nice_scale_value(-10.0), 0.0);
        assert_eq!(nice_scale_value(f64::NAN), 0.0);
        assert_eq!(nice_scale_value(1.0), 1.0);
        assert_eq!(nice_scale_value(10.0), 10.0);
        assert_eq!(nice_scale_value(100.0), 100.0);
        assert_eq!(nice_scale_value(7.5), 10.0);
    }

    #[test]
    fn test_normalize_rotation() {
        assert_eq!(normalize_rotation(-90.0), 270.0);
        assert_eq!(normalize_rotation(450.0), 90.0);
        assert_eq!(normalize_rotation(0.0), 0.0);
        assert_eq!(normalize_rotation(360.0), 0.0);
        assert_eq!(normalize_rotation(-180.0), 180.0);
        assert_eq!(normalize_rotation(-360.0), 0.0);
        assert_eq!(normalize_rotation(f64::INFINITY), 0.0);

        let once = normalize_rotation(-45.0);
        assert_eq!(normalize_rotation(once), once);
    }

    #[test]
    fn test_snap_to_axis() {
        let start = Point::new(10.0, 10.0);
        assert_eq!(snap_to_axis(start, Point::new(50.0, 20.0)), Point::new(50.0, 10.0));
        assert_eq!(snap_to_axis(start, Point::new(15.0, 60.0)), Point::new(10.0, 60.0));
        // Ties lock vertically.
        assert_eq!(snap_to_axis(start, Point::new(20.0, 20.0)), Point::new(10.0, 20.0));
    }
}
