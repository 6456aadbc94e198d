//! Plane geometry helpers.

use nalgebra::{ComplexField, RealField};

use crate::{Degrees, Float, Point};

/// Returns the distance between `point` and the infinite line passing through
/// `line_start` and `line_end`.
///
/// The line is _not_ clamped to the segment `[line_start, line_end]`.
///
/// The result is undefined (`NaN` or infinite) if `line_start == line_end`.
#[inline]
#[must_use]
pub fn perpendicular_distance(point: &Point, line_start: &Point, line_end: &Point) -> Float {
    let [x, y] = [point.x, point.y];
    let [x1, y1] = [line_start.x, line_start.y];
    let [x2, y2] = [line_end.x, line_end.y];

    let (dx, dy) = (x2 - x1, y2 - y1);

    ComplexField::abs(dy * x - dx * y + x2 * y1 - y2 * x1) / ComplexField::sqrt(dx * dx + dy * dy)
}

/// The unit vector pointing towards `heading`.
#[inline]
#[must_use]
pub fn direction(heading: Degrees) -> Point {
    let (sin, cos) = ComplexField::sin_cos(heading.to_radians());
    Point::new(cos, sin)
}

/// The angle, in degrees, of the vector going from `from` to `to`, in `(-180, 180]`.
#[inline]
#[must_use]
pub fn angle_between(from: &Point, to: &Point) -> Degrees {
    let d = to - from;
    RealField::atan2(d.y, d.x).to_degrees()
}

/// Returns `a - b` brought back into `(-180, 180]`.
#[inline]
#[must_use]
pub fn heading_difference(a: Degrees, b: Degrees) -> Degrees {
    // `rem_euclid` isn't available without `std`
    let d = (a - b) % 360.0;
    if d > 180.0 {
        d - 360.0
    } else if d <= -180.0 {
        d + 360.0
    } else {
        d
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn distance_to_axis_aligned_lines() {
        let p = Point::new(3., 4.);
        assert_abs_diff_eq!(
            perpendicular_distance(&p, &Point::new(0., -10.), &Point::new(0., 10.)),
            3.
        );
        assert_abs_diff_eq!(
            perpendicular_distance(&p, &Point::new(-10., 0.), &Point::new(10., 0.)),
            4.
        );
    }

    #[test]
    fn distance_ignores_segment_bounds() {
        // the point lies far beyond the segment's end, but on its line
        let d = perpendicular_distance(
            &Point::new(500., 500.),
            &Point::new(0., 0.),
            &Point::new(1., 1.),
        );
        assert_abs_diff_eq!(d, 0., epsilon = 1e-9);

        let d = perpendicular_distance(
            &Point::new(500., 0.),
            &Point::new(0., -1.),
            &Point::new(0., 1.),
        );
        assert_abs_diff_eq!(d, 500.);
    }

    #[test]
    fn distance_is_zero_on_the_line() {
        let (a, b) = (Point::new(-3., 7.), Point::new(12., -2.5));
        for t in [-4., -1., 0., 0.3, 1., 17.] {
            let p = a + (b - a) * t;
            assert_abs_diff_eq!(perpendicular_distance(&p, &a, &b), 0., epsilon = 1e-9);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let (a, b) = (Point::new(-3., 7.), Point::new(12., -2.5));
        for p in [Point::new(0., 0.), Point::new(100., -40.), Point::new(-7., 7.)] {
            assert_abs_diff_eq!(
                perpendicular_distance(&p, &a, &b),
                perpendicular_distance(&p, &b, &a),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn degenerate_line() {
        let a = Point::new(1., 1.);
        assert!(!perpendicular_distance(&Point::new(0., 0.), &a, &a).is_finite());
    }

    #[test]
    fn directions() {
        assert_abs_diff_eq!(direction(0.), Point::new(1., 0.), epsilon = 1e-12);
        assert_abs_diff_eq!(direction(90.), Point::new(0., 1.), epsilon = 1e-12);
        assert_abs_diff_eq!(direction(180.), Point::new(-1., 0.), epsilon = 1e-12);
        assert_abs_diff_eq!(direction(-90.), direction(270.), epsilon = 1e-12);
    }

    #[test]
    fn angles() {
        let o = Point::zeros();
        assert_abs_diff_eq!(angle_between(&o, &Point::new(0., 5.)), 90.);
        assert_abs_diff_eq!(angle_between(&o, &Point::new(-1., 0.)), 180.);
        assert_abs_diff_eq!(angle_between(&Point::new(1., 1.), &o), -135.);
    }

    #[test]
    fn heading_differences() {
        assert_abs_diff_eq!(heading_difference(540., 0.), 180.);
        assert_abs_diff_eq!(heading_difference(-90., 270.), 0.);
        assert_abs_diff_eq!(heading_difference(10., 350.), 20.);
        assert_abs_diff_eq!(heading_difference(350., 10.), -20.);
    }
}
