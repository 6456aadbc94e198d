use alloc::{string::String, vec::Vec};

use crate::{geometry, Degrees, Float, Point, SimError, SimResult};

/// A light ray, traveling through the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Ray {
    /// Where the ray currently is
    pub position: Point,
    /// Direction of travel, not normalized to any particular interval
    pub heading: Degrees,
    /// Label forwarded to renderers, it has no effect on the simulation
    pub color: String,
}

impl Ray {
    #[inline]
    #[must_use]
    pub fn new(position: impl Into<Point>, heading: Degrees, color: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            heading,
            color: color.into(),
        }
    }

    /// The unit vector pointing towards this ray's heading.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Point {
        geometry::direction(self.heading)
    }

    /// Get the point at distance `t` (can be negative) ahead of this ray
    #[inline]
    #[must_use]
    pub fn at(&self, t: Float) -> Point {
        self.position + self.direction() * t
    }

    /// Move the ray forward (or backward if `t < 0.0`) by `t`.
    #[inline]
    pub fn advance(&mut self, t: Float) {
        self.position = self.at(t);
    }
}

/// A point emitting rays, in the configured angles.
#[derive(Clone, Debug, PartialEq)]
pub struct RaySource {
    pub start: Point,
    pub color: String,
}

impl RaySource {
    #[inline]
    #[must_use]
    pub fn new(start: impl Into<Point>, color: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            color: color.into(),
        }
    }

    /// The ray leaving this source with the given `heading`
    #[inline]
    #[must_use]
    pub fn emit(&self, heading: Degrees) -> Ray {
        Ray {
            position: self.start,
            heading,
            color: self.color.clone(),
        }
    }
}

/// A range of integer headings, in degrees, from `start` towards `end`, by `step`
///
/// `end` is excluded, `step` can be negative but not zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AngleRange {
    start: i64,
    end: i64,
    step: i64,
}

impl AngleRange {
    #[inline]
    pub fn try_new(start: i64, end: i64, step: i64) -> SimResult<Self> {
        if step == 0 {
            Err(SimError::InvalidAngleRange { start, end, step })
        } else {
            Ok(Self { start, end, step })
        }
    }

    /// A range containing `angle` only
    #[inline]
    #[must_use]
    pub const fn single(angle: i64) -> Self {
        Self {
            start: angle,
            end: angle + 1,
            step: 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.end
    }

    #[inline]
    #[must_use]
    pub const fn step(&self) -> i64 {
        self.step
    }

    /// Number of headings in this range, saturating at `usize::MAX`.
    #[must_use]
    pub fn len(&self) -> usize {
        // `i128` holds any difference of two `i64`s
        let (start, end, step) = (self.start as i128, self.end as i128, self.step as i128);

        let (span, step) = if step > 0 {
            (end - start, step)
        } else {
            (start - end, -step)
        };

        if span <= 0 {
            0
        } else {
            // ceiling division, both operands are positive
            usize::try_from((span + step - 1) / step).unwrap_or(usize::MAX)
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The headings in this range, in order.
    pub fn iter(&self) -> impl Iterator<Item = Degrees> + '_ {
        (0..self.len()).map(|i| (self.start as i128 + i as i128 * self.step as i128) as Degrees)
    }

    /// All the angles in this range, collected.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Degrees> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::vec;
    use approx::assert_abs_diff_eq;

    #[test]
    fn new() {
        let ray = Ray::new([1., 2.], 30., "blue");
        assert_eq!(ray.position, Point::new(1., 2.));
        assert_eq!(ray.heading, 30.);
        assert_eq!(ray.color, "blue");
    }

    #[test]
    fn advance() {
        let mut ray = Ray::new([0., 0.], 90., "blue");
        ray.advance(10.);
        assert_abs_diff_eq!(ray.position, Point::new(0., 10.), epsilon = 1e-12);
        ray.advance(-4.);
        assert_abs_diff_eq!(ray.position, Point::new(0., 6.), epsilon = 1e-12);
        assert_eq!(ray.heading, 90.);
    }

    #[test]
    fn at() {
        let ray = Ray::new([1., 1.], 45., "blue");
        let s = core::f64::consts::SQRT_2;
        assert_abs_diff_eq!(ray.at(s), Point::new(2., 2.), epsilon = 1e-12);
        assert_abs_diff_eq!(ray.at(0.), ray.position);
    }

    #[test]
    fn emit() {
        let source = RaySource::new([5., -5.], "green");
        let ray = source.emit(270.);
        assert_eq!(ray, Ray::new([5., -5.], 270., "green"));
    }

    #[test]
    fn angle_range() {
        assert_eq!(AngleRange::try_new(0, 360, 90).unwrap().to_vec(), vec![0., 90., 180., 270.]);
        assert_eq!(AngleRange::try_new(0, 361, 90).unwrap().len(), 5);
        assert_eq!(AngleRange::try_new(10, 0, -3).unwrap().to_vec(), vec![10., 7., 4., 1.]);
        assert_eq!(AngleRange::try_new(-45, -40, 2).unwrap().to_vec(), vec![-45., -43., -41.]);
        assert!(AngleRange::try_new(10, 0, 1).unwrap().is_empty());
        assert!(AngleRange::try_new(0, 10, -1).unwrap().is_empty());
        assert!(AngleRange::try_new(5, 5, 1).unwrap().is_empty());
        assert_eq!(AngleRange::single(42).to_vec(), vec![42.]);
    }

    #[test]
    fn extreme_bounds() {
        let full = AngleRange::try_new(i64::MIN, i64::MAX, 1).unwrap();
        assert_eq!(full.len(), usize::MAX);
        assert_eq!(full.iter().next(), Some(i64::MIN as Degrees));

        let wide = AngleRange::try_new(i64::MIN, i64::MAX, i64::MAX).unwrap();
        assert_eq!(wide.len(), 3);
        assert_eq!(wide.to_vec(), vec![i64::MIN as Degrees, -1., (i64::MAX - 1) as Degrees]);

        let down = AngleRange::try_new(i64::MAX, i64::MIN, i64::MIN).unwrap();
        assert_eq!(down.len(), 2);
        assert!(AngleRange::try_new(i64::MAX, i64::MIN, 1).unwrap().is_empty());
    }

    #[test]
    fn zero_step() {
        assert_eq!(
            AngleRange::try_new(0, 10, 0),
            Err(SimError::InvalidAngleRange {
                start: 0,
                end: 10,
                step: 0
            })
        );
    }
}
