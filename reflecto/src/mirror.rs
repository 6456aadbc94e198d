use crate::{geometry, Degrees, Float, Point, Ray, SimError, SimResult};

/// Returns the heading of a ray after bouncing off the line going through `start` and `end`.
///
/// With `mirror_angle` being the angle of `end - start`, this is
/// `2 * mirror_angle - incident`, the orthogonal symmetry of `incident`
/// with respect to the mirror's direction.
///
/// The result is not normalized into any particular interval.
#[inline]
#[must_use]
pub fn reflect(incident: Degrees, start: &Point, end: &Point) -> Degrees {
    2.0 * geometry::angle_between(start, end) - incident
}

/// A flat, two-sided mirror, shaped like a line segment.
///
/// The order of the endpoints matters for [`Self::is_colliding`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MirrorSegment {
    start: Point,
    end: Point,
}

impl MirrorSegment {
    /// Returns an error if `start` and `end` are equal, or aren't finite.
    #[inline]
    pub fn try_new(start: impl Into<Point>, end: impl Into<Point>) -> SimResult<Self> {
        let (start, end) = (start.into(), end.into());

        let finite = start.iter().chain(end.iter()).all(|c| c.is_finite());

        if finite && start != end {
            Ok(Self { start, end })
        } else {
            Err(SimError::DegenerateMirror { start, end })
        }
    }

    #[inline]
    #[must_use]
    pub const fn start(&self) -> &Point {
        &self.start
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> &Point {
        &self.end
    }

    #[inline]
    #[must_use]
    pub const fn endpoints(&self) -> [Point; 2] {
        [self.start, self.end]
    }

    /// The angle of this mirror's direction vector (`end - start`)
    #[inline]
    #[must_use]
    pub fn angle(&self) -> Degrees {
        geometry::angle_between(&self.start, &self.end)
    }

    /// Distance between `p` and the infinite line this mirror lies on.
    #[inline]
    #[must_use]
    pub fn distance_to(&self, p: &Point) -> Float {
        geometry::perpendicular_distance(p, &self.start, &self.end)
    }

    /// Whether `p` is strictly inside this mirror's extent.
    ///
    /// This only looks at `y` in the `start -> end` order, and at `x` in
    /// the `end -> start` order. It is therefore only accurate for
    /// mirrors that are (nearly) aligned with one of the axes, and drawn
    /// in the matching direction. Rotated mirrors can both miss and
    /// gain collisions because of it.
    #[inline]
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        let (s, e) = (&self.start, &self.end);
        (s.y < p.y && p.y < e.y) || (e.x < p.x && p.x < s.x)
    }

    /// Whether `ray` is currently bouncing off this mirror, that is, it's at most
    /// `margin` away from this mirror's line, and [inside](Self::contains) it's extent.
    #[inline]
    #[must_use]
    pub fn is_colliding(&self, ray: &Ray, margin: Float) -> bool {
        self.distance_to(&ray.position) <= margin && self.contains(&ray.position)
    }

    /// Returns the reflection of `heading` with respect to this mirror.
    ///
    /// See [`reflect`].
    #[inline]
    #[must_use]
    pub fn reflect(&self, heading: Degrees) -> Degrees {
        reflect(heading, &self.start, &self.end)
    }
}

impl TryFrom<[[Float; 2]; 2]> for MirrorSegment {
    type Error = SimError;

    #[inline]
    fn try_from([start, end]: [[Float; 2]; 2]) -> Result<Self, Self::Error> {
        Self::try_new(start, end)
    }
}
