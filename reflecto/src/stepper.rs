//! Moving a single ray forward by one tick.

use crate::{Float, MirrorSegment, Ray, SimError, SimResult};

/// Default maximum distance between a ray and a mirror's line for a bounce to happen.
pub const DEFAULT_MARGIN: Float = core::f64::consts::SQRT_2;
/// Default distance of the jump made by a ray right after bouncing.
pub const DEFAULT_ESCAPE_DISTANCE: Float = 1000.;
/// Default distance traveled by every ray at every tick.
pub const DEFAULT_STEP_LENGTH: Float = 1.;

/// Tunables of the stepping process
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    /// See [`MirrorSegment::is_colliding`]
    pub margin: Float,
    /// See [`step_ray`]
    pub escape_distance: Float,
    /// Distance traveled by a ray at the end of each tick
    pub step_length: Float,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            escape_distance: DEFAULT_ESCAPE_DISTANCE,
            step_length: DEFAULT_STEP_LENGTH,
        }
    }
}

impl StepParams {
    /// Checks that every parameter is finite, and that `margin` isn't negative.
    pub fn validate(&self) -> SimResult<()> {
        let Self {
            margin,
            escape_distance,
            step_length,
        } = *self;

        if !margin.is_finite() || margin < 0. {
            return Err(SimError::InvalidParameter {
                name: "margin",
                value: margin,
            });
        }

        if !escape_distance.is_finite() {
            return Err(SimError::InvalidParameter {
                name: "escape_distance",
                value: escape_distance,
            });
        }

        if !step_length.is_finite() {
            return Err(SimError::InvalidParameter {
                name: "step_length",
                value: step_length,
            });
        }

        Ok(())
    }
}

/// Bounce `ray` off `mirror`: reflect it's heading, then run the escape move.
///
/// The escape move goes `escape_distance` backwards along the reflected heading,
/// then `escape_distance` forwards along it. The ray ends up where it bounced
/// (up to rounding), so a ray caught in a corner also bounces off the
/// following mirrors during the same tick.
#[inline]
pub fn bounce(ray: &mut Ray, mirror: &MirrorSegment, escape_distance: Float) {
    ray.heading = mirror.reflect(ray.heading);

    ray.advance(-escape_distance);
    ray.advance(escape_distance);
}

/// Advance `ray` by one tick.
///
/// `mirrors` are tested in order, the ray bounces off each one it is
/// [colliding](MirrorSegment::is_colliding) with, at its position at the time of the test.
/// Then, the ray moves forward by `params.step_length`.
///
/// Returns the number of bounces that happened.
pub fn step_ray(ray: &mut Ray, mirrors: &[MirrorSegment], params: &StepParams) -> usize {
    let mut bounces = 0;

    for (i, mirror) in mirrors.iter().enumerate() {
        if mirror.is_colliding(ray, params.margin) {
            bounces += 1;
            let incident = ray.heading;
            bounce(ray, mirror, params.escape_distance);
            log::trace!(
                "{} ray bounced off mirror #{i}: {incident} -> {}",
                ray.color,
                ray.heading
            );
        }
    }

    ray.advance(params.step_length);

    bounces
}
