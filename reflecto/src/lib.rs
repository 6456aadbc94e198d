#![no_std]

//! A discrete-time simulation of light rays bouncing between flat mirrors in the plane.
//!
//! Rays travel a fixed distance every tick. Whenever a ray gets close enough to a
//! [`MirrorSegment`], its heading is reflected about the mirror's direction line,
//! and it is moved away from the mirror before the next collision test.

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub use nalgebra;

mod error;
pub mod geometry;
mod mirror;
mod observer;
mod ray;
mod simulation;
pub mod stepper;

pub use error::*;
pub use mirror::*;
pub use observer::*;
pub use ray::*;
pub use simulation::*;
pub use stepper::StepParams;

pub type Float = f64;

/// A point (or a displacement) in the plane.
pub type Point = nalgebra::Vector2<Float>;

/// Angles are expressed in degrees, `0.0` points towards `+x`, and they increase counterclockwise.
pub type Degrees = Float;
