//! Errors raised while building a scene.
use core::fmt::{self, Display};

use crate::Point;

/// Result type of every faillible operation in this crate
pub type SimResult<T> = core::result::Result<T, SimError>;

/// Everything that can go wrong before a simulation starts.
///
/// Once a [`Simulation`](crate::Simulation) is constructed, stepping it cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// a mirror whose two endpoints coincide (or aren't finite), its direction line is undefined
    DegenerateMirror { start: Point, end: Point },
    /// an angle range with a step of zero
    InvalidAngleRange { start: i64, end: i64, step: i64 },
    /// a stepping parameter out of its allowed domain
    InvalidParameter { name: &'static str, value: f64 },
}

impl Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateMirror { start, end } => write!(
                f,
                "degenerate mirror: [{}, {}] -> [{}, {}], endpoints must be distinct and finite",
                start.x, start.y, end.x, end.y
            ),
            Self::InvalidAngleRange { start, end, step } => {
                write!(f, "invalid angle range {start}..{end} (step {step}): step must not be zero")
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid value for {name}: {value}")
            }
        }
    }
}

impl core::error::Error for SimError {}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::format;

    #[test]
    fn display() {
        assert_eq!(
            format!(
                "{}",
                SimError::InvalidParameter {
                    name: "margin",
                    value: -1.
                }
            ),
            "invalid value for margin: -1"
        );
        assert_eq!(
            format!(
                "{}",
                SimError::InvalidAngleRange {
                    start: 0,
                    end: 10,
                    step: 0
                }
            ),
            "invalid angle range 0..10 (step 0): step must not be zero"
        );
        assert_eq!(
            format!(
                "{}",
                SimError::DegenerateMirror {
                    start: Point::new(1., 2.),
                    end: Point::new(1., 2.)
                }
            ),
            "degenerate mirror: [1, 2] -> [1, 2], endpoints must be distinct and finite"
        );
    }
}
