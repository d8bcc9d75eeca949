//! Camera-geometry solvers for vision targets.
//!
//! - [`triangulate_edge`] places a vertical edge of known real-world length
//!   in camera space from its two pixel endpoints.
//! - [`RectTargetSolver`] combines left, right and mid-line edges of a
//!   rectangular target into distance, bearing and wall skew relative to the
//!   camera and to the robot's rotation center.
//!
//! Coordinates in camera space: x lateral (right positive), y depth,
//! z vertical (up positive).

mod params;
mod rect;
mod result;
mod triangulate;

pub use params::{RectTargetParams, SolverParamsError};
pub use rect::RectTargetSolver;
pub use result::{NoSolutionReason, RectTargetSolution, TargetSolution, TelemetryRecord};
pub use triangulate::{triangulate_edge, EdgeSolution};
