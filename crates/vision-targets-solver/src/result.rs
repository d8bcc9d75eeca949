use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use vision_targets_core::VerticalEdge;

use crate::triangulate::EdgeSolution;

/// Why a polygon produced no target solution.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoSolutionReason {
    LeftEdgeNotFound,
    RightEdgeNotFound,
    /// The mid-line had zero pixel height.
    DegenerateEdge,
}

/// Full geometry of a solved rectangular target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectTargetSolution {
    /// Pixel edges the solution was built from.
    pub left_edge_px: VerticalEdge,
    pub right_edge_px: VerticalEdge,
    pub mid_edge_px: VerticalEdge,

    /// Mid-line triangulation (primary solution).
    pub mid: EdgeSolution,
    /// Independent left/right edge triangulations; `None` when that edge
    /// alone is degenerate.
    pub left: Option<EdgeSolution>,
    pub right: Option<EdgeSolution>,

    /// Target center relative to the camera focal point.
    pub camera_midpoint: Point3<f64>,
    /// Target center relative to the robot's rotation center.
    pub robot_midpoint: Point3<f64>,

    /// Ground-plane distance from the camera, `hypot(x, y)`.
    pub camera_distance: f64,
    /// Bearing from the camera axis, `atan(x / y)` in degrees.
    pub camera_rotation_deg: f64,
    pub robot_distance: f64,
    pub robot_rotation_deg: f64,
    /// Estimated skew of the target plane, degrees: `atan(Δdepth / Δlateral)`
    /// between the left and right edge midpoints. This is the yaw of the wall
    /// relative to the image plane, not the `atan(Δz / Δx)` rise reported in
    /// [`Self::wall_tilt_deg`]. Diagnostic only; 0 when either side edge could
    /// not be triangulated.
    pub wall_angle_deg: f64,
    /// `atan(Δz / Δx)` between the left and right edge midpoints, degrees
    /// (z vertical). Diagnostic only; 0 when either side edge could not be
    /// triangulated.
    pub wall_tilt_deg: f64,
}

impl RectTargetSolution {
    pub fn telemetry(&self) -> TelemetryRecord {
        TelemetryRecord {
            bearing_deg: self.robot_rotation_deg,
            distance_to_base: self.robot_distance,
            distance_to_target: self.camera_distance,
        }
    }
}

/// Outcome of solving one polygon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetSolution {
    Solved(Box<RectTargetSolution>),
    NoSolution { reason: NoSolutionReason },
}

impl TargetSolution {
    pub fn is_solved(&self) -> bool {
        matches!(self, TargetSolution::Solved(_))
    }

    pub fn solution(&self) -> Option<&RectTargetSolution> {
        match self {
            TargetSolution::Solved(s) => Some(s.as_ref()),
            TargetSolution::NoSolution { .. } => None,
        }
    }

    pub fn no_solution_reason(&self) -> Option<NoSolutionReason> {
        match self {
            TargetSolution::Solved(_) => None,
            TargetSolution::NoSolution { reason } => Some(*reason),
        }
    }

    pub fn telemetry(&self) -> Option<TelemetryRecord> {
        self.solution().map(RectTargetSolution::telemetry)
    }
}

impl From<NoSolutionReason> for TargetSolution {
    fn from(reason: NoSolutionReason) -> Self {
        TargetSolution::NoSolution { reason }
    }
}

/// Scalars published once per solved frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Robot-relative bearing, degrees.
    pub bearing_deg: f64,
    /// Distance from the robot's rotation center.
    pub distance_to_base: f64,
    /// Distance from the camera.
    pub distance_to_target: f64,
}
