use log::debug;
use nalgebra::Point3;
use vision_targets_core::{CameraModel, Polygon, VerticalEdge};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::params::{RectTargetParams, SolverParamsError};
use crate::result::{NoSolutionReason, RectTargetSolution, TargetSolution};
use crate::triangulate::{triangulate_edge, EdgeSolution};

/// Solves distance and bearing of a rectangular target from its polygon.
///
/// The solver keeps only configuration; every [`Self::solve`] call is
/// independent and returns its own [`TargetSolution`].
#[derive(Clone, Debug)]
pub struct RectTargetSolver {
    camera: CameraModel,
    params: RectTargetParams,
}

impl RectTargetSolver {
    pub fn new(camera: CameraModel, params: RectTargetParams) -> Result<Self, SolverParamsError> {
        params.validate()?;
        Ok(Self { camera, params })
    }

    pub fn camera(&self) -> &CameraModel {
        &self.camera
    }

    pub fn params(&self) -> &RectTargetParams {
        &self.params
    }

    /// Locate the target described by `polygon`.
    ///
    /// Pipeline:
    /// 1. find left/right vertical edges within `edge_tolerance` of the sides,
    /// 2. average them into a pixel mid-line and triangulate it,
    /// 3. offset into the robot frame and derive distances and bearings,
    /// 4. triangulate left and right edges alone for the wall angle.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, polygon), fields(vertices = polygon.vertex_count()))
    )]
    pub fn solve(&self, polygon: &Polygon) -> TargetSolution {
        let tolerance = self.params.edge_tolerance;
        let Some(left_edge_px) = polygon.find_left_edge(tolerance) else {
            debug!("no left edge within tolerance {tolerance}");
            return NoSolutionReason::LeftEdgeNotFound.into();
        };
        let Some(right_edge_px) = polygon.find_right_edge(tolerance) else {
            debug!("no right edge within tolerance {tolerance}");
            return NoSolutionReason::RightEdgeNotFound.into();
        };

        let mid_edge_px = VerticalEdge::midline(&left_edge_px, &right_edge_px);
        let Some(mid) = self.triangulate(&mid_edge_px) else {
            return NoSolutionReason::DegenerateEdge.into();
        };

        let camera_midpoint = mid.midpoint();
        let robot_midpoint = camera_midpoint + self.params.camera_offset;
        let (camera_distance, camera_rotation_deg) = ground_polar(&camera_midpoint);
        let (robot_distance, robot_rotation_deg) = ground_polar(&robot_midpoint);

        let left = self.triangulate(&left_edge_px);
        let right = self.triangulate(&right_edge_px);
        let (wall_angle_deg, wall_tilt_deg) = match (&left, &right) {
            (Some(l), Some(r)) => (
                wall_angle(&l.midpoint(), &r.midpoint()),
                wall_tilt(&l.midpoint(), &r.midpoint()),
            ),
            _ => (0.0, 0.0),
        };

        debug!(
            "target at {camera_distance:.2} (camera), {robot_distance:.2} (robot), bearing {robot_rotation_deg:.2} deg, wall {wall_angle_deg:.2} deg"
        );

        TargetSolution::Solved(Box::new(RectTargetSolution {
            left_edge_px,
            right_edge_px,
            mid_edge_px,
            mid,
            left,
            right,
            camera_midpoint,
            robot_midpoint,
            camera_distance,
            camera_rotation_deg,
            robot_distance,
            robot_rotation_deg,
            wall_angle_deg,
            wall_tilt_deg,
        }))
    }

    fn triangulate(&self, edge: &VerticalEdge) -> Option<EdgeSolution> {
        triangulate_edge(edge.bottom, edge.top, self.params.target_height, &self.camera)
    }
}

/// `(hypot(x, y), atan(x / y) in degrees)` of a camera-axes point.
///
/// A point on the vertical axis through the origin has bearing 0.
fn ground_polar(p: &Point3<f64>) -> (f64, f64) {
    let distance = p.x.hypot(p.y);
    if distance == 0.0 {
        return (0.0, 0.0);
    }
    (distance, (p.x / p.y).atan().to_degrees())
}

/// Angle of the left-to-right line in the ground plane, degrees.
///
/// Positive when the right side is farther away than the left.
fn wall_angle(left: &Point3<f64>, right: &Point3<f64>) -> f64 {
    let dx = right.x - left.x;
    let dy = right.y - left.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    (dy / dx).atan().to_degrees()
}

/// `atan(Δz / Δx)` between the left and right edge midpoints, degrees.
///
/// Positive when the right side sits higher than the left.
fn wall_tilt(left: &Point3<f64>, right: &Point3<f64>) -> f64 {
    let dx = right.x - left.x;
    let dz = right.z - left.z;
    if dx == 0.0 && dz == 0.0 {
        return 0.0;
    }
    (dz / dx).atan().to_degrees()
}
