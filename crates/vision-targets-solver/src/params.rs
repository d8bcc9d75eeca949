use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Invalid rectangular-target solver parameters.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SolverParamsError {
    #[error("target_height must be finite and > 0, got {0}")]
    InvalidTargetHeight(f64),
    #[error("edge_tolerance must be in [0, 1], got {0}")]
    InvalidEdgeTolerance(f64),
    #[error("camera_offset components must be finite")]
    NonFiniteOffset,
}

fn default_edge_tolerance() -> f64 {
    0.1
}

fn default_camera_offset() -> Vector3<f64> {
    Vector3::zeros()
}

/// Configuration for [`crate::RectTargetSolver`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectTargetParams {
    /// Real-world height of the target's vertical edges.
    pub target_height: f64,
    /// Fraction of the bounding-box width searched for each vertical edge.
    #[serde(default = "default_edge_tolerance")]
    pub edge_tolerance: f64,
    /// Position of the camera focal point relative to the robot's rotation
    /// center, in camera axes (x lateral, y depth, z vertical). Added to
    /// camera-relative positions to get robot-relative ones; a camera mounted
    /// 10 units ahead of the rotation center is `[0, 10, 0]`.
    #[serde(default = "default_camera_offset")]
    pub camera_offset: Vector3<f64>,
}

impl RectTargetParams {
    pub fn new(target_height: f64) -> Self {
        Self {
            target_height,
            edge_tolerance: default_edge_tolerance(),
            camera_offset: default_camera_offset(),
        }
    }

    pub fn with_camera_offset(mut self, offset: Vector3<f64>) -> Self {
        self.camera_offset = offset;
        self
    }

    pub fn validate(&self) -> Result<(), SolverParamsError> {
        if !self.target_height.is_finite() || self.target_height <= 0.0 {
            return Err(SolverParamsError::InvalidTargetHeight(self.target_height));
        }
        if !(0.0..=1.0).contains(&self.edge_tolerance) {
            return Err(SolverParamsError::InvalidEdgeTolerance(
                self.edge_tolerance,
            ));
        }
        if !self.camera_offset.iter().all(|c| c.is_finite()) {
            return Err(SolverParamsError::NonFiniteOffset);
        }
        Ok(())
    }
}

impl Default for RectTargetParams {
    fn default() -> Self {
        Self::new(20.0)
    }
}
