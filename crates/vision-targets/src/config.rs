//! JSON configuration for the per-frame locator.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use vision_targets_candidates::{
    CandidateBounds, MetricBounds, ProfileError, ScoringProfile, TargetProfile,
};
use vision_targets_core::{CameraConfig, CameraModel, FovError, PolygonMetrics};
use vision_targets_solver::{RectTargetParams, RectTargetSolver, SolverParamsError};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("camera: {0}")]
    Fov(#[from] FovError),
    #[error("solver: {0}")]
    Params(#[from] SolverParamsError),
    #[error("profile: {0}")]
    Profile(#[from] ProfileError),
}

/// Everything [`crate::TargetLocator`] needs, as stored on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocatorConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    pub profile: TargetProfile,
    #[serde(default)]
    pub solver: RectTargetParams,
}

impl LocatorConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check the profile and build the camera model and solver.
    pub fn build_solver(&self) -> Result<RectTargetSolver, ConfigError> {
        self.profile.validate()?;
        let camera = CameraModel::new(&self.camera)?;
        Ok(RectTargetSolver::new(camera, self.solver)?)
    }

    /// A tall, narrow strip of retro-reflective tape seen by a 640x480
    /// camera. Used by `vision-targets print-config` as a starting point.
    pub fn example() -> Self {
        Self {
            camera: CameraConfig::default(),
            profile: TargetProfile {
                name: "tape_strip".to_string(),
                bounds: CandidateBounds {
                    height: MetricBounds::new(10.0, 400.0),
                    width: MetricBounds::new(4.0, 300.0),
                    vertex_count: MetricBounds::new(3.0, 12.0),
                    aspect_ratio: MetricBounds::new(0.1, 2.0),
                    area: MetricBounds::new(80.0, 120_000.0),
                },
                scoring: ScoringProfile::new(
                    PolygonMetrics {
                        height: 80.0,
                        width: 40.0,
                        vertex_count: 4.0,
                        aspect_ratio: 0.5,
                        area: 3200.0,
                    },
                    PolygonMetrics {
                        height: 1.0,
                        width: 1.0,
                        vertex_count: 10.0,
                        aspect_ratio: 100.0,
                        area: 0.01,
                    },
                ),
            },
            solver: RectTargetParams::new(5.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn example_builds_a_solver() {
        let cfg = LocatorConfig::example();
        let solver = cfg.build_solver().expect("solver");
        assert_eq!(solver.params().target_height, 5.5);
        assert_eq!(solver.camera().image_width(), 640.0);
    }

    #[test]
    fn json_round_trip_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("locator.json");

        let mut cfg = LocatorConfig::example();
        cfg.solver = cfg.solver.with_camera_offset(Vector3::new(2.0, -7.5, 0.0));
        cfg.write_json(&path).expect("write");

        let back = LocatorConfig::load_json(&path).expect("load");
        assert_eq!(back, cfg);
    }

    #[test]
    fn camera_and_solver_sections_are_optional() {
        let example = serde_json::to_value(LocatorConfig::example().profile).expect("json");
        let raw = serde_json::json!({ "profile": example }).to_string();
        let cfg: LocatorConfig = serde_json::from_str(&raw).expect("parse");
        assert_eq!(cfg.camera, CameraConfig::default());
        assert_eq!(cfg.solver, RectTargetParams::default());
    }

    #[test]
    fn invalid_sections_are_reported() {
        let mut cfg = LocatorConfig::example();
        cfg.camera.horizontal_fov_deg = 200.0;
        assert!(matches!(cfg.build_solver(), Err(ConfigError::Fov(_))));

        let mut cfg = LocatorConfig::example();
        cfg.solver.edge_tolerance = -0.5;
        assert!(matches!(cfg.build_solver(), Err(ConfigError::Params(_))));

        let mut cfg = LocatorConfig::example();
        cfg.profile.name.clear();
        assert!(matches!(
            cfg.build_solver(),
            Err(ConfigError::Profile(ProfileError::EmptyName))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = LocatorConfig::load_json(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
