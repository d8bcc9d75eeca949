use log::debug;
use serde::Serialize;
use vision_targets_candidates::{
    partition_candidates, select_best, RejectedPolygon, TargetCandidate, TargetProfile,
};
use vision_targets_core::Polygon;
use vision_targets_solver::{RectTargetSolver, TargetSolution, TelemetryRecord};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::{ConfigError, LocatorConfig};

/// Outcome of one frame: every contour is either accepted or rejected, and
/// the best accepted candidate (if any) is solved.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameReport {
    pub accepted: Vec<TargetCandidate>,
    pub rejected: Vec<RejectedPolygon>,
    pub best: Option<TargetCandidate>,
    /// Score of `best`.
    pub score: Option<f64>,
    /// `false` when `best` is the first-candidate fallback rather than a
    /// candidate that scored above the selection floor.
    pub above_floor: bool,
    /// `None` when no contour passed the profile.
    pub solution: Option<TargetSolution>,
}

impl FrameReport {
    /// Scalars to publish for this frame, if the target was solved.
    pub fn telemetry(&self) -> Option<TelemetryRecord> {
        self.solution.as_ref().and_then(TargetSolution::telemetry)
    }

    pub fn is_solved(&self) -> bool {
        self.solution
            .as_ref()
            .is_some_and(TargetSolution::is_solved)
    }
}

/// Filter, select and solve in one call per frame.
///
/// Holds only validated configuration, so one locator can serve any number
/// of frames (and threads).
#[derive(Clone, Debug)]
pub struct TargetLocator {
    profile: TargetProfile,
    solver: RectTargetSolver,
}

impl TargetLocator {
    pub fn new(config: LocatorConfig) -> Result<Self, ConfigError> {
        let solver = config.build_solver()?;
        Ok(Self {
            profile: config.profile,
            solver,
        })
    }

    pub fn profile(&self) -> &TargetProfile {
        &self.profile
    }

    pub fn solver(&self) -> &RectTargetSolver {
        &self.solver
    }

    /// Run the pipeline on one frame's contours.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, contours), fields(profile = %self.profile.name))
    )]
    pub fn locate<I>(&self, contours: I) -> FrameReport
    where
        I: IntoIterator<Item = Polygon>,
    {
        let partition = partition_candidates(contours, &self.profile);
        debug!(
            "{} accepted, {} rejected",
            partition.accepted.len(),
            partition.rejected.len()
        );

        let Some(selection) = select_best(partition.accepted.clone(), &self.profile.scoring)
        else {
            return FrameReport {
                accepted: partition.accepted,
                rejected: partition.rejected,
                best: None,
                score: None,
                above_floor: false,
                solution: None,
            };
        };

        let solution = self.solver.solve(&selection.best.polygon);
        FrameReport {
            accepted: partition.accepted,
            rejected: partition.rejected,
            best: Some(selection.best),
            score: Some(selection.score),
            above_floor: selection.above_floor,
            solution: Some(solution),
        }
    }
}
