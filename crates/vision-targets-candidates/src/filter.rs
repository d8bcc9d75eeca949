use log::trace;
use serde::Serialize;
use vision_targets_core::{Polygon, PolygonMetrics};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::profile::{Metric, TargetProfile};

/// A polygon that passed a profile's bounds, tagged with the profile name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TargetCandidate {
    pub polygon: Polygon,
    pub profile: String,
}

impl TargetCandidate {
    pub fn new(polygon: Polygon, profile: impl Into<String>) -> Self {
        Self {
            polygon,
            profile: profile.into(),
        }
    }

    pub fn metrics(&self) -> PolygonMetrics {
        self.polygon.metrics()
    }
}

/// A polygon that failed a profile, with the first metric out of bounds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RejectedPolygon {
    pub polygon: Polygon,
    pub reason: Metric,
}

/// Accepted and rejected polygons, each list in input order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CandidatePartition {
    pub accepted: Vec<TargetCandidate>,
    pub rejected: Vec<RejectedPolygon>,
}

/// Keep the polygons whose metrics all lie strictly inside `profile.bounds`.
///
/// Pure; the output preserves input order.
pub fn filter_candidates<I>(polygons: I, profile: &TargetProfile) -> Vec<TargetCandidate>
where
    I: IntoIterator<Item = Polygon>,
{
    partition_candidates(polygons, profile).accepted
}

/// Split polygons into accepted candidates and rejected shapes.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(polygons, profile), fields(profile = %profile.name))
)]
pub fn partition_candidates<I>(polygons: I, profile: &TargetProfile) -> CandidatePartition
where
    I: IntoIterator<Item = Polygon>,
{
    let mut out = CandidatePartition::default();
    for polygon in polygons {
        match profile.bounds.first_violation(&polygon.metrics()) {
            None => out
                .accepted
                .push(TargetCandidate::new(polygon, profile.name.as_str())),
            Some(reason) => {
                trace!(
                    "rejected polygon at ({:.1}, {:.1}) for {}: {} out of bounds",
                    polygon.center().x,
                    polygon.center().y,
                    profile.name,
                    reason
                );
                out.rejected.push(RejectedPolygon { polygon, reason });
            }
        }
    }
    out
}
