//! Weighted-deviation scoring and best-candidate selection.

use log::{debug, warn};
use serde::Serialize;
use vision_targets_core::PolygonMetrics;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::filter::TargetCandidate;
use crate::profile::{Metric, ScoringProfile};

/// Default score of a candidate whose metrics equal the ideal exactly.
pub const DEFAULT_SCORE_BASELINE: f64 = 1000.0;

/// Running best score the selection scan starts from.
///
/// A candidate must score strictly above this to be picked on merit. When no
/// candidate does, the first candidate is returned with
/// [`Selection::above_floor`] set to `false`.
pub const SELECTION_FLOOR: f64 = 0.0;

/// `baseline - sum(weight * |metric - ideal|)` over the five metrics.
pub fn score_metrics(metrics: &PolygonMetrics, scoring: &ScoringProfile) -> f64 {
    let penalty: f64 = Metric::ALL
        .into_iter()
        .map(|m| {
            let deviation = (m.value(metrics) - m.value(&scoring.ideal)).abs();
            m.value(&scoring.weights) * deviation
        })
        .sum();
    scoring.baseline - penalty
}

/// Winner of one selection pass plus the untouched remainder.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Selection {
    pub best: TargetCandidate,
    pub score: f64,
    /// `false` when nothing beat [`SELECTION_FLOOR`] and `best` is the
    /// first-candidate fallback.
    pub above_floor: bool,
    /// Input candidates minus `best`, in their original order.
    pub remaining: Vec<TargetCandidate>,
}

/// Pick the highest-scoring candidate.
///
/// Linear scan with a strict `>` against a running best that starts at
/// [`SELECTION_FLOOR`], so the earliest maximum wins ties. Returns `None`
/// only for an empty input.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(candidates, scoring), fields(n = candidates.len()))
)]
pub fn select_best(
    mut candidates: Vec<TargetCandidate>,
    scoring: &ScoringProfile,
) -> Option<Selection> {
    if candidates.is_empty() {
        return None;
    }

    let mut best_index = 0usize;
    let mut best_score = SELECTION_FLOOR;
    let mut above_floor = false;
    for (index, candidate) in candidates.iter().enumerate() {
        let score = score_metrics(&candidate.metrics(), scoring);
        if score > best_score {
            best_index = index;
            best_score = score;
            above_floor = true;
        }
    }

    let best = candidates.remove(best_index);
    let score = if above_floor {
        best_score
    } else {
        let fallback = score_metrics(&best.metrics(), scoring);
        warn!(
            "no candidate scored above {SELECTION_FLOOR}; falling back to the first of {} (score {fallback:.3})",
            candidates.len() + 1
        );
        fallback
    };

    debug!(
        "selected candidate {best_index} for {} with score {score:.3}",
        best.profile
    );

    Some(Selection {
        best,
        score,
        above_floor,
        remaining: candidates,
    })
}

/// Order every candidate by repeated [`select_best`] passes.
///
/// Each entry carries the score it was selected with.
pub fn rank_candidates(
    candidates: Vec<TargetCandidate>,
    scoring: &ScoringProfile,
) -> Vec<(TargetCandidate, f64)> {
    let mut ranked = Vec::with_capacity(candidates.len());
    let mut pool = candidates;
    while let Some(selection) = select_best(pool, scoring) {
        ranked.push((selection.best, selection.score));
        pool = selection.remaining;
    }
    ranked
}
