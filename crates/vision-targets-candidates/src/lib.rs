//! Target candidate filtering and best-target selection.
//!
//! A [`TargetProfile`] names the shape being looked for: strict min/max
//! bounds on five bounding-box metrics, plus ideal values and weights used to
//! score the survivors.
//!
//! - [`filter_candidates`] / [`partition_candidates`] keep polygons whose
//!   metrics all fall strictly inside the bounds.
//! - [`select_best`] scores candidates and splits off the winner, returning
//!   the rest untouched so selection can be repeated.

mod filter;
mod profile;
mod select;

pub use filter::{
    filter_candidates, partition_candidates, CandidatePartition, RejectedPolygon, TargetCandidate,
};
pub use profile::{
    CandidateBounds, Metric, MetricBounds, ProfileError, ScoringProfile, TargetProfile,
};
pub use select::{
    rank_candidates, score_metrics, select_best, Selection, DEFAULT_SCORE_BASELINE,
    SELECTION_FLOOR,
};
