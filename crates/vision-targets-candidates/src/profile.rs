use std::fmt;

use serde::{Deserialize, Serialize};
use vision_targets_core::PolygonMetrics;

use crate::select::DEFAULT_SCORE_BASELINE;

/// One of the five polygon metrics used by profiles.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Height,
    Width,
    VertexCount,
    AspectRatio,
    Area,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Height,
        Metric::Width,
        Metric::VertexCount,
        Metric::AspectRatio,
        Metric::Area,
    ];

    /// Read this metric out of a metrics record.
    pub fn value(self, metrics: &PolygonMetrics) -> f64 {
        match self {
            Metric::Height => metrics.height,
            Metric::Width => metrics.width,
            Metric::VertexCount => metrics.vertex_count,
            Metric::AspectRatio => metrics.aspect_ratio,
            Metric::Area => metrics.area,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Height => "height",
            Metric::Width => "width",
            Metric::VertexCount => "vertex_count",
            Metric::AspectRatio => "aspect_ratio",
            Metric::Area => "area",
        };
        f.write_str(name)
    }
}

/// Open interval `(min, max)` a metric must fall strictly inside.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricBounds {
    pub min: f64,
    pub max: f64,
}

impl MetricBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `min < value < max`.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min < value && value < self.max
    }
}

/// Acceptance bounds for all five metrics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateBounds {
    pub height: MetricBounds,
    pub width: MetricBounds,
    pub vertex_count: MetricBounds,
    pub aspect_ratio: MetricBounds,
    pub area: MetricBounds,
}

impl CandidateBounds {
    pub fn get(&self, metric: Metric) -> MetricBounds {
        match metric {
            Metric::Height => self.height,
            Metric::Width => self.width,
            Metric::VertexCount => self.vertex_count,
            Metric::AspectRatio => self.aspect_ratio,
            Metric::Area => self.area,
        }
    }

    /// First metric (in [`Metric::ALL`] order) that falls outside its bounds.
    pub fn first_violation(&self, metrics: &PolygonMetrics) -> Option<Metric> {
        Metric::ALL
            .into_iter()
            .find(|&m| !self.get(m).contains(m.value(metrics)))
    }

    pub fn accepts(&self, metrics: &PolygonMetrics) -> bool {
        self.first_violation(metrics).is_none()
    }
}

fn default_baseline() -> f64 {
    DEFAULT_SCORE_BASELINE
}

/// Ideal metric values and per-metric weights for scoring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub ideal: PolygonMetrics,
    pub weights: PolygonMetrics,
    /// Score of a candidate that matches `ideal` exactly.
    #[serde(default = "default_baseline")]
    pub baseline: f64,
}

impl ScoringProfile {
    pub fn new(ideal: PolygonMetrics, weights: PolygonMetrics) -> Self {
        Self {
            ideal,
            weights,
            baseline: DEFAULT_SCORE_BASELINE,
        }
    }
}

/// Profile validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("profile name must not be empty")]
    EmptyName,
    #[error("{metric} bounds are empty or not finite (min={min}, max={max})")]
    InvalidBounds { metric: Metric, min: f64, max: f64 },
    #[error("{metric} weight must be finite and >= 0, got {weight}")]
    InvalidWeight { metric: Metric, weight: f64 },
    #[error("score baseline must be finite, got {0}")]
    InvalidBaseline(f64),
}

/// A named target description: acceptance bounds plus scoring.
///
/// Profiles are plain configuration, deserialized once at startup and passed
/// by reference into filtering and selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    pub name: String,
    pub bounds: CandidateBounds,
    pub scoring: ScoringProfile,
}

impl TargetProfile {
    /// Check that every bound is a non-empty finite interval and every
    /// weight is finite and non-negative.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        for metric in Metric::ALL {
            let MetricBounds { min, max } = self.bounds.get(metric);
            // An infinite max is a valid "no upper limit".
            if min.is_nan() || max.is_nan() || min == f64::INFINITY || min >= max {
                return Err(ProfileError::InvalidBounds { metric, min, max });
            }
            let weight = metric.value(&self.scoring.weights);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ProfileError::InvalidWeight { metric, weight });
            }
        }
        if !self.scoring.baseline.is_finite() {
            return Err(ProfileError::InvalidBaseline(self.scoring.baseline));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_bounds() -> CandidateBounds {
        let b = MetricBounds::new(0.0, 1.0e9);
        CandidateBounds {
            height: b,
            width: b,
            vertex_count: b,
            aspect_ratio: b,
            area: b,
        }
    }

    fn metrics() -> PolygonMetrics {
        PolygonMetrics {
            height: 40.0,
            width: 60.0,
            vertex_count: 4.0,
            aspect_ratio: 1.5,
            area: 2400.0,
        }
    }

    #[test]
    fn bounds_are_strict() {
        let b = MetricBounds::new(2.0, 5.0);
        assert!(!b.contains(2.0));
        assert!(b.contains(2.0001));
        assert!(b.contains(4.9));
        assert!(!b.contains(5.0));
        assert!(!b.contains(f64::NAN));
    }

    #[test]
    fn first_violation_reports_failing_metric() {
        let mut bounds = wide_bounds();
        assert!(bounds.accepts(&metrics()));

        bounds.vertex_count = MetricBounds::new(4.0, 8.0);
        assert_eq!(bounds.first_violation(&metrics()), Some(Metric::VertexCount));

        bounds.height = MetricBounds::new(50.0, 100.0);
        assert_eq!(bounds.first_violation(&metrics()), Some(Metric::Height));
    }

    #[test]
    fn validate_rejects_empty_interval_and_negative_weight() {
        let mut profile = TargetProfile {
            name: "goal".to_string(),
            bounds: wide_bounds(),
            scoring: ScoringProfile::new(metrics(), PolygonMetrics::default()),
        };
        assert_eq!(profile.validate(), Ok(()));

        profile.bounds.aspect_ratio = MetricBounds::new(3.0, 3.0);
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::InvalidBounds {
                metric: Metric::AspectRatio,
                ..
            })
        ));

        profile.bounds = wide_bounds();
        profile.bounds.area = MetricBounds::new(10.0, f64::INFINITY);
        assert_eq!(profile.validate(), Ok(()));

        profile.scoring.weights.width = -1.0;
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::InvalidWeight {
                metric: Metric::Width,
                ..
            })
        ));

        profile.scoring.weights.width = 0.0;
        profile.name = "  ".to_string();
        assert_eq!(profile.validate(), Err(ProfileError::EmptyName));
    }

    #[test]
    fn baseline_defaults_when_missing_from_json() {
        let json = r#"{
            "ideal": {"height": 40, "width": 60, "vertex_count": 4, "aspect_ratio": 1.5, "area": 2400},
            "weights": {"height": 1, "width": 1, "vertex_count": 10, "aspect_ratio": 50, "area": 0.01}
        }"#;
        let scoring: ScoringProfile = serde_json::from_str(json).expect("parse");
        assert_eq!(scoring.baseline, DEFAULT_SCORE_BASELINE);
        assert_eq!(scoring.weights.vertex_count, 10.0);
    }

    #[test]
    fn metric_names_match_serde() {
        for metric in Metric::ALL {
            let json = serde_json::to_string(&metric).expect("serialize");
            assert_eq!(json, format!("\"{metric}\""));
        }
    }
}
