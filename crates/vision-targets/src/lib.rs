//! High-level facade crate for the `vision-targets-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the core, candidate and solver crates
//! - [`LocatorConfig`], a JSON configuration bundling camera, target profile
//!   and solver parameters
//! - [`TargetLocator`], the per-frame pipeline from raw contours to a
//!   [`FrameReport`] (filter, select, solve)
//! - the [`TelemetrySink`] seam for publishing per-frame scalars
//!
//! ## Quickstart
//!
//! ```no_run
//! use vision_targets::{LocatorConfig, TargetLocator};
//! use vision_targets::core::Polygon;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LocatorConfig::load_json("locator.json")?;
//! let locator = TargetLocator::new(config)?;
//!
//! let contours: Vec<Polygon> = Vec::new();
//! let report = locator.locate(contours);
//! if let Some(t) = report.telemetry() {
//!     println!("bearing {:.1} deg at {:.1}", t.bearing_deg, t.distance_to_base);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `vision_targets::core`: polygons, vertical edges, FOV calculators, logging.
//! - `vision_targets::candidates`: target profiles, filtering and selection.
//! - `vision_targets::solver`: edge triangulation and the rectangular solver.

pub use vision_targets_candidates as candidates;
pub use vision_targets_core as core;
pub use vision_targets_solver as solver;

mod config;
mod locator;
mod telemetry;

pub use config::{ConfigError, LocatorConfig};
pub use locator::{FrameReport, TargetLocator};
pub use telemetry::{JsonLinesSink, LastKnownGood, TelemetryError, TelemetrySink};

pub use vision_targets_solver::{TargetSolution, TelemetryRecord};
