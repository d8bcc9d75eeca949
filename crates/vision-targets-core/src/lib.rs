//! Core types for vision target localization.
//!
//! This crate is small and purely geometric. It knows nothing about images or
//! contour extraction: callers hand it ordered pixel points and camera
//! parameters, and get back bounding-box summaries, vertical edges and
//! pixel/angle/length conversions.

mod fov;
mod logger;
mod polygon;

pub use fov::{CameraConfig, CameraModel, FovCalculator, FovError};
pub use polygon::{Polygon, PolygonMetrics, VerticalEdge, DEGENERATE_ASPECT_RATIO};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
