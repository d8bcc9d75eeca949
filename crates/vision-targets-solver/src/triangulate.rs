use log::debug;
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};
use vision_targets_core::CameraModel;

/// Camera-space endpoints of a triangulated vertical edge.
///
/// `bottom` is the endpoint with the larger pixel y (lower on screen), so
/// `bottom.z <= top.z`. Both endpoints share the same depth `y`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSolution {
    pub bottom: Point3<f64>,
    pub top: Point3<f64>,
}

impl EdgeSolution {
    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.bottom, &self.top)
    }

    /// Distance from the focal point along the optical axis.
    pub fn depth(&self) -> f64 {
        self.bottom.y
    }
}

/// Triangulate a vertical edge of known length from its pixel endpoints.
///
/// The endpoints may come in either order. Depth follows from the fraction of
/// the vertical field of view the edge subtends; lateral and vertical offsets
/// are the endpoints' pixel offsets from the image center scaled to that
/// depth.
///
/// Returns `None` for a zero or negative pixel height, or for an edge length
/// that is not finite and positive.
pub fn triangulate_edge(
    pixel_a: Point2<f64>,
    pixel_b: Point2<f64>,
    real_edge_length: f64,
    camera: &CameraModel,
) -> Option<EdgeSolution> {
    let (bottom, top) = if pixel_a.y >= pixel_b.y {
        (pixel_a, pixel_b)
    } else {
        (pixel_b, pixel_a)
    };

    let pixel_height = bottom.y - top.y;
    if pixel_height.is_nan() || pixel_height <= 0.0 {
        debug!("degenerate edge: pixel height {pixel_height}");
        return None;
    }
    if !real_edge_length.is_finite() || real_edge_length <= 0.0 {
        debug!("invalid real edge length {real_edge_length}");
        return None;
    }

    let vertical = camera.vertical();
    let half_fov_tan = (0.5 * vertical.fov_degrees()).to_radians().tan();
    let distance = 0.5 * real_edge_length / half_fov_tan * (vertical.pixel_span() / pixel_height);
    let at_depth = vertical.with_reference_distance(distance).ok()?;

    let half_width = 0.5 * camera.image_width();
    let half_height = 0.5 * camera.image_height();
    let to_camera = |p: Point2<f64>| {
        Point3::new(
            at_depth.length_from_pixel_offset(p.x - half_width),
            distance,
            at_depth.length_from_pixel_offset(half_height - p.y),
        )
    };

    Some(EdgeSolution {
        bottom: to_camera(bottom),
        top: to_camera(top),
    })
}
