//! Pinhole field-of-view conversions between pixel offsets, angles and
//! real-world lengths.

use serde::{Deserialize, Serialize};

/// Invalid camera parameters, rejected at construction.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum FovError {
    #[error("field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f64),
    #[error("pixel span must be finite and > 0, got {0}")]
    InvalidPixelSpan(f64),
    #[error("reference distance must be finite and >= 0, got {0}")]
    InvalidReferenceDistance(f64),
}

/// Conversions along one image axis for a pinhole camera.
///
/// Built from the axis field of view, the number of pixels it spans, and a
/// reference distance from the focal point. Any change of input means a new
/// calculator; there is no incremental update.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FovCalculator {
    fov_degrees: f64,
    pixel_span: f64,
    reference_distance: f64,
    focal_length_px: f64,
    real_world_span: f64,
}

impl FovCalculator {
    pub fn new(
        fov_degrees: f64,
        pixel_span: f64,
        reference_distance: f64,
    ) -> Result<Self, FovError> {
        if !fov_degrees.is_finite() || fov_degrees <= 0.0 || fov_degrees >= 180.0 {
            return Err(FovError::InvalidFov(fov_degrees));
        }
        if !pixel_span.is_finite() || pixel_span <= 0.0 {
            return Err(FovError::InvalidPixelSpan(pixel_span));
        }
        if !reference_distance.is_finite() || reference_distance < 0.0 {
            return Err(FovError::InvalidReferenceDistance(reference_distance));
        }

        let half_tan = (0.5 * fov_degrees).to_radians().tan();
        Ok(Self {
            fov_degrees,
            pixel_span,
            reference_distance,
            focal_length_px: 0.5 * pixel_span / half_tan,
            real_world_span: 2.0 * reference_distance * half_tan,
        })
    }

    /// Calculator for a second axis spanning `pixel_span` pixels.
    ///
    /// The new field of view is twice the angle that half of `pixel_span`
    /// subtends under `reference`, so both axes share one focal length.
    pub fn for_axis(reference: &FovCalculator, pixel_span: f64) -> Result<Self, FovError> {
        if !pixel_span.is_finite() || pixel_span <= 0.0 {
            return Err(FovError::InvalidPixelSpan(pixel_span));
        }
        let fov = 2.0 * reference.angle_from_pixel_offset(0.5 * pixel_span);
        Self::new(fov, pixel_span, reference.reference_distance)
    }

    /// Same axis, rebuilt at a new distance from the focal point.
    pub fn with_reference_distance(&self, reference_distance: f64) -> Result<Self, FovError> {
        Self::new(self.fov_degrees, self.pixel_span, reference_distance)
    }

    pub fn fov_degrees(&self) -> f64 {
        self.fov_degrees
    }

    pub fn pixel_span(&self) -> f64 {
        self.pixel_span
    }

    pub fn reference_distance(&self) -> f64 {
        self.reference_distance
    }

    pub fn focal_length_pixels(&self) -> f64 {
        self.focal_length_px
    }

    /// Real-world length covered by the full pixel span at the reference distance.
    pub fn real_world_span(&self) -> f64 {
        self.real_world_span
    }

    /// Distance to the image plane expressed in pixels.
    ///
    /// Equals `reference_distance * pixel_span / real_world_span`, which
    /// reduces to the focal length; the reduced form stays finite at a zero
    /// reference distance.
    pub fn distance_pixels(&self) -> f64 {
        self.focal_length_px
    }

    /// Angle in degrees of a pixel offset from the image center.
    pub fn angle_from_pixel_offset(&self, pixel_offset: f64) -> f64 {
        (pixel_offset / self.distance_pixels()).atan().to_degrees()
    }

    /// Pixel offset from the image center of a ray at `degrees`.
    pub fn pixel_offset_from_angle(&self, degrees: f64) -> f64 {
        degrees.to_radians().tan() * self.distance_pixels()
    }

    /// Real-world length at the reference distance covered by `pixel_offset`.
    pub fn length_from_pixel_offset(&self, pixel_offset: f64) -> f64 {
        self.real_world_span / self.pixel_span * pixel_offset
    }

    /// Inverse of [`Self::length_from_pixel_offset`]; `None` at zero distance.
    pub fn pixel_offset_from_length(&self, length: f64) -> Option<f64> {
        (self.real_world_span > 0.0).then(|| length * self.pixel_span / self.real_world_span)
    }
}

/// Camera description as it appears in configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Horizontal field of view in degrees.
    pub horizontal_fov_deg: f64,
    /// Image width in pixels.
    pub image_width: u32,
    /// Image height in pixels.
    pub image_height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            horizontal_fov_deg: 47.0,
            image_width: 640,
            image_height: 480,
        }
    }
}

/// Horizontal and vertical calculators for one camera and image size.
///
/// The vertical calculator is derived from the horizontal one with
/// [`FovCalculator::for_axis`]. Both use a unit reference distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CameraModel {
    image_width: f64,
    image_height: f64,
    horizontal: FovCalculator,
    vertical: FovCalculator,
}

impl CameraModel {
    pub fn new(config: &CameraConfig) -> Result<Self, FovError> {
        let image_width = f64::from(config.image_width);
        let image_height = f64::from(config.image_height);
        let horizontal = FovCalculator::new(config.horizontal_fov_deg, image_width, 1.0)?;
        let vertical = FovCalculator::for_axis(&horizontal, image_height)?;
        Ok(Self {
            image_width,
            image_height,
            horizontal,
            vertical,
        })
    }

    /// Build from a known vertical field of view; the horizontal calculator
    /// is derived from it.
    pub fn from_vertical_fov(
        vertical_fov_deg: f64,
        image_width: u32,
        image_height: u32,
    ) -> Result<Self, FovError> {
        let image_width = f64::from(image_width);
        let image_height = f64::from(image_height);
        let vertical = FovCalculator::new(vertical_fov_deg, image_height, 1.0)?;
        let horizontal = FovCalculator::for_axis(&vertical, image_width)?;
        Ok(Self {
            image_width,
            image_height,
            horizontal,
            vertical,
        })
    }

    pub fn image_width(&self) -> f64 {
        self.image_width
    }

    pub fn image_height(&self) -> f64 {
        self.image_height
    }

    pub fn horizontal(&self) -> &FovCalculator {
        &self.horizontal
    }

    pub fn vertical(&self) -> &FovCalculator {
        &self.vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn derived_values_match_pinhole_model() {
        let fov = FovCalculator::new(90.0, 640.0, 10.0).expect("fov");
        assert_relative_eq!(fov.focal_length_pixels(), 320.0, epsilon = 1e-9);
        assert_relative_eq!(fov.real_world_span(), 20.0, epsilon = 1e-9);
        assert_relative_eq!(
            fov.distance_pixels(),
            fov.reference_distance() * fov.pixel_span() / fov.real_world_span(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn half_span_maps_to_half_fov() {
        let fov = FovCalculator::new(47.0, 640.0, 1.0).expect("fov");
        assert_relative_eq!(fov.angle_from_pixel_offset(320.0), 23.5, epsilon = 1e-9);
        assert_relative_eq!(fov.angle_from_pixel_offset(-320.0), -23.5, epsilon = 1e-9);
        assert_eq!(fov.angle_from_pixel_offset(0.0), 0.0);
    }

    #[test]
    fn angle_round_trip_across_span() {
        for (deg, span) in [(30.0, 320.0), (47.0, 640.0), (67.0, 1280.0), (120.0, 480.0)] {
            let fov = FovCalculator::new(deg, span, 3.0).expect("fov");
            let steps = 16;
            for k in 0..=steps {
                let p = -0.5 * span + span * k as f64 / steps as f64;
                let back = fov.pixel_offset_from_angle(fov.angle_from_pixel_offset(p));
                assert_relative_eq!(back, p, epsilon = 1e-9, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn length_round_trip() {
        let fov = FovCalculator::new(60.0, 480.0, 12.5).expect("fov");
        for p in [-240.0, -17.0, 0.0, 99.5, 240.0] {
            let len = fov.length_from_pixel_offset(p);
            let back = fov.pixel_offset_from_length(len).expect("nonzero distance");
            assert_relative_eq!(back, p, epsilon = 1e-9);
        }
    }

    #[test]
    fn zero_reference_distance_is_finite() {
        let fov = FovCalculator::new(60.0, 480.0, 0.0).expect("fov");
        assert!(fov.distance_pixels().is_finite());
        assert_eq!(fov.length_from_pixel_offset(100.0), 0.0);
        assert!(fov.pixel_offset_from_length(1.0).is_none());
    }

    #[test]
    fn length_scales_with_reference_distance() {
        let near = FovCalculator::new(60.0, 480.0, 1.0).expect("fov");
        let far = near.with_reference_distance(4.0).expect("fov");
        assert_relative_eq!(
            far.length_from_pixel_offset(50.0),
            4.0 * near.length_from_pixel_offset(50.0),
            epsilon = 1e-12
        );
        assert_eq!(far.fov_degrees(), near.fov_degrees());
    }

    #[test]
    fn constructor_rejects_bad_input() {
        assert_eq!(
            FovCalculator::new(0.0, 640.0, 1.0),
            Err(FovError::InvalidFov(0.0))
        );
        assert_eq!(
            FovCalculator::new(-10.0, 640.0, 1.0),
            Err(FovError::InvalidFov(-10.0))
        );
        assert!(matches!(
            FovCalculator::new(180.0, 640.0, 1.0),
            Err(FovError::InvalidFov(_))
        ));
        assert!(matches!(
            FovCalculator::new(f64::NAN, 640.0, 1.0),
            Err(FovError::InvalidFov(_))
        ));
        assert_eq!(
            FovCalculator::new(45.0, 0.0, 1.0),
            Err(FovError::InvalidPixelSpan(0.0))
        );
        assert_eq!(
            FovCalculator::new(45.0, 480.0, -1.0),
            Err(FovError::InvalidReferenceDistance(-1.0))
        );
    }

    #[test]
    fn derived_axis_keeps_focal_length() {
        let h = FovCalculator::new(47.0, 640.0, 1.0).expect("fov");
        let v = FovCalculator::for_axis(&h, 480.0).expect("fov");
        assert_relative_eq!(v.focal_length_pixels(), h.focal_length_pixels(), epsilon = 1e-9);
        assert!(v.fov_degrees() < h.fov_degrees());
        assert_relative_eq!(
            v.angle_from_pixel_offset(100.0),
            h.angle_from_pixel_offset(100.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn camera_model_from_config() {
        let cam = CameraModel::new(&CameraConfig::default()).expect("camera");
        assert_eq!(cam.image_width(), 640.0);
        assert_eq!(cam.image_height(), 480.0);
        assert_relative_eq!(cam.horizontal().fov_degrees(), 47.0);
        assert_eq!(cam.vertical().pixel_span(), 480.0);
        assert_relative_eq!(
            cam.vertical().focal_length_pixels(),
            cam.horizontal().focal_length_pixels(),
            epsilon = 1e-9
        );

        let bad = CameraConfig {
            image_height: 0,
            ..CameraConfig::default()
        };
        assert_eq!(CameraModel::new(&bad), Err(FovError::InvalidPixelSpan(0.0)));
    }

    #[test]
    fn vertical_first_model_matches_horizontal_first() {
        let from_h = CameraModel::new(&CameraConfig::default()).expect("camera");
        let from_v =
            CameraModel::from_vertical_fov(from_h.vertical().fov_degrees(), 640, 480).expect("camera");
        assert_relative_eq!(
            from_v.horizontal().fov_degrees(),
            47.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            from_v.horizontal().focal_length_pixels(),
            from_h.horizontal().focal_length_pixels(),
            epsilon = 1e-9
        );
    }
}
