use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Aspect ratio reported for a polygon with positive width and zero height.
pub const DEGENERATE_ASPECT_RATIO: f64 = 1.0e6;

/// The five per-polygon metrics used for candidate filtering and scoring.
///
/// The same shape doubles as a set of ideal values or per-metric weights in
/// scoring profiles. `vertex_count` is carried as `f64` so all five metrics
/// share one arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonMetrics {
    pub height: f64,
    pub width: f64,
    pub vertex_count: f64,
    pub aspect_ratio: f64,
    pub area: f64,
}

/// A near-vertical edge picked from the vertices of a polygon.
///
/// `bottom` is the in-range vertex with the *smallest* pixel y and `top` the
/// one with the largest. With the usual top-left image origin `bottom` is
/// therefore the topmost point on screen. Left and right edges use the same
/// convention, so averaging `bottom` with `bottom` and `top` with `top` pairs
/// matching ends; the triangulator reorders endpoints by y on its own.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerticalEdge {
    pub bottom: Point2<f64>,
    pub top: Point2<f64>,
}

impl VerticalEdge {
    /// Vertical pixel extent between the two endpoints (never negative).
    pub fn pixel_height(&self) -> f64 {
        self.top.y - self.bottom.y
    }

    /// Edge whose endpoints are the averages of the two inputs' endpoints.
    pub fn midline(left: &VerticalEdge, right: &VerticalEdge) -> VerticalEdge {
        VerticalEdge {
            bottom: nalgebra::center(&left.bottom, &right.bottom),
            top: nalgebra::center(&left.top, &right.top),
        }
    }
}

/// Immutable bounding-box summary of an ordered point sequence.
///
/// All derived values are computed once in [`Polygon::from_points`]. An empty
/// polygon has every derived value at zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polygon {
    points: Vec<Point2<f64>>,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    center_x: f64,
    center_y: f64,
    aspect_ratio: f64,
    closed: bool,
}

impl Polygon {
    /// Summarize an ordered point sequence.
    ///
    /// Any number of points is accepted; fewer than two points simply yields
    /// zero width, height, area and aspect ratio.
    pub fn from_points(points: Vec<Point2<f64>>) -> Self {
        let Some(first) = points.first().copied() else {
            return Self {
                points,
                min_x: 0.0,
                max_x: 0.0,
                min_y: 0.0,
                max_y: 0.0,
                center_x: 0.0,
                center_y: 0.0,
                aspect_ratio: 0.0,
                closed: false,
            };
        };

        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        let width = max_x - min_x;
        let height = max_y - min_y;
        let aspect_ratio = if height > 0.0 {
            width / height
        } else if width > 0.0 {
            DEGENERATE_ASPECT_RATIO
        } else {
            0.0
        };
        let closed = points.len() >= 2 && points.last() == Some(&first);

        Self {
            points,
            min_x,
            max_x,
            min_y,
            max_y,
            center_x: min_x + 0.5 * width,
            center_y: min_y + 0.5 * height,
            aspect_ratio,
            closed,
        }
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.center_x, self.center_y)
    }

    /// `width / height`; see [`DEGENERATE_ASPECT_RATIO`] for zero height.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Area of the axis-aligned bounding box.
    pub fn bounding_area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True when the sequence has at least two points and ends where it starts.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn metrics(&self) -> PolygonMetrics {
        PolygonMetrics {
            height: self.height(),
            width: self.width(),
            vertex_count: self.points.len() as f64,
            aspect_ratio: self.aspect_ratio,
            area: self.bounding_area(),
        }
    }

    /// Bounding box corners in TL, TR, BR, BL order (pixel coordinates).
    pub fn bounding_corners(&self) -> [Point2<f64>; 4] {
        [
            Point2::new(self.min_x, self.min_y),
            Point2::new(self.max_x, self.min_y),
            Point2::new(self.max_x, self.max_y),
            Point2::new(self.min_x, self.max_y),
        ]
    }

    /// True iff this bounding box encloses `other`'s on all four sides
    /// (inclusive).
    pub fn contains(&self, other: &Polygon) -> bool {
        self.min_x <= other.min_x
            && self.max_x >= other.max_x
            && self.min_y <= other.min_y
            && self.max_y >= other.max_y
    }

    /// Pick the min-y and max-y vertices among those with `x` in
    /// `[x_min, x_max]`.
    ///
    /// Returns `None` when fewer than two vertices fall in range. Ties keep
    /// the first vertex encountered.
    pub fn find_vertical_edge(&self, x_min: f64, x_max: f64) -> Option<VerticalEdge> {
        let mut in_range = self
            .points
            .iter()
            .filter(|p| p.x >= x_min && p.x <= x_max);

        let first = *in_range.next()?;
        let mut edge = VerticalEdge {
            bottom: first,
            top: first,
        };
        let mut count = 1usize;
        for p in in_range {
            count += 1;
            if p.y < edge.bottom.y {
                edge.bottom = *p;
            }
            if p.y > edge.top.y {
                edge.top = *p;
            }
        }

        (count >= 2).then_some(edge)
    }

    /// Vertical edge among vertices within `tolerance * width` of the left side.
    pub fn find_left_edge(&self, tolerance: f64) -> Option<VerticalEdge> {
        let band = tolerance * self.width();
        self.find_vertical_edge(self.min_x, self.min_x + band)
    }

    /// Vertical edge among vertices within `tolerance * width` of the right side.
    pub fn find_right_edge(&self, tolerance: f64) -> Option<VerticalEdge> {
        let band = tolerance * self.width();
        self.find_vertical_edge(self.max_x - band, self.max_x)
    }
}

impl From<Vec<Point2<f64>>> for Polygon {
    fn from(points: Vec<Point2<f64>>) -> Self {
        Self::from_points(points)
    }
}

impl FromIterator<Point2<f64>> for Polygon {
    fn from_iter<T: IntoIterator<Item = Point2<f64>>>(iter: T) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}
