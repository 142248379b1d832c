use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Axis-aligned bounding box, never empty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn from_point(p: Point) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest box holding every point, or None when there are no points
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let mut bbox = Self::from_point(points.next()?);
        for p in points {
            bbox.include(p);
        }
        Some(bbox)
    }

    pub fn include(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn union(mut self, other: BoundingBox) -> Self {
        self.include(other.min);
        self.include(other.max);
        self
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn area_mm2(&self) -> f64 {
        self.width() * self.height()
    }
}
