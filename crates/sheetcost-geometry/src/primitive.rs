use crate::curve::Curve;
use crate::point::Point;

/// Drawable geometric element
///
/// `Unknown` and `Malformed` are the fallback branches for source entities
/// the reader could not map onto a measurable shape. Neither aborts
/// measurement of the surrounding drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Segment(Segment),
    Path(Path),
    Circle(Circle),
    Arc(Arc),
    Curve(Curve),
    /// Entity kind with no geometry mapping (text, hatch, dimension, ...)
    Unknown { kind: String },
    /// Entity whose required fields were missing or unreadable
    Malformed { kind: String, reason: String },
}

impl Primitive {
    /// Short kind name used in diagnostics
    pub fn kind(&self) -> &str {
        match self {
            Self::Segment(_) => "segment",
            Self::Path(_) => "path",
            Self::Circle(_) => "circle",
            Self::Arc(_) => "arc",
            Self::Curve(_) => "curve",
            Self::Unknown { kind } | Self::Malformed { kind, .. } => kind,
        }
    }

    pub fn unknown(kind: impl Into<String>) -> Self {
        Self::Unknown { kind: kind.into() }
    }

    pub fn malformed(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            kind: kind.into(),
            reason: reason.into(),
        }
    }
}

/// Straight line between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Polyline through `vertices`, optionally closed back to the first vertex
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub vertices: Vec<Point>,
    pub closed: bool,
}

impl Path {
    pub fn open(vertices: impl IntoIterator<Item = Point>) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
            closed: false,
        }
    }

    pub fn closed(vertices: impl IntoIterator<Item = Point>) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
            closed: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: impl Into<Point>, radius: f64) -> Self {
        Self {
            center: center.into(),
            radius,
        }
    }
}

/// Circular arc swept counter-clockwise from `start_angle` to `end_angle`
///
/// Angles are in degrees from the +X axis. An end angle below the start angle
/// means the sweep crosses 0°.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub fn new(center: impl Into<Point>, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center: center.into(),
            radius,
            start_angle,
            end_angle,
        }
    }

    pub fn start_point(&self) -> Point {
        Point::on_circle(self.center, self.radius, self.start_angle.to_radians())
    }

    pub fn end_point(&self) -> Point {
        Point::on_circle(self.center, self.radius, self.end_angle.to_radians())
    }
}

/// One design file's worth of primitives
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    name: String,
    primitives: Vec<Primitive>,
}

impl Drawing {
    pub fn new(name: impl Into<String>, primitives: Vec<Primitive>) -> Self {
        Self {
            name: name.into(),
            primitives,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(Primitive::Segment(Segment::new((0.0, 0.0), (1.0, 0.0))).kind(), "segment");
        assert_eq!(Primitive::unknown("TEXT").kind(), "TEXT");
        assert_eq!(Primitive::malformed("ARC", "missing radius").kind(), "ARC");
    }

    #[test]
    fn arc_endpoints() {
        let arc = Arc::new((0.0, 0.0), 10.0, 0.0, 90.0);
        let start = arc.start_point();
        let end = arc.end_point();
        assert!((start.x - 10.0).abs() < 1e-9 && start.y.abs() < 1e-9);
        assert!(end.x.abs() < 1e-9 && (end.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn drawing_accessors() {
        let drawing = Drawing::new(
            "plate.dxf",
            vec![Primitive::Circle(Circle::new((0.0, 0.0), 1.0))],
        );
        assert_eq!(drawing.name(), "plate.dxf");
        assert_eq!(drawing.len(), 1);
        assert!(!drawing.is_empty());
        assert!(Drawing::new("empty.dxf", Vec::new()).is_empty());
    }
}
