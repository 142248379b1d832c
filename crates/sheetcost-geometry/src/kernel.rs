//! Per-primitive length and extent computation.
//!
//! Extent points are representative points whose min/max produce a bounding
//! box. They are exact for segments, paths and circles. For arcs only the two
//! endpoints are used, so an arc whose bulge passes an axis extreme between
//! its endpoints is underestimated; existing reports depend on those numbers.
//! Curves contribute every sampled point of their polyline approximation.

use std::f64::consts::TAU;

use crate::measure::MeasureOptions;
use crate::point::Point;
use crate::primitive::{Arc, Circle, Path, Primitive, Segment};
use crate::{GeometryError, Result};

/// Length of any primitive in drawing units
///
/// Unknown kinds measure zero. Malformed or invalid primitives return an
/// error so the caller can report and skip them.
pub fn length(primitive: &Primitive, options: &MeasureOptions) -> Result<f64> {
    validate(primitive)?;
    Ok(match primitive {
        Primitive::Segment(segment) => segment_length(segment),
        Primitive::Path(path) => path_length(path),
        Primitive::Circle(circle) => circle_length(circle),
        Primitive::Arc(arc) => arc_length(arc),
        Primitive::Curve(curve) => {
            polyline_length(&curve.approximate(options.curve_segments)?, false)
        }
        Primitive::Unknown { .. } | Primitive::Malformed { .. } => 0.0,
    })
}

/// Representative bounding points of any primitive
pub fn extent(primitive: &Primitive, options: &MeasureOptions) -> Result<Vec<Point>> {
    validate(primitive)?;
    Ok(match primitive {
        Primitive::Segment(segment) => vec![segment.start, segment.end],
        Primitive::Path(path) if path.vertices.len() < 2 => Vec::new(),
        Primitive::Path(path) => path.vertices.clone(),
        Primitive::Circle(circle) => circle_extent(circle).to_vec(),
        Primitive::Arc(arc) => vec![arc.start_point(), arc.end_point()],
        Primitive::Curve(curve) => curve.approximate(options.curve_segments)?,
        Primitive::Unknown { .. } | Primitive::Malformed { .. } => Vec::new(),
    })
}

/// Length and extent in one pass, sampling curves only once
pub fn length_and_extent(
    primitive: &Primitive,
    options: &MeasureOptions,
) -> Result<(f64, Vec<Point>)> {
    match primitive {
        Primitive::Curve(curve) => {
            validate(primitive)?;
            let samples = curve.approximate(options.curve_segments)?;
            Ok((polyline_length(&samples, false), samples))
        }
        _ => Ok((length(primitive, options)?, extent(primitive, options)?)),
    }
}

pub fn segment_length(segment: &Segment) -> f64 {
    segment.start.distance_to(segment.end)
}

/// Sum of consecutive vertex distances, plus the closing edge when closed
pub fn path_length(path: &Path) -> f64 {
    polyline_length(&path.vertices, path.closed)
}

pub fn polyline_length(vertices: &[Point], closed: bool) -> f64 {
    if vertices.len() < 2 {
        return 0.0;
    }

    let open: f64 = vertices.windows(2).map(|w| w[0].distance_to(w[1])).sum();
    if closed {
        open + vertices[vertices.len() - 1].distance_to(vertices[0])
    } else {
        open
    }
}

pub fn circle_length(circle: &Circle) -> f64 {
    TAU * circle.radius
}

/// Counter-clockwise sweep from start to end angle in radians, in `[0, 2π)`
///
/// Equal angles sweep zero, not a full turn.
pub fn arc_sweep(arc: &Arc) -> f64 {
    let raw = arc.end_angle - arc.start_angle;
    let sweep = raw.rem_euclid(360.0).to_radians();
    // rem_euclid can round a tiny negative difference up to a full turn
    let sweep = if sweep >= TAU { 0.0 } else { sweep };
    if sweep == 0.0 && raw != 0.0 {
        log::debug!(
            "Arc from {}° to {}° collapses to a zero sweep",
            arc.start_angle,
            arc.end_angle
        );
    }
    sweep
}

pub fn arc_length(arc: &Arc) -> f64 {
    arc_sweep(arc) * arc.radius
}

/// Axis-extreme points of a full circle
pub fn circle_extent(circle: &Circle) -> [Point; 4] {
    let Circle { center, radius } = *circle;
    [
        Point::new(center.x - radius, center.y),
        Point::new(center.x + radius, center.y),
        Point::new(center.x, center.y - radius),
        Point::new(center.x, center.y + radius),
    ]
}

fn validate(primitive: &Primitive) -> Result<()> {
    match primitive {
        Primitive::Segment(segment) => {
            if !segment.start.is_finite() || !segment.end.is_finite() {
                return Err(GeometryError::NonFinite("segment endpoint"));
            }
        }
        Primitive::Path(path) => {
            if !path.vertices.iter().all(Point::is_finite) {
                return Err(GeometryError::NonFinite("path vertex"));
            }
        }
        Primitive::Circle(circle) => validate_round(circle.center, circle.radius)?,
        Primitive::Arc(arc) => {
            validate_round(arc.center, arc.radius)?;
            if !arc.start_angle.is_finite() || !arc.end_angle.is_finite() {
                return Err(GeometryError::NonFinite("arc angle"));
            }
        }
        // Curve validation happens during approximation
        Primitive::Curve(_) | Primitive::Unknown { .. } => {}
        Primitive::Malformed { kind, reason } => {
            return Err(GeometryError::Malformed {
                kind: kind.clone(),
                reason: reason.clone(),
            });
        }
    }
    Ok(())
}

fn validate_round(center: Point, radius: f64) -> Result<()> {
    if !center.is_finite() {
        return Err(GeometryError::NonFinite("center"));
    }
    if !radius.is_finite() {
        return Err(GeometryError::NonFinite("radius"));
    }
    if radius < 0.0 {
        return Err(GeometryError::NegativeRadius(radius));
    }
    Ok(())
}
