//! SVG line-art previews of drawings.
//!
//! Every measurable primitive is flattened to a polyline in drawing
//! coordinates. The SVG flips Y so the drawing reads the same way as in a
//! CAD viewer, and the view box is a square around the drawn geometry with a
//! small margin. Unknown and malformed primitives are not drawn.

use std::f64::consts::TAU;

use sheetcost_geometry::kernel;
use sheetcost_geometry::{BoundingBox, Drawing, MeasureOptions, Point, Primitive};

/// Polyline segments used for a full circle
const CIRCLE_SEGMENTS: usize = 64;

/// Margin around the geometry, relative to the larger side
const MARGIN_RATIO: f64 = 0.05;

pub fn render_svg(drawing: &Drawing, options: &MeasureOptions) -> String {
    let polylines: Vec<Vec<Point>> = drawing
        .primitives()
        .iter()
        .filter_map(|primitive| tessellate(primitive, options))
        .collect();

    let bounds = BoundingBox::from_points(polylines.iter().flatten().copied());
    let view_box = match bounds {
        Some(bounds) => view_box(&bounds),
        None => "0 0 1 1".to_string(),
    };

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{view_box}\" preserveAspectRatio=\"xMidYMid meet\">\n"
    );
    for polyline in &polylines {
        let points = polyline
            .iter()
            .map(|p| format!("{:.3},{:.3}", p.x, flip(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(
            "<polyline points=\"{points}\" fill=\"none\" stroke=\"currentColor\" vector-effect=\"non-scaling-stroke\"/>\n"
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

/// Points to draw for one primitive, or None when it has nothing drawable
pub fn tessellate(primitive: &Primitive, options: &MeasureOptions) -> Option<Vec<Point>> {
    if let Primitive::Curve(curve) = primitive {
        return curve
            .approximate(options.curve_segments)
            .ok()
            .filter(|points| points.len() >= 2);
    }

    // Same validation as measurement; anything it rejects is not drawn
    kernel::length(primitive, options).ok()?;

    match primitive {
        Primitive::Segment(segment) => Some(vec![segment.start, segment.end]),
        Primitive::Path(path) if path.vertices.len() < 2 => None,
        Primitive::Path(path) => {
            let mut points = path.vertices.clone();
            if path.closed {
                points.push(path.vertices[0]);
            }
            Some(points)
        }
        Primitive::Circle(circle) => Some(sample_circle(
            circle.center,
            circle.radius,
            0.0,
            TAU,
            CIRCLE_SEGMENTS,
        )),
        Primitive::Arc(arc) => {
            let sweep = kernel::arc_sweep(arc);
            let steps = ((sweep / TAU) * CIRCLE_SEGMENTS as f64).ceil().max(1.0) as usize;
            Some(sample_circle(
                arc.center,
                arc.radius,
                arc.start_angle.to_radians(),
                sweep,
                steps,
            ))
        }
        Primitive::Curve(_) | Primitive::Unknown { .. } | Primitive::Malformed { .. } => None,
    }
}

fn sample_circle(center: Point, radius: f64, start: f64, sweep: f64, steps: usize) -> Vec<Point> {
    (0..=steps)
        .map(|i| {
            let angle = start + sweep * (i as f64 / steps as f64);
            Point::on_circle(center, radius, angle)
        })
        .collect()
}

fn view_box(bounds: &BoundingBox) -> String {
    let size = bounds.width().max(bounds.height());
    let margin = if size > 0.0 { size * MARGIN_RATIO } else { 1.0 };
    let side = size + 2.0 * margin;
    let center_x = (bounds.min.x + bounds.max.x) / 2.0;
    let center_y = (bounds.min.y + bounds.max.y) / 2.0;

    format!(
        "{:.3} {:.3} {:.3} {:.3}",
        center_x - side / 2.0,
        flip(center_y) - side / 2.0,
        side,
        side
    )
}

/// SVG Y grows downwards; `0.0 - y` keeps zero from printing as `-0.000`
fn flip(y: f64) -> f64 {
    0.0 - y
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetcost_geometry::{Arc, Circle, Curve, Path, Segment};

    fn opts() -> MeasureOptions {
        MeasureOptions::default()
    }

    #[test]
    fn single_segment() {
        let drawing = Drawing::new(
            "bar.dxf",
            vec![Primitive::Segment(Segment::new((0.0, 0.0), (10.0, 0.0)))],
        );
        insta::assert_snapshot!(render_svg(&drawing, &opts()), @r#"
        <svg xmlns="http://www.w3.org/2000/svg" viewBox="-0.500 -5.500 11.000 11.000" preserveAspectRatio="xMidYMid meet">
        <polyline points="0.000,0.000 10.000,0.000" fill="none" stroke="currentColor" vector-effect="non-scaling-stroke"/>
        </svg>
        "#);
    }

    #[test]
    fn y_axis_is_flipped() {
        let segment = Primitive::Segment(Segment::new((0.0, 0.0), (0.0, 20.0)));
        let drawing = Drawing::new("post.dxf", vec![segment]);
        let svg = render_svg(&drawing, &opts());
        assert!(svg.contains("points=\"0.000,0.000 0.000,-20.000\""));
        assert!(svg.contains("viewBox=\"-11.000 -21.000 22.000 22.000\""));
    }

    #[test]
    fn closed_shapes_return_to_start() {
        let square = Primitive::Path(Path::closed([
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]));
        let points = tessellate(&square, &opts()).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], points[3]);

        let circle = tessellate(&Primitive::Circle(Circle::new((0.0, 0.0), 2.0)), &opts()).unwrap();
        assert_eq!(circle.len(), CIRCLE_SEGMENTS + 1);
        for p in &circle {
            assert!((p.x.hypot(p.y) - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn arcs_follow_their_sweep() {
        let arc = Primitive::Arc(Arc::new((0.0, 0.0), 10.0, 0.0, 90.0));
        let points = tessellate(&arc, &opts()).unwrap();
        assert_eq!(points.len(), CIRCLE_SEGMENTS / 4 + 1);
        let top = points.last().unwrap();
        assert!(top.x.abs() < 1e-9 && (top.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn curves_use_measure_sampling() {
        let curve = Primitive::Curve(Curve::from_control_points(
            2,
            vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 0.0)],
        ));
        let points = tessellate(&curve, &MeasureOptions { curve_segments: 8 }).unwrap();
        assert_eq!(points.len(), 9);
    }

    #[test]
    fn nothing_drawable() {
        assert_eq!(tessellate(&Primitive::unknown("TEXT"), &opts()), None);
        assert_eq!(
            tessellate(&Primitive::malformed("LINE", "missing group 11"), &opts()),
            None
        );
        assert_eq!(
            tessellate(&Primitive::Circle(Circle::new((0.0, 0.0), -1.0)), &opts()),
            None
        );

        let drawing = Drawing::new("label.dxf", vec![Primitive::unknown("TEXT")]);
        let svg = render_svg(&drawing, &opts());
        assert!(svg.contains("viewBox=\"0 0 1 1\""));
        assert!(!svg.contains("<polyline"));
    }
}
