use std::f64::consts::PI;

use sheetcost_geometry::kernel;
use sheetcost_geometry::{
    Arc, Circle, Curve, Drawing, MeasureOptions, Path, Point, Primitive, Segment, measure,
    measure_with,
};

fn widget() -> Drawing {
    Drawing::new(
        "widget_3.dxf",
        vec![
            Primitive::Segment(Segment::new((0.0, 0.0), (3.0, 4.0))),
            Primitive::Circle(Circle::new((0.0, 0.0), 5.0)),
        ],
    )
}

#[test]
fn segment_and_circle() {
    let outcome = measure_with(&widget(), &MeasureOptions::default());
    let m = outcome.measurement;

    assert!((m.total_length - (5.0 + 10.0 * PI)).abs() < 1e-9);
    assert!((m.total_length - 36.4159).abs() < 1e-4);

    let bounds = outcome.bounds.expect("bounds");
    assert_eq!(bounds.min, Point::new(-5.0, -5.0));
    assert_eq!(bounds.max, Point::new(5.0, 5.0));
    assert_eq!(m.area, 0.0001);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn plate_with_holes_and_rounded_corner() {
    // 200 x 100 closed outline, two holes, a quarter arc outside the outline
    // whose endpoints extend the box to x = 210
    let outline = Path::closed([
        Point::new(0.0, 0.0),
        Point::new(200.0, 0.0),
        Point::new(200.0, 100.0),
        Point::new(0.0, 100.0),
    ]);
    let drawing = Drawing::new(
        "plate_2.dxf",
        vec![
            Primitive::Path(outline),
            Primitive::Circle(Circle::new((50.0, 50.0), 10.0)),
            Primitive::Circle(Circle::new((150.0, 50.0), 10.0)),
            Primitive::Arc(Arc::new((200.0, 50.0), 10.0, 270.0, 0.0)),
        ],
    );

    let m = measure(&drawing);
    let expected_length = 600.0 + 2.0 * (20.0 * PI) + 5.0 * PI;
    assert!((m.total_length - expected_length).abs() < 1e-9);
    assert!((m.area - 210.0 * 100.0 / 1_000_000.0).abs() < 1e-15);
}

#[test]
fn curve_sampling_is_configurable() {
    let s_curve = Primitive::Curve(Curve::from_control_points(
        3,
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 40.0),
            Point::new(60.0, -40.0),
            Point::new(60.0, 0.0),
        ],
    ));
    let drawing = Drawing::new("s.dxf", vec![s_curve.clone()]);

    let default = measure(&drawing).total_length;
    let fine = measure_with(&drawing, &MeasureOptions { curve_segments: 2000 })
        .measurement
        .total_length;
    let coarse = kernel::length(&s_curve, &MeasureOptions { curve_segments: 4 }).unwrap();

    // Polyline approximations never exceed the true length and converge from below
    assert!(coarse < default);
    assert!(default <= fine);
    assert!((fine - default) / fine < 1e-3);
}
