use sheetcost_geometry::{Arc, Circle, Curve, Path, Point, Primitive, Segment};

use crate::groups::Group;
use crate::{DxfError, Result};

/// Reason an entity could not be mapped; becomes `Primitive::Malformed`
type EntityResult<T> = std::result::Result<T, String>;

pub(crate) fn read_entities(groups: &[Group<'_>]) -> Result<Vec<Primitive>> {
    let mut i = 0usize;
    let mut in_entities = false;
    let mut saw_entities = false;
    let mut primitives = Vec::new();

    while i < groups.len() {
        let g = groups[i];

        if g.is(0, "SECTION") {
            i += 1;
            let name = groups.get(i).ok_or(DxfError::UnexpectedEof("SECTION name"))?;
            if name.is(2, "ENTITIES") {
                in_entities = true;
                saw_entities = true;
            }
            i += 1;
            continue;
        }

        if g.is(0, "EOF") {
            break;
        }

        if in_entities && g.code == 0 {
            if g.value == "ENDSEC" {
                in_entities = false;
                i += 1;
                continue;
            }

            let kind = g.value;
            i += 1;
            let start = i;

            // POLYLINE owns nested VERTEX entities up to and including SEQEND
            if kind == "POLYLINE" {
                while i < groups.len() && !groups[i].is(0, "SEQEND") {
                    i += 1;
                }
                if i == groups.len() {
                    return Err(DxfError::UnexpectedEof("POLYLINE vertices"));
                }
                let end = i;
                i += 1;
                while i < groups.len() && groups[i].code != 0 {
                    i += 1;
                }
                push_model_space(&mut primitives, kind, &groups[start..end]);
            } else {
                while i < groups.len() && groups[i].code != 0 {
                    i += 1;
                }
                push_model_space(&mut primitives, kind, &groups[start..i]);
            }
            continue;
        }

        i += 1;
    }

    if !saw_entities {
        return Err(DxfError::MissingEntities);
    }

    log::debug!("Read {} entities", primitives.len());
    Ok(primitives)
}

/// Paper-space entities (group 67 = 1 in the entity header) are layout
/// furniture such as title blocks and viewports, not part geometry
fn push_model_space(primitives: &mut Vec<Primitive>, kind: &str, groups: &[Group<'_>]) {
    if in_paper_space(groups) {
        log::debug!("Skipping paper-space {} entity", kind);
        return;
    }
    primitives.push(read_entity(kind, groups));
}

/// Only the entity's own header counts; a POLYLINE's VERTEX records follow it
fn in_paper_space(groups: &[Group<'_>]) -> bool {
    groups
        .iter()
        .take_while(|g| g.code != 0)
        .any(|g| g.is(67, "1"))
}

fn read_entity(kind: &str, groups: &[Group<'_>]) -> Primitive {
    let result = match kind {
        "LINE" => read_line(groups),
        "LWPOLYLINE" => read_lwpolyline(groups),
        "POLYLINE" => read_polyline(groups),
        "CIRCLE" => read_circle(groups),
        "ARC" => read_arc(groups),
        "SPLINE" => read_spline(groups),
        other => return Primitive::unknown(other),
    };

    result.unwrap_or_else(|reason| {
        log::warn!("Malformed {} entity: {}", kind, reason);
        Primitive::malformed(kind, reason)
    })
}

fn read_line(groups: &[Group<'_>]) -> EntityResult<Primitive> {
    Ok(Primitive::Segment(Segment {
        start: required_point(groups, 10)?,
        end: required_point(groups, 11)?,
    }))
}

fn read_circle(groups: &[Group<'_>]) -> EntityResult<Primitive> {
    Ok(Primitive::Circle(Circle {
        center: required_point(groups, 10)?,
        radius: required(groups, 40)?,
    }))
}

fn read_arc(groups: &[Group<'_>]) -> EntityResult<Primitive> {
    Ok(Primitive::Arc(Arc {
        center: required_point(groups, 10)?,
        radius: required(groups, 40)?,
        start_angle: required(groups, 50)?,
        end_angle: required(groups, 51)?,
    }))
}

/// Bulges (group 42) are not read: vertices are joined by straight edges
fn read_lwpolyline(groups: &[Group<'_>]) -> EntityResult<Primitive> {
    Ok(Primitive::Path(Path {
        vertices: points(groups, 10)?,
        closed: closed_flag(groups)?,
    }))
}

fn read_polyline(groups: &[Group<'_>]) -> EntityResult<Primitive> {
    let header_len = groups
        .iter()
        .position(|g| g.code == 0)
        .unwrap_or(groups.len());
    let closed = closed_flag(&groups[..header_len])?;

    let mut vertices = Vec::new();
    let mut rest = &groups[header_len..];
    while let Some(first) = rest.first() {
        let len = rest[1..]
            .iter()
            .position(|g| g.code == 0)
            .map_or(rest.len(), |p| p + 1);
        if first.value == "VERTEX" {
            vertices.push(required_point(&rest[1..len], 10)?);
        }
        rest = &rest[len..];
    }

    Ok(Primitive::Path(Path { vertices, closed }))
}

fn read_spline(groups: &[Group<'_>]) -> EntityResult<Primitive> {
    let degree = match optional(groups, 71)? {
        Some(d) if d >= 1.0 && d.fract() == 0.0 => d as usize,
        Some(d) => return Err(format!("invalid degree {}", d)),
        None => 3,
    };

    Ok(Primitive::Curve(Curve {
        degree,
        control_points: points(groups, 10)?,
        knots: values(groups, 40)?,
        weights: values(groups, 41)?,
        fit_points: points(groups, 11)?,
    }))
}

fn closed_flag(groups: &[Group<'_>]) -> EntityResult<bool> {
    match groups.iter().find(|g| g.code == 70) {
        Some(g) => {
            let flags: i32 = g
                .value
                .parse()
                .map_err(|_| format!("invalid flags {:?}", g.value))?;
            Ok(flags & 1 != 0)
        }
        None => Ok(false),
    }
}

fn parse_value(code: i32, raw: &str) -> EntityResult<f64> {
    raw.parse()
        .map_err(|_| format!("invalid number {:?} for group {}", raw, code))
}

fn optional(groups: &[Group<'_>], code: i32) -> EntityResult<Option<f64>> {
    groups
        .iter()
        .find(|g| g.code == code)
        .map(|g| parse_value(code, g.value))
        .transpose()
}

fn required(groups: &[Group<'_>], code: i32) -> EntityResult<f64> {
    optional(groups, code)?.ok_or_else(|| format!("missing group {}", code))
}

/// Point from an X code and its matching Y code (X + 10)
fn required_point(groups: &[Group<'_>], x_code: i32) -> EntityResult<Point> {
    Ok(Point::new(
        required(groups, x_code)?,
        required(groups, x_code + 10)?,
    ))
}

fn values(groups: &[Group<'_>], code: i32) -> EntityResult<Vec<f64>> {
    groups
        .iter()
        .filter(|g| g.code == code)
        .map(|g| parse_value(code, g.value))
        .collect()
}

/// Repeated X/Y pairs; an X without a following Y is an error
fn points(groups: &[Group<'_>], x_code: i32) -> EntityResult<Vec<Point>> {
    let y_code = x_code + 10;
    let mut points = Vec::new();
    let mut pending_x: Option<f64> = None;

    for g in groups {
        if g.code == x_code {
            if pending_x.is_some() {
                return Err(format!("group {} without matching {}", x_code, y_code));
            }
            pending_x = Some(parse_value(x_code, g.value)?);
        } else if g.code == y_code {
            let x = pending_x
                .take()
                .ok_or_else(|| format!("group {} without preceding {}", y_code, x_code))?;
            points.push(Point::new(x, parse_value(y_code, g.value)?));
        }
    }

    if pending_x.is_some() {
        return Err(format!("group {} without matching {}", x_code, y_code));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::parse_groups;

    fn entities(body: &str) -> Vec<Primitive> {
        let input = format!("0\nSECTION\n2\nENTITIES\n{}0\nENDSEC\n0\nEOF\n", body);
        let groups = parse_groups(&input).unwrap();
        read_entities(&groups).unwrap()
    }

    #[test]
    fn line() {
        let prims = entities("0\nLINE\n8\n0\n10\n1.5\n20\n2\n30\n0\n11\n4.5\n21\n6\n31\n0\n");
        assert_eq!(
            prims,
            vec![Primitive::Segment(Segment::new((1.5, 2.0), (4.5, 6.0)))]
        );
    }

    #[test]
    fn lwpolyline_closed_flag() {
        let prims = entities(
            "0\nLWPOLYLINE\n90\n3\n70\n1\n10\n0\n20\n0\n10\n10\n20\n0\n42\n0.5\n10\n10\n20\n10\n",
        );
        assert_eq!(
            prims,
            vec![Primitive::Path(Path::closed([
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ]))]
        );
    }

    #[test]
    fn polyline_with_vertices() {
        let prims = entities(concat!(
            "0\nPOLYLINE\n66\n1\n70\n0\n",
            "0\nVERTEX\n10\n0\n20\n0\n",
            "0\nVERTEX\n10\n3\n20\n4\n",
            "0\nSEQEND\n8\n0\n",
            "0\nCIRCLE\n10\n0\n20\n0\n40\n2\n",
        ));
        assert_eq!(prims.len(), 2);
        assert_eq!(
            prims[0],
            Primitive::Path(Path::open([Point::new(0.0, 0.0), Point::new(3.0, 4.0)]))
        );
        assert_eq!(prims[1], Primitive::Circle(Circle::new((0.0, 0.0), 2.0)));
    }

    #[test]
    fn arc_and_circle() {
        let prims = entities(concat!(
            "0\nCIRCLE\n10\n5\n20\n5\n40\n2.5\n",
            "0\nARC\n10\n0\n20\n0\n40\n10\n50\n270\n51\n90\n",
        ));
        assert_eq!(prims[0], Primitive::Circle(Circle::new((5.0, 5.0), 2.5)));
        assert_eq!(
            prims[1],
            Primitive::Arc(Arc::new((0.0, 0.0), 10.0, 270.0, 90.0))
        );
    }

    #[test]
    fn spline() {
        let prims = entities(concat!(
            "0\nSPLINE\n70\n8\n71\n2\n72\n6\n73\n3\n",
            "40\n0\n40\n0\n40\n0\n40\n1\n40\n1\n40\n1\n",
            "10\n0\n20\n0\n30\n0\n10\n1\n20\n2\n30\n0\n10\n2\n20\n0\n30\n0\n",
        ));
        let Primitive::Curve(curve) = &prims[0] else {
            panic!("expected curve, got {:?}", prims[0]);
        };
        assert_eq!(curve.degree, 2);
        assert_eq!(curve.knots, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(curve.control_points.len(), 3);
        assert!(curve.weights.is_empty());
        assert!(curve.fit_points.is_empty());
    }

    #[test]
    fn unknown_kinds_are_kept() {
        let prims = entities("0\nTEXT\n1\nhello\n10\n0\n20\n0\n0\nINSERT\n2\nBLOCK\n");
        assert_eq!(
            prims,
            vec![Primitive::unknown("TEXT"), Primitive::unknown("INSERT")]
        );
    }

    #[test]
    fn missing_group_becomes_malformed() {
        let prims = entities(concat!(
            "0\nCIRCLE\n10\n0\n20\n0\n",
            "0\nLINE\n10\n0\n20\nabc\n11\n1\n21\n1\n",
            "0\nLINE\n10\n0\n20\n0\n11\n1\n21\n1\n",
        ));
        assert_eq!(prims.len(), 3);
        assert_eq!(prims[0], Primitive::malformed("CIRCLE", "missing group 40"));
        assert!(matches!(&prims[1], Primitive::Malformed { kind, .. } if kind == "LINE"));
        assert!(matches!(prims[2], Primitive::Segment(_)));
    }

    #[test]
    fn other_sections_are_skipped() {
        let input = concat!(
            "0\nSECTION\n2\nHEADER\n9\n$INSUNITS\n70\n4\n0\nENDSEC\n",
            "0\nSECTION\n2\nBLOCKS\n0\nBLOCK\n0\nLINE\n10\n0\n20\n0\n11\n1\n21\n1\n0\nENDBLK\n0\nENDSEC\n",
            "0\nSECTION\n2\nENTITIES\n0\nCIRCLE\n10\n0\n20\n0\n40\n1\n0\nENDSEC\n",
            "0\nEOF\n",
        );
        let groups = parse_groups(input).unwrap();
        let prims = read_entities(&groups).unwrap();
        assert_eq!(prims, vec![Primitive::Circle(Circle::new((0.0, 0.0), 1.0))]);
    }

    #[test]
    fn paper_space_entities_are_skipped() {
        let prims = entities(concat!(
            "0\nCIRCLE\n8\nCUT\n10\n0\n20\n0\n40\n10\n",
            "0\nLINE\n67\n1\n8\nFRAME\n10\n0\n20\n0\n11\n400\n21\n0\n",
            "0\nPOLYLINE\n67\n1\n70\n1\n",
            "0\nVERTEX\n10\n0\n20\n0\n",
            "0\nVERTEX\n10\n297\n20\n210\n",
            "0\nSEQEND\n",
            "0\nLINE\n67\n0\n10\n0\n20\n0\n11\n5\n21\n0\n",
        ));
        assert_eq!(
            prims,
            vec![
                Primitive::Circle(Circle::new((0.0, 0.0), 10.0)),
                Primitive::Segment(Segment::new((0.0, 0.0), (5.0, 0.0))),
            ]
        );
    }

    #[test]
    fn missing_entities_section() {
        let groups = parse_groups("0\nSECTION\n2\nHEADER\n0\nENDSEC\n0\nEOF\n").unwrap();
        assert!(matches!(
            read_entities(&groups),
            Err(DxfError::MissingEntities)
        ));
    }

    #[test]
    fn unterminated_polyline() {
        let groups =
            parse_groups("0\nSECTION\n2\nENTITIES\n0\nPOLYLINE\n70\n1\n0\nVERTEX\n10\n0\n20\n0\n")
                .unwrap();
        assert!(matches!(
            read_entities(&groups),
            Err(DxfError::UnexpectedEof(_))
        ));
    }
}
