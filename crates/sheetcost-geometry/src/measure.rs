use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::curve::DEFAULT_CURVE_SEGMENTS;
use crate::kernel;
use crate::primitive::{Drawing, Primitive};

/// mm² per m², the only unit conversion the measurer performs
pub const MM2_PER_M2: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureOptions {
    /// Polyline segments used to flatten each curve
    pub curve_segments: usize,
}

impl Default for MeasureOptions {
    fn default() -> Self {
        Self {
            curve_segments: DEFAULT_CURVE_SEGMENTS,
        }
    }
}

/// Total cut length (mm) and bounding-box area (m²) of one drawing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub total_length: f64,
    pub area: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Primitive kind the kernel does not measure
    Info,
    /// Primitive that could not be measured and was counted as zero
    Warning,
}

/// Non-fatal problem with a single primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Position of the primitive in the drawing
    pub index: usize,
    pub kind: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasureOutcome {
    pub measurement: Measurement,
    /// None when no primitive contributed an extent point
    pub bounds: Option<BoundingBox>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Measure a drawing with default options
pub fn measure(drawing: &Drawing) -> Measurement {
    measure_with(drawing, &MeasureOptions::default()).measurement
}

/// Measure a drawing, collecting a diagnostic for every primitive that was
/// skipped
///
/// A primitive that fails contributes zero length and no extent; the rest of
/// the drawing is still measured.
pub fn measure_with(drawing: &Drawing, options: &MeasureOptions) -> MeasureOutcome {
    let mut total_length = 0.0;
    let mut bounds: Option<BoundingBox> = None;
    let mut diagnostics = Vec::new();

    for (index, primitive) in drawing.primitives().iter().enumerate() {
        if let Primitive::Unknown { kind } = primitive {
            log::debug!("{}: skipping unsupported {} entity", drawing.name(), kind);
            diagnostics.push(Diagnostic {
                index,
                kind: kind.clone(),
                severity: Severity::Info,
                message: format!("Unsupported entity kind {}", kind),
            });
            continue;
        }

        match kernel::length_and_extent(primitive, options) {
            Ok((length, points)) => {
                total_length += length;
                for p in points {
                    bounds.get_or_insert(BoundingBox::from_point(p)).include(p);
                }
            }
            Err(e) => {
                log::warn!(
                    "Error processing {} #{} in {}: {}",
                    primitive.kind(),
                    index,
                    drawing.name(),
                    e
                );
                diagnostics.push(Diagnostic {
                    index,
                    kind: primitive.kind().to_string(),
                    severity: Severity::Warning,
                    message: e.to_string(),
                });
            }
        }
    }

    let area = bounds.map_or(0.0, |bbox| bbox.area_mm2() / MM2_PER_M2);

    MeasureOutcome {
        measurement: Measurement { total_length, area },
        bounds,
        diagnostics,
    }
}
