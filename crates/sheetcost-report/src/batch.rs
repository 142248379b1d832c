use rayon::prelude::*;
use sheetcost_geometry::{BoundingBox, Diagnostic, Drawing, MeasureOptions, measure_with};

use crate::cost::{CostSummary, Rates, price};
use crate::quantity::resolve_quantity;
use crate::row::{ReportRow, build_row};

/// A report row together with what was learned while measuring it
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredDrawing {
    pub row: ReportRow,
    pub bounds: Option<BoundingBox>,
    pub diagnostics: Vec<Diagnostic>,
}

impl MeasuredDrawing {
    /// Measure one drawing; empty drawings have nothing to report
    pub fn measure(drawing: &Drawing, options: &MeasureOptions) -> Option<Self> {
        if drawing.is_empty() {
            log::info!("No objects in {}, skipping", drawing.name());
            return None;
        }

        let outcome = measure_with(drawing, options);
        let quantity = resolve_quantity(drawing.name());
        log::debug!(
            "{}: length {:.2} mm, area {:.4} m², quantity {}",
            drawing.name(),
            outcome.measurement.total_length,
            outcome.measurement.area,
            quantity
        );

        Some(Self {
            row: build_row(drawing.name(), &outcome.measurement, quantity),
            bounds: outcome.bounds,
            diagnostics: outcome.diagnostics,
        })
    }
}

/// Measured drawings in submission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub entries: Vec<MeasuredDrawing>,
}

impl Report {
    /// Measure every drawing in parallel
    ///
    /// Entries come back in the order the drawings were given, regardless of
    /// which finished first. Empty drawings are skipped.
    pub fn build(drawings: &[Drawing], options: &MeasureOptions) -> Self {
        let entries = drawings
            .par_iter()
            .filter_map(|drawing| MeasuredDrawing::measure(drawing, options))
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn rows(&self) -> Vec<ReportRow> {
        self.entries.iter().map(|e| e.row.clone()).collect()
    }

    pub fn price(&self, rates: Rates) -> CostSummary {
        price(&self.rows(), rates.per_meter, rates.per_square_meter)
    }
}
