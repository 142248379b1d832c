use serde::{Deserialize, Serialize};

use crate::row::ReportRow;

/// mm per m, applied to cut length before pricing
pub const MM_PER_M: f64 = 1000.0;

/// Caller-validated price rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    /// Cost per meter of cut length
    pub per_meter: f64,
    /// Cost per square meter of material
    pub per_square_meter: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedRow {
    #[serde(flatten)]
    pub row: ReportRow,
    pub cutting_cost: f64,
    pub material_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub rows: Vec<PricedRow>,
    pub grand_total: f64,
}

impl CostSummary {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn price_row(row: &ReportRow, rates: Rates) -> PricedRow {
    let quantity = f64::from(row.quantity);
    let cutting_cost = (row.total_length / MM_PER_M) * rates.per_meter * quantity;
    let material_cost = row.area * rates.per_square_meter * quantity;

    PricedRow {
        row: row.clone(),
        cutting_cost,
        material_cost,
        total_cost: cutting_cost + material_cost,
    }
}

/// Price every row and accumulate the grand total left to right
///
/// Rates are expected to be finite and non-negative; see
/// [`parse_rate`](crate::parse_rate).
pub fn price(
    rows: &[ReportRow],
    cost_per_length_unit: f64,
    cost_per_area_unit: f64,
) -> CostSummary {
    let rates = Rates {
        per_meter: cost_per_length_unit,
        per_square_meter: cost_per_area_unit,
    };

    let mut grand_total = 0.0;
    let priced = rows
        .iter()
        .map(|row| {
            let priced = price_row(row, rates);
            grand_total += priced.total_cost;
            priced
        })
        .collect();

    CostSummary {
        rows: priced,
        grand_total,
    }
}
