use serde::{Deserialize, Serialize};
use sheetcost_geometry::Measurement;

/// One report line per measured drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub name: String,
    pub quantity: u32,
    /// Cut length in mm
    pub total_length: f64,
    /// Bounding-box area in m²
    pub area: f64,
}

pub fn build_row(name: impl Into<String>, measurement: &Measurement, quantity: u32) -> ReportRow {
    ReportRow {
        name: name.into(),
        quantity,
        total_length: measurement.total_length,
        area: measurement.area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_fields() {
        let m = Measurement {
            total_length: 12.5,
            area: 0.25,
        };
        let row = build_row("gusset_2.dxf", &m, 2);
        assert_eq!(
            row,
            ReportRow {
                name: "gusset_2.dxf".to_string(),
                quantity: 2,
                total_length: 12.5,
                area: 0.25,
            }
        );
    }
}
