use sheetcost_report::ReportRow;

/// Money amounts, two decimals
pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Cut length in mm, two decimals
pub fn length_mm(value: f64) -> String {
    format!("{value:.2}")
}

/// Area in m², four decimals
pub fn area_m2(value: f64) -> String {
    format!("{value:.4}")
}

/// One-line description shown under a drawing preview
pub fn caption(row: &ReportRow) -> String {
    format!(
        "{} - Cut length: {} mm, Area: {} m², Quantity: {}",
        row.name,
        length_mm(row.total_length),
        area_m2(row.area),
        row.quantity
    )
}
