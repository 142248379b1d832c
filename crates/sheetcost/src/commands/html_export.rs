use anyhow::{Context, Result};
use minijinja::{Environment, context};
use serde::Serialize;
use sheetcost_geometry::{Drawing, MeasureOptions};
use sheetcost_report::CostSummary;

use crate::preview;
use crate::utils::format;

/// Render the HTML report: one preview per priced drawing, then the cost table
///
/// `drawings` are the drawings the summary was built from, in the same
/// order. Empty drawings are not part of the summary and are skipped here.
pub fn generate_html(
    drawings: &[Drawing],
    summary: &CostSummary,
    options: &MeasureOptions,
) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("report.html", HTML_TEMPLATE)
        .context("Failed to add HTML template")?;
    let template = env.get_template("report.html")?;

    let priced_drawings = drawings.iter().filter(|d| !d.is_empty());
    let parts: Vec<Part> = priced_drawings
        .zip(&summary.rows)
        .map(|(drawing, priced)| Part {
            svg: preview::render_svg(drawing, options),
            caption: format::caption(&priced.row),
            name: priced.row.name.clone(),
            quantity: priced.row.quantity,
            total_length: format::length_mm(priced.row.total_length),
            area: format::area_m2(priced.row.area),
            cutting_cost: format::money(priced.cutting_cost),
            material_cost: format::money(priced.material_cost),
            total_cost: format::money(priced.total_cost),
        })
        .collect();

    let html = template
        .render(context! {
            parts,
            grand_total => format::money(summary.grand_total),
            css_styles => CSS_STYLES,
            version => env!("CARGO_PKG_VERSION"),
        })
        .context("Failed to render HTML template")?;

    Ok(html)
}

#[derive(Serialize)]
struct Part {
    svg: String,
    caption: String,
    name: String,
    quantity: u32,
    total_length: String,
    area: String,
    cutting_cost: String,
    material_cost: String,
    total_cost: String,
}

const HTML_TEMPLATE: &str = include_str!("report.html.jinja");
const CSS_STYLES: &str = include_str!("style.css");
