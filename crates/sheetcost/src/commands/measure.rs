use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Color, Table};
use serde_json::json;
use sheetcost_geometry::{Drawing, MeasureOptions, MeasureOutcome, Severity, measure_with};
use sheetcost_report::resolve_quantity;

use crate::OutputFormat;
use crate::utils::format;

pub fn execute(file: &Path, format: OutputFormat, options: &MeasureOptions) -> Result<()> {
    let drawing = sheetcost_dxf::read_file(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let outcome = measure_with(&drawing, options);

    match format {
        OutputFormat::Text => output_text(&drawing, &outcome),
        OutputFormat::Json => output_json(&drawing, &outcome),
    }
}

fn output_text(drawing: &Drawing, outcome: &MeasureOutcome) -> Result<()> {
    println!("{}", drawing.name().bold());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);

    let measurement = outcome.measurement;
    let rows = [
        ("Primitives", drawing.len().to_string()),
        (
            "Cut length",
            format!("{} mm", format::length_mm(measurement.total_length)),
        ),
        ("Area", format!("{} m²", format::area_m2(measurement.area))),
        ("Quantity", resolve_quantity(drawing.name()).to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).fg(Color::Cyan), Cell::new(value)]);
    }

    if let Some(bounds) = outcome.bounds {
        table.add_row(vec![
            Cell::new("Extents").fg(Color::Cyan),
            Cell::new(format!(
                "{:.2} x {:.2} mm",
                bounds.width(),
                bounds.height()
            )),
        ]);
    }

    println!("{table}");

    if !outcome.diagnostics.is_empty() {
        println!();
        println!("{}", "Diagnostics".bold());
        for diagnostic in &outcome.diagnostics {
            let label = match diagnostic.severity {
                Severity::Info => "info".blue(),
                Severity::Warning => "warning".yellow(),
            };
            println!("  {} #{}: {}", label, diagnostic.index, diagnostic.message);
        }
    }

    Ok(())
}

fn output_json(drawing: &Drawing, outcome: &MeasureOutcome) -> Result<()> {
    let value = json!({
        "name": drawing.name(),
        "primitives": drawing.len(),
        "quantity": resolve_quantity(drawing.name()),
        "measurement": outcome.measurement,
        "bounds": outcome.bounds,
        "diagnostics": outcome.diagnostics,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
