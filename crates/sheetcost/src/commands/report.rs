use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use indicatif::ProgressBar;
use sheetcost_geometry::{Drawing, MeasureOptions};
use sheetcost_report::{CostSummary, Rates, Report};

use crate::ReportFormat;
use crate::commands::html_export;
use crate::utils::{file as file_utils, format};

/// File name used for the HTML report when no output path is given
pub const DEFAULT_HTML_NAME: &str = "sheetcost-report.html";

pub struct ReportArgs<'a> {
    pub dir: &'a Path,
    pub rates: Rates,
    pub format: ReportFormat,
    pub output: Option<&'a Path>,
    pub open: bool,
    pub options: MeasureOptions,
}

pub fn execute(args: ReportArgs) -> Result<()> {
    let files = file_utils::discover_drawings(args.dir)?;
    let drawings = read_drawings(&files);
    let report = Report::build(&drawings, &args.options);

    if report.is_empty() {
        println!("No drawings to report");
        return Ok(());
    }

    let summary = report.price(args.rates);
    match args.format {
        ReportFormat::Text => output_text(&summary),
        ReportFormat::Json => output_json(&summary, args.output),
        ReportFormat::Html => {
            let html = html_export::generate_html(&drawings, &summary, &args.options)?;
            let output_path = args
                .output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| args.dir.join(DEFAULT_HTML_NAME));

            std::fs::write(&output_path, html)
                .with_context(|| format!("Failed to write HTML to {}", output_path.display()))?;
            println!(
                "{} Report written to {}",
                "✓".green(),
                output_path.display()
            );

            if args.open {
                open_report(&output_path)?;
            }
            Ok(())
        }
    }
}

/// Read every file, logging and skipping the ones that fail
pub fn read_drawings(files: &[PathBuf]) -> Vec<Drawing> {
    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut drawings = Vec::with_capacity(files.len());
    for (i, path) in files.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        spinner.set_message(format!("Reading {}/{}: {}", i + 1, files.len(), name));

        match sheetcost_dxf::read_file(path) {
            Ok(drawing) => drawings.push(drawing),
            Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
        }
    }

    spinner.finish_and_clear();
    drawings
}

pub fn render_table(summary: &CostSummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    table.set_header(vec![
        "File",
        "Quantity",
        "Cut length (mm)",
        "Area (m²)",
        "Cutting cost",
        "Material cost",
        "Total",
    ]);

    let number = |text: String| Cell::new(text).set_alignment(CellAlignment::Right);
    for priced in &summary.rows {
        let row = &priced.row;
        table.add_row(vec![
            Cell::new(&row.name).fg(Color::Cyan),
            number(row.quantity.to_string()),
            number(format::length_mm(row.total_length)),
            number(format::area_m2(row.area)),
            number(format::money(priced.cutting_cost)),
            number(format::money(priced.material_cost)),
            number(format::money(priced.total_cost)),
        ]);
    }

    table.add_row(vec![
        Cell::new("Grand total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        number(format::money(summary.grand_total)).add_attribute(Attribute::Bold),
    ]);
    table
}

fn output_text(summary: &CostSummary) -> Result<()> {
    println!("{}", render_table(summary));
    Ok(())
}

fn output_json(summary: &CostSummary, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
            println!("{} Report written to {}", "✓".green(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn open_report(path: &Path) -> Result<()> {
    open::that(path).with_context(|| format!("Failed to open {}", path.display()))
}
