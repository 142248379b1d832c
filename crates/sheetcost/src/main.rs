use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger::Env;
use sheetcost::commands::{self, report::ReportArgs};
use sheetcost::{OutputFormat, ReportFormat, utils};
use sheetcost_geometry::{DEFAULT_CURVE_SEGMENTS, MeasureOptions};
use sheetcost_report::{Rates, parse_rate};

#[derive(Parser)]
#[command(name = "sheetcost")]
#[command(about = "Cut length, material area and cost of DXF sheet parts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure a single drawing
    Measure {
        /// DXF file to measure
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Polyline segments used to approximate each spline
        #[arg(long, default_value_t = DEFAULT_CURVE_SEGMENTS)]
        curve_segments: usize,
    },

    /// Price every drawing in a directory
    Report {
        /// Directory holding the DXF files (not searched recursively)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        dir: PathBuf,

        /// Cutting cost per meter of cut length
        #[arg(long, value_parser = parse_rate)]
        cost_per_meter: f64,

        /// Material cost per square meter of bounding-box area
        #[arg(long, value_parser = parse_rate)]
        cost_per_square_meter: f64,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,

        /// Where to write the report (HTML defaults to <DIR>/sheetcost-report.html)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Polyline segments used to approximate each spline
        #[arg(long, default_value_t = DEFAULT_CURVE_SEGMENTS)]
        curve_segments: usize,

        /// Open the HTML report once written
        #[arg(long)]
        open: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize color handling (respects NO_COLOR)
    utils::color::init_color();

    // Initialize logger with default level (overridden by RUST_LOG)
    let env = Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Measure {
            file,
            format,
            curve_segments,
        } => commands::measure::execute(&file, format, &MeasureOptions { curve_segments }),

        Commands::Report {
            dir,
            cost_per_meter,
            cost_per_square_meter,
            format,
            output,
            curve_segments,
            open,
        } => commands::report::execute(ReportArgs {
            dir: &dir,
            rates: Rates {
                per_meter: cost_per_meter,
                per_square_meter: cost_per_square_meter,
            },
            format,
            output: output.as_deref(),
            open,
            options: MeasureOptions { curve_segments },
        }),
    }
}
