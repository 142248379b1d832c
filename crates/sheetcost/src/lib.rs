use clap::ValueEnum;

pub mod commands;
pub mod preview;
pub mod utils;

pub use sheetcost_dxf;
pub use sheetcost_geometry;
pub use sheetcost_report;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Html,
}
