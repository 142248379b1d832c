pub mod html_export;
pub mod measure;
pub mod report;
