pub mod color;
pub mod file;
pub mod format;
