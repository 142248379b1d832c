//! Minimal ASCII DXF reader.
//!
//! Only the `ENTITIES` section is read. Entities map onto
//! [`sheetcost_geometry::Primitive`] variants; unsupported kinds become
//! `Primitive::Unknown` and entities with missing or unreadable fields become
//! `Primitive::Malformed`, so one bad entity never fails the whole file.

mod entities;
mod groups;

use std::path::Path;

use sheetcost_geometry::Drawing;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DxfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Binary DXF is not supported")]
    Binary,

    #[error("Expected an even number of lines (code/value pairs)")]
    OddLineCount,

    #[error("Invalid group code {raw:?} at line {line}")]
    InvalidGroupCode { raw: String, line: usize },

    #[error("Missing ENTITIES section")]
    MissingEntities,

    #[error("Unexpected end of file while reading {0}")]
    UnexpectedEof(&'static str),
}

pub type Result<T> = std::result::Result<T, DxfError>;

const BINARY_SENTINEL: &[u8] = b"AutoCAD Binary DXF";

/// Parse DXF text into a drawing called `name`
pub fn parse_str(name: impl Into<String>, input: &str) -> Result<Drawing> {
    let groups = groups::parse_groups(input)?;
    let primitives = entities::read_entities(&groups)?;
    Ok(Drawing::new(name, primitives))
}

/// Parse raw file contents
///
/// Text that is not valid UTF-8 (legacy code pages in TEXT entities) is
/// decoded lossily; coordinates are plain ASCII either way.
pub fn parse_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Drawing> {
    if bytes.starts_with(BINARY_SENTINEL) {
        return Err(DxfError::Binary);
    }
    parse_str(name, &String::from_utf8_lossy(bytes))
}

/// Read a DXF file; the drawing is named after the file name
pub fn read_file(path: impl AsRef<Path>) -> Result<Drawing> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_bytes(name, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_files_are_rejected() {
        let mut bytes = BINARY_SENTINEL.to_vec();
        bytes.extend_from_slice(b"\r\n\x1a\0");
        assert!(matches!(parse_bytes("bin.dxf", &bytes), Err(DxfError::Binary)));
    }

    #[test]
    fn lossy_decoding_keeps_geometry() {
        let mut bytes = b"0\nSECTION\n2\nENTITIES\n0\nTEXT\n1\n".to_vec();
        bytes.extend_from_slice(&[0xcf, 0xf0, 0xe8]);
        bytes.extend_from_slice(b"\n0\nCIRCLE\n10\n0\n20\n0\n40\n1\n0\nENDSEC\n0\nEOF\n");
        let drawing = parse_bytes("cp1251.dxf", &bytes).unwrap();
        assert_eq!(drawing.len(), 2);
    }
}
