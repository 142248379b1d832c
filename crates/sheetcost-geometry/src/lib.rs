//! Geometry measurement for 2D vector drawings.
//!
//! A [`Drawing`] is an ordered list of [`Primitive`]s in millimeters. The
//! [`kernel`] computes length and extent points for a single primitive, and
//! [`measure`] folds those over a whole drawing into a [`Measurement`]
//! (total cut length in mm, bounding-box area in m²).

mod bbox;
mod curve;
pub mod kernel;
mod measure;
mod point;
mod primitive;

pub use bbox::BoundingBox;
pub use curve::{Curve, DEFAULT_CURVE_SEGMENTS};
pub use measure::{
    Diagnostic, MM2_PER_M2, MeasureOptions, MeasureOutcome, Measurement, Severity, measure,
    measure_with,
};
pub use point::Point;
pub use primitive::{Arc, Circle, Drawing, Path, Primitive, Segment};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Non-finite value in {0}")]
    NonFinite(&'static str),

    #[error("Negative radius: {0}")]
    NegativeRadius(f64),

    #[error("Invalid curve: {0}")]
    InvalidCurve(String),

    #[error("Malformed {kind}: {reason}")]
    Malformed { kind: String, reason: String },
}

pub type Result<T> = std::result::Result<T, GeometryError>;
