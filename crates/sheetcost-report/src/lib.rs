//! From measured drawings to a priced summary.
//!
//! [`resolve_quantity`] reads the multiplier from a file name, [`build_row`]
//! packs a measurement into a [`ReportRow`], [`Report::build`] does both for a
//! batch of drawings in parallel and [`price`] turns rows into a
//! [`CostSummary`].

mod batch;
mod cost;
mod quantity;
mod rate;
mod row;

pub use batch::{MeasuredDrawing, Report};
pub use cost::{CostSummary, MM_PER_M, PricedRow, Rates, price, price_row};
pub use quantity::{DEFAULT_QUANTITY, resolve_quantity};
pub use rate::{RateError, parse_rate};
pub use row::{ReportRow, build_row};
