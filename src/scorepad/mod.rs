//! End-by-end score pad tables built from a flat arrow sequence.

pub mod builder;
pub mod format;
pub mod headers;

pub use builder::{EndRow, ScorePad, ScorePadRow, TotalRow};
pub use format::ScorePadFormatter;
pub use headers::{generate_numbered_row_headers, RowHeader};
