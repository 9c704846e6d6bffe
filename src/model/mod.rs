//! Data model for delimiter-separated tables

pub mod cell;
mod separator;
mod table;

pub use separator::{DecimalMark, FieldSeparator, SeparatorPolicy};
pub use table::{RowItem, Table, DEFAULT_MAX_FILE_BYTES};
