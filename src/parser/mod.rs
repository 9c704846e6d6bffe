//! Parser layer for reading delimiter-separated files into a [`Table`](crate::model::Table)

mod csv;

pub use self::csv::{load_lines, load_path, split_line, CsvParser};
