//! csvstore - In-memory tables over delimiter-separated text files
//!
//! Loads CSV-family files into a [`Table`], offers string and numeric access
//! to cells, appends rows by position or by column name, and writes the table
//! back out, splitting the output into numbered files once a size threshold
//! is crossed.

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{DecimalMark, FieldSeparator, RowItem, SeparatorPolicy, Table};
pub use output::{save_path, CsvWriter, WriteSummary};
pub use parser::{load_path, CsvParser};
