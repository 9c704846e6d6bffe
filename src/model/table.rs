//! Table store: header, stored sequences and append reconciliation

use tracing::trace;

use crate::config::Config;
use crate::error::{Error, Result};

use super::cell::to_nullable_numbers;
use super::separator::SeparatorPolicy;

/// Default size threshold for output splitting, in bytes
pub const DEFAULT_MAX_FILE_BYTES: u64 = 15_000_000;

/// A column name and value pair used by [`Table::append_items`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowItem {
    pub column: String,
    pub value: String,
}

impl RowItem {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

impl<C: Into<String>, V: Into<String>> From<(C, V)> for RowItem {
    fn from((column, value): (C, V)) -> Self {
        Self::new(column, value)
    }
}

/// In-memory matrix of text cells.
///
/// Stored sequences may have unequal lengths. They are written column-major:
/// output line `j` holds position `j` of every stored sequence, so a stored
/// sequence lines up with a header position and [`Table::column`] returns it
/// by name.
#[derive(Debug, Clone)]
pub struct Table {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    policy: SeparatorPolicy,
    split_files: bool,
    max_file_bytes: u64,
}

impl Default for Table {
    fn default() -> Self {
        Self::new(SeparatorPolicy::default())
    }
}

impl Table {
    /// Create an empty table without a header
    pub fn new(policy: SeparatorPolicy) -> Self {
        Self {
            header: None,
            rows: Vec::new(),
            policy,
            split_files: true,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }

    /// Create an empty table with column names
    pub fn with_header(header: Vec<String>, policy: SeparatorPolicy) -> Self {
        Self {
            header: Some(header),
            ..Self::new(policy)
        }
    }

    /// Create a table from an existing matrix, kept exactly as given
    pub fn from_rows(
        header: Option<Vec<String>>,
        rows: Vec<Vec<String>>,
        policy: SeparatorPolicy,
    ) -> Self {
        Self {
            header,
            rows,
            ..Self::new(policy)
        }
    }

    /// Create an empty table carrying the separator and splitting settings
    pub fn from_config(config: &Config) -> Self {
        Self {
            split_files: config.split_files,
            max_file_bytes: config.max_file_bytes,
            ..Self::new(SeparatorPolicy::new(config.field_separator))
        }
    }

    pub fn policy(&self) -> &SeparatorPolicy {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut SeparatorPolicy {
        &mut self.policy
    }

    pub fn set_policy(&mut self, policy: SeparatorPolicy) {
        self.policy = policy;
    }

    pub fn split_files(&self) -> bool {
        self.split_files
    }

    pub fn set_split_files(&mut self, split: bool) {
        self.split_files = split;
    }

    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_bytes
    }

    pub fn set_max_file_bytes(&mut self, max: u64) {
        self.max_file_bytes = max;
    }

    /// True when a header is present, even if it holds no names
    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    pub fn set_header(&mut self, header: Option<Vec<String>>) {
        self.header = header;
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of stored sequences
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn into_parts(self) -> (Option<Vec<String>>, Vec<Vec<String>>) {
        (self.header, self.rows)
    }

    /// Replace header and stored sequences in one step
    pub(crate) fn replace_contents(&mut self, header: Option<Vec<String>>, rows: Vec<Vec<String>>) {
        self.header = header;
        self.rows = rows;
    }

    /// Position of the first header entry equal to `name`
    pub fn find_column_index(&self, name: &str) -> Option<usize> {
        self.header.as_ref()?.iter().position(|h| h == name)
    }

    /// Stored sequence at the header position of `name`
    pub fn column(&self, name: &str) -> Option<&[String]> {
        let index = self.find_column_index(name)?;
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Numeric view of [`Table::column`].
    ///
    /// Cells that parse are rewritten to the active decimal mark in place.
    pub fn numeric_column(&mut self, name: &str) -> Option<Vec<Option<f64>>> {
        let index = self.find_column_index(name)?;
        let policy = self.policy;
        let cells = self.rows.get_mut(index)?;
        Some(to_nullable_numbers(cells, &policy))
    }

    /// Length of the longest stored sequence
    pub fn longest_row_length(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at (`row`, `position`), or `""` past the end of a short sequence
    pub fn cell_or_empty(&self, row: usize, position: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(position))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Push a new stored sequence built from `values`.
    ///
    /// When fewer values are given than there are stored sequences, the new
    /// sequence is padded with empty strings up to that count.
    pub fn append_row<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = values.into_iter().map(Into::into).collect();
        if row.is_empty() {
            return;
        }

        let target = self.rows.len() + 1;
        if row.len() < target {
            row.resize(target, String::new());
        }
        self.rows.push(row);
    }

    /// Append one output line from column name and value pairs.
    ///
    /// Every name is resolved before the table is touched, so an unknown or
    /// repeated column leaves the table unchanged. Header positions without
    /// an item receive an empty string. No items appends nothing.
    pub fn append_items<I, T>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<RowItem>,
    {
        let width = match &self.header {
            Some(header) => header.len(),
            None => return Err(Error::NoHeader),
        };

        let mut line: Vec<Option<String>> = vec![None; width];
        let mut resolved = 0usize;
        for item in items.into_iter().map(Into::into) {
            let index = self
                .find_column_index(&item.column)
                .ok_or_else(|| Error::UnknownColumn(item.column.clone()))?;
            if line[index].is_some() {
                return Err(Error::DuplicateColumn(item.column));
            }
            line[index] = Some(item.value);
            resolved += 1;
        }
        if resolved == 0 {
            return Ok(());
        }

        self.ingest_line(line.into_iter().map(Option::unwrap_or_default).collect());
        Ok(())
    }

    /// Append one output line, backfilling every stored sequence.
    ///
    /// Sequence `i` is padded to the current line count and then receives
    /// `tokens[i]`, or an empty string when the line is shorter.
    pub fn ingest_line(&mut self, tokens: Vec<String>) {
        let depth = self.longest_row_length();
        let width = tokens.len().max(self.rows.len());
        if self.rows.len() < width {
            self.rows.resize_with(width, Vec::new);
        }

        let mut tokens = tokens.into_iter();
        for row in &mut self.rows {
            if row.len() < depth {
                row.resize(depth, String::new());
            }
            row.push(tokens.next().unwrap_or_default());
        }
        trace!(line = depth, width, "ingested line");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn header_table(names: &[&str]) -> Table {
        Table::with_header(strings(names), SeparatorPolicy::default())
    }

    #[test]
    fn test_has_header_is_permissive() {
        let mut table = Table::default();
        assert!(!table.has_header());

        table.set_header(Some(Vec::new()));
        assert!(table.has_header());
        assert_eq!(table.find_column_index("a"), None);
    }

    #[test]
    fn test_find_column_index_first_match() {
        let table = header_table(&["a", "b", "a"]);
        assert_eq!(table.find_column_index("a"), Some(0));
        assert_eq!(table.find_column_index("b"), Some(1));
        assert_eq!(table.find_column_index("A"), None);
        assert_eq!(Table::default().find_column_index("a"), None);
    }

    #[test]
    fn test_append_row_pads_to_row_count() {
        let mut table = Table::default();
        table.append_row(["x"]);
        table.append_row(["y", "z"]);
        table.append_row(["w"]);
        table.append_row(Vec::<String>::new());

        assert_eq!(
            table.rows(),
            &[strings(&["x"]), strings(&["y", "z"]), strings(&["w", "", ""])]
        );
        assert_eq!(table.longest_row_length(), 3);
        assert_eq!(table.cell_or_empty(0, 1), "");
        assert_eq!(table.cell_or_empty(1, 1), "z");
        assert_eq!(table.cell_or_empty(9, 0), "");
    }

    #[test]
    fn test_append_items_requires_header() {
        let mut table = Table::default();
        let err = table.append_items([("a", "1")]).unwrap_err();
        assert!(matches!(err, Error::NoHeader));
        assert!(table.rows().is_empty());
    }

    #[test]
    fn test_append_items_rejects_unknown_column() {
        let mut table = header_table(&["a", "b"]);
        table.append_items([("a", "1"), ("b", "2")]).unwrap();
        let before = table.rows().to_vec();

        let err = table.append_items([("a", "9"), ("c", "1")]).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(name) if name == "c"));
        assert_eq!(table.rows(), before.as_slice());
    }

    #[test]
    fn test_append_items_empty_is_noop() {
        let mut table = header_table(&["a", "b"]);
        table.append_items(Vec::<RowItem>::new()).unwrap();
        assert!(table.rows().is_empty());

        let err = Table::default()
            .append_items(Vec::<RowItem>::new())
            .unwrap_err();
        assert!(matches!(err, Error::NoHeader));
    }

    #[test]
    fn test_append_items_rejects_repeated_column() {
        let mut table = header_table(&["a", "b"]);
        table.append_items([("b", "0")]).unwrap();
        let before = table.rows().to_vec();

        let err = table.append_items([("a", "1"), ("a", "2")]).unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn(name) if name == "a"));
        assert_eq!(table.rows(), before.as_slice());
    }

    #[test]
    fn test_append_items_fills_unnamed_positions() {
        let mut table = header_table(&["a", "b", "c"]);
        table.append_items([("c", "3"), ("a", "1")]).unwrap();
        table.append_items([("b", "2")]).unwrap();

        assert_eq!(table.column("a").unwrap(), strings(&["1", ""]).as_slice());
        assert_eq!(table.column("b").unwrap(), strings(&["", "2"]).as_slice());
        assert_eq!(table.column("c").unwrap(), strings(&["3", ""]).as_slice());
    }

    #[test]
    fn test_ingest_line_backfills_ragged_lines() {
        let mut table = Table::default();
        table.ingest_line(strings(&["a"]));
        table.ingest_line(strings(&["b", "c", "d"]));
        table.ingest_line(strings(&["e", "f"]));

        assert_eq!(
            table.rows(),
            &[
                strings(&["a", "b", "e"]),
                strings(&["", "c", "f"]),
                strings(&["", "d", ""]),
            ]
        );
    }

    #[test]
    fn test_column_is_positional() {
        // Lookup by name only means "the sequence at the header position":
        // sequences pushed with append_row do not line up with the header.
        let mut table = header_table(&["a", "b"]);
        table.append_row(["1", "2"]);
        assert_eq!(table.column("a").unwrap(), strings(&["1", "2"]).as_slice());
        assert_eq!(table.column("b"), None);
        assert_eq!(table.column("missing"), None);
    }

    #[test]
    fn test_numeric_column_normalizes_cells() {
        let mut table = header_table(&["v"]);
        table.set_policy(SeparatorPolicy::new(
            crate::model::separator::FieldSeparator::Comma,
        ));
        for value in ["1.5", "abc", "2,5"] {
            table.ingest_line(vec![value.to_string()]);
        }

        let numbers = table.numeric_column("v").unwrap();
        assert_eq!(numbers, vec![Some(1.5), None, Some(2.5)]);
        assert_eq!(table.column("v").unwrap(), strings(&["1.5", "abc", "2.5"]).as_slice());
    }
}
