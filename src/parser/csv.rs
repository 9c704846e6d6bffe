//! Line-oriented CSV loader

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{FieldSeparator, Table};

/// Loader for delimiter-separated files
pub struct CsvParser;

impl CsvParser {
    /// Build a table from `config` and load `path` into it
    pub fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let mut table = Table::from_config(config);
        load_path(&mut table, path, config.has_header_on_load)?;
        Ok(table)
    }
}

/// Split a line on the field separator.
///
/// Quotes are not interpreted: a separator inside quoted text still splits.
pub fn split_line(line: &str, separator: FieldSeparator) -> Vec<String> {
    line.split(separator.as_char()).map(str::to_string).collect()
}

/// Open `path` and load its lines into `table`
pub fn load_path(table: &mut Table, path: &Path, has_header: bool) -> Result<()> {
    let file = File::open(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    load_lines(table, BufReader::new(file).lines(), has_header, path)
}

/// Load a sequence of lines into `table`, replacing its header and data.
///
/// Lines are the exact inverse of what the writer emits: token `i` of each
/// line goes to stored sequence `i`. Blank lines are skipped. On a read
/// error the table keeps its previous contents.
pub fn load_lines<I>(table: &mut Table, lines: I, has_header: bool, source: &Path) -> Result<()>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let separator = table.policy().field_separator();
    let mut staged = Table::new(*table.policy());
    let mut lines = lines.into_iter();

    let read_error = |e: io::Error| Error::FileAccess {
        path: PathBuf::from(source),
        source: e,
    };

    if has_header {
        let header = match lines.next() {
            Some(line) => split_line(&line.map_err(read_error)?, separator),
            None => Vec::new(),
        };
        staged.set_header(Some(header));
    }

    let mut skipped = 0usize;
    for (line_num, line) in lines.enumerate() {
        let line = line.map_err(read_error)?;
        let tokens = split_line(&line, separator);
        if tokens.len() == 1 && tokens[0].is_empty() {
            trace!(line = line_num, "skipping blank line");
            skipped += 1;
            continue;
        }
        staged.ingest_line(tokens);
    }

    debug!(
        path = %source.display(),
        columns = staged.row_count(),
        lines = staged.longest_row_length(),
        skipped,
        "loaded table"
    );

    let (header, rows) = staged.into_parts();
    table.replace_contents(header, rows);
    Ok(())
}
