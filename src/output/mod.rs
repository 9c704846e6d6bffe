//! Output layer: sinks, output file naming and table serialization

mod sink;
mod terminal;
mod writer;

use std::path::{Path, PathBuf};

pub use sink::{FileSink, FileSinkFactory, Sink, SinkFactory};
pub use terminal::render_preview;
pub use writer::{save_path, CsvWriter, WriteSummary};

/// Canonical file extension, lowercase
pub const EXTENSION: &str = ".csv";

/// True when `path` ends with the CSV extension, ignoring case
pub fn has_csv_extension(path: &Path) -> bool {
    let bytes = path.as_os_str().as_encoded_bytes();
    let ext = EXTENSION.as_bytes();
    bytes.len() >= ext.len() && bytes[bytes.len() - ext.len()..].eq_ignore_ascii_case(ext)
}

/// `path` with the CSV extension appended unless already present
pub fn csv_path(path: &Path) -> PathBuf {
    if has_csv_extension(path) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(EXTENSION);
    PathBuf::from(name)
}

/// Name of the `n`-th output file: `<dir>/<stem><n>.csv`
pub fn continuation_path(path: &Path, n: u32) -> PathBuf {
    let mut name = path.file_stem().unwrap_or_default().to_os_string();
    name.push(n.to_string());
    name.push(EXTENSION);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_path_appends_extension() {
        assert_eq!(csv_path(Path::new("out")), PathBuf::from("out.csv"));
        assert_eq!(csv_path(Path::new("dir/out.txt")), PathBuf::from("dir/out.txt.csv"));
        assert_eq!(csv_path(Path::new("out.csv")), PathBuf::from("out.csv"));
        assert_eq!(csv_path(Path::new("OUT.CsV")), PathBuf::from("OUT.CsV"));
    }

    #[test]
    fn test_continuation_path() {
        assert_eq!(
            continuation_path(Path::new("dir/data.csv"), 2),
            PathBuf::from("dir/data2.csv")
        );
        assert_eq!(
            continuation_path(Path::new("DATA.CSV"), 3),
            PathBuf::from("DATA3.csv")
        );
    }
}
