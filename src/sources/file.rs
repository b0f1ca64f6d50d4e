//! Local snapshot files exported from the document store

use fs2::FileExt;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::{OrderSource, Snapshot};
use crate::types::{RawOrder, Result, SalesError};

/// File extensions scanned when the source is a directory
const SNAPSHOT_PATTERNS: &[&str] = &["**/*.json", "**/*.jsonl"];

/// Reads `.json` (array or export wrapper) and `.jsonl` (one document per
/// line) snapshots from a file or a directory tree
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Collect all snapshot files under the source directory, sorted so that
    /// de-duplication is deterministic
    pub fn collect_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = SNAPSHOT_PATTERNS
            .iter()
            .flat_map(|pattern| {
                let pattern = self.path.join(pattern);
                glob::glob(&pattern.to_string_lossy())
                    .map(|paths| paths.filter_map(|e| e.ok()).collect::<Vec<_>>())
                    .unwrap_or_default()
            })
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        files
    }

    /// Parse a single snapshot file
    pub fn parse_file(&self, path: &Path) -> Result<Vec<RawOrder>> {
        let mut content = read_locked(path)?;

        if path.extension().and_then(|e| e.to_str()) == Some("jsonl") {
            return parse_lines(path, &mut content);
        }

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let snapshot: Snapshot = simd_json::from_slice(&mut content)
            .map_err(|e| SalesError::Parse(format!("{}: {}", path.display(), e)))?;
        Ok(snapshot.into_orders())
    }

    /// Parse files in parallel; unreadable files are skipped with a warning,
    /// undecodable content aborts the load
    fn parse_files(&self, files: &[PathBuf]) -> Result<Vec<RawOrder>> {
        let results: Vec<(&PathBuf, Result<Vec<RawOrder>>)> = files
            .par_iter()
            .map(|f| (f, self.parse_file(f)))
            .collect();

        let mut all = Vec::new();
        for (path, result) in results {
            match result {
                Ok(orders) => all.extend(orders),
                Err(SalesError::Io(e)) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping unreadable snapshot"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Ok(all)
    }
}

impl OrderSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<RawOrder>> {
        if self.path.is_dir() {
            let files = self.collect_files();
            tracing::debug!(dir = %self.path.display(), files = files.len(), "scanning snapshots");
            return self.parse_files(&files);
        }
        if self.path.is_file() {
            return self.parse_file(&self.path);
        }
        Err(SalesError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} does not exist", self.path.display()),
        )))
    }
}

/// Read a whole file under a shared lock so an exporter rewriting it
/// cannot hand us half a document
fn read_locked(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    file.lock_shared()?;

    let mut content = Vec::new();
    let read = (&file).read_to_end(&mut content);
    let _ = FileExt::unlock(&file);
    read?;

    Ok(content)
}

fn parse_lines(path: &Path, content: &mut [u8]) -> Result<Vec<RawOrder>> {
    let mut orders = Vec::new();

    for (lineno, line) in content.split_mut(|&b| b == b'\n').enumerate() {
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let order: RawOrder = simd_json::from_slice(line).map_err(|e| {
            SalesError::Parse(format!("{}:{}: {}", path.display(), lineno + 1, e))
        })?;
        orders.push(order);
    }

    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const COMPLETED: &str = r#"{"id":"a","status":"completed","createdAt":{"seconds":1705312800,"nanoseconds":0},"items":[{"menuItemId":"m1","name":"Sisig","price":100,"quantity":2}]}"#;
    const PENDING: &str = r#"{"id":"b","status":"pending","items":[]}"#;

    fn fixtures() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
    }

    #[test]
    fn test_parse_jsonl_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.jsonl");
        fs::write(&path, format!("{}\n\n{}\n", COMPLETED, PENDING)).unwrap();

        let source = FileSource::new(path.clone());
        let orders = source.fetch().unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id.as_deref(), Some("a"));
        assert!(orders[0].is_completed());
        assert!(!orders[1].is_completed());
    }

    #[test]
    fn test_parse_json_array_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.json");
        fs::write(&path, format!("[{}, {}]", COMPLETED, PENDING)).unwrap();

        let orders = FileSource::new(path).fetch().unwrap();
        assert_eq!(orders.len(), 2);
    }

    #[test]
    fn test_parse_export_wrapper() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        fs::write(&path, format!(r#"{{"checkouts": [{}]}}"#, COMPLETED)).unwrap();

        let orders = FileSource::new(path).fetch().unwrap();
        assert_eq!(orders.len(), 1);
    }

    #[test]
    fn test_empty_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("empty.json"), "").unwrap();
        fs::write(dir.path().join("empty.jsonl"), "\n").unwrap();

        let orders = FileSource::new(dir.path().to_path_buf()).fetch().unwrap();
        assert!(orders.is_empty());
    }

    #[test]
    fn test_directory_scan_is_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("branch-2")).unwrap();
        fs::write(dir.path().join("a.jsonl"), COMPLETED).unwrap();
        fs::write(dir.path().join("branch-2").join("b.json"), format!("[{}]", PENDING)).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a snapshot").unwrap();

        let source = FileSource::new(dir.path().to_path_buf());
        let files = source.collect_files();
        assert_eq!(files.len(), 2);

        let orders = source.fetch().unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id.as_deref(), Some("a"));
    }

    #[test]
    fn test_bad_line_reports_file_and_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.jsonl");
        fs::write(&path, format!("{}\n{{not json\n", COMPLETED)).unwrap();

        let err = FileSource::new(path).fetch().unwrap_err();
        match err {
            SalesError::Parse(msg) => assert!(msg.contains("orders.jsonl:2")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_path_is_error() {
        let source = FileSource::new(PathBuf::from("tests/fixtures/nonexistent.json"));
        assert!(matches!(source.fetch(), Err(SalesError::Io(_))));
    }

    #[test]
    fn test_fixture_directory() {
        let source = FileSource::new(fixtures());
        let orders = source.fetch().unwrap();
        // orders-sample.json (6) + multi/*.jsonl (3)
        assert_eq!(orders.len(), 9);
    }
}
