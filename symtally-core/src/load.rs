//! Event-stream discovery and loading.
//!
//! Front ends write their discovery stream as JSON Lines files
//! (`*.jsonl`). This module gathers those files from input paths and
//! decodes them into [`SourceEvent`] sequences.
//!
//! Performance characteristics:
//! - Early directory pruning via `WalkDir::filter_entry` (O(1) subtree skip)
//! - Parallel decoding across files via Rayon
//! - Deterministic: gathered files are sorted by path and per-file event
//!   order is preserved, so the concatenated stream is stable across runs
//!
//! Decoding is strict. A malformed line is a front-end failure and
//! aborts the run with a line-numbered [`SymtallyError::Decode`]; the
//! core is never fed partial or garbage symbols.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{IoResultExt, SymtallyError, SymtallyResult};
use crate::event::SourceEvent;

/// Directories to exclude from event-file discovery.
const EXCLUDED_DIRS: &[&str] = &["target", ".git", "node_modules", ".cargo"];

/// Checks if a directory entry should be pruned (excluded from traversal).
#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

/// Gathers event-stream files from an input path.
///
/// A file path passes through unchanged. A directory is walked
/// recursively for `*.jsonl` files, with `target/`, `.git/`,
/// `node_modules/`, and `.cargo/` subtrees pruned before iteration.
/// Results are sorted by path for a stable stream order.
pub fn gather_event_files(path: &Path) -> SymtallyResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let excludes: HashSet<&str> = EXCLUDED_DIRS.iter().copied().collect();

    let mut files = WalkDir::new(path)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, &excludes))
        .filter_map(|entry| match entry {
            Ok(e) => {
                let p = e.path();
                if p.is_file() && p.extension().is_some_and(|ext| ext == "jsonl") {
                    Some(Ok(p.to_path_buf()))
                } else {
                    None
                }
            }
            Err(err) => {
                let at = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| path.to_path_buf());
                let message = err.to_string();
                Some(Err(SymtallyError::Io {
                    path: at,
                    message,
                    source: err.into_io_error(),
                }))
            }
        })
        .collect::<SymtallyResult<Vec<_>>>()?;

    files.sort();
    debug!(root = %path.display(), count = files.len(), "gathered event files");
    Ok(files)
}

/// Decodes one event-stream file.
///
/// Blank lines are skipped; any other undecodable line fails the load
/// with its 1-indexed line number.
pub fn load_events(path: &Path) -> SymtallyResult<Vec<SourceEvent>> {
    let content = fs::read_to_string(path).with_path(path)?;

    let mut events = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event = serde_json::from_str(trimmed)
            .map_err(|e| SymtallyError::decode_at(path, e.to_string(), idx + 1))?;
        events.push(event);
    }
    Ok(events)
}

/// Decodes many event-stream files into one concatenated sequence.
///
/// Files decode in parallel; the result preserves the given file order
/// and per-file line order. Only decoding parallelizes - the caller's
/// fold over the returned sequence stays single-threaded.
pub fn load_all_events(files: &[PathBuf]) -> SymtallyResult<Vec<SourceEvent>> {
    let per_file = files
        .par_iter()
        .map(|path| load_events(path))
        .collect::<SymtallyResult<Vec<_>>>()?;

    Ok(per_file.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn setup_temp_dir() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir()
            .join("symtally_load_tests")
            .join(format!("{}_{}", timestamp, id));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_file(file: &Path, content: &str) {
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(file, content).unwrap();
    }

    #[test]
    fn test_gather_sorts_and_filters_extension() {
        let dir = setup_temp_dir();
        write_file(&dir.join("b.jsonl"), "");
        write_file(&dir.join("a.jsonl"), "");
        write_file(&dir.join("notes.txt"), "");

        let files = gather_event_files(&dir).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.jsonl", "b.jsonl"]);
    }

    #[test]
    fn test_gather_prunes_excluded_dirs() {
        let dir = setup_temp_dir();
        write_file(&dir.join("keep.jsonl"), "");
        write_file(&dir.join("target/skip.jsonl"), "");
        write_file(&dir.join(".git/skip.jsonl"), "");

        let files = gather_event_files(&dir).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep.jsonl"));
    }

    #[test]
    fn test_gather_passes_file_through() {
        let dir = setup_temp_dir();
        let file = dir.join("events.jsonl");
        write_file(&file, "");

        let files = gather_event_files(&file).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_load_events_skips_blank_lines() {
        let dir = setup_temp_dir();
        let file = dir.join("events.jsonl");
        write_file(
            &file,
            "{\"event\":\"unit_started\",\"name\":\"Core\"}\n\n{\"event\":\"unit_started\",\"name\":\"Tests\"}\n",
        );

        let events = load_events(&file).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].unit_name(), Some("Core"));
        assert_eq!(events[1].unit_name(), Some("Tests"));
    }

    #[test]
    fn test_load_events_reports_bad_line_number() {
        let dir = setup_temp_dir();
        let file = dir.join("events.jsonl");
        write_file(
            &file,
            "{\"event\":\"unit_started\",\"name\":\"Core\"}\nnot json\n",
        );

        let err = load_events(&file).unwrap_err();
        match err {
            SymtallyError::Decode { line, .. } => assert_eq!(line, Some(2)),
            other => panic!("expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_all_preserves_file_order() {
        let dir = setup_temp_dir();
        let first = dir.join("a.jsonl");
        let second = dir.join("b.jsonl");
        write_file(&first, "{\"event\":\"unit_started\",\"name\":\"A\"}\n");
        write_file(&second, "{\"event\":\"unit_started\",\"name\":\"B\"}\n");

        let events = load_all_events(&[first, second]).unwrap();
        let names: Vec<_> = events.iter().filter_map(|e| e.unit_name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = setup_temp_dir();
        let err = load_events(&dir.join("absent.jsonl")).unwrap_err();
        assert!(matches!(err, SymtallyError::Io { .. }));
    }
}
