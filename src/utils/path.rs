//! Input path discovery

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extensions picked up when walking a directory
pub const VIDEO_EXTENSIONS: [&str; 8] = ["mp4", "mkv", "mov", "avi", "webm", "ts", "m2ts", "mts"];

/// Whether `path` has a known video extension (case-insensitive)
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

/// Expand inputs into the files to analyze.
///
/// Directories are walked recursively in file-name order and filtered by
/// extension. Anything else is passed through untouched so that missing
/// files surface as analysis errors.
pub fn collect_video_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        let before = files.len();
        for entry in WalkDir::new(input).follow_links(true).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() && is_video_file(entry.path()) => {
                    files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Skipping unreadable directory entry"),
            }
        }
        debug!("Found {} video file(s) under {}", files.len() - before, input.display());
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("a/b/clip.MP4")));
        assert!(is_video_file(Path::new("broadcast.m2ts")));
        assert!(!is_video_file(Path::new("notes.txt")));
        assert!(!is_video_file(Path::new("Makefile")));
    }

    #[test]
    fn test_collect_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.mkv"), b"").unwrap();
        fs::write(dir.path().join("a.mp4"), b"").unwrap();
        fs::write(dir.path().join("cover.jpg"), b"").unwrap();
        fs::write(dir.path().join("nested").join("c.webm"), b"").unwrap();

        let files = collect_video_files(&[dir.path().to_path_buf()]);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.mp4", "b.mkv", "c.webm"]);
    }

    #[test]
    fn test_collect_passes_files_through() {
        let missing = PathBuf::from("/nonexistent/clip.txt");
        assert_eq!(collect_video_files(&[missing.clone()]), vec![missing]);
    }
}
