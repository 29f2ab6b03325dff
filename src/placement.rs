//! Detection of files a previous run already placed under the sorted root.
//!
//! This is what makes repeated `organize` passes idempotent: a file whose name
//! already exists somewhere in the sorted tree is skipped rather than moved
//! again, even when it sits in a folder that does not match its computed
//! category (the tree may have been produced by an older table or edited by
//! hand). The direct source-equals-destination case is short-circuited by path
//! equality before this check runs; this catches the cross-folder case.

use crate::categories::Registry;
use std::path::Path;

/// Returns true if a same-named entry exists in any category folder
/// (including `Others`) under `sorted_root`.
pub fn already_sorted(sorted_root: &Path, registry: &Registry, filename: &str) -> bool {
    registry
        .folder_names()
        .any(|folder| sorted_root.join(folder).join(filename).exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_absent_file_is_not_sorted() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let registry = Registry::default_table();

        assert!(!already_sorted(temp_dir.path(), &registry, "photo.jpg"));
    }

    #[test]
    fn test_detects_file_in_matching_category() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let registry = Registry::default_table();

        let images = temp_dir.path().join("Images");
        fs::create_dir_all(&images).expect("Failed to create dir");
        fs::write(images.join("photo.jpg"), "img").expect("Failed to write");

        assert!(already_sorted(temp_dir.path(), &registry, "photo.jpg"));
    }

    #[test]
    fn test_detects_file_in_different_category() {
        // A same-named file sitting in the "wrong" folder still counts.
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let registry = Registry::default_table();

        let videos = temp_dir.path().join("Videos");
        fs::create_dir_all(&videos).expect("Failed to create dir");
        fs::write(videos.join("x.jpg"), "img").expect("Failed to write");

        assert!(already_sorted(temp_dir.path(), &registry, "x.jpg"));
    }

    #[test]
    fn test_others_folder_is_checked() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let registry = Registry::default_table();

        let others = temp_dir.path().join("Others");
        fs::create_dir_all(&others).expect("Failed to create dir");
        fs::write(others.join("data.xyz"), "d").expect("Failed to write");

        assert!(already_sorted(temp_dir.path(), &registry, "data.xyz"));
    }

    #[test]
    fn test_different_name_is_not_sorted() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let registry = Registry::default_table();

        let images = temp_dir.path().join("Images");
        fs::create_dir_all(&images).expect("Failed to create dir");
        fs::write(images.join("photo.jpg"), "img").expect("Failed to write");

        assert!(!already_sorted(temp_dir.path(), &registry, "other.jpg"));
    }
}
