use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Extensions accepted as input images (compared case-insensitively)
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// How the files of a folder are ordered before pairing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PairOrder {
    /// Order returned by the filesystem, unsorted
    #[default]
    Listing,
    /// Sorted by file name
    Name,
}

/// Two images combined into one fused output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub index: usize,
    pub first: PathBuf,
    pub second: PathBuf,
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// List the supported image files directly inside `dir`
pub fn list_images(dir: &Path, order: PairOrder) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if !is_supported_image(&path) {
            continue;
        }
        // Follows symlinks, so a linked image counts as a file
        let metadata = std::fs::metadata(&path)
            .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
        if !metadata.is_file() {
            tracing::debug!(path = %path.display(), "skipping non-file entry");
            continue;
        }
        images.push(path);
    }

    if order == PairOrder::Name {
        images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }
    Ok(images)
}

/// Pair files by position. Extra files in the longer list are left out.
pub fn pair_images(first: &[PathBuf], second: &[PathBuf]) -> Vec<ImagePair> {
    first
        .iter()
        .zip(second.iter())
        .enumerate()
        .map(|(index, (a, b))| ImagePair {
            index,
            first: a.clone(),
            second: b.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_filter() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("dir/b.JPG")));
        assert!(is_supported_image(Path::new("c.Jpeg")));
        assert!(!is_supported_image(Path::new("d.gif")));
        assert!(!is_supported_image(Path::new("png")));
        assert!(!is_supported_image(Path::new("notes.png.txt")));
    }

    #[test]
    fn test_pairing_count_is_minimum() {
        let a: Vec<PathBuf> = (0..5).map(|i| PathBuf::from(format!("a{i}.png"))).collect();
        let b: Vec<PathBuf> = (0..3).map(|i| PathBuf::from(format!("b{i}.png"))).collect();

        let pairs = pair_images(&a, &b);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2].index, 2);
        assert_eq!(pairs[2].first, PathBuf::from("a2.png"));
        assert_eq!(pairs[2].second, PathBuf::from("b2.png"));

        assert!(pair_images(&a, &[]).is_empty());
    }

    #[test]
    fn test_list_images_filters_and_sorts() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        for name in ["c.png", "a.JPG", "b.jpeg", "readme.txt"] {
            std::fs::write(dir.path().join(name), b"")?;
        }
        std::fs::create_dir(dir.path().join("folder.png"))?;

        let listed = list_images(dir.path(), PairOrder::Listing)?;
        assert_eq!(listed.len(), 3);

        let sorted = list_images(dir.path(), PairOrder::Name)?;
        let names: Vec<_> = sorted
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, ["a.JPG", "b.jpeg", "c.png"]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_image_is_listed() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let real = dir.path().join("real");
        let input = dir.path().join("input");
        std::fs::create_dir(&real)?;
        std::fs::create_dir(&input)?;
        std::fs::write(real.join("a.png"), b"")?;
        std::os::unix::fs::symlink(real.join("a.png"), input.join("link.png"))?;

        let listed = list_images(&input, PairOrder::Listing)?;
        assert_eq!(listed, vec![input.join("link.png")]);
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let result = list_images(Path::new("/definitely/not/here"), PairOrder::Listing);
        assert!(result.is_err());
    }
}
