use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgb};
use tempfile::TempDir;

pub const TEST_RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const TEST_GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const TEST_BLUE: Rgb<u8> = Rgb([0, 0, 255]);
pub const TEST_YELLOW: Rgb<u8> = Rgb([255, 255, 0]);

/// Input folders and an output folder inside one temp directory.
/// The temp directory must be kept alive for the paths to stay valid.
pub struct FusionDirs {
    pub root: TempDir,
    pub first: PathBuf,
    pub second: PathBuf,
    pub output: PathBuf,
}

impl FusionDirs {
    pub fn config(&self) -> digitkit::config::FuseConfig {
        digitkit::config::FuseConfig::new(&self.first, &self.second, &self.output)
    }
}

/// Creates `first/` and `second/`; `output/` is left for the fuser to create.
pub fn create_fusion_dirs() -> FusionDirs {
    let root = TempDir::new().expect("Failed to create temp directory");
    let first = root.path().join("first");
    let second = root.path().join("second");
    let output = root.path().join("output");
    std::fs::create_dir(&first).expect("Failed to create first dir");
    std::fs::create_dir(&second).expect("Failed to create second dir");
    FusionDirs {
        root,
        first,
        second,
        output,
    }
}

/// Saves an image whose top half is `top` and bottom half is `bottom`.
/// Format follows the file extension.
pub fn write_two_tone(path: &Path, width: u32, height: u32, top: Rgb<u8>, bottom: Rgb<u8>) {
    let img = ImageBuffer::from_fn(width, height, |_, y| if y < height / 2 { top } else { bottom });
    img.save(path).expect("Failed to save test image");
}

/// True when every channel is within `tolerance` (JPEG output is lossy)
pub fn close_to(actual: &Rgb<u8>, expected: Rgb<u8>, tolerance: u8) -> bool {
    actual
        .0
        .iter()
        .zip(expected.0.iter())
        .all(|(a, e)| a.abs_diff(*e) <= tolerance)
}
