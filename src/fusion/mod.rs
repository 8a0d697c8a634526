pub mod compose;
pub mod listing;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, ImageReader};

use crate::config::FuseConfig;

pub use compose::{Halves, common_width, fuse_images, resize_to_width, split_halves};
pub use listing::{ImagePair, PairOrder, is_supported_image, list_images, pair_images};

/// Name of the fused output for pair `index`
pub fn fusion_file_name(index: usize) -> String {
    format!("{}_fusion.jpg", index)
}

/// Debug configuration for a fusion run
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Context shared by every pair of a run
#[derive(Clone, Debug, Default)]
pub struct FuseContext {
    pub verbose: bool,
    pub debug: Option<DebugConfig>,
}

/// Outcome of a fusion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FusionReport {
    pub first_count: usize,
    pub second_count: usize,
    /// Written files, in pair order
    pub outputs: Vec<PathBuf>,
}

impl FusionReport {
    pub fn pair_count(&self) -> usize {
        self.first_count.min(self.second_count)
    }
}

/// Batch fuser over two folders of images
pub struct Fuser {
    config: FuseConfig,
    context: FuseContext,
}

impl Fuser {
    pub fn new(config: FuseConfig) -> Self {
        Self {
            config,
            context: FuseContext::default(),
        }
    }

    /// Enable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.context.verbose = verbose;
        self
    }

    /// Save the intermediate crops of every pair under `output_dir`.
    /// The directory must be empty or non-existent.
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    pub fn config(&self) -> &FuseConfig {
        &self.config
    }

    /// List both folders, pair them by position and write one fused image
    /// per pair. The first unreadable image aborts the run.
    pub fn run(&self) -> Result<FusionReport> {
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

        let first = list_images(&self.config.first_dir, self.config.order)?;
        let second = list_images(&self.config.second_dir, self.config.order)?;

        println!("Images in {}: {}", self.config.first_dir.display(), first.len());
        println!("Images in {}: {}", self.config.second_dir.display(), second.len());

        let mut report = FusionReport {
            first_count: first.len(),
            second_count: second.len(),
            outputs: Vec::new(),
        };

        let pairs = pair_images(&first, &second);
        if pairs.is_empty() {
            println!("No images found in the specified folders.");
            return Ok(report);
        }
        println!("Images to process: {}", pairs.len());

        for pair in &pairs {
            println!(
                "Processing pair {}: {} and {}",
                pair.index + 1,
                pair.first.display(),
                pair.second.display()
            );
            let output = self.fuse_pair(pair)?;
            println!("Saved fused image: {}", output.display());
            report.outputs.push(output);
        }

        tracing::info!(pairs = report.outputs.len(), "fusion run finished");
        Ok(report)
    }

    fn fuse_pair(&self, pair: &ImagePair) -> Result<PathBuf> {
        let first = open_image(&pair.first)?;
        let second = open_image(&pair.second)?;

        if self.context.verbose {
            println!(
                "  {}x{} + {}x{} -> width {}",
                first.width(),
                first.height(),
                second.width(),
                second.height(),
                common_width(&first, &second)
            );
        }

        let halves = split_halves(&first, &second);
        self.save_debug_output(pair.index, &halves)?;
        let fused = halves.compose();

        let output = self.config.output_dir.join(fusion_file_name(pair.index));
        fused
            .save_with_format(&output, ImageFormat::Jpeg)
            .with_context(|| format!("Failed to save fused image: {}", output.display()))?;
        Ok(output)
    }

    /// Save debug output if debug mode is enabled
    fn save_debug_output(&self, index: usize, halves: &Halves) -> Result<()> {
        let Some(debug_config) = &self.context.debug else {
            return Ok(());
        };

        let pair_dir_name = format!("{:02}", index);
        let pair_dir = debug_config.output_dir.join(&pair_dir_name);
        std::fs::create_dir_all(&pair_dir)?;

        halves
            .lower
            .save(pair_dir.join("a_lower.png"))
            .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
        halves
            .upper
            .save(pair_dir.join("b_upper.png"))
            .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;

        if self.context.verbose {
            println!("  Debug: saved {}/a_lower.png and {}/b_upper.png", pair_dir_name, pair_dir_name);
        }
        Ok(())
    }
}

fn open_image(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read image: {}", path.display()))?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_are_zero_based() {
        assert_eq!(fusion_file_name(0), "0_fusion.jpg");
        assert_eq!(fusion_file_name(12), "12_fusion.jpg");
    }

    #[test]
    fn test_debug_dir_must_be_empty() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        std::fs::write(dir.path().join("leftover.txt"), b"x")?;
        let config = FuseConfig::new("a", "b", "c");

        assert!(Fuser::new(config.clone()).with_debug(dir.path().to_path_buf()).is_err());

        let fresh = dir.path().join("fresh");
        let fuser = Fuser::new(config).with_debug(fresh.clone())?;
        assert!(fresh.is_dir());
        assert!(fuser.context.debug.is_some());
        Ok(())
    }

    #[test]
    fn test_report_pair_count() {
        let report = FusionReport {
            first_count: 4,
            second_count: 7,
            outputs: Vec::new(),
        };
        assert_eq!(report.pair_count(), 4);
    }
}
