use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{AnnotationSession, BoundingBox, DigitLabel};

/// One labeled box in the exported document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledBox {
    pub label: DigitLabel,
    #[serde(flatten)]
    pub bbox: BoundingBox,
}

/// Machine-readable copy of the console summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub image: PathBuf,
    pub boxes: Vec<LabeledBox>,
}

impl AnnotationRecord {
    pub fn from_session(image: impl AsRef<Path>, session: &AnnotationSession) -> Self {
        Self {
            image: image.as_ref().to_path_buf(),
            boxes: session
                .labeled_boxes()
                .map(|(label, bbox)| LabeledBox { label, bbox })
                .collect(),
        }
    }

    pub fn save(&self, output: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize annotation")?;
        std::fs::write(output, json)
            .with_context(|| format!("Failed to write annotation: {}", output.display()))?;
        tracing::info!(path = %output.display(), "saved annotation record");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read annotation: {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid annotation file: {}", path.display()))
    }
}
