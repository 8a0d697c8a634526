pub mod export;
pub mod preview;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Positional role of a digit inside a counter reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigitLabel {
    Units,
    Tens,
    Hundreds,
    Thousands,
}

impl DigitLabel {
    /// Labels in the order the user is asked for them
    pub const ALL: [DigitLabel; 4] = [
        DigitLabel::Units,
        DigitLabel::Tens,
        DigitLabel::Hundreds,
        DigitLabel::Thousands,
    ];

    pub fn index(self) -> usize {
        match self {
            DigitLabel::Units => 0,
            DigitLabel::Tens => 1,
            DigitLabel::Hundreds => 2,
            DigitLabel::Thousands => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            DigitLabel::Units => "Units",
            DigitLabel::Tens => "Tens",
            DigitLabel::Hundreds => "Hundreds",
            DigitLabel::Thousands => "Thousands",
        }
    }

    /// Text of the notification asking for this label's box
    pub fn prompt(self) -> String {
        format!("Select the {} digit by drawing a box around it.", self.name())
    }
}

impl PartialOrd for DigitLabel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DigitLabel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index().cmp(&other.index())
    }
}

impl fmt::Display for DigitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rectangle drawn by the user, in image pixel coordinates.
///
/// (x1, y1) is the anchor where the pointer went down, (x2, y2) the corner
/// where it was released. Corners are kept as drawn, so x2 may be less than x1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Degenerate box anchored at a single point
    pub fn anchored_at(x: i32, y: i32) -> Self {
        Self::new(x, y, x, y)
    }

    pub fn coords(&self) -> [i32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    pub fn left(&self) -> i32 {
        self.x1.min(self.x2)
    }

    pub fn top(&self) -> i32 {
        self.y1.min(self.y2)
    }

    pub fn width(&self) -> u32 {
        self.x1.abs_diff(self.x2)
    }

    pub fn height(&self) -> u32 {
        self.y1.abs_diff(self.y2)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x1, self.y1, self.x2, self.y2)
    }
}

/// A box committed for one label on pointer release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub label: DigitLabel,
    pub bbox: BoundingBox,
}

impl Commit {
    /// Text of the confirmation shown after the release
    pub fn confirmation(&self) -> String {
        format!("Box coordinates for {}: {}", self.label, self.bbox)
    }
}

pub const COMPLETION_MESSAGE: &str = "All digits have been selected. Proceed.";

/// Annotation state for one image.
///
/// Boxes are recorded in label order, one per label. Once all four labels
/// have a box the session ignores further pointer input.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSession {
    boxes: Vec<BoundingBox>,
    in_progress: Option<BoundingBox>,
}

impl AnnotationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label awaiting a box, `None` once every label is done
    pub fn current_label(&self) -> Option<DigitLabel> {
        DigitLabel::from_index(self.boxes.len())
    }

    pub fn is_complete(&self) -> bool {
        self.current_label().is_none()
    }

    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    /// Committed boxes paired with their labels
    pub fn labeled_boxes(&self) -> impl Iterator<Item = (DigitLabel, BoundingBox)> + '_ {
        DigitLabel::ALL.into_iter().zip(self.boxes.iter().copied())
    }

    /// Box currently being dragged, if any
    pub fn in_progress(&self) -> Option<BoundingBox> {
        self.in_progress
    }

    /// Pointer went down: anchor a new box. Returns false when ignored.
    pub fn press(&mut self, x: i32, y: i32) -> bool {
        if self.is_complete() {
            return false;
        }
        self.in_progress = Some(BoundingBox::anchored_at(x, y));
        true
    }

    /// Pointer moved while pressed: move the opposite corner
    pub fn drag(&mut self, x: i32, y: i32) {
        if let Some(bbox) = self.in_progress.as_mut() {
            bbox.x2 = x;
            bbox.y2 = y;
        }
    }

    /// Pointer released: commit the box for the current label and advance
    pub fn release(&mut self, x: i32, y: i32) -> Option<Commit> {
        let label = self.current_label()?;
        let mut bbox = self.in_progress.take()?;
        bbox.x2 = x;
        bbox.y2 = y;
        self.boxes.push(bbox);
        tracing::debug!(%label, %bbox, "committed box");
        Some(Commit { label, bbox })
    }

    /// Console summary printed once all labels are done
    pub fn summary(&self) -> String {
        let mut out = String::from("Summary of Box Coordinates:\n");
        for (label, bbox) in self.labeled_boxes() {
            out.push_str(&format!("{}: {}\n", label, bbox));
        }
        out
    }
}
