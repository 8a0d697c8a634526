pub mod annotation;
pub mod config;
pub mod fusion;
pub mod logging;

pub use annotation::{AnnotationSession, BoundingBox, Commit, DigitLabel};
pub use config::{FuseConfig, FuseSettings};
pub use fusion::{Fuser, FusionReport, ImagePair, PairOrder, fuse_images};

#[cfg(feature = "gui")]
pub mod gui;
