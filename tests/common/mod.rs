mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from digitkit for tests
pub use digitkit::fusion::{Fuser, PairOrder, fusion_file_name};
