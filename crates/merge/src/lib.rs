pub mod artifact;
pub mod combine;
pub mod reconcile;
pub mod similarity;

pub use artifact::{ArtifactRow, read_records, write_records};
pub use combine::{MergeSummary, combine_directory, merge_directories};
pub use reconcile::{is_placeholder, reconcile};
pub use similarity::{DEFAULT_THRESHOLD, is_similar, ratio};
