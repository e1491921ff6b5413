pub mod ingest;
pub mod stats;

pub use ingest::load_dataset;
pub use stats::summarize;
