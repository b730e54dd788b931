pub mod stats;

pub use stats::{compute_score_stats, summarize};
