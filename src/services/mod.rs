pub mod drift;
pub mod encoder;
pub mod meetup;
pub mod pairing;
pub mod recommend;
pub mod similarity;
pub mod store;

pub use drift::{DriftLearner, DriftReport};
pub use encoder::{FeatureEncoder, Vocabulary};
pub use pairing::solve_optimal_pairs;
pub use recommend::top_candidates;
pub use similarity::cosine_similarity;
pub use store::{InteractionLog, StoredUser, VectorStore};

use thiserror::Error;

/// Contract violations inside the numeric core. Unknown identifiers and
/// degenerate inputs (zero-norm vectors, empty groups) are NOT errors;
/// they degrade to skips, empty results, or a 0.0 score.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("non-finite value in feature vector: {0}")]
    NonFinite(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
