// ============================================
// Matching Engine
// ============================================
//
// Facade owning all in-memory state for one session: the fixed
// vocabulary, the vector store, and the interaction log. Intended
// usage is a clear temporal sequence (insert users, ingest
// interactions, train, then score/match), not interleaved learning
// and scoring.

use crate::models::{InteractionEvent, PairingOutcome, RankedCandidate, UserRecord};
use crate::services::{
    drift::{DriftLearner, DriftReport},
    encoder::{FeatureEncoder, Vocabulary},
    pairing, recommend,
    store::{InteractionLog, VectorStore},
    Result,
};
use tracing::info;

pub struct MatchingEngine {
    encoder: FeatureEncoder,
    store: VectorStore,
    interactions: InteractionLog,
}

impl MatchingEngine {
    /// Create an engine over a fixed vocabulary. The vocabulary (and
    /// with it the vector layout) cannot change for the lifetime of the
    /// instance.
    pub fn new(vocabulary: Vocabulary) -> Self {
        info!(
            vocabulary_size = vocabulary.len(),
            dimension = vocabulary.dimension(),
            "matching engine initialized"
        );
        Self {
            encoder: FeatureEncoder::new(vocabulary),
            store: VectorStore::new(),
            interactions: InteractionLog::new(),
        }
    }

    /// Insert a user, encoding its feature vector exactly once. An
    /// existing id is replaced wholesale with a freshly encoded vector;
    /// past drift updates are not replayed onto it.
    pub fn insert_user(&mut self, record: UserRecord) {
        let vector = self.encoder.encode(&record);
        self.store.insert(record, vector);
    }

    /// Append a rating event to the interaction log.
    pub fn add_interaction(&mut self, event: InteractionEvent) {
        self.interactions.add(event);
    }

    /// Replay the full interaction history, drifting rater vectors.
    pub fn train(&mut self) -> Result<DriftReport> {
        DriftLearner::new().run(&mut self.store, &self.interactions)
    }

    /// Top-K opposite-gender candidates for a user, best first.
    pub fn recommendations(&self, user_id: &str, top_k: usize) -> Result<Vec<RankedCandidate>> {
        recommend::top_candidates(&self.store, user_id, top_k)
    }

    /// Globally optimal one-to-one pairing across genders.
    pub fn optimal_pairs(&self) -> Result<PairingOutcome> {
        pairing::solve_optimal_pairs(&self.store)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.encoder.vocabulary()
    }

    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    pub fn user_count(&self) -> usize {
        self.store.len()
    }

    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }
}
