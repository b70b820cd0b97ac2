// ============================================
// Drift Learner
// ============================================
//
// Sequential online update of user vectors from rating history:
// preferences shift toward highly rated targets and away from poorly
// rated ones. Replay order is load-bearing: each update reads the
// already-updated state of the rater's vector, so events are processed
// in stable timestamp order.
//
// Update rule per event (source u rates target t with score s):
//   normalized = (s - 3) / 2           1 -> -1.0 ... 5 -> 1.0
//   u += learning_rate * normalized * (t - u)
//
// Only the rater's vector moves; the target is never modified. Vectors
// are NOT renormalized afterwards and may drift outside [0, 1] on
// individual dimensions.

use super::{EngineError, InteractionLog, Result, VectorStore};
use tracing::{debug, info};

/// Step size for each vector update (alpha).
const LEARNING_RATE: f32 = 0.1;

/// Outcome of one replay pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriftReport {
    /// Events applied to a vector.
    pub applied: usize,
    /// Events skipped because the source or target had no vector.
    pub skipped: usize,
}

pub struct DriftLearner {
    learning_rate: f32,
}

impl Default for DriftLearner {
    fn default() -> Self {
        Self::new()
    }
}

impl DriftLearner {
    pub fn new() -> Self {
        Self {
            learning_rate: LEARNING_RATE,
        }
    }

    #[cfg(test)]
    fn with_learning_rate(learning_rate: f32) -> Self {
        Self { learning_rate }
    }

    /// Replay the full interaction history against the vector store,
    /// mutating rater vectors in place.
    pub fn run(
        &self,
        store: &mut VectorStore,
        interactions: &InteractionLog,
    ) -> Result<DriftReport> {
        let events = interactions.sorted_by_timestamp();
        let mut report = DriftReport::default();

        for event in events {
            // Read the target's committed state before touching the source.
            let Some(target) = store.vector(&event.target_id).map(<[f32]>::to_vec) else {
                report.skipped += 1;
                debug!(
                    source = %event.source_id,
                    target = %event.target_id,
                    "skipping interaction: target has no vector"
                );
                continue;
            };
            let Some(source) = store.vector_mut(&event.source_id) else {
                report.skipped += 1;
                debug!(
                    source = %event.source_id,
                    target = %event.target_id,
                    "skipping interaction: source has no vector"
                );
                continue;
            };
            if source.len() != target.len() {
                return Err(EngineError::DimensionMismatch {
                    expected: source.len(),
                    actual: target.len(),
                });
            }

            let normalized = (event.score as f32 - 3.0) / 2.0;
            for (current, toward) in source.iter_mut().zip(target.iter()) {
                *current += self.learning_rate * normalized * (*toward - *current);
            }
            report.applied += 1;
        }

        info!(
            applied = report.applied,
            skipped = report.skipped,
            "drift replay completed"
        );
        Ok(report)
    }
}
