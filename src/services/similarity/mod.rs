// ============================================
// Similarity Scorer
// ============================================
//
// Cosine similarity between two feature vectors. Zero-norm operands
// score exactly 0.0; mismatched lengths and non-finite values are
// contract violations and fail fast.

use super::{EngineError, Result};

/// Cosine similarity of two equal-length vectors.
///
/// Symmetric in its arguments: both the dot product and the norms are
/// accumulated in the same index order, so `cosine_similarity(a, b)`
/// and `cosine_similarity(b, a)` are bit-for-bit identical.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EngineError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        if !x.is_finite() || !y.is_finite() {
            return Err(EngineError::NonFinite(
                "similarity operand contains a non-finite component".to_string(),
            ));
        }
        dot += x as f64 * y as f64;
        norm_a += x as f64 * x as f64;
        norm_b += y as f64 * y as f64;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())) as f32)
}

/// Check applied wherever a stored vector enters a computation:
/// enforces the engine-wide dimension and finiteness.
pub fn validate_vector(expected_dimension: usize, vector: &[f32], owner: &str) -> Result<()> {
    if vector.len() != expected_dimension {
        return Err(EngineError::DimensionMismatch {
            expected: expected_dimension,
            actual: vector.len(),
        });
    }
    if vector.iter().any(|component| !component.is_finite()) {
        return Err(EngineError::NonFinite(format!(
            "vector for user {owner} contains a non-finite component"
        )));
    }
    Ok(())
}
