// ============================================
// Optimal Pairing Solver
// ============================================
//
// Globally optimal one-to-one pairing between the male and female
// populations, maximizing total cosine similarity. The similarity
// matrix is negated into a cost matrix and handed to the Hungarian
// solver; the smaller side supplies the rows, so exactly
// min(males, females) pairs come back with no id reused.
//
// Stateless: every invocation recomputes from the current store.

mod hungarian;

use super::similarity::{cosine_similarity, validate_vector};
use super::{Result, VectorStore};
use crate::models::{Gender, MatchedPair, PairingOutcome};
use ndarray::Array2;
use tracing::{info, warn};

/// Compute the maximum-total-similarity pairing across genders.
///
/// An empty side yields an empty outcome with a total of 0.0, not an
/// error. Pairs are sorted by descending score for presentation; the
/// sort does not affect which pairs were chosen.
pub fn solve_optimal_pairs(store: &VectorStore) -> Result<PairingOutcome> {
    let males = store.ids_for_gender(Gender::Male);
    let females = store.ids_for_gender(Gender::Female);

    if males.is_empty() || females.is_empty() {
        warn!(
            males = males.len(),
            females = females.len(),
            "pairing requested with an empty side"
        );
        return Ok(PairingOutcome::default());
    }

    let similarity = build_similarity_matrix(store, &males, &females)?;
    let (m, n) = similarity.dim();

    // The Hungarian solver minimizes and wants rows <= cols: negate the
    // similarities and transpose when males outnumber females.
    let assigned: Vec<(usize, usize)> = if m <= n {
        let cost = similarity.mapv(|s| -(s as f64));
        hungarian::minimize(&cost)
            .into_iter()
            .enumerate()
            .collect()
    } else {
        let cost = similarity.t().mapv(|s| -(s as f64));
        hungarian::minimize(&cost)
            .into_iter()
            .enumerate()
            .map(|(female, male)| (male, female))
            .collect()
    };

    let mut pairs: Vec<MatchedPair> = assigned
        .into_iter()
        .map(|(i, j)| MatchedPair {
            male_id: males[i].to_string(),
            female_id: females[j].to_string(),
            similarity_score: similarity[[i, j]],
        })
        .collect();

    pairs.sort_by(|a, b| {
        b.similarity_score
            .partial_cmp(&a.similarity_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_score: f32 = pairs.iter().map(|pair| pair.similarity_score).sum();
    let average_score = total_score / pairs.len() as f32;

    info!(
        pair_count = pairs.len(),
        total_score, average_score, "optimal pairing solved"
    );

    Ok(PairingOutcome {
        pairs,
        total_score,
        average_score,
    })
}

/// Pairwise cosine similarities, males as rows and females as columns.
/// Every participating vector is validated up front so malformed state
/// fails fast instead of leaking NaN scores.
fn build_similarity_matrix(
    store: &VectorStore,
    males: &[&str],
    females: &[&str],
) -> Result<Array2<f32>> {
    let dimension = store
        .iter()
        .next()
        .map(|entry| entry.vector.len())
        .unwrap_or(0);
    for id in males.iter().chain(females.iter()) {
        if let Some(vector) = store.vector(id) {
            validate_vector(dimension, vector, id)?;
        }
    }

    let mut matrix = Array2::<f32>::zeros((males.len(), females.len()));
    for (i, male_id) in males.iter().enumerate() {
        let male_vector = store.vector(male_id).unwrap_or(&[]);
        for (j, female_id) in females.iter().enumerate() {
            let female_vector = store.vector(female_id).unwrap_or(&[]);
            matrix[[i, j]] = cosine_similarity(male_vector, female_vector)?;
        }
    }
    Ok(matrix)
}
