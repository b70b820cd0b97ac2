// ============================================
// Recommendation Ranker
// ============================================
//
// Ranks all eligible candidates for one user by descending cosine
// similarity. Eligible means: not the user themselves, and from the
// opposite gender. Unknown users get an empty list, not an error.

use super::similarity::cosine_similarity;
use super::{Result, VectorStore};
use crate::models::RankedCandidate;
use tracing::debug;

/// Default number of candidates returned.
pub const DEFAULT_TOP_K: usize = 5;

/// Top-K candidates for `user_id`, best first.
///
/// Ties keep the store's insertion order: the sort is stable and no
/// secondary key is applied.
pub fn top_candidates(
    store: &VectorStore,
    user_id: &str,
    top_k: usize,
) -> Result<Vec<RankedCandidate>> {
    let Some(user) = store.get(user_id) else {
        debug!(user_id, "recommendation request for unknown user");
        return Ok(Vec::new());
    };

    let mut candidates = Vec::new();
    for entry in store.iter() {
        if entry.record.id == user_id {
            continue;
        }
        if entry.record.gender == user.record.gender {
            continue;
        }

        let match_score = cosine_similarity(&user.vector, &entry.vector)?;
        candidates.push(RankedCandidate {
            user_id: entry.record.id.clone(),
            gender: entry.record.gender,
            interests: entry.record.interests.clone(),
            match_score,
        });
    }

    candidates.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(top_k);

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, UserRecord};

    fn insert(store: &mut VectorStore, id: &str, gender: Gender, vector: Vec<f32>) {
        store.insert(
            UserRecord {
                id: id.to_string(),
                gender,
                year_of_birth: None,
                interests: Vec::new(),
                home_location: None,
            },
            vector,
        );
    }

    #[test]
    fn test_excludes_self_and_same_gender() {
        let mut store = VectorStore::new();
        insert(&mut store, "m1", Gender::Male, vec![1.0, 0.0]);
        insert(&mut store, "m2", Gender::Male, vec![1.0, 0.0]);
        insert(&mut store, "f1", Gender::Female, vec![1.0, 0.0]);

        let recs = top_candidates(&store, "m1", DEFAULT_TOP_K).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].user_id, "f1");
    }

    #[test]
    fn test_ranked_descending() {
        let mut store = VectorStore::new();
        insert(&mut store, "m1", Gender::Male, vec![1.0, 0.0]);
        insert(&mut store, "f1", Gender::Female, vec![0.0, 1.0]);
        insert(&mut store, "f2", Gender::Female, vec![1.0, 0.1]);
        insert(&mut store, "f3", Gender::Female, vec![0.5, 0.5]);

        let recs = top_candidates(&store, "m1", DEFAULT_TOP_K).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].user_id, "f2");
        assert!(recs[0].match_score >= recs[1].match_score);
        assert!(recs[1].match_score >= recs[2].match_score);
    }

    #[test]
    fn test_top_k_truncates() {
        let mut store = VectorStore::new();
        insert(&mut store, "m1", Gender::Male, vec![1.0, 0.0]);
        for i in 0..10 {
            insert(
                &mut store,
                &format!("f{i}"),
                Gender::Female,
                vec![1.0, i as f32 / 10.0],
            );
        }

        let recs = top_candidates(&store, "m1", 3).unwrap();
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn test_unknown_user_returns_empty() {
        let mut store = VectorStore::new();
        insert(&mut store, "m1", Gender::Male, vec![1.0]);

        let recs = top_candidates(&store, "nobody", DEFAULT_TOP_K).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_no_eligible_candidates() {
        let mut store = VectorStore::new();
        insert(&mut store, "m1", Gender::Male, vec![1.0]);
        insert(&mut store, "m2", Gender::Male, vec![1.0]);

        let recs = top_candidates(&store, "m1", DEFAULT_TOP_K).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_equal_scores_keep_insertion_order() {
        let mut store = VectorStore::new();
        insert(&mut store, "m1", Gender::Male, vec![1.0, 0.0]);
        insert(&mut store, "f1", Gender::Female, vec![2.0, 0.0]);
        insert(&mut store, "f2", Gender::Female, vec![3.0, 0.0]);

        // Both candidates are colinear with m1: identical scores.
        let recs = top_candidates(&store, "m1", DEFAULT_TOP_K).unwrap();
        assert_eq!(recs[0].user_id, "f1");
        assert_eq!(recs[1].user_id, "f2");
    }
}
