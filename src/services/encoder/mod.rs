// ============================================
// Feature Encoder
// ============================================
//
// Turns raw user attributes into a fixed-length feature vector:
//   [0]    normalized age, clamped to [0, 1]
//   [1..]  one-hot indicator per vocabulary tag (sorted tag order)
//
// Vector length = 1 + |vocabulary|. The vocabulary is fixed for the
// lifetime of the engine instance; tags outside it are ignored.

use crate::models::UserRecord;
use chrono::{Datelike, Utc};
use std::collections::HashSet;

/// Age range used for normalization. Ages below the minimum map to 0.0,
/// ages at or above the maximum map to 1.0.
const AGE_MIN: f32 = 15.0;
const AGE_MAX: f32 = 45.0;
/// Assumed age when a record carries no birth year.
const DEFAULT_AGE: f32 = 25.0;

/// Fixed, sorted interest tag vocabulary.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    tags: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from raw tag names. Tags are sorted by name and
    /// deduplicated, so the vector layout does not depend on input order.
    pub fn new(mut tags: Vec<String>) -> Self {
        tags.sort();
        tags.dedup();
        Self { tags }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Feature vector length for this vocabulary (age slot + one per tag).
    pub fn dimension(&self) -> usize {
        1 + self.tags.len()
    }
}

/// Stateless encoder over a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    vocabulary: Vocabulary,
}

impl FeatureEncoder {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn dimension(&self) -> usize {
        self.vocabulary.dimension()
    }

    /// Encode a user record. Age is derived from the birth year against
    /// the current calendar year; records without one fall back to the
    /// default age.
    pub fn encode(&self, record: &UserRecord) -> Vec<f32> {
        let age = record
            .year_of_birth
            .map(|year| (Utc::now().year() - year) as f32);
        self.encode_parts(age, &record.interests)
    }

    /// Encode from pre-resolved parts. Pure function of its inputs and
    /// the vocabulary.
    pub fn encode_parts(&self, age: Option<f32>, interests: &[String]) -> Vec<f32> {
        let age = age.unwrap_or(DEFAULT_AGE);
        let norm_age = ((age - AGE_MIN) / (AGE_MAX - AGE_MIN)).clamp(0.0, 1.0);

        let interest_set: HashSet<&str> = interests.iter().map(String::as_str).collect();

        let mut vector = Vec::with_capacity(self.dimension());
        vector.push(norm_age);
        for tag in self.vocabulary.tags() {
            vector.push(if interest_set.contains(tag.as_str()) {
                1.0
            } else {
                0.0
            });
        }
        vector
    }
}
