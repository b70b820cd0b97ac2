use serde::{Deserialize, Serialize};

/// The two disjoint populations the engine pairs across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    pub fn opposite(&self) -> Gender {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

/// Home coordinates used by the meetup planner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Raw user attributes as delivered by the surrounding application.
/// Immutable once loaded for a computation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub gender: Gender,
    pub year_of_birth: Option<i32>,
    pub interests: Vec<String>,
    pub home_location: Option<GeoPoint>,
}

/// A single pairwise rating event (1 = disliked, 5 = liked).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub source_id: String,
    pub target_id: String,
    pub score: u8,
    pub timestamp: i64,
}

/// One entry in a ranked recommendation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub user_id: String,
    pub gender: Gender,
    pub interests: Vec<String>,
    pub match_score: f32,
}

/// One pair chosen by the optimal pairing solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedPair {
    pub male_id: String,
    pub female_id: String,
    pub similarity_score: f32,
}

/// Full result of one optimal pairing run. Produced fresh per invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PairingOutcome {
    pub pairs: Vec<MatchedPair>,
    pub total_score: f32,
    pub average_score: f32,
}

impl PairingOutcome {
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_opposite() {
        assert_eq!(Gender::Male.opposite(), Gender::Female);
        assert_eq!(Gender::Female.opposite(), Gender::Male);
    }

    #[test]
    fn test_gender_serde_roundtrip() {
        let json = serde_json::to_string(&Gender::Male).unwrap();
        assert_eq!(json, "\"M\"");
        let back: Gender = serde_json::from_str("\"F\"").unwrap();
        assert_eq!(back, Gender::Female);
    }

    #[test]
    fn test_empty_outcome_counts() {
        let outcome = PairingOutcome::default();
        assert_eq!(outcome.pair_count(), 0);
        assert_eq!(outcome.total_score, 0.0);
    }
}
