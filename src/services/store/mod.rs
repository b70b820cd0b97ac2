// ============================================
// Vector Store & Interaction Log
// ============================================
//
// In-memory state for one engine session. The vector store keeps every
// user's record next to its feature vector, iterating in insertion
// order so downstream tie-breaks are deterministic. The interaction log
// is an append-only collection of rating events.

use crate::models::{Gender, InteractionEvent, UserRecord};
use std::collections::HashMap;

/// A user record together with its owned feature vector. The vector is
/// mutated in place only by the drift learner.
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub record: UserRecord,
    pub vector: Vec<f32>,
}

/// Insertion-ordered map from user id to stored user. Exclusively owned
/// by one engine instance; no concurrent writers.
#[derive(Debug, Default)]
pub struct VectorStore {
    entries: Vec<StoredUser>,
    index: HashMap<String, usize>,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with its encoded vector. Re-inserting an existing id
    /// replaces the record and vector wholesale, keeping the original
    /// position in iteration order.
    pub fn insert(&mut self, record: UserRecord, vector: Vec<f32>) {
        match self.index.get(&record.id) {
            Some(&position) => {
                self.entries[position] = StoredUser { record, vector };
            }
            None => {
                self.index.insert(record.id.clone(), self.entries.len());
                self.entries.push(StoredUser { record, vector });
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&StoredUser> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    pub fn vector(&self, id: &str) -> Option<&[f32]> {
        self.get(id).map(|entry| entry.vector.as_slice())
    }

    pub fn vector_mut(&mut self, id: &str) -> Option<&mut Vec<f32>> {
        let position = *self.index.get(id)?;
        Some(&mut self.entries[position].vector)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate stored users in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StoredUser> {
        self.entries.iter()
    }

    /// Ids of one gender, in insertion order.
    pub fn ids_for_gender(&self, gender: Gender) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.record.gender == gender)
            .map(|entry| entry.record.id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Append-only collection of rating events.
#[derive(Debug, Default)]
pub struct InteractionLog {
    events: Vec<InteractionEvent>,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, event: InteractionEvent) {
        self.events.push(event);
    }

    /// All events ordered by timestamp ascending. The sort is stable, so
    /// events with equal timestamps keep their insertion order; replay
    /// determinism depends on this.
    pub fn sorted_by_timestamp(&self) -> Vec<InteractionEvent> {
        let mut events = self.events.clone();
        events.sort_by_key(|event| event.timestamp);
        events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
