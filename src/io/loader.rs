// ============================================
// Data Ingest
// ============================================
//
// Reads per-user JSON documents from a data directory into the engine.
// Each document carries the user's attributes plus their embedded
// rating history; ratings are accumulated into the interaction log.
// Files are processed in filename order so a reload reproduces the
// same insertion order.

use crate::engine::MatchingEngine;
use crate::models::{GeoPoint, Gender, InteractionEvent, UserRecord};
use crate::services::meetup::Place;
use crate::utils::parse_hhmm;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// User ids appear as both bare numbers and strings in the wild.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdValue {
    Number(i64),
    Text(String),
}

impl IdValue {
    fn into_string(self) -> String {
        match self {
            IdValue::Number(number) => number.to_string(),
            IdValue::Text(text) => text,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RatingDocument {
    target_user_id: IdValue,
    score: u8,
    #[serde(default)]
    timestamp: i64,
}

#[derive(Debug, Deserialize)]
struct UserDocument {
    user_id: IdValue,
    gender: Gender,
    #[serde(default)]
    year_of_birth: Option<i32>,
    #[serde(default)]
    interests: Vec<String>,
    #[serde(default)]
    home_latitude: Option<f64>,
    #[serde(default)]
    home_longitude: Option<f64>,
    #[serde(default)]
    ratings: Vec<RatingDocument>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadSummary {
    pub users: usize,
    pub ratings: usize,
}

fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("reading data directory {}", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

fn read_document(path: &Path) -> Result<UserDocument> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading user document {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing user document {}", path.display()))
}

/// Load every user document in `dir` into the engine.
pub fn load_directory(engine: &mut MatchingEngine, dir: &Path) -> Result<LoadSummary> {
    let mut summary = LoadSummary::default();

    for path in json_files(dir)? {
        let document = read_document(&path)?;
        let user_id = document.user_id.into_string();

        let home_location = match (document.home_latitude, document.home_longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        };

        engine.insert_user(UserRecord {
            id: user_id.clone(),
            gender: document.gender,
            year_of_birth: document.year_of_birth,
            interests: document.interests,
            home_location,
        });
        summary.users += 1;

        for rating in document.ratings {
            engine.add_interaction(InteractionEvent {
                source_id: user_id.clone(),
                target_id: rating.target_user_id.into_string(),
                score: rating.score,
                timestamp: rating.timestamp,
            });
            summary.ratings += 1;
        }
    }

    info!(
        users = summary.users,
        ratings = summary.ratings,
        "loaded user documents"
    );
    Ok(summary)
}

/// Collect the distinct interest tags across all user documents in
/// `dir`. Used to bootstrap a vocabulary when none is supplied from
/// outside; the resulting engine still treats it as fixed.
pub fn scan_vocabulary(dir: &Path) -> Result<Vec<String>> {
    let mut tags = BTreeSet::new();
    for path in json_files(dir)? {
        let document = read_document(&path)?;
        tags.extend(document.interests);
    }
    Ok(tags.into_iter().collect())
}

/// Load busy calendars: a JSON map from user id to a list of
/// `["HH:MM", "HH:MM"]` intervals.
pub fn load_constraints(path: &Path) -> Result<HashMap<String, Vec<(u16, u16)>>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading constraints file {}", path.display()))?;
    let parsed: HashMap<String, Vec<(String, String)>> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing constraints file {}", path.display()))?;

    let mut constraints = HashMap::new();
    for (user_id, spans) in parsed {
        let mut intervals = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            let (Some(start), Some(end)) = (parse_hhmm(&start), parse_hhmm(&end)) else {
                bail!("invalid time span for user {user_id} in {}", path.display());
            };
            intervals.push((start, end));
        }
        constraints.insert(user_id, intervals);
    }
    Ok(constraints)
}

/// Load candidate meeting places from a JSON array.
pub fn load_places(path: &Path) -> Result<Vec<Place>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading places file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing places file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::encoder::Vocabulary;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "user_1.json",
            r#"{
                "user_id": 1,
                "gender": "M",
                "year_of_birth": 1995,
                "interests": ["Books", "Gym"],
                "ratings": [
                    {"target_user_id": 2, "score": 5, "timestamp": 100},
                    {"target_user_id": 3, "score": 2}
                ]
            }"#,
        );
        write_file(
            dir.path(),
            "user_2.json",
            r#"{
                "user_id": "2",
                "gender": "F",
                "interests": ["Books"],
                "home_latitude": 21.0,
                "home_longitude": 105.8
            }"#,
        );

        let mut engine = MatchingEngine::new(Vocabulary::new(vec![
            "Books".to_string(),
            "Gym".to_string(),
        ]));
        let summary = load_directory(&mut engine, dir.path()).unwrap();

        assert_eq!(summary.users, 2);
        assert_eq!(summary.ratings, 2);
        assert_eq!(engine.user_count(), 2);
        assert!(engine.store().contains("1"));
        let stored = engine.store().get("2").unwrap();
        assert!(stored.record.home_location.is_some());
        // Missing year_of_birth falls back to the default age
        assert!(stored.record.year_of_birth.is_none());
    }

    #[test]
    fn test_malformed_document_is_contextual_error() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "bad.json", "{not valid json");

        let mut engine = MatchingEngine::new(Vocabulary::new(Vec::new()));
        let err = load_directory(&mut engine, dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("bad.json"));
    }

    #[test]
    fn test_missing_directory_errors() {
        let mut engine = MatchingEngine::new(Vocabulary::new(Vec::new()));
        assert!(load_directory(&mut engine, Path::new("/no/such/dir")).is_err());
    }

    #[test]
    fn test_scan_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "a.json",
            r#"{"user_id": 1, "gender": "M", "interests": ["Gym", "Books"]}"#,
        );
        write_file(
            dir.path(),
            "b.json",
            r#"{"user_id": 2, "gender": "F", "interests": ["Books", "Coffee"]}"#,
        );

        let tags = scan_vocabulary(dir.path()).unwrap();
        assert_eq!(tags, vec!["Books", "Coffee", "Gym"]);
    }

    #[test]
    fn test_load_constraints() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "constraints.json",
            r#"{"u1": [["09:00", "11:30"]], "u2": []}"#,
        );

        let constraints = load_constraints(&dir.path().join("constraints.json")).unwrap();
        assert_eq!(constraints["u1"], vec![(540, 690)]);
        assert!(constraints["u2"].is_empty());
    }

    #[test]
    fn test_load_places() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "places.json",
            r#"[{"name": "Lakeside Cafe", "type": "Cafe", "latitude": 21.03, "longitude": 105.85}]"#,
        );

        let places = load_places(&dir.path().join("places.json")).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_type, "Cafe");
    }
}
