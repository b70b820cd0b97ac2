// ============================================
// Result Export
// ============================================
//
// Writes engine outputs to disk: user vectors as JSON and as a
// human-readable text report, and pairing results in both forms.
// Exported scores are rounded to 4 decimal places.

use crate::models::PairingOutcome;
use crate::services::store::VectorStore;
use crate::utils::round4;
use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

const RULE: &str = "====================================================================================================";
const THIN_RULE: &str = "----------------------------------------------------------------------------------------------------";

/// Write every user's vector as a JSON object keyed `user_<id>`.
pub fn write_vectors_json(store: &VectorStore, path: &Path) -> Result<()> {
    let mut output = Map::new();
    for entry in store.iter() {
        let record = &entry.record;
        output.insert(
            format!("user_{}", record.id),
            json!({
                "user_id": record.id,
                "gender": record.gender.as_str(),
                "year_of_birth": record.year_of_birth,
                "interests": record.interests,
                "embedding_vector": entry.vector,
            }),
        );
    }

    let rendered = serde_json::to_string_pretty(&Value::Object(output))?;
    fs::write(path, rendered)
        .with_context(|| format!("writing vectors to {}", path.display()))?;
    info!(users = store.len(), path = %path.display(), "exported vectors as JSON");
    Ok(())
}

/// Write every user's vector as a text report.
pub fn write_vectors_txt(store: &VectorStore, path: &Path) -> Result<()> {
    let mut report = String::new();
    let _ = writeln!(report, "{RULE}");
    let _ = writeln!(report, "EMBEDDING VECTORS");
    let _ = writeln!(report, "{RULE}");
    let _ = writeln!(report);

    for entry in store.iter() {
        let record = &entry.record;
        let _ = writeln!(report, "User ID: {}", record.id);
        let _ = writeln!(report, "Gender: {}", record.gender.as_str());
        match record.year_of_birth {
            Some(year) => {
                let _ = writeln!(report, "Year of Birth: {year}");
            }
            None => {
                let _ = writeln!(report, "Year of Birth: unknown");
            }
        }
        let _ = writeln!(report, "Interests: {}", record.interests.join(", "));
        let _ = writeln!(
            report,
            "Embedding Vector ({} dimensions):",
            entry.vector.len()
        );
        let _ = writeln!(report, "  {:?}", entry.vector);
        let _ = writeln!(report, "{THIN_RULE}");
        let _ = writeln!(report);
    }

    fs::write(path, report)
        .with_context(|| format!("writing vector report to {}", path.display()))?;
    info!(users = store.len(), path = %path.display(), "exported vectors as text");
    Ok(())
}

/// Write a pairing outcome as JSON: totals plus the per-pair scores.
pub fn write_pairs_json(outcome: &PairingOutcome, path: &Path) -> Result<()> {
    let pairs: Vec<Value> = outcome
        .pairs
        .iter()
        .map(|pair| {
            json!({
                "male_id": pair.male_id,
                "female_id": pair.female_id,
                "similarity_score": round4(pair.similarity_score as f64),
            })
        })
        .collect();

    let output = json!({
        "total_pairs": outcome.pair_count(),
        "total_similarity_score": round4(outcome.total_score as f64),
        "average_score": round4(outcome.average_score as f64),
        "pairs": pairs,
    });

    let rendered = serde_json::to_string_pretty(&output)?;
    fs::write(path, rendered)
        .with_context(|| format!("writing pairing result to {}", path.display()))?;
    info!(pairs = outcome.pair_count(), path = %path.display(), "exported pairing result as JSON");
    Ok(())
}

/// Write a pairing outcome as a text report, including each user's
/// birth year and interests looked up from the store.
pub fn write_pairs_txt(store: &VectorStore, outcome: &PairingOutcome, path: &Path) -> Result<()> {
    let mut report = String::new();
    let _ = writeln!(report, "{RULE}");
    let _ = writeln!(report, "OPTIMAL PAIRING RESULT (HUNGARIAN ALGORITHM)");
    let _ = writeln!(report, "{RULE}");
    let _ = writeln!(report);
    let _ = writeln!(report, "Total pairs: {}", outcome.pair_count());
    let _ = writeln!(
        report,
        "Total similarity score: {:.4}",
        outcome.total_score
    );
    let _ = writeln!(report, "Average score: {:.4}", outcome.average_score);
    let _ = writeln!(report);
    let _ = writeln!(report, "{RULE}");
    let _ = writeln!(report);

    for (index, pair) in outcome.pairs.iter().enumerate() {
        let _ = writeln!(
            report,
            "Pair {}: User {} (M) - User {} (F)",
            index + 1,
            pair.male_id,
            pair.female_id
        );
        let _ = writeln!(report, "  Similarity score: {:.4}", pair.similarity_score);
        for (label, id) in [("M", &pair.male_id), ("F", &pair.female_id)] {
            if let Some(entry) = store.get(id) {
                let year = entry
                    .record
                    .year_of_birth
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let _ = writeln!(
                    report,
                    "  {label} - Year of birth: {year}, Interests: {}",
                    entry.record.interests.join(", ")
                );
            }
        }
        let _ = writeln!(report, "{THIN_RULE}");
        let _ = writeln!(report);
    }

    fs::write(path, report)
        .with_context(|| format!("writing pairing report to {}", path.display()))?;
    info!(pairs = outcome.pair_count(), path = %path.display(), "exported pairing result as text");
    Ok(())
}
