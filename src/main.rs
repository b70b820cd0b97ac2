// Batch matchmaking pipeline: load user documents, export vectors
// before and after drift training, log sample recommendations, solve
// the optimal pairing, and optionally plan meetups for the top pairs.

use anyhow::Result;
use matching_engine::io::{
    load_constraints, load_directory, load_places, scan_vocabulary, write_pairs_json,
    write_pairs_txt, write_vectors_json, write_vectors_txt,
};
use matching_engine::services::meetup;
use matching_engine::{Config, MatchingEngine, Vocabulary};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let data_dir = Path::new(&config.data_dir);
    let output_dir = Path::new(&config.output_dir);

    // The vocabulary is fixed before any vector is created.
    let tags = scan_vocabulary(data_dir)?;
    let mut engine = MatchingEngine::new(Vocabulary::new(tags));

    let summary = load_directory(&mut engine, data_dir)?;
    info!(
        users = summary.users,
        ratings = summary.ratings,
        "data loaded into engine"
    );

    write_vectors_json(engine.store(), &output_dir.join("embeddings_before.json"))?;
    write_vectors_txt(engine.store(), &output_dir.join("embeddings_before.txt"))?;

    let sample_user = config
        .sample_user
        .clone()
        .or_else(|| engine.store().iter().next().map(|e| e.record.id.clone()));

    if let Some(user_id) = &sample_user {
        log_recommendations(&engine, user_id, config.top_k, "before training")?;
    }

    let report = engine.train()?;
    info!(
        applied = report.applied,
        skipped = report.skipped,
        "vector drift training finished"
    );

    write_vectors_json(engine.store(), &output_dir.join("embeddings_after.json"))?;
    write_vectors_txt(engine.store(), &output_dir.join("embeddings_after.txt"))?;

    if let Some(user_id) = &sample_user {
        log_recommendations(&engine, user_id, config.top_k, "after training")?;
    }

    let outcome = engine.optimal_pairs()?;
    if outcome.pairs.is_empty() {
        warn!("no pairs produced: one side of the population is empty");
    } else {
        info!(
            pairs = outcome.pair_count(),
            total_score = outcome.total_score,
            average_score = outcome.average_score,
            "optimal pairing computed"
        );
    }

    write_pairs_json(&outcome, &output_dir.join("optimal_pairs.json"))?;
    write_pairs_txt(engine.store(), &outcome, &output_dir.join("optimal_pairs.txt"))?;

    if let Some(places_file) = &config.places_file {
        plan_meetups(&engine, &outcome, places_file, config.constraints_file.as_deref())?;
    }

    Ok(())
}

fn log_recommendations(
    engine: &MatchingEngine,
    user_id: &str,
    top_k: usize,
    stage: &str,
) -> Result<()> {
    let recommendations = engine.recommendations(user_id, top_k)?;
    info!(user_id, stage, count = recommendations.len(), "recommendations");
    for candidate in &recommendations {
        info!(
            candidate = %candidate.user_id,
            gender = candidate.gender.as_str(),
            score = %format!("{:.4}", candidate.match_score),
            interests = %candidate.interests.join(", "),
            "  candidate"
        );
    }
    Ok(())
}

fn plan_meetups(
    engine: &MatchingEngine,
    outcome: &matching_engine::models::PairingOutcome,
    places_file: &str,
    constraints_file: Option<&str>,
) -> Result<()> {
    let places = load_places(Path::new(places_file))?;
    let constraints: HashMap<String, Vec<(u16, u16)>> = match constraints_file {
        Some(path) => load_constraints(Path::new(path))?,
        None => HashMap::new(),
    };
    let empty: Vec<(u16, u16)> = Vec::new();

    for pair in &outcome.pairs {
        let male = engine.store().get(&pair.male_id);
        let female = engine.store().get(&pair.female_id);
        let (Some(male), Some(female)) = (male, female) else {
            continue;
        };

        let busy_male = constraints.get(&pair.male_id).unwrap_or(&empty);
        let busy_female = constraints.get(&pair.female_id).unwrap_or(&empty);

        let plans = meetup::plan_for_pair(
            male.record.home_location,
            female.record.home_location,
            busy_male,
            busy_female,
            &places,
        );

        if plans.is_empty() {
            info!(
                male = %pair.male_id,
                female = %pair.female_id,
                "no meetup possible for pair"
            );
            continue;
        }

        for plan in &plans {
            info!(
                male = %pair.male_id,
                female = %pair.female_id,
                place = %plan.place_name,
                activity = %plan.activity,
                slot = %format!("{} - {}", plan.time_start, plan.time_end),
                xp = plan.xp_reward,
                distance_km = %format!("{:.2}", plan.total_distance_km),
                "meetup proposal"
            );
        }
    }
    Ok(())
}
