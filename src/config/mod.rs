use serde::Deserialize;
use std::env;

/// Runtime configuration for the batch pipeline binary. The numeric
/// constants of the algorithms themselves (learning rate, age range)
/// are fixed by the engine, not configurable here.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory of per-user JSON documents.
    pub data_dir: String,
    /// Directory where exports are written.
    pub output_dir: String,
    /// Recommendation list length.
    pub top_k: usize,
    /// User whose recommendations are logged before and after training.
    pub sample_user: Option<String>,
    /// Optional meeting places file; enables meetup planning.
    pub places_file: Option<String>,
    /// Optional busy-calendar file used by meetup planning.
    pub constraints_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Config {
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data_json".to_string()),
            output_dir: env::var("OUTPUT_DIR").unwrap_or_else(|_| ".".to_string()),
            top_k: env::var("TOP_K")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("TOP_K must be a valid usize"),
            sample_user: env::var("SAMPLE_USER_ID").ok(),
            places_file: env::var("PLACES_FILE").ok(),
            constraints_file: env::var("CONSTRAINTS_FILE").ok(),
        }
    }
}
