pub mod config;
pub mod engine;
pub mod io;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use engine::MatchingEngine;
pub use services::{EngineError, FeatureEncoder, Vocabulary};
