pub mod export;
pub mod loader;

pub use export::{write_pairs_json, write_pairs_txt, write_vectors_json, write_vectors_txt};
pub use loader::{load_constraints, load_directory, load_places, scan_vocabulary, LoadSummary};
