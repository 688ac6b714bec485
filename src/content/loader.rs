//! Loader for the boss tuning RON file.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use super::tuning::BossTuning;

/// Default location of the tuning file, relative to the working directory.
pub const TUNING_PATH: &str = "assets/data/igris.ron";

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse tuning from RON text. `file` only labels errors.
pub fn parse_boss_tuning(contents: &str, file: &str) -> Result<BossTuning, ContentLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Read and parse a single `BossTuning` struct from disk.
pub fn load_boss_tuning(path: &Path) -> Result<BossTuning, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    let tuning = parse_boss_tuning(&contents, &file_name)?;
    debug!(
        "Parsed {} (schema v{}, seed {})",
        file_name, tuning.schema_version, tuning.seed
    );
    Ok(tuning)
}
