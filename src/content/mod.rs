//! Content domain: boss tuning data, its RON loader, and validation.

mod loader;
mod tuning;
mod validation;


pub use loader::{ContentLoadError, TUNING_PATH, load_boss_tuning, parse_boss_tuning};
pub use tuning::{
    BossTuning, CrossSlashTimings, DecisionBucket, DecisionTable, DecisionTuning, EnrageTuning,
    HitProfile, HitTable, MovementTuning, RangeTuning, SlamTimings, StaggerTuning, WalkTuning,
    WeightedAction, WideSlashTimings,
};
pub use validation::{SUPPORTED_SCHEMA_VERSION, ValidationError, validate_tuning};

use std::path::Path;

use bevy::prelude::*;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, insert_boss_tuning);
    }
}

fn insert_boss_tuning(mut commands: Commands) {
    commands.insert_resource(load_tuning_or_default(Path::new(TUNING_PATH)));
}

/// Load and validate the tuning file, falling back to built-in defaults.
pub fn load_tuning_or_default(path: &Path) -> BossTuning {
    let tuning = match load_boss_tuning(path) {
        Ok(tuning) => tuning,
        Err(e) => {
            warn!("{}, using default boss tuning", e);
            return BossTuning::default();
        }
    };

    let errors = validate_tuning(&tuning);
    if !errors.is_empty() {
        for error in &errors {
            warn!("Invalid boss tuning: {}", error);
        }
        warn!(
            "{} has {} invalid field(s), using default boss tuning",
            path.display(),
            errors.len()
        );
        return BossTuning::default();
    }

    info!("Loaded boss tuning for {} from {}", tuning.name, path.display());
    tuning
}
