//! Validation for boss tuning values.
//!
//! The combat core assumes ordered phase thresholds and well-formed weight
//! tables; anything that would break those assumptions is reported here.

use super::tuning::{BossTuning, DecisionBucket, DecisionTable, HitProfile};

pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

/// A validation error naming the offending field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field '{}' {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Helper macro for recording a failed check
macro_rules! check {
    ($errors:expr, $cond:expr, $field:expr, $($msg:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                field: $field.to_string(),
                message: format!($($msg)+),
            });
        }
    };
}

/// Validate every tuning section.
/// Returns a list of validation errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &BossTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check!(
        errors,
        tuning.schema_version == SUPPORTED_SCHEMA_VERSION,
        "schema_version",
        "is {}, expected {}",
        tuning.schema_version,
        SUPPORTED_SCHEMA_VERSION
    );
    check!(errors, !tuning.name.is_empty(), "name", "must not be empty");
    check!(errors, tuning.max_hp > 0, "max_hp", "must be positive, got {}", tuning.max_hp);

    // Movement
    let movement = &tuning.movement;
    check!(errors, movement.walk_speed > 0.0, "movement.walk_speed", "must be positive");
    check!(errors, movement.dash_speed > 0.0, "movement.dash_speed", "must be positive");
    check!(errors, movement.gravity > 0.0, "movement.gravity", "must be positive");

    // Ranges
    let ranges = &tuning.ranges;
    check!(
        errors,
        ranges.min_attack_range >= 0.0
            && ranges.min_attack_range < ranges.close_range
            && ranges.close_range < ranges.mid_range,
        "ranges",
        "must satisfy 0 <= min_attack_range < close_range < mid_range ({} / {} / {})",
        ranges.min_attack_range,
        ranges.close_range,
        ranges.mid_range
    );
    check!(errors, ranges.turn_threshold >= 0.0, "ranges.turn_threshold", "must not be negative");

    // Decision policy
    let decision = &tuning.decision;
    check!(
        errors,
        decision.decision_cooldown > 0.0,
        "decision.decision_cooldown",
        "must be positive"
    );
    check!(
        errors,
        decision.enrage_decision_cooldown > 0.0,
        "decision.enrage_decision_cooldown",
        "must be positive"
    );
    check!(errors, decision.turn_delay >= 0.0, "decision.turn_delay", "must not be negative");
    check!(
        errors,
        decision.slam_cooldown >= 0.0,
        "decision.slam_cooldown",
        "must not be negative"
    );
    validate_table(&mut errors, "decision.calm", &decision.calm);
    validate_table(&mut errors, "decision.enraged", &decision.enraged);

    // Walk
    let walk = &tuning.walk;
    check!(errors, walk.max_duration > 0.0, "walk.max_duration", "must be positive");
    check!(errors, walk.interrupt_interval > 0.0, "walk.interrupt_interval", "must be positive");
    check!(
        errors,
        (0.0..=1.0).contains(&walk.interrupt_chance),
        "walk.interrupt_chance",
        "must be within 0..=1, got {}",
        walk.interrupt_chance
    );
    check!(errors, walk.back_duration > 0.0, "walk.back_duration", "must be positive");

    // Cross slash
    let cs = &tuning.cross_slash;
    check!(
        errors,
        cs.telegraph_window >= 0.0
            && cs.telegraph_window <= cs.windup_end
            && cs.windup_end < cs.dash_end
            && cs.dash_end < cs.decel_end,
        "cross_slash",
        "phases must be ordered telegraph_window <= windup_end < dash_end < decel_end"
    );
    check!(errors, cs.chain_hits >= 1, "cross_slash.chain_hits", "must be at least 1");
    check!(errors, cs.hitstop >= 0.0, "cross_slash.hitstop", "must not be negative");
    check!(errors, cs.decel_drag >= 0.0, "cross_slash.decel_drag", "must not be negative");

    // Slam
    let slam = &tuning.slam;
    check!(errors, slam.jump_velocity > 0.0, "slam.jump_velocity", "must be positive");
    check!(errors, slam.jump_timeout > 0.0, "slam.jump_timeout", "must be positive");
    check!(errors, slam.spin_timeout > 0.0, "slam.spin_timeout", "must be positive");
    check!(errors, slam.fall_timeout > 0.0, "slam.fall_timeout", "must be positive");
    check!(errors, slam.descent_speed > 0.0, "slam.descent_speed", "must be positive");
    check!(
        errors,
        slam.spin_arrive_distance >= 0.0,
        "slam.spin_arrive_distance",
        "must not be negative"
    );
    check!(errors, slam.ground_epsilon >= 0.0, "slam.ground_epsilon", "must not be negative");
    check!(
        errors,
        slam.impact_window > 0.0 && slam.impact_window <= slam.recovery,
        "slam.impact_window",
        "must be positive and no longer than slam.recovery"
    );

    // Wide slash
    let ws = &tuning.wide_slash;
    check!(
        errors,
        ws.dash_end <= ws.recover_start && ws.damage_open < ws.recover_start,
        "wide_slash",
        "dash_end and damage_open must come before recover_start"
    );
    check!(errors, ws.decel_drag >= 0.0, "wide_slash.decel_drag", "must not be negative");
    check!(
        errors,
        ws.follow_up_delay >= 0.0,
        "wide_slash.follow_up_delay",
        "must not be negative"
    );

    // Hits
    let hits = &tuning.hits;
    check!(errors, hits.hit_cooldown >= 0.0, "hits.hit_cooldown", "must not be negative");
    validate_hit(&mut errors, "hits.cross_slash", &hits.cross_slash);
    validate_hit(&mut errors, "hits.wide_slash", &hits.wide_slash);
    validate_hit(&mut errors, "hits.slam_impact", &hits.slam_impact);
    validate_hit(&mut errors, "hits.spin", &hits.spin);

    // Enrage and stagger
    check!(
        errors,
        tuning.enrage.transition_duration > 0.0,
        "enrage.transition_duration",
        "must be positive"
    );
    check!(
        errors,
        tuning.enrage.speed_multiplier > 0.0,
        "enrage.speed_multiplier",
        "must be positive"
    );
    check!(errors, tuning.stagger.duration > 0.0, "stagger.duration", "must be positive");
    check!(errors, tuning.stagger.drag >= 0.0, "stagger.drag", "must not be negative");

    errors
}

fn validate_table(errors: &mut Vec<ValidationError>, prefix: &str, table: &DecisionTable) {
    validate_bucket(errors, &format!("{}.too_close", prefix), &table.too_close);
    validate_bucket(errors, &format!("{}.close", prefix), &table.close);
    validate_bucket(errors, &format!("{}.mid", prefix), &table.mid);
    validate_bucket(errors, &format!("{}.far", prefix), &table.far);
}

fn validate_bucket(errors: &mut Vec<ValidationError>, field: &str, bucket: &DecisionBucket) {
    let Some(last) = bucket.candidates.last() else {
        errors.push(ValidationError {
            field: field.to_string(),
            message: "has no candidates".to_string(),
        });
        return;
    };

    let ascending = bucket
        .candidates
        .windows(2)
        .all(|pair| pair[0].cumulative < pair[1].cumulative);
    check!(
        errors,
        ascending,
        field,
        "cumulative weights must be strictly ascending"
    );
    check!(
        errors,
        last.cumulative >= 1.0,
        field,
        "last cumulative weight must reach 1.0, got {}",
        last.cumulative
    );

    let has_slam = bucket.candidates.iter().any(|c| c.action.is_slam());
    let has_fallback = bucket.fallback.iter().any(|action| !action.is_slam());
    check!(
        errors,
        !has_slam || has_fallback,
        field,
        "offers a slam but no non-slam fallback"
    );
}

fn validate_hit(errors: &mut Vec<ValidationError>, field: &str, hit: &HitProfile) {
    check!(errors, hit.range > 0.0, field, "range must be positive");
    check!(errors, hit.damage > 0, field, "damage must be positive, got {}", hit.damage);
}
