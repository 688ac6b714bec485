//! Tuning definitions for the boss, mirrored by assets/data/igris.ron.
//!
//! Every timing threshold the attack handlers compare against lives here as a
//! named field. Distances are world units, durations are seconds.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{Action, AttackTag};

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct BossTuning {
    pub schema_version: u32,
    pub name: String,
    pub max_hp: i32,
    /// Seed for the decision policy RNG
    pub seed: u64,
    pub movement: MovementTuning,
    pub ranges: RangeTuning,
    pub decision: DecisionTuning,
    pub walk: WalkTuning,
    pub cross_slash: CrossSlashTimings,
    pub slam: SlamTimings,
    pub wide_slash: WideSlashTimings,
    pub hits: HitTable,
    pub enrage: EnrageTuning,
    pub stagger: StaggerTuning,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct MovementTuning {
    pub walk_speed: f32,
    pub dash_speed: f32,
    /// Downward acceleration the core applies while airborne
    pub gravity: f32,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RangeTuning {
    pub min_attack_range: f32,
    pub close_range: f32,
    pub mid_range: f32,
    /// Horizontal distance beyond which the boss turns before acting
    pub turn_threshold: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecisionTuning {
    pub decision_cooldown: f32,
    pub enrage_decision_cooldown: f32,
    pub turn_delay: f32,
    pub slam_cooldown: f32,
    pub calm: DecisionTable,
    pub enraged: DecisionTable,
}

/// Weighted action tables, one per distance bucket.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecisionTable {
    pub too_close: DecisionBucket,
    pub close: DecisionBucket,
    pub mid: DecisionBucket,
    pub far: DecisionBucket,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecisionBucket {
    /// Sorted by ascending cumulative weight
    pub candidates: Vec<WeightedAction>,
    /// Tried in order when the drawn candidate is on cooldown
    pub fallback: Vec<Action>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct WeightedAction {
    pub action: Action,
    pub cumulative: f32,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct WalkTuning {
    pub max_duration: f32,
    pub interrupt_interval: f32,
    pub interrupt_chance: f32,
    pub back_duration: f32,
    pub back_speed_scale: f32,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct CrossSlashTimings {
    pub windup_end: f32,
    /// How long the telegraph flash stays up
    pub telegraph_window: f32,
    pub dash_end: f32,
    pub decel_end: f32,
    pub dash_multiplier: f32,
    pub decel_drag: f32,
    pub chain_hits: u32,
    pub hitstop: f32,
    pub shake_intensity: f32,
    pub shake_duration: f32,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SlamTimings {
    pub jump_velocity: f32,
    pub jump_timeout: f32,
    pub spin_speed_multiplier: f32,
    pub spin_arrive_distance: f32,
    pub spin_timeout: f32,
    pub descent_speed: f32,
    pub ground_epsilon: f32,
    pub fall_timeout: f32,
    pub impact_window: f32,
    pub recovery: f32,
    pub shake_intensity: f32,
    pub shake_duration: f32,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct WideSlashTimings {
    pub dash_multiplier: f32,
    pub dash_end: f32,
    pub recover_start: f32,
    pub close_distance: f32,
    pub damage_open: f32,
    /// Per-second drag once the boss is within `close_distance`
    pub decel_drag: f32,
    pub follow_up_delay: f32,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct HitProfile {
    pub range: f32,
    pub damage: i32,
    pub knockback_x: f32,
    pub knockback_y: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HitTable {
    /// Minimum time between two hits on the player, across windows
    pub hit_cooldown: f32,
    pub cross_slash: HitProfile,
    pub wide_slash: HitProfile,
    pub slam_impact: HitProfile,
    pub spin: HitProfile,
}

impl HitTable {
    pub fn profile(&self, tag: AttackTag) -> &HitProfile {
        match tag {
            AttackTag::CrossSlash => &self.cross_slash,
            AttackTag::WideSlash => &self.wide_slash,
            AttackTag::SlamImpact => &self.slam_impact,
            AttackTag::Spin => &self.spin,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct EnrageTuning {
    pub transition_duration: f32,
    pub speed_multiplier: f32,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct StaggerTuning {
    pub duration: f32,
    pub drag: f32,
}

fn weighted(pairs: &[(Action, f32)]) -> Vec<WeightedAction> {
    pairs
        .iter()
        .map(|&(action, cumulative)| WeightedAction { action, cumulative })
        .collect()
}

impl Default for DecisionTuning {
    fn default() -> Self {
        Self {
            decision_cooldown: 1.0,
            enrage_decision_cooldown: 0.6,
            turn_delay: 0.15,
            slam_cooldown: 6.0,
            calm: DecisionTable {
                too_close: DecisionBucket {
                    candidates: weighted(&[
                        (Action::WalkBack, 0.45),
                        (Action::CrossSlash, 0.8),
                        (Action::WideSlash, 1.0),
                    ]),
                    fallback: vec![Action::CrossSlash],
                },
                close: DecisionBucket {
                    candidates: weighted(&[
                        (Action::CrossSlash, 0.5),
                        (Action::WideSlash, 0.8),
                        (Action::Slam, 1.0),
                    ]),
                    fallback: vec![Action::CrossSlash, Action::WideSlash],
                },
                mid: DecisionBucket {
                    candidates: weighted(&[
                        (Action::WalkForward, 0.4),
                        (Action::WideSlash, 0.7),
                        (Action::Slam, 1.0),
                    ]),
                    fallback: vec![Action::WideSlash, Action::WalkForward],
                },
                far: DecisionBucket {
                    candidates: weighted(&[(Action::WalkForward, 0.7), (Action::Slam, 1.0)]),
                    fallback: vec![Action::WalkForward],
                },
            },
            enraged: DecisionTable {
                too_close: DecisionBucket {
                    candidates: weighted(&[
                        (Action::WalkBack, 0.25),
                        (Action::CrossSlash, 0.75),
                        (Action::WideSlash, 1.0),
                    ]),
                    fallback: vec![Action::CrossSlash],
                },
                close: DecisionBucket {
                    candidates: weighted(&[
                        (Action::CrossSlash, 0.4),
                        (Action::WideSlash, 0.7),
                        (Action::Slam, 1.0),
                    ]),
                    fallback: vec![Action::WideSlash, Action::CrossSlash],
                },
                mid: DecisionBucket {
                    candidates: weighted(&[
                        (Action::WalkForward, 0.25),
                        (Action::WideSlash, 0.6),
                        (Action::Slam, 1.0),
                    ]),
                    fallback: vec![Action::WideSlash, Action::WalkForward],
                },
                far: DecisionBucket {
                    candidates: weighted(&[(Action::WalkForward, 0.5), (Action::Slam, 1.0)]),
                    fallback: vec![Action::WalkForward],
                },
            },
        }
    }
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            schema_version: 1,
            name: "Igris".to_string(),
            max_hp: 300,
            seed: 42,
            movement: MovementTuning {
                walk_speed: 2.5,
                dash_speed: 3.0,
                gravity: 45.0,
            },
            ranges: RangeTuning {
                min_attack_range: 1.5,
                close_range: 3.5,
                mid_range: 7.0,
                turn_threshold: 0.5,
            },
            decision: DecisionTuning::default(),
            walk: WalkTuning {
                max_duration: 2.0,
                interrupt_interval: 0.25,
                interrupt_chance: 0.15,
                back_duration: 0.6,
                back_speed_scale: 0.8,
            },
            cross_slash: CrossSlashTimings {
                windup_end: 0.6,
                telegraph_window: 0.1,
                dash_end: 0.8,
                decel_end: 0.9,
                dash_multiplier: 5.0,
                decel_drag: 8.0,
                chain_hits: 3,
                hitstop: 0.08,
                shake_intensity: 0.3,
                shake_duration: 0.15,
            },
            slam: SlamTimings {
                jump_velocity: 22.0,
                jump_timeout: 0.8,
                spin_speed_multiplier: 2.5,
                spin_arrive_distance: 2.5,
                spin_timeout: 1.5,
                descent_speed: 20.0,
                ground_epsilon: 0.05,
                fall_timeout: 1.2,
                impact_window: 0.15,
                recovery: 1.0,
                shake_intensity: 0.8,
                shake_duration: 0.4,
            },
            wide_slash: WideSlashTimings {
                dash_multiplier: 1.5,
                dash_end: 0.4,
                recover_start: 0.8,
                close_distance: 3.0,
                damage_open: 0.25,
                decel_drag: 5.0,
                follow_up_delay: 0.28,
            },
            hits: HitTable {
                hit_cooldown: 0.2,
                cross_slash: HitProfile {
                    range: 2.0,
                    damage: 18,
                    knockback_x: 6.0,
                    knockback_y: 2.0,
                },
                wide_slash: HitProfile {
                    range: 3.0,
                    damage: 14,
                    knockback_x: 8.0,
                    knockback_y: 3.0,
                },
                slam_impact: HitProfile {
                    range: 3.5,
                    damage: 30,
                    knockback_x: 10.0,
                    knockback_y: 8.0,
                },
                spin: HitProfile {
                    range: 1.5,
                    damage: 8,
                    knockback_x: 4.0,
                    knockback_y: 1.0,
                },
            },
            enrage: EnrageTuning {
                transition_duration: 1.5,
                speed_multiplier: 1.3,
            },
            stagger: StaggerTuning {
                duration: 0.4,
                drag: 10.0,
            },
        }
    }
}
