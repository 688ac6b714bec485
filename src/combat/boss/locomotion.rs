//! Idle decisions, walking, and stagger recovery.

use bevy::prelude::*;
use rand::Rng;

use super::BossEntity;
use crate::combat::decision::{DistanceBucket, pick_action};
use crate::combat::state::CombatState;

impl BossEntity {
    pub(super) fn update_idle(&mut self, dt: f32) {
        self.velocity.x = 0.0;
        self.decision_timer -= dt;
        if self.decision_timer > 0.0 {
            return;
        }

        // No target this tick: keep the timer expired and retry next tick.
        let (Some(player), Some(distance)) = (self.player_position, self.player_distance) else {
            return;
        };

        let wanted = self.facing.toward(self.position, player);
        let dx = player.x - self.position.x;
        if dx.abs() > self.tuning.ranges.turn_threshold && wanted != self.facing {
            self.set_facing(wanted);
            self.decision_timer = self.tuning.decision.turn_delay;
            return;
        }

        let roll: f32 = self.rng.random();
        let slam_ready = self.is_slam_ready();
        let bucket = DistanceBucket::classify(distance, &self.tuning.ranges);
        let table = if self.enraged {
            &self.tuning.decision.enraged
        } else {
            &self.tuning.decision.calm
        };
        let action = pick_action(table.bucket(bucket), roll, slam_ready);

        self.decision_timer = self.decision_baseline();
        match action {
            Some(action) => {
                debug!(
                    "{}: decided {:?} ({:?}, distance {:.2}, roll {:.3})",
                    self.tuning.name, action, bucket, distance, roll
                );
                self.request_transition(action.state());
            }
            None => debug!("{}: nothing selectable in {:?}", self.tuning.name, bucket),
        }
    }

    pub(super) fn update_walk_forward(&mut self, dt: f32) {
        let Some(distance) = self.player_distance else {
            self.request_transition(CombatState::Idle);
            return;
        };

        self.face_player();
        self.velocity.x = self.facing.sign()
            * self.tuning.movement.walk_speed
            * self.speed_multiplier
            * self.move_intent;

        let walk = self.tuning.walk;
        if distance <= self.tuning.ranges.close_range || self.time_in_state >= walk.max_duration {
            self.request_transition(CombatState::Idle);
            return;
        }

        self.walk_check_timer += dt;
        if self.walk_check_timer < walk.interrupt_interval {
            return;
        }
        self.walk_check_timer = 0.0;

        let roll: f32 = self.rng.random();
        if roll < walk.interrupt_chance {
            let next = if distance <= self.tuning.ranges.mid_range {
                CombatState::AttackCrossSlash
            } else {
                CombatState::Idle
            };
            self.request_transition(next);
        }
    }

    pub(super) fn update_walk_back(&mut self) {
        let Some(distance) = self.player_distance else {
            self.request_transition(CombatState::Idle);
            return;
        };

        self.face_player();
        let walk = self.tuning.walk;
        // move_intent is negative: backing away while still facing the player
        self.velocity.x = self.facing.sign()
            * self.tuning.movement.walk_speed
            * walk.back_speed_scale
            * self.speed_multiplier
            * self.move_intent;

        if self.time_in_state >= walk.back_duration || distance >= self.tuning.ranges.close_range
        {
            self.request_transition(CombatState::Idle);
        }
    }

    pub(super) fn update_stagger(&mut self, dt: f32) {
        let stagger = self.tuning.stagger;
        self.velocity.x *= (1.0 - stagger.drag * dt).max(0.0);
        if self.time_in_state >= stagger.duration {
            self.request_transition(CombatState::Idle);
        }
    }
}
