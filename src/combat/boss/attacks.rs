//! Attack phase handlers.
//!
//! Every attack is keyed off `AttackPhaseContext::elapsed`, never animation
//! frames, and every handler has a terminal branch that stops the boss and
//! returns to Idle.

use bevy::prelude::*;

use super::BossEntity;
use crate::combat::collaborators::{Cue, Grounded};
use crate::combat::damage_window::AttackTag;
use crate::combat::events::BossEvent;
use crate::combat::phases::{AttackPhaseContext, SlamComboState};
use crate::combat::state::CombatState;
use crate::combat::timed_tasks::TaskKind;

impl BossEntity {
    pub(super) fn update_attack(&mut self, dt: f32) {
        let Some(mut ctx) = self.phase.take() else {
            self.request_transition(CombatState::Idle);
            return;
        };

        let next = if self.tasks.hitstop_active() {
            None
        } else {
            ctx.elapsed += dt;
            match self.state {
                CombatState::AttackCrossSlash => self.step_cross_slash(&mut ctx, dt),
                CombatState::AttackSlam => self.step_slam_jump(&ctx),
                CombatState::AttackSpin => self.step_slam_spin(&ctx),
                CombatState::AttackSlamAttack => self.step_slam_descent(&ctx),
                CombatState::AttackWideSlash => self.step_wide_slash(&mut ctx, dt),
                _ => Some(CombatState::Idle),
            }
        };

        self.phase = Some(ctx);
        if let Some(next) = next {
            self.request_transition(next);
        }
    }

    // ------------------------------------------------------------------
    // Cross slash: windup, dash, decel, recovery; chains on hit
    // ------------------------------------------------------------------

    fn step_cross_slash(&mut self, ctx: &mut AttackPhaseContext, dt: f32) -> Option<CombatState> {
        let cs = self.tuning.cross_slash;
        let elapsed = ctx.elapsed;

        if elapsed < cs.windup_end {
            self.velocity.x = 0.0;
            if !ctx.flags.telegraphed {
                ctx.flags.telegraphed = true;
                self.cues.push(Cue::Sound {
                    clip_id: "cross_slash_telegraph",
                    volume: 0.9,
                    pitch: 1.0,
                });
                self.cues.push(Cue::Effect {
                    effect_id: "telegraph_flash",
                    offset: Vec2::new(0.0, 1.5),
                    scale: 1.0,
                    duration: cs.telegraph_window,
                });
            }
            return None;
        }

        if elapsed < cs.dash_end {
            self.velocity.x = self.facing.sign()
                * self.tuning.movement.dash_speed
                * cs.dash_multiplier
                * self.speed_multiplier;
            if !ctx.flags.has_hit && !ctx.flags.damage_opened {
                ctx.flags.damage_opened = true;
                self.enable_damage(AttackTag::CrossSlash);
            }
            return None;
        }

        if elapsed < cs.decel_end {
            if ctx.flags.decelerating {
                self.velocity.x *= (1.0 - cs.decel_drag * dt).max(0.0);
            } else {
                ctx.flags.decelerating = true;
                self.velocity.x *= 0.5;
                self.disable_damage();
            }
            return None;
        }

        self.velocity.x = 0.0;
        self.disable_damage();
        if ctx.flags.has_hit && ctx.hits_landed < cs.chain_hits {
            ctx.next_swing();
            self.cues.push(Cue::Animation(CombatState::AttackCrossSlash.animation()));
            return None;
        }
        Some(CombatState::Idle)
    }

    /// Animation-event hook: the current swing's visual recovery finished.
    /// Skips the rest of a cross slash recovery so the chain continues at once.
    pub fn on_attack_phase_end(&mut self) {
        if self.state != CombatState::AttackCrossSlash {
            return;
        }
        let decel_end = self.tuning.cross_slash.decel_end;
        let dash_end = self.tuning.cross_slash.dash_end;
        if let Some(ctx) = self.phase.as_mut() {
            if ctx.elapsed >= dash_end {
                ctx.elapsed = ctx.elapsed.max(decel_end);
            }
        }
    }

    // ------------------------------------------------------------------
    // Slam combo: jump, spin toward locked target, slam down
    // ------------------------------------------------------------------

    pub(super) fn start_slam_combo(&mut self) {
        let target = self.player_position.unwrap_or(self.position);
        self.slam = Some(SlamComboState::start(self.position, target));
        self.velocity = Vec2::new(0.0, self.tuning.slam.jump_velocity);
        self.cues.push(Cue::Sound {
            clip_id: "slam_jump",
            volume: 1.0,
            pitch: 1.0,
        });
        debug!(
            "{}: slam combo locked target at ({:.2}, {:.2})",
            self.tuning.name, target.x, target.y
        );
    }

    fn step_slam_jump(&mut self, ctx: &AttackPhaseContext) -> Option<CombatState> {
        self.velocity.x = 0.0;
        let past_apex = ctx.elapsed > 0.1 && self.velocity.y <= 0.0;
        if past_apex || ctx.elapsed >= self.tuning.slam.jump_timeout {
            return Some(CombatState::AttackSpin);
        }
        None
    }

    /// Animation-event hook: the jump reached its apex.
    pub fn on_jump_apex(&mut self) {
        if self.state == CombatState::AttackSlam {
            self.request_transition(CombatState::AttackSpin);
        }
    }

    fn step_slam_spin(&mut self, ctx: &AttackPhaseContext) -> Option<CombatState> {
        let Some(target) = self.slam.as_ref().map(|slam| slam.target_position) else {
            return Some(CombatState::Idle);
        };
        let slam = self.tuning.slam;

        self.velocity.y = 0.0;
        let dx = target.x - self.position.x;
        // Timeout keeps an unreachable target from spinning forever.
        if dx.abs() <= slam.spin_arrive_distance || ctx.elapsed >= slam.spin_timeout {
            self.velocity.x = 0.0;
            return Some(CombatState::AttackSlamAttack);
        }

        self.velocity.x = dx.signum()
            * self.tuning.movement.dash_speed
            * slam.spin_speed_multiplier
            * self.speed_multiplier;
        None
    }

    fn step_slam_descent(&mut self, ctx: &AttackPhaseContext) -> Option<CombatState> {
        let Some(impact_triggered) = self.slam.as_ref().map(|slam| slam.impact_triggered) else {
            return Some(CombatState::Idle);
        };
        if impact_triggered {
            self.velocity.x = 0.0;
            return None;
        }

        let slam = self.tuning.slam;
        self.velocity = Vec2::new(0.0, -slam.descent_speed);
        if self.is_grounded() || ctx.elapsed >= slam.fall_timeout {
            self.trigger_slam_impact();
        }
        None
    }

    fn trigger_slam_impact(&mut self) {
        let Some(combo) = self.slam.as_mut() else {
            return;
        };
        if combo.impact_triggered {
            return;
        }
        combo.impact_triggered = true;

        let slam = self.tuning.slam;
        self.velocity = Vec2::ZERO;
        self.enable_damage(AttackTag::SlamImpact);
        self.tasks.schedule(TaskKind::CloseDamageWindow, slam.impact_window);
        self.tasks.schedule(TaskKind::CompleteSlamCombo, slam.recovery);

        self.cues.push(Cue::CameraShake {
            intensity: slam.shake_intensity,
            duration: slam.shake_duration,
        });
        self.cues.push(Cue::Effect {
            effect_id: "slam_shockwave",
            offset: Vec2::ZERO,
            scale: 2.0,
            duration: slam.recovery,
        });
        self.cues.push(Cue::Sound {
            clip_id: "slam_impact",
            volume: 1.0,
            pitch: 0.8,
        });
        self.events.push(BossEvent::SlamImpact {
            position: self.position,
        });
        debug!("{}: slam impact", self.tuning.name);
    }

    /// End the slam combo: drop combo state, start the slam cooldown, go Idle.
    pub fn complete_slam_combo(&mut self) {
        if self.slam.is_none() {
            return;
        }
        if self.state.is_slam_chain() {
            self.request_transition(CombatState::Idle);
        } else {
            self.slam = None;
            self.last_slam_at = Some(self.clock);
        }
    }

    // ------------------------------------------------------------------
    // Wide slash: dash, close in, land; enraged bosses swing twice
    // ------------------------------------------------------------------

    fn step_wide_slash(&mut self, ctx: &mut AttackPhaseContext, dt: f32) -> Option<CombatState> {
        if ctx.flags.follow_up_pending {
            self.velocity.x = 0.0;
            return None;
        }

        let ws = self.tuning.wide_slash;
        let elapsed = ctx.elapsed;
        let dash_velocity = self.facing.sign()
            * self.tuning.movement.dash_speed
            * ws.dash_multiplier
            * self.speed_multiplier;

        if elapsed >= ws.damage_open
            && elapsed < ws.recover_start
            && !ctx.flags.damage_opened
            && !ctx.flags.has_hit
        {
            ctx.flags.damage_opened = true;
            self.enable_damage(AttackTag::WideSlash);
        }

        if elapsed < ws.dash_end {
            self.velocity.x = dash_velocity;
            return None;
        }

        if elapsed < ws.recover_start {
            let close = self
                .player_distance
                .is_some_and(|distance| distance <= ws.close_distance);
            if close {
                self.velocity.x *= (1.0 - ws.decel_drag * dt).max(0.0);
            } else {
                self.velocity.x = dash_velocity;
            }
            return None;
        }

        self.velocity.x = 0.0;
        self.disable_damage();
        if !ctx.flags.landed {
            ctx.flags.landed = true;
            self.cues.push(Cue::Sound {
                clip_id: "wide_slash_land",
                volume: 0.9,
                pitch: 1.0,
            });
            self.cues.push(Cue::Effect {
                effect_id: "landing_dust",
                offset: Vec2::ZERO,
                scale: 1.0,
                duration: 0.4,
            });
        }

        if self.enraged && !ctx.flags.follow_up_done {
            ctx.flags.follow_up_pending = true;
            self.tasks.schedule(TaskKind::FollowUpSlash, ws.follow_up_delay);
            return None;
        }
        Some(CombatState::Idle)
    }

    pub(super) fn start_follow_up_slash(&mut self) {
        if self.state != CombatState::AttackWideSlash {
            return;
        }
        // Re-aim between the two swings, then freeze facing again.
        self.facing_locked = false;
        self.face_player();
        self.facing_locked = true;

        if let Some(ctx) = self.phase.as_mut() {
            ctx.next_swing();
            ctx.flags.follow_up_done = true;
        }
        self.cues.push(Cue::Animation(CombatState::AttackWideSlash.animation()));
        self.cues.push(Cue::Sound {
            clip_id: "wide_slash_swing",
            volume: 1.0,
            pitch: 1.1,
        });
    }
}
