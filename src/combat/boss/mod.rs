//! Combat domain: the boss controller.
//!
//! `BossEntity` is the single authority over the boss's combat state. Hosts
//! drive it with `tick` once per frame and reach it from outside only through
//! `apply_damage`, `stun_boss`, and the animation-event callbacks. Everything
//! else (presentation, physics, audio) is a collaborator handed in per tick.
//!
//! Tick order: stun gate, timed tasks, state handler, damage window,
//! gravity and motion write-back, presentation flush.

mod attacks;
mod locomotion;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::combat::collaborators::{BossHost, Cue, Grounded};
use crate::combat::damage_window::{AttackTag, DamageWindow};
use crate::combat::events::BossEvent;
use crate::combat::phases::{AttackPhaseContext, SlamComboState, SlamPhase};
use crate::combat::state::{CombatState, Facing, is_combo_link};
use crate::combat::timed_tasks::{TaskKind, TimedTasks};
use crate::content::BossTuning;

#[derive(Debug, Clone)]
pub struct BossEntity {
    tuning: BossTuning,
    current_hp: i32,
    max_hp: i32,
    enraged: bool,
    enrage_buffs_applied: bool,
    speed_multiplier: f32,
    facing: Facing,
    /// PreserveDirectionForAttack: facing is frozen while an attack runs
    facing_locked: bool,
    state: CombatState,
    time_in_state: f32,
    decision_timer: f32,
    position: Vec2,
    velocity: Vec2,
    move_intent: f32,
    walk_check_timer: f32,
    /// Seconds of simulated time this boss has lived through
    clock: f32,
    stun_remaining: f32,
    last_slam_at: Option<f32>,
    player_position: Option<Vec2>,
    player_distance: Option<f32>,
    ground_level: f32,
    pending_knockback: Vec2,
    phase: Option<AttackPhaseContext>,
    slam: Option<SlamComboState>,
    damage_window: DamageWindow,
    tasks: TimedTasks,
    rng: ChaCha8Rng,
    cues: Vec<Cue>,
    events: Vec<BossEvent>,
}

/// Serializable view of the boss used for debug dumps.
#[derive(Debug, Clone, Serialize)]
pub struct BossSnapshot {
    pub name: String,
    pub state: CombatState,
    pub current_hp: i32,
    pub max_hp: i32,
    pub enraged: bool,
    pub facing: Facing,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub time_in_state: f32,
    pub damage_tag: Option<AttackTag>,
    pub stun_remaining: f32,
}

impl BossEntity {
    pub fn new(tuning: BossTuning, position: Vec2) -> Self {
        let seed = tuning.seed;
        Self::with_seed(tuning, position, seed)
    }

    pub fn with_seed(tuning: BossTuning, position: Vec2, seed: u64) -> Self {
        let max_hp = tuning.max_hp.max(1);
        let decision_timer = tuning.decision.decision_cooldown;
        Self {
            tuning,
            current_hp: max_hp,
            max_hp,
            enraged: false,
            enrage_buffs_applied: false,
            speed_multiplier: 1.0,
            facing: Facing::default(),
            facing_locked: false,
            state: CombatState::Idle,
            time_in_state: 0.0,
            decision_timer,
            position,
            velocity: Vec2::ZERO,
            move_intent: 0.0,
            walk_check_timer: 0.0,
            clock: 0.0,
            stun_remaining: 0.0,
            last_slam_at: None,
            player_position: None,
            player_distance: None,
            ground_level: position.y,
            pending_knockback: Vec2::ZERO,
            phase: None,
            slam: None,
            damage_window: DamageWindow::default(),
            tasks: TimedTasks::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            cues: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Re-arm the boss for another fight: full HP, not enraged, no cooldowns.
    pub fn reset(&mut self, position: Vec2) {
        let tuning = self.tuning.clone();
        *self = Self::new(tuning, position);
    }

    // ------------------------------------------------------------------
    // Read API
    // ------------------------------------------------------------------

    pub fn current_hp(&self) -> i32 {
        self.current_hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn is_enraged(&self) -> bool {
        self.enraged
    }

    pub fn current_state(&self) -> CombatState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state != CombatState::Dead
    }

    pub fn name(&self) -> &str {
        &self.tuning.name
    }

    pub fn tuning(&self) -> &BossTuning {
        &self.tuning
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    pub fn decision_timer(&self) -> f32 {
        self.decision_timer
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn stun_remaining(&self) -> f32 {
        self.stun_remaining
    }

    pub fn damage_window(&self) -> &DamageWindow {
        &self.damage_window
    }

    pub fn phase_context(&self) -> Option<&AttackPhaseContext> {
        self.phase.as_ref()
    }

    pub fn slam_combo(&self) -> Option<&SlamComboState> {
        self.slam.as_ref()
    }

    pub fn pending_tasks(&self) -> &TimedTasks {
        &self.tasks
    }

    pub fn is_slam_ready(&self) -> bool {
        self.last_slam_at
            .is_none_or(|at| self.clock - at >= self.tuning.decision.slam_cooldown)
    }

    pub fn snapshot(&self) -> BossSnapshot {
        BossSnapshot {
            name: self.tuning.name.clone(),
            state: self.state,
            current_hp: self.current_hp,
            max_hp: self.max_hp,
            enraged: self.enraged,
            facing: self.facing,
            position: self.position.to_array(),
            velocity: self.velocity.to_array(),
            time_in_state: self.time_in_state,
            damage_tag: self.damage_window.tag(),
            stun_remaining: self.stun_remaining,
        }
    }

    /// Take every notification emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<BossEvent> {
        std::mem::take(&mut self.events)
    }

    /// Host write-back of the integrated position.
    pub fn sync_position(&mut self, position: Vec2) {
        self.position = position;
    }

    // ------------------------------------------------------------------
    // State controller
    // ------------------------------------------------------------------

    /// Commit a transition if the rules allow it. Returns whether it happened.
    ///
    /// `Dead` never exits, re-entering the current state changes nothing, and
    /// an attack cannot be replaced by another attack unless the pair is a
    /// combo link.
    pub fn request_transition(&mut self, new_state: CombatState) -> bool {
        let from = self.state;
        if from == CombatState::Dead || from == new_state {
            return false;
        }

        let link = is_combo_link(from, new_state);
        if from.is_attack() && new_state.is_attack() && !link {
            debug!(
                "{}: rejected transition {:?} -> {:?} (attack in progress)",
                self.tuning.name, from, new_state
            );
            return false;
        }

        self.tasks.cancel_all();
        self.phase = None;
        self.move_intent = 0.0;
        if !link {
            self.damage_window.disable();
        }
        if !new_state.is_slam_chain() && self.slam.take().is_some() {
            // Leaving the chain for any reason starts the slam cooldown.
            self.last_slam_at = Some(self.clock);
        }
        if from == CombatState::EnrageTransition {
            self.apply_enrage_buffs();
        }

        self.facing_locked = new_state.is_attack();
        if !new_state.is_attack() {
            self.face_player();
        }

        self.state = new_state;
        self.time_in_state = 0.0;
        if new_state.is_attack() {
            self.phase = Some(AttackPhaseContext::default());
        }

        debug!("{}: {:?} -> {:?}", self.tuning.name, from, new_state);
        self.events.push(BossEvent::StateChanged {
            from,
            to: new_state,
        });
        self.enter_state(new_state);
        true
    }

    fn enter_state(&mut self, state: CombatState) {
        self.cues.push(Cue::Animation(state.animation()));

        match state {
            CombatState::Idle => {
                self.velocity.x = 0.0;
            }
            CombatState::WalkForward => {
                self.move_intent = 1.0;
                self.walk_check_timer = 0.0;
            }
            CombatState::WalkBack => {
                self.move_intent = -1.0;
            }
            CombatState::AttackCrossSlash => {
                self.velocity.x = 0.0;
            }
            CombatState::AttackSlam => self.start_slam_combo(),
            CombatState::AttackSpin => {
                if let Some(slam) = self.slam.as_mut() {
                    slam.phase = SlamPhase::Spinning;
                }
                self.velocity.y = 0.0;
                self.enable_damage(AttackTag::Spin);
                self.cues.push(Cue::Sound {
                    clip_id: "slam_spin",
                    volume: 0.8,
                    pitch: 1.0,
                });
            }
            CombatState::AttackSlamAttack => {
                if let Some(slam) = self.slam.as_mut() {
                    slam.phase = SlamPhase::Slamming;
                }
                // The spin window closes here; the impact opens its own.
                self.damage_window.disable();
                self.velocity = Vec2::new(0.0, -self.tuning.slam.descent_speed);
            }
            CombatState::AttackWideSlash => {
                self.cues.push(Cue::Sound {
                    clip_id: "wide_slash_swing",
                    volume: 1.0,
                    pitch: 1.0,
                });
            }
            CombatState::Stagger => {
                self.velocity.x = self.pending_knockback.x;
                self.pending_knockback = Vec2::ZERO;
            }
            CombatState::EnrageTransition => {
                self.velocity.x = 0.0;
                self.cues.push(Cue::Sound {
                    clip_id: "enrage_roar",
                    volume: 1.0,
                    pitch: 0.9,
                });
                self.cues.push(Cue::Effect {
                    effect_id: "enrage_aura",
                    offset: Vec2::ZERO,
                    scale: 1.5,
                    duration: self.tuning.enrage.transition_duration,
                });
                self.cues.push(Cue::CameraShake {
                    intensity: 0.5,
                    duration: self.tuning.enrage.transition_duration * 0.5,
                });
            }
            CombatState::Dead => {
                self.velocity.x = 0.0;
                self.cues.push(Cue::Sound {
                    clip_id: "boss_death",
                    volume: 1.0,
                    pitch: 1.0,
                });
            }
        }
    }

    fn set_facing(&mut self, facing: Facing) {
        if self.facing != facing {
            self.facing = facing;
            self.cues.push(Cue::Facing(facing));
        }
    }

    /// Turn toward the last known player position unless an attack froze facing.
    fn face_player(&mut self) {
        if self.facing_locked {
            return;
        }
        if let Some(player) = self.player_position {
            let facing = self.facing.toward(self.position, player);
            self.set_facing(facing);
        }
    }

    fn decision_baseline(&self) -> f32 {
        if self.enraged {
            self.tuning.decision.enrage_decision_cooldown
        } else {
            self.tuning.decision.decision_cooldown
        }
    }

    // ------------------------------------------------------------------
    // Damage window
    // ------------------------------------------------------------------

    pub fn enable_damage(&mut self, tag: AttackTag) {
        self.damage_window.enable(tag);
    }

    pub fn disable_damage(&mut self) {
        self.damage_window.disable();
    }

    fn evaluate_damage_window<H: BossHost + ?Sized>(&mut self, host: &H) {
        if !self.damage_window.is_active() {
            return;
        }
        let Some(player) = self.player_position else {
            return;
        };

        let distance = host.distance_to(self.position, player);
        let Some(hit) = self.damage_window.try_hit(
            self.clock,
            distance,
            self.facing.sign(),
            &self.tuning.hits,
        ) else {
            return;
        };

        debug!(
            "{}: {} hit player for {} (distance {:.2})",
            self.tuning.name, hit.tag, hit.damage, distance
        );
        self.events.push(BossEvent::PlayerHit {
            tag: hit.tag,
            damage: hit.damage,
            knockback: hit.knockback,
        });
        self.cues.push(Cue::Sound {
            clip_id: "player_hit",
            volume: 1.0,
            pitch: 1.0,
        });

        if let Some(ctx) = self.phase.as_mut() {
            ctx.hits_landed += 1;
            ctx.flags.has_hit = true;
        }

        match hit.tag {
            AttackTag::CrossSlash => {
                self.damage_window.disable();
                let cs = self.tuning.cross_slash;
                self.cues.push(Cue::CameraShake {
                    intensity: cs.shake_intensity,
                    duration: cs.shake_duration,
                });
                self.tasks.schedule(
                    TaskKind::Hitstop {
                        resume_velocity: self.velocity,
                    },
                    cs.hitstop,
                );
                self.velocity = Vec2::ZERO;
            }
            AttackTag::WideSlash | AttackTag::SlamImpact => self.damage_window.disable(),
            // Spin keeps grinding, paced by the hit cooldown.
            AttackTag::Spin => {}
        }
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Advance the whole state machine by `dt` seconds.
    pub fn tick<H: BossHost + ?Sized>(&mut self, dt: f32, host: &mut H) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.ground_level = host.ground_level();
        self.player_position = host.player_position();
        self.player_distance = self
            .player_position
            .map(|player| host.distance_to(self.position, player));

        if self.state != CombatState::Dead {
            self.clock += dt;

            if self.stun_remaining > 0.0 {
                self.stun_remaining = (self.stun_remaining - dt).max(0.0);
                self.velocity.x = 0.0;
                if self.stun_remaining == 0.0 {
                    info!("{}: stun expired", self.tuning.name);
                }
            } else {
                self.time_in_state += dt;
                for kind in self.tasks.advance(dt) {
                    self.finish_task(kind);
                }
                self.update_state(dt);
                self.evaluate_damage_window(host);
            }
        }

        self.apply_gravity(dt);
        host.set_velocity(self.velocity);
        for cue in self.cues.drain(..) {
            cue.deliver(&mut *host);
        }
    }

    fn update_state(&mut self, dt: f32) {
        match self.state {
            CombatState::Idle => self.update_idle(dt),
            CombatState::WalkForward => self.update_walk_forward(dt),
            CombatState::WalkBack => self.update_walk_back(),
            CombatState::AttackCrossSlash
            | CombatState::AttackSlam
            | CombatState::AttackSpin
            | CombatState::AttackSlamAttack
            | CombatState::AttackWideSlash => self.update_attack(dt),
            CombatState::Stagger => self.update_stagger(dt),
            CombatState::EnrageTransition => {
                self.velocity.x = 0.0;
                if self.time_in_state >= self.tuning.enrage.transition_duration {
                    self.request_transition(CombatState::Idle);
                }
            }
            CombatState::Dead => {}
        }
    }

    fn finish_task(&mut self, kind: TaskKind) {
        match kind {
            TaskKind::Hitstop { resume_velocity } => {
                self.velocity = resume_velocity;
            }
            TaskKind::FollowUpSlash => self.start_follow_up_slash(),
            TaskKind::CloseDamageWindow => self.damage_window.disable(),
            TaskKind::CompleteSlamCombo => self.complete_slam_combo(),
        }
    }

    /// The core owns vertical motion: gravity while airborne, except during
    /// the controlled spin and slam descent.
    fn apply_gravity(&mut self, dt: f32) {
        let controlled = match self.state {
            CombatState::AttackSpin => true,
            CombatState::AttackSlamAttack => self
                .slam
                .as_ref()
                .is_some_and(|slam| !slam.impact_triggered),
            _ => false,
        };
        if !self.is_grounded() {
            if !controlled {
                self.velocity.y -= self.tuning.movement.gravity * dt;
            }
        } else if self.velocity.y < 0.0 {
            self.velocity.y = 0.0;
        }
    }

    // ------------------------------------------------------------------
    // External entry points
    // ------------------------------------------------------------------

    /// Apply incoming damage. May stagger, enrage, or kill the boss.
    pub fn apply_damage(&mut self, amount: i32, hit_direction: Vec2, knockback: f32) {
        if self.state == CombatState::Dead || amount <= 0 {
            return;
        }

        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        self.events.push(BossEvent::DamageTaken {
            amount: dealt,
            remaining: self.current_hp,
        });
        self.cues.push(Cue::Effect {
            effect_id: "boss_hit_spark",
            offset: Vec2::new(0.0, 1.0),
            scale: 1.0,
            duration: 0.2,
        });

        if self.current_hp <= 0 {
            self.current_hp = 0;
            info!("{} defeated", self.tuning.name);
            self.events.push(BossEvent::Died);
            self.request_transition(CombatState::Dead);
            return;
        }

        if !self.enraged && self.current_hp * 2 <= self.max_hp {
            self.enraged = true;
            info!(
                "{} enraged at {}/{} HP",
                self.tuning.name, self.current_hp, self.max_hp
            );
            self.events.push(BossEvent::Enraged);
            self.request_transition(CombatState::EnrageTransition);
            return;
        }

        if self.state == CombatState::EnrageTransition {
            return;
        }

        let push = hit_direction.normalize_or_zero() * knockback;
        self.pending_knockback = Vec2::new(push.x, 0.0);
        if !self.request_transition(CombatState::Stagger) {
            self.velocity.x = push.x;
            self.pending_knockback = Vec2::ZERO;
        }
    }

    /// Hard interrupt: drop to Idle and freeze every update for `duration`.
    pub fn stun_boss(&mut self, duration: f32) {
        if self.state == CombatState::Dead || !(duration > 0.0) {
            return;
        }
        self.request_transition(CombatState::Idle);
        self.stun_remaining = self.stun_remaining.max(duration);
        self.velocity.x = 0.0;
        info!("{} stunned for {:.2}s", self.tuning.name, duration);
        self.events.push(BossEvent::Stunned { duration });
    }

    fn apply_enrage_buffs(&mut self) {
        if self.enraged && !self.enrage_buffs_applied {
            self.enrage_buffs_applied = true;
            self.speed_multiplier *= self.tuning.enrage.speed_multiplier;
            debug!(
                "{}: enrage buffs applied, speed x{:.2}",
                self.tuning.name, self.speed_multiplier
            );
        }
    }
}

impl Grounded for BossEntity {
    fn is_grounded(&self) -> bool {
        self.position.y <= self.ground_level + self.tuning.slam.ground_epsilon
    }
}

#[cfg(test)]
impl BossEntity {
    pub(crate) fn set_decision_timer_for_test(&mut self, timer: f32) {
        self.decision_timer = timer;
    }

    pub(crate) fn set_facing_for_test(&mut self, facing: Facing) {
        self.facing = facing;
    }
}
