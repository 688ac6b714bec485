//! Combat domain: per-attack phase bookkeeping.

use bevy::prelude::*;

/// Named one-shot booleans an attack handler flips while it runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseFlags {
    pub telegraphed: bool,
    pub has_hit: bool,
    pub damage_opened: bool,
    pub decelerating: bool,
    pub landed: bool,
    pub follow_up_pending: bool,
    pub follow_up_done: bool,
}

/// Lives exactly as long as one attack state. Every committed transition
/// drops it, combo links included.
#[derive(Debug, Clone, Default)]
pub struct AttackPhaseContext {
    pub elapsed: f32,
    pub hits_landed: u32,
    /// Swings started within a chained attack (cross slash)
    pub swings: u32,
    pub flags: PhaseFlags,
}

impl AttackPhaseContext {
    /// Restart the phase clock for the next swing of a chain.
    pub fn next_swing(&mut self) {
        self.elapsed = 0.0;
        self.swings += 1;
        self.flags = PhaseFlags {
            follow_up_done: self.flags.follow_up_done,
            ..PhaseFlags::default()
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlamPhase {
    #[default]
    None,
    Jumping,
    Spinning,
    Slamming,
}

/// Shared state across AttackSlam -> AttackSpin -> AttackSlamAttack.
#[derive(Debug, Clone)]
pub struct SlamComboState {
    pub phase: SlamPhase,
    pub start_position: Vec2,
    /// Locked at combo start, never re-acquired
    pub target_position: Vec2,
    /// One-shot impact latch, only reset by starting a new combo
    pub impact_triggered: bool,
}

impl SlamComboState {
    pub fn start(start_position: Vec2, target_position: Vec2) -> Self {
        Self {
            phase: SlamPhase::Jumping,
            start_position,
            target_position,
            impact_triggered: false,
        }
    }
}
