//! Combat domain: boss states, facing, and the combo allow-list.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Top-level combat state of the boss. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum CombatState {
    #[default]
    Idle,
    WalkForward,
    WalkBack,
    AttackCrossSlash,
    /// Slam combo, jumping phase
    AttackSlam,
    /// Slam combo, airborne spin toward the locked target
    AttackSpin,
    /// Slam combo, descent and ground impact
    AttackSlamAttack,
    AttackWideSlash,
    Stagger,
    EnrageTransition,
    /// Terminal
    Dead,
}

impl CombatState {
    pub fn is_attack(self) -> bool {
        matches!(
            self,
            CombatState::AttackCrossSlash
                | CombatState::AttackSlam
                | CombatState::AttackSpin
                | CombatState::AttackSlamAttack
                | CombatState::AttackWideSlash
        )
    }

    /// States that belong to the slam combo chain.
    pub fn is_slam_chain(self) -> bool {
        matches!(
            self,
            CombatState::AttackSlam | CombatState::AttackSpin | CombatState::AttackSlamAttack
        )
    }

    /// Animation clip played on entry.
    pub fn animation(self) -> &'static str {
        match self {
            CombatState::Idle => "idle",
            CombatState::WalkForward => "walk_forward",
            CombatState::WalkBack => "walk_back",
            CombatState::AttackCrossSlash => "cross_slash",
            CombatState::AttackSlam => "slam_jump",
            CombatState::AttackSpin => "slam_spin",
            CombatState::AttackSlamAttack => "slam_attack",
            CombatState::AttackWideSlash => "wide_slash",
            CombatState::Stagger => "stagger",
            CombatState::EnrageTransition => "enrage",
            CombatState::Dead => "death",
        }
    }
}

/// Attack-to-attack transitions allowed to bypass the no-interrupt rule.
pub const COMBO_LINKS: [(CombatState, CombatState); 2] = [
    (CombatState::AttackSlam, CombatState::AttackSpin),
    (CombatState::AttackSpin, CombatState::AttackSlamAttack),
];

pub fn is_combo_link(from: CombatState, to: CombatState) -> bool {
    COMBO_LINKS.contains(&(from, to))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing that looks from `from` toward `to` along x. Ties keep `self`.
    pub fn toward(self, from: Vec2, to: Vec2) -> Facing {
        let dx = to.x - from.x;
        if dx > 0.0 {
            Facing::Right
        } else if dx < 0.0 {
            Facing::Left
        } else {
            self
        }
    }
}

/// Actions the decision policy can pick from Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Action {
    WalkForward,
    WalkBack,
    CrossSlash,
    Slam,
    WideSlash,
}

impl Action {
    pub fn state(self) -> CombatState {
        match self {
            Action::WalkForward => CombatState::WalkForward,
            Action::WalkBack => CombatState::WalkBack,
            Action::CrossSlash => CombatState::AttackCrossSlash,
            Action::Slam => CombatState::AttackSlam,
            Action::WideSlash => CombatState::AttackWideSlash,
        }
    }

    /// Slam-type actions share the slam cooldown.
    pub fn is_slam(self) -> bool {
        matches!(self, Action::Slam)
    }
}
