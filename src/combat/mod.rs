//! Combat domain: the engine-agnostic boss core.
//!
//! Nothing in here touches the ECS world. The arena host owns a `BossEntity`
//! inside a component and drives it with `tick` every frame.

mod boss;
mod collaborators;
mod damage_window;
mod decision;
mod events;
mod phases;
mod state;
mod timed_tasks;

#[cfg(test)]
mod tests;

pub use boss::{BossEntity, BossSnapshot};
pub use collaborators::{BossHost, Cue, Grounded, MotionSink, PhysicsQuery, Presentation};
pub use damage_window::{AttackTag, DamageWindow, HitOutcome, UnknownAttackTag};
pub use decision::{DistanceBucket, pick_action};
pub use events::BossEvent;
pub use phases::{AttackPhaseContext, PhaseFlags, SlamComboState, SlamPhase};
pub use state::{Action, COMBO_LINKS, CombatState, Facing, is_combo_link};
pub use timed_tasks::{TaskKind, TimedTask, TimedTasks};
