//! Combat domain: short-lived timed sub-tasks polled every tick.
//!
//! Stand-in for coroutine waits: each task counts up to its duration and is
//! reported back to the controller when it completes. Tasks belong to the
//! current state and are all cancelled by the next committed transition.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskKind {
    /// Freeze attack phase progress after a connecting hit
    Hitstop { resume_velocity: Vec2 },
    /// Start the enraged wide slash follow-up swing
    FollowUpSlash,
    /// Close the damage window opened by an impact
    CloseDamageWindow,
    /// Finish the slam combo after the impact has played out
    CompleteSlamCombo,
}

#[derive(Debug, Clone)]
pub struct TimedTask {
    pub kind: TaskKind,
    pub elapsed: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, Default)]
pub struct TimedTasks {
    tasks: Vec<TimedTask>,
}

impl TimedTasks {
    pub fn schedule(&mut self, kind: TaskKind, duration: f32) {
        self.tasks.push(TimedTask {
            kind,
            elapsed: 0.0,
            duration,
        });
    }

    /// Advance every task and return the kinds that finished, in schedule order.
    pub fn advance(&mut self, dt: f32) -> Vec<TaskKind> {
        let mut finished = Vec::new();
        self.tasks.retain_mut(|task| {
            task.elapsed += dt;
            if task.elapsed >= task.duration {
                finished.push(task.kind);
                false
            } else {
                true
            }
        });
        finished
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn hitstop_active(&self) -> bool {
        self.tasks
            .iter()
            .any(|task| matches!(task.kind, TaskKind::Hitstop { .. }))
    }

    pub fn contains(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|task| task.kind == kind)
    }
}
