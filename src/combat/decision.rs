//! Combat domain: distance-bucketed weighted action selection.

use crate::combat::state::Action;
use crate::content::{DecisionBucket, DecisionTable, RangeTuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceBucket {
    /// Closer than the minimum attack range
    TooClose,
    Close,
    Mid,
    Far,
}

impl DistanceBucket {
    pub fn classify(distance: f32, ranges: &RangeTuning) -> Self {
        if distance < ranges.min_attack_range {
            DistanceBucket::TooClose
        } else if distance <= ranges.close_range {
            DistanceBucket::Close
        } else if distance <= ranges.mid_range {
            DistanceBucket::Mid
        } else {
            DistanceBucket::Far
        }
    }
}

impl DecisionTable {
    pub fn bucket(&self, bucket: DistanceBucket) -> &DecisionBucket {
        match bucket {
            DistanceBucket::TooClose => &self.too_close,
            DistanceBucket::Close => &self.close,
            DistanceBucket::Mid => &self.mid,
            DistanceBucket::Far => &self.far,
        }
    }
}

/// Pick the first candidate whose cumulative weight exceeds `roll`.
///
/// A slam-type pick while the slam is cooling down falls through to the
/// bucket's fallback chain. A roll past the last weight walks forward.
/// Returns `None` when nothing is selectable.
pub fn pick_action(bucket: &DecisionBucket, roll: f32, slam_ready: bool) -> Option<Action> {
    if bucket.candidates.is_empty() {
        return None;
    }
    let drawn = bucket
        .candidates
        .iter()
        .find(|candidate| candidate.cumulative > roll)
        .map_or(Action::WalkForward, |candidate| candidate.action);

    if drawn.is_slam() && !slam_ready {
        return bucket
            .fallback
            .iter()
            .copied()
            .find(|action| !action.is_slam());
    }

    Some(drawn)
}
