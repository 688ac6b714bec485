//! Combat domain: damage window gate.
//!
//! The gate decides whether the boss can deal damage right now, independent of
//! whatever animation is playing. Attack handlers open it with a tag for the
//! active frames of a swing; the controller evaluates it once per tick.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::content::HitTable;

/// Identifies which attack currently owns the damage window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum AttackTag {
    CrossSlash,
    WideSlash,
    SlamImpact,
    Spin,
}

impl AttackTag {
    pub fn as_str(self) -> &'static str {
        match self {
            AttackTag::CrossSlash => "crossslash",
            AttackTag::WideSlash => "wideslash",
            AttackTag::SlamImpact => "slamimpact",
            AttackTag::Spin => "spin",
        }
    }
}

impl fmt::Display for AttackTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAttackTag(pub String);

impl fmt::Display for UnknownAttackTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown attack tag '{}'", self.0)
    }
}

impl std::error::Error for UnknownAttackTag {}

impl FromStr for AttackTag {
    type Err = UnknownAttackTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "crossslash" => Ok(AttackTag::CrossSlash),
            "wideslash" => Ok(AttackTag::WideSlash),
            "slamimpact" => Ok(AttackTag::SlamImpact),
            "spin" => Ok(AttackTag::Spin),
            _ => Err(UnknownAttackTag(s.to_string())),
        }
    }
}

/// A resolved hit against the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOutcome {
    pub tag: AttackTag,
    pub damage: i32,
    pub knockback: Vec2,
}

/// At most one tag is active at a time. `last_hit_at` survives closing the
/// window so the per-target cooldown spans consecutive windows.
#[derive(Debug, Clone, Default)]
pub struct DamageWindow {
    active: bool,
    tag: Option<AttackTag>,
    last_hit_at: Option<f32>,
}

impl DamageWindow {
    pub fn enable(&mut self, tag: AttackTag) {
        self.active = true;
        self.tag = Some(tag);
    }

    pub fn disable(&mut self) {
        self.active = false;
        self.tag = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn tag(&self) -> Option<AttackTag> {
        self.tag
    }

    pub fn last_hit_at(&self) -> Option<f32> {
        self.last_hit_at
    }

    /// Forget the hit cooldown entirely (new fight).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Run one hit test. `facing_sign` orients the knockback along x.
    pub fn try_hit(
        &mut self,
        now: f32,
        distance: f32,
        facing_sign: f32,
        table: &HitTable,
    ) -> Option<HitOutcome> {
        if !self.active {
            return None;
        }
        let tag = self.tag?;
        let profile = table.profile(tag);

        if distance > profile.range {
            return None;
        }
        if let Some(last) = self.last_hit_at {
            if now - last < table.hit_cooldown {
                return None;
            }
        }

        self.last_hit_at = Some(now);
        Some(HitOutcome {
            tag,
            damage: profile.damage,
            knockback: Vec2::new(profile.knockback_x * facing_sign, profile.knockback_y),
        })
    }
}
