//! Igris Arena: a single boss fight against the crimson knight.
//!
//! `combat` holds the engine-agnostic boss core, `content` its data-driven
//! tuning, `arena` the Bevy host that runs the fight, and `ui` the HUD.

pub mod arena;
pub mod combat;
pub mod content;
pub mod ui;
