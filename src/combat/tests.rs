//! Combat domain: unit tests for the boss core, driven by a headless host.

use bevy::prelude::*;

use super::{
    Action, AttackTag, BossEntity, BossEvent, CombatState, DamageWindow, DistanceBucket, Facing,
    Grounded, MotionSink, PhysicsQuery, Presentation, SlamPhase, TaskKind, TimedTasks, pick_action,
};
use crate::content::{BossTuning, DecisionBucket, WeightedAction};

#[derive(Default)]
struct TestHost {
    player: Option<Vec2>,
    ground: f32,
    velocity: Vec2,
    /// Integrate the boss position from the velocity it asks for
    integrate: bool,
    animations: Vec<String>,
    sounds: Vec<String>,
    effects: Vec<String>,
    facings: Vec<Facing>,
    shakes: u32,
    events: Vec<BossEvent>,
}

impl TestHost {
    fn with_player(x: f32) -> Self {
        Self {
            player: Some(Vec2::new(x, 0.0)),
            ..default()
        }
    }

    fn count(&self, matches: impl Fn(&BossEvent) -> bool) -> usize {
        self.events.iter().filter(|event| matches(event)).count()
    }
}

impl Presentation for TestHost {
    fn play_animation(&mut self, name: &str) {
        self.animations.push(name.to_string());
    }

    fn set_facing(&mut self, facing: Facing) {
        self.facings.push(facing);
    }

    fn spawn_effect(&mut self, effect_id: &str, _offset: Vec2, _scale: f32, _duration: f32) {
        self.effects.push(effect_id.to_string());
    }

    fn play_sound(&mut self, clip_id: &str, _volume: f32, _pitch: f32) {
        self.sounds.push(clip_id.to_string());
    }

    fn shake_camera(&mut self, _intensity: f32, _duration: f32) {
        self.shakes += 1;
    }
}

impl PhysicsQuery for TestHost {
    fn player_position(&self) -> Option<Vec2> {
        self.player
    }

    fn ground_level(&self) -> f32 {
        self.ground
    }
}

impl MotionSink for TestHost {
    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }
}

/// Boss at the origin that will not decide anything on its own.
fn passive_boss() -> BossEntity {
    let mut boss = BossEntity::new(BossTuning::default(), Vec2::ZERO);
    boss.set_decision_timer_for_test(100.0);
    boss
}

fn step(boss: &mut BossEntity, host: &mut TestHost, dt: f32) {
    boss.tick(dt, host);
    if host.integrate {
        let mut position = boss.position() + host.velocity * dt;
        position.y = position.y.max(host.ground);
        boss.sync_position(position);
    }
    host.events.extend(boss.drain_events());
}

fn run(boss: &mut BossEntity, host: &mut TestHost, dt: f32, ticks: usize) {
    for _ in 0..ticks {
        step(boss, host, dt);
    }
}

/// Seeded boss with custom tuning that will not decide anything on its own.
fn tuned_boss(tuning: BossTuning) -> BossEntity {
    let mut boss = BossEntity::with_seed(tuning, Vec2::ZERO, 7);
    boss.set_decision_timer_for_test(100.0);
    boss
}

fn integrating_host(player_x: f32) -> TestHost {
    TestHost {
        integrate: true,
        ..TestHost::with_player(player_x)
    }
}

fn wide_slash_hits(host: &TestHost) -> usize {
    host.count(|e| {
        matches!(
            e,
            BossEvent::PlayerHit {
                tag: AttackTag::WideSlash,
                ..
            }
        )
    })
}

/// Tick until `done` holds or `max_seconds` pass. Returns whether `done` held.
fn run_until(
    boss: &mut BossEntity,
    host: &mut TestHost,
    dt: f32,
    max_seconds: f32,
    done: impl Fn(&BossEntity) -> bool,
) -> bool {
    let mut elapsed = 0.0;
    while elapsed < max_seconds {
        step(boss, host, dt);
        elapsed += dt;
        if done(boss) {
            return true;
        }
    }
    false
}

// ----------------------------------------------------------------------
// Health, enrage, death
// ----------------------------------------------------------------------

#[test]
fn test_enrage_below_half_hp() {
    let mut boss = passive_boss();
    boss.apply_damage(151, Vec2::X, 0.0);

    assert_eq!(boss.current_hp(), 149);
    assert!(boss.is_enraged());
    assert_eq!(boss.current_state(), CombatState::EnrageTransition);
}

#[test]
fn test_enrage_at_exactly_half_hp() {
    let mut boss = passive_boss();
    boss.apply_damage(150, Vec2::X, 0.0);

    assert_eq!(boss.current_hp(), 150);
    assert!(boss.is_enraged());
}

#[test]
fn test_lethal_damage_kills_and_later_damage_is_ignored() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(5.0);

    boss.apply_damage(400, Vec2::X, 2.0);
    assert_eq!(boss.current_hp(), 0);
    assert_eq!(boss.current_state(), CombatState::Dead);
    assert!(!boss.is_alive());

    boss.apply_damage(50, Vec2::X, 2.0);
    assert_eq!(boss.current_hp(), 0);

    step(&mut boss, &mut host, 0.1);
    assert_eq!(host.count(|e| matches!(e, BossEvent::Died)), 1);
    assert_eq!(host.count(|e| matches!(e, BossEvent::DamageTaken { .. })), 1);
}

#[test]
fn test_dead_is_terminal() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(1.0);
    boss.apply_damage(300, Vec2::X, 0.0);

    assert!(!boss.request_transition(CombatState::Idle));
    boss.stun_boss(1.0);
    assert_eq!(boss.stun_remaining(), 0.0);

    run(&mut boss, &mut host, 0.1, 30);
    assert_eq!(boss.current_state(), CombatState::Dead);
}

#[test]
fn test_hp_stays_in_bounds() {
    let mut boss = passive_boss();
    boss.apply_damage(-20, Vec2::X, 0.0);
    boss.apply_damage(0, Vec2::X, 0.0);
    assert_eq!(boss.current_hp(), boss.max_hp());

    boss.apply_damage(10_000, Vec2::X, 0.0);
    assert_eq!(boss.current_hp(), 0);
}

#[test]
fn test_enrage_happens_once() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(10.0);

    boss.apply_damage(151, Vec2::X, 0.0);
    assert!(run_until(&mut boss, &mut host, 0.1, 3.0, |b| {
        b.current_state() == CombatState::Idle
    }));
    assert!((boss.speed_multiplier() - 1.3).abs() < 1e-5);

    boss.apply_damage(10, Vec2::X, 2.0);
    boss.apply_damage(100, Vec2::X, 2.0);
    step(&mut boss, &mut host, 0.01);

    assert_eq!(boss.current_hp(), 39);
    assert!(boss.is_enraged());
    assert_eq!(host.count(|e| matches!(e, BossEvent::Enraged)), 1);
    assert!((boss.speed_multiplier() - 1.3).abs() < 1e-5);
}

#[test]
fn test_enrage_transition_ignores_stagger() {
    let mut boss = passive_boss();
    boss.apply_damage(151, Vec2::X, 0.0);
    boss.apply_damage(5, Vec2::X, 4.0);

    assert_eq!(boss.current_state(), CombatState::EnrageTransition);
    assert_eq!(boss.current_hp(), 144);
}

#[test]
fn test_damage_staggers_then_recovers() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(4.0);

    boss.apply_damage(10, Vec2::X, 5.0);
    assert_eq!(boss.current_state(), CombatState::Stagger);
    assert!((boss.velocity().x - 5.0).abs() < 1e-5);

    step(&mut boss, &mut host, 0.1);
    assert!(boss.velocity().x < 5.0);

    assert!(run_until(&mut boss, &mut host, 0.1, 1.0, |b| {
        b.current_state() == CombatState::Idle
    }));
}

#[test]
fn test_hit_while_staggered_applies_knockback_directly() {
    let mut boss = passive_boss();
    boss.apply_damage(10, Vec2::X, 3.0);
    assert_eq!(boss.current_state(), CombatState::Stagger);
    assert_eq!(boss.velocity().x, 3.0);

    boss.apply_damage(10, Vec2::NEG_X, 4.0);
    assert_eq!(boss.current_state(), CombatState::Stagger);
    assert_eq!(boss.velocity().x, -4.0);
    assert_eq!(boss.current_hp(), 280);
}

#[test]
fn test_damage_interrupts_attack_into_stagger() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(20.0);
    step(&mut boss, &mut host, 0.0);
    assert!(boss.request_transition(CombatState::AttackWideSlash));

    boss.apply_damage(10, Vec2::NEG_X, 2.0);
    assert_eq!(boss.current_state(), CombatState::Stagger);
    assert!(boss.phase_context().is_none());
    assert_eq!(boss.velocity().x, -2.0);
}

#[test]
fn test_cues_from_damage_reach_host_on_next_tick() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(10.0);

    boss.apply_damage(151, Vec2::X, 0.0);
    assert!(host.animations.is_empty());

    step(&mut boss, &mut host, 0.0);
    assert!(host.animations.iter().any(|name| name == "enrage"));
    assert!(host.sounds.iter().any(|clip| clip == "enrage_roar"));
    assert!(host.effects.iter().any(|effect| effect == "enrage_aura"));
    assert_eq!(host.shakes, 1);
}

// ----------------------------------------------------------------------
// Transitions
// ----------------------------------------------------------------------

#[test]
fn test_attack_cannot_interrupt_slam() {
    let mut boss = passive_boss();
    assert!(boss.request_transition(CombatState::AttackSlam));

    assert!(!boss.request_transition(CombatState::AttackWideSlash));
    assert_eq!(boss.current_state(), CombatState::AttackSlam);
}

#[test]
fn test_combo_allow_list() {
    let mut boss = passive_boss();
    assert!(boss.request_transition(CombatState::AttackCrossSlash));
    assert!(!boss.request_transition(CombatState::AttackSlam));
    assert_eq!(boss.current_state(), CombatState::AttackCrossSlash);

    let mut boss = passive_boss();
    assert!(boss.request_transition(CombatState::AttackSlam));
    assert!(boss.request_transition(CombatState::AttackSpin));
    assert!(boss.request_transition(CombatState::AttackSlamAttack));
    assert!(!boss.request_transition(CombatState::AttackSpin));
}

#[test]
fn test_non_attack_states_can_interrupt_attacks() {
    let mut boss = passive_boss();
    assert!(boss.request_transition(CombatState::AttackWideSlash));
    assert!(boss.request_transition(CombatState::Stagger));
    assert!(boss.phase_context().is_none());
    assert!(!boss.damage_window().is_active());
}

#[test]
fn test_same_state_request_is_noop() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(10.0);

    assert!(boss.request_transition(CombatState::AttackCrossSlash));
    run(&mut boss, &mut host, 0.1, 3);

    let time_in_state = boss.time_in_state();
    let elapsed = boss.phase_context().map(|ctx| ctx.elapsed);
    let changes = host.count(|e| matches!(e, BossEvent::StateChanged { .. }));

    assert!(!boss.request_transition(CombatState::AttackCrossSlash));
    step(&mut boss, &mut host, 0.0);

    assert_eq!(boss.time_in_state(), time_in_state);
    assert_eq!(boss.phase_context().map(|ctx| ctx.elapsed), elapsed);
    assert_eq!(
        host.count(|e| matches!(e, BossEvent::StateChanged { .. })),
        changes
    );
}

// ----------------------------------------------------------------------
// Damage window
// ----------------------------------------------------------------------

#[test]
fn test_hit_cooldown_blocks_second_hit() {
    let tuning = BossTuning::default();
    let mut window = DamageWindow::default();
    let tag: AttackTag = "crossslash".parse().expect("known tag");
    window.enable(tag);

    let first = window.try_hit(1.0, 1.0, 1.0, &tuning.hits);
    let second = window.try_hit(1.1, 1.0, 1.0, &tuning.hits);
    assert!(first.is_some());
    assert!(second.is_none());

    let later = window.try_hit(1.25, 1.0, -1.0, &tuning.hits);
    let hit = later.expect("cooldown elapsed");
    assert_eq!(hit.damage, tuning.hits.cross_slash.damage);
    assert!(hit.knockback.x < 0.0);
}

#[test]
fn test_boss_applies_cross_slash_once_within_cooldown() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(1.0);

    boss.enable_damage(AttackTag::CrossSlash);
    step(&mut boss, &mut host, 0.05);
    boss.enable_damage(AttackTag::CrossSlash);
    step(&mut boss, &mut host, 0.05);

    assert_eq!(
        host.count(|e| matches!(e, BossEvent::PlayerHit { tag: AttackTag::CrossSlash, .. })),
        1
    );
}

#[test]
fn test_window_ignores_targets_out_of_range() {
    let tuning = BossTuning::default();
    let mut window = DamageWindow::default();
    window.enable(AttackTag::Spin);

    assert!(window.try_hit(0.0, 1.6, 1.0, &tuning.hits).is_none());
    assert!(window.last_hit_at().is_none());

    window.disable();
    assert!(window.try_hit(1.0, 0.5, 1.0, &tuning.hits).is_none());
}

#[test]
fn test_attack_tag_parsing() {
    assert_eq!("SlamImpact".parse::<AttackTag>(), Ok(AttackTag::SlamImpact));
    assert_eq!("wideslash".parse::<AttackTag>(), Ok(AttackTag::WideSlash));
    assert!("uppercut".parse::<AttackTag>().is_err());
    assert_eq!(AttackTag::CrossSlash.to_string(), "crossslash");
}

// ----------------------------------------------------------------------
// Attacks
// ----------------------------------------------------------------------

#[test]
fn test_cross_slash_chains_on_hits() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(1.0);
    step(&mut boss, &mut host, 0.0);

    assert!(boss.request_transition(CombatState::AttackCrossSlash));
    assert!(run_until(&mut boss, &mut host, 0.02, 6.0, |b| {
        b.current_state() == CombatState::Idle
    }));

    assert_eq!(
        host.count(|e| matches!(e, BossEvent::PlayerHit { tag: AttackTag::CrossSlash, .. })),
        3
    );
    assert!(host.shakes >= 3);
    assert!(host.sounds.iter().any(|clip| clip == "cross_slash_telegraph"));
}

#[test]
fn test_cross_slash_whiff_returns_to_idle() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(8.0);
    step(&mut boss, &mut host, 0.0);

    assert!(boss.request_transition(CombatState::AttackCrossSlash));
    assert!(run_until(&mut boss, &mut host, 0.02, 1.2, |b| {
        b.current_state() == CombatState::Idle
    }));
    assert_eq!(host.count(|e| matches!(e, BossEvent::PlayerHit { .. })), 0);
    assert_eq!(boss.velocity().x, 0.0);
}

#[test]
fn test_slam_spin_times_out() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(50.0);
    step(&mut boss, &mut host, 0.0);

    assert!(boss.request_transition(CombatState::AttackSlam));
    assert!(boss.request_transition(CombatState::AttackSpin));
    assert_eq!(
        boss.slam_combo().map(|slam| slam.phase),
        Some(SlamPhase::Spinning)
    );

    run(&mut boss, &mut host, 0.05, 29);
    assert_eq!(boss.current_state(), CombatState::AttackSpin);

    run(&mut boss, &mut host, 0.05, 3);
    assert_eq!(boss.current_state(), CombatState::AttackSlamAttack);
    assert_eq!(
        boss.slam_combo().map(|slam| slam.phase),
        Some(SlamPhase::Slamming)
    );
}

#[test]
fn test_telegraph_survives_long_first_tick() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(20.0);
    step(&mut boss, &mut host, 0.0);
    assert!(boss.request_transition(CombatState::AttackCrossSlash));

    step(&mut boss, &mut host, 0.2);
    step(&mut boss, &mut host, 0.2);

    let telegraphs = host
        .sounds
        .iter()
        .filter(|clip| clip.as_str() == "cross_slash_telegraph")
        .count();
    assert_eq!(telegraphs, 1);
    assert_eq!(host.effects, vec!["telegraph_flash".to_string()]);
}

#[test]
fn test_slam_fall_timeout_impacts_in_the_air() {
    let mut boss = passive_boss();
    // Floor far below and no integration: the descent never lands.
    let mut host = TestHost {
        ground: -50.0,
        ..TestHost::with_player(1.0)
    };
    step(&mut boss, &mut host, 0.0);

    assert!(boss.request_transition(CombatState::AttackSlam));
    assert!(run_until(&mut boss, &mut host, 0.02, 5.0, |b| {
        b.current_state() == CombatState::Idle
    }));

    assert_eq!(host.count(|e| matches!(e, BossEvent::SlamImpact { .. })), 1);
    assert_eq!(
        host.count(|e| matches!(e, BossEvent::PlayerHit { tag: AttackTag::SlamImpact, .. })),
        1
    );
    assert!(!boss.is_grounded());
    assert!(!boss.is_slam_ready());
}

#[test]
fn test_jump_apex_event_starts_spin() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(20.0);
    step(&mut boss, &mut host, 0.0);

    boss.on_jump_apex();
    assert_eq!(boss.current_state(), CombatState::Idle);

    assert!(boss.request_transition(CombatState::AttackSlam));
    step(&mut boss, &mut host, 0.02);
    assert_eq!(boss.current_state(), CombatState::AttackSlam);

    boss.on_jump_apex();
    assert_eq!(boss.current_state(), CombatState::AttackSpin);
    assert_eq!(boss.slam_combo().map(|slam| slam.phase), Some(SlamPhase::Spinning));
    assert_eq!(boss.damage_window().tag(), Some(AttackTag::Spin));
}

#[test]
fn test_phase_end_skips_cross_slash_recovery() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(20.0);
    step(&mut boss, &mut host, 0.0);
    assert!(boss.request_transition(CombatState::AttackCrossSlash));

    // Ignored before the dash ends.
    run(&mut boss, &mut host, 0.02, 15);
    boss.on_attack_phase_end();
    step(&mut boss, &mut host, 0.02);
    assert_eq!(boss.current_state(), CombatState::AttackCrossSlash);

    run(&mut boss, &mut host, 0.02, 26);
    assert!(boss.phase_context().is_some_and(|ctx| ctx.elapsed > 0.8 && ctx.elapsed < 0.9));
    boss.on_attack_phase_end();
    step(&mut boss, &mut host, 0.02);
    assert_eq!(boss.current_state(), CombatState::Idle);
}

#[test]
fn test_slam_target_is_locked_at_combo_start() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(20.0);
    step(&mut boss, &mut host, 0.0);

    assert!(boss.request_transition(CombatState::AttackSlam));
    host.player = Some(Vec2::new(-20.0, 0.0));
    run(&mut boss, &mut host, 0.05, 4);

    let target = boss.slam_combo().map(|slam| slam.target_position);
    assert_eq!(target, Some(Vec2::new(20.0, 0.0)));
}

#[test]
fn test_slam_impact_fires_once_and_starts_cooldown() {
    let mut boss = passive_boss();
    let mut host = TestHost {
        integrate: true,
        ..TestHost::with_player(1.0)
    };
    step(&mut boss, &mut host, 0.0);
    assert!(boss.is_slam_ready());

    assert!(boss.request_transition(CombatState::AttackSlam));
    assert!(run_until(&mut boss, &mut host, 0.02, 5.0, |b| {
        b.current_state() == CombatState::Idle
    }));

    assert_eq!(host.count(|e| matches!(e, BossEvent::SlamImpact { .. })), 1);
    assert_eq!(
        host.count(|e| matches!(e, BossEvent::PlayerHit { tag: AttackTag::SlamImpact, .. })),
        1
    );
    assert!(boss.slam_combo().is_none());
    assert!(boss.pending_tasks().is_empty());
    assert!(!boss.is_slam_ready());
    assert!(boss.position().y <= boss.tuning().slam.ground_epsilon);
    assert!(boss.is_grounded());

    run(&mut boss, &mut host, 0.1, 61);
    assert!(boss.is_slam_ready());
}

#[test]
fn test_wide_slash_single_swing_when_calm() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(10.0);
    step(&mut boss, &mut host, 0.0);

    assert!(boss.request_transition(CombatState::AttackWideSlash));
    let mut max_swings = 0;
    for _ in 0..40 {
        step(&mut boss, &mut host, 0.05);
        if let Some(ctx) = boss.phase_context() {
            max_swings = max_swings.max(ctx.swings);
        }
    }

    assert_eq!(max_swings, 0);
    assert_eq!(boss.current_state(), CombatState::Idle);
}

#[test]
fn test_wide_slash_follow_up_when_enraged() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(10.0);
    boss.apply_damage(151, Vec2::X, 0.0);
    assert!(run_until(&mut boss, &mut host, 0.1, 3.0, |b| {
        b.current_state() == CombatState::Idle
    }));

    assert!(boss.request_transition(CombatState::AttackWideSlash));
    let mut followed_up = false;
    for _ in 0..60 {
        step(&mut boss, &mut host, 0.05);
        if let Some(ctx) = boss.phase_context() {
            followed_up |= ctx.swings == 1 && ctx.flags.follow_up_done;
        }
    }

    assert!(followed_up);
    assert_eq!(boss.current_state(), CombatState::Idle);
    assert_eq!(
        host.animations
            .iter()
            .filter(|name| name.as_str() == "wide_slash")
            .count(),
        2
    );
}

#[test]
fn test_wide_slash_hits_once_and_decelerates_up_close() {
    let mut boss = passive_boss();
    let mut host = integrating_host(2.0);
    step(&mut boss, &mut host, 0.0);
    assert!(boss.request_transition(CombatState::AttackWideSlash));

    let mut dashing = Vec::new();
    let mut slowing = Vec::new();
    for _ in 0..40 {
        step(&mut boss, &mut host, 0.05);
        let Some(elapsed) = boss.phase_context().map(|ctx| ctx.elapsed) else {
            break;
        };
        if elapsed < 0.39 {
            dashing.push(host.velocity.x);
        } else if elapsed > 0.41 && elapsed < 0.79 {
            slowing.push(host.velocity.x);
        }
    }

    assert!(dashing.iter().all(|vx| (vx - 4.5).abs() < 1e-4));
    assert!(!slowing.is_empty());
    assert!(slowing[0] < 4.5);
    assert!(slowing.windows(2).all(|pair| pair[1] < pair[0]));
    assert!(slowing.iter().all(|vx| *vx > 0.0));

    assert_eq!(boss.current_state(), CombatState::Idle);
    assert_eq!(host.velocity.x, 0.0);
    assert_eq!(wide_slash_hits(&host), 1);
}

#[test]
fn test_wide_slash_decel_does_not_depend_on_tick_rate() {
    fn speed_after_decel(dt: f32) -> f32 {
        let mut boss = passive_boss();
        let mut host = integrating_host(2.0);
        step(&mut boss, &mut host, 0.0);
        assert!(boss.request_transition(CombatState::AttackWideSlash));
        while boss.phase_context().is_some_and(|ctx| ctx.elapsed < 0.5999) {
            step(&mut boss, &mut host, dt);
        }
        host.velocity.x
    }

    // About 0.2s of drag at 5/s from a 4.5 u/s dash
    for dt in [0.05, 1.0 / 240.0] {
        let vx = speed_after_decel(dt);
        assert!(vx > 0.9 && vx < 2.5, "dt {}: vx {}", dt, vx);
    }
}

#[test]
fn test_enraged_wide_slash_follow_up_hits_again() {
    let mut boss = passive_boss();
    let mut host = integrating_host(2.0);
    boss.apply_damage(151, Vec2::X, 0.0);
    assert!(run_until(&mut boss, &mut host, 0.1, 3.0, |b| {
        b.current_state() == CombatState::Idle
    }));

    assert!(boss.request_transition(CombatState::AttackWideSlash));
    run(&mut boss, &mut host, 0.05, 60);

    assert_eq!(boss.current_state(), CombatState::Idle);
    assert_eq!(wide_slash_hits(&host), 2);
}

// ----------------------------------------------------------------------
// Walking
// ----------------------------------------------------------------------

#[test]
fn test_walk_forward_stops_at_close_range() {
    let mut tuning = BossTuning::default();
    tuning.walk.interrupt_chance = 0.0;
    let mut boss = tuned_boss(tuning);
    let mut host = integrating_host(6.0);
    step(&mut boss, &mut host, 0.0);

    assert!(boss.request_transition(CombatState::WalkForward));
    step(&mut boss, &mut host, 0.05);
    assert!((host.velocity.x - 2.5).abs() < 1e-5);

    assert!(run_until(&mut boss, &mut host, 0.05, 1.9, |b| {
        b.current_state() == CombatState::Idle
    }));
    let x = boss.position().x;
    assert!(x > 2.45 && x < 2.65, "stopped at {}", x);
    assert_eq!(host.velocity.x, 0.0);
}

#[test]
fn test_walk_forward_gives_up_after_max_duration() {
    let mut tuning = BossTuning::default();
    tuning.walk.interrupt_chance = 0.0;
    let mut boss = tuned_boss(tuning);
    let mut host = integrating_host(30.0);
    step(&mut boss, &mut host, 0.0);

    assert!(boss.request_transition(CombatState::WalkForward));
    assert!(run_until(&mut boss, &mut host, 0.05, 3.0, |b| {
        b.current_state() == CombatState::Idle
    }));
    let x = boss.position().x;
    assert!(x > 4.8 && x < 5.05, "walked to {}", x);
}

#[test]
fn test_walk_interrupt_attacks_within_mid_range() {
    let mut tuning = BossTuning::default();
    tuning.walk.interrupt_chance = 1.0;
    let mut boss = tuned_boss(tuning);
    let mut host = integrating_host(5.0);
    step(&mut boss, &mut host, 0.0);

    assert!(boss.request_transition(CombatState::WalkForward));
    assert!(run_until(&mut boss, &mut host, 0.05, 0.5, |b| {
        b.current_state() != CombatState::WalkForward
    }));
    assert_eq!(boss.current_state(), CombatState::AttackCrossSlash);
}

#[test]
fn test_walk_interrupt_idles_beyond_mid_range() {
    let mut tuning = BossTuning::default();
    tuning.walk.interrupt_chance = 1.0;
    let mut boss = tuned_boss(tuning);
    let mut host = integrating_host(20.0);
    step(&mut boss, &mut host, 0.0);

    assert!(boss.request_transition(CombatState::WalkForward));
    assert!(run_until(&mut boss, &mut host, 0.05, 0.5, |b| {
        b.current_state() != CombatState::WalkForward
    }));
    assert_eq!(boss.current_state(), CombatState::Idle);
}

#[test]
fn test_walk_back_retreats_for_back_duration() {
    let mut boss = passive_boss();
    let mut host = integrating_host(1.0);
    step(&mut boss, &mut host, 0.0);

    assert!(boss.request_transition(CombatState::WalkBack));
    step(&mut boss, &mut host, 0.05);
    // Backs away while still facing the player
    assert_eq!(boss.facing(), Facing::Right);
    assert!((host.velocity.x + 2.0).abs() < 1e-5);

    assert!(run_until(&mut boss, &mut host, 0.05, 1.0, |b| {
        b.current_state() == CombatState::Idle
    }));
    let x = boss.position().x;
    assert!(x > -1.25 && x < -1.05, "backed off to {}", x);
}

#[test]
fn test_walk_back_stops_once_out_of_close_range() {
    let mut boss = passive_boss();
    let mut host = integrating_host(3.0);
    step(&mut boss, &mut host, 0.0);

    assert!(boss.request_transition(CombatState::WalkBack));
    assert!(run_until(&mut boss, &mut host, 0.05, 0.45, |b| {
        b.current_state() == CombatState::Idle
    }));
    assert!(boss.position().x <= -0.45);
}

// ----------------------------------------------------------------------
// Idle decisions, stun, reset
// ----------------------------------------------------------------------

#[test]
fn test_turns_before_acting() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(-5.0);
    boss.set_facing_for_test(Facing::Right);
    boss.set_decision_timer_for_test(0.0);

    step(&mut boss, &mut host, 0.01);
    assert_eq!(boss.current_state(), CombatState::Idle);
    assert_eq!(boss.facing(), Facing::Left);
    assert!((boss.decision_timer() - 0.15).abs() < 1e-5);
    assert_eq!(host.facings, vec![Facing::Left]);

    step(&mut boss, &mut host, 0.2);
    assert_ne!(boss.current_state(), CombatState::Idle);
}

#[test]
fn test_enrage_switches_decision_table_and_cadence() {
    let mut tuning = BossTuning::default();
    tuning.decision.calm.far = DecisionBucket {
        candidates: vec![WeightedAction {
            action: Action::WalkForward,
            cumulative: 1.0,
        }],
        fallback: vec![Action::WalkForward],
    };
    tuning.decision.enraged.far = DecisionBucket {
        candidates: vec![WeightedAction {
            action: Action::WideSlash,
            cumulative: 1.0,
        }],
        fallback: vec![Action::WalkForward],
    };
    let mut boss = tuned_boss(tuning);
    let mut host = TestHost::with_player(10.0);
    step(&mut boss, &mut host, 0.0);

    boss.set_decision_timer_for_test(0.0);
    step(&mut boss, &mut host, 0.01);
    assert_eq!(boss.current_state(), CombatState::WalkForward);
    assert!((boss.decision_timer() - 1.0).abs() < 1e-5);

    assert!(boss.request_transition(CombatState::Idle));
    boss.apply_damage(151, Vec2::X, 0.0);
    assert!(run_until(&mut boss, &mut host, 0.1, 3.0, |b| {
        b.current_state() == CombatState::Idle
    }));

    boss.set_decision_timer_for_test(0.0);
    step(&mut boss, &mut host, 0.01);
    assert_eq!(boss.current_state(), CombatState::AttackWideSlash);
    assert!((boss.decision_timer() - 0.6).abs() < 1e-5);
}

#[test]
fn test_missing_player_keeps_boss_idle() {
    let mut boss = passive_boss();
    let mut host = TestHost::default();
    boss.set_decision_timer_for_test(0.0);

    run(&mut boss, &mut host, 0.1, 10);
    assert_eq!(boss.current_state(), CombatState::Idle);
    assert!(boss.decision_timer() <= 0.0);
}

#[test]
fn test_stun_freezes_processing() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(1.0);
    step(&mut boss, &mut host, 0.0);
    assert!(boss.request_transition(CombatState::AttackCrossSlash));
    run(&mut boss, &mut host, 0.1, 7);

    boss.stun_boss(0.5);
    assert_eq!(boss.current_state(), CombatState::Idle);
    assert!(!boss.damage_window().is_active());
    let decision_timer = boss.decision_timer();

    run(&mut boss, &mut host, 0.1, 4);
    assert_eq!(boss.time_in_state(), 0.0);
    assert_eq!(boss.decision_timer(), decision_timer);
    assert_eq!(boss.velocity().x, 0.0);
    assert!(boss.stun_remaining() > 0.0);

    run(&mut boss, &mut host, 0.1, 2);
    assert_eq!(boss.stun_remaining(), 0.0);
    step(&mut boss, &mut host, 0.1);
    assert!(boss.time_in_state() > 0.0);
    assert_eq!(host.count(|e| matches!(e, BossEvent::Stunned { .. })), 1);
}

#[test]
fn test_stun_ignores_non_positive_duration() {
    let mut boss = passive_boss();
    assert!(boss.request_transition(CombatState::WalkForward));
    boss.stun_boss(0.0);
    boss.stun_boss(f32::NAN);
    assert_eq!(boss.current_state(), CombatState::WalkForward);
}

#[test]
fn test_reset_rearms_boss() {
    let mut boss = passive_boss();
    let mut host = TestHost::with_player(1.0);
    step(&mut boss, &mut host, 0.0);
    boss.apply_damage(200, Vec2::X, 0.0);
    assert!(boss.is_enraged());

    boss.reset(Vec2::new(3.0, 0.0));
    assert_eq!(boss.current_hp(), boss.max_hp());
    assert!(!boss.is_enraged());
    assert_eq!(boss.current_state(), CombatState::Idle);
    assert!(boss.is_slam_ready());
    assert_eq!(boss.position(), Vec2::new(3.0, 0.0));
    assert_eq!(boss.speed_multiplier(), 1.0);
}

#[test]
fn test_same_seed_replays_same_fight() {
    let tuning = BossTuning::default();
    let record = |seed: u64| {
        let mut boss = BossEntity::with_seed(tuning.clone(), Vec2::ZERO, seed);
        let mut host = TestHost::with_player(4.0);
        run(&mut boss, &mut host, 0.05, 400);
        host.events
            .into_iter()
            .filter_map(|event| match event {
                BossEvent::StateChanged { to, .. } => Some(to),
                _ => None,
            })
            .collect::<Vec<_>>()
    };

    let first = record(7);
    assert!(!first.is_empty());
    assert_eq!(first, record(7));
}

#[test]
fn test_snapshot_serializes() {
    let boss = passive_boss();
    let json = serde_json::to_string(&boss.snapshot()).expect("snapshot serializes");
    assert!(json.contains("\"state\":\"Idle\""));
    assert!(json.contains("\"name\":\"Igris\""));
}

// ----------------------------------------------------------------------
// Decision policy and timed tasks
// ----------------------------------------------------------------------

#[test]
fn test_distance_buckets() {
    let ranges = BossTuning::default().ranges;
    assert_eq!(DistanceBucket::classify(1.0, &ranges), DistanceBucket::TooClose);
    assert_eq!(DistanceBucket::classify(1.5, &ranges), DistanceBucket::Close);
    assert_eq!(DistanceBucket::classify(3.5, &ranges), DistanceBucket::Close);
    assert_eq!(DistanceBucket::classify(5.0, &ranges), DistanceBucket::Mid);
    assert_eq!(DistanceBucket::classify(7.5, &ranges), DistanceBucket::Far);
}

#[test]
fn test_pick_action_uses_cumulative_weights() {
    let tuning = BossTuning::default();
    let close = tuning.decision.calm.bucket(DistanceBucket::Close);

    assert_eq!(pick_action(close, 0.1, true), Some(Action::CrossSlash));
    assert_eq!(pick_action(close, 0.6, true), Some(Action::WideSlash));
    assert_eq!(pick_action(close, 0.95, true), Some(Action::Slam));
}

#[test]
fn test_slam_on_cooldown_falls_back() {
    let tuning = BossTuning::default();
    let close = tuning.decision.calm.bucket(DistanceBucket::Close);
    let far = tuning.decision.calm.bucket(DistanceBucket::Far);

    assert_eq!(pick_action(close, 0.95, false), Some(Action::CrossSlash));
    assert_eq!(pick_action(far, 0.9, false), Some(Action::WalkForward));
    assert_eq!(pick_action(far, 0.2, false), Some(Action::WalkForward));
}

#[test]
fn test_exhausted_table_walks_forward() {
    let mut tuning = BossTuning::default();
    let close = &mut tuning.decision.calm.close;
    close.candidates.truncate(1);
    assert_eq!(pick_action(close, 0.99, true), Some(Action::WalkForward));

    close.candidates.clear();
    assert_eq!(pick_action(close, 0.1, true), None);
}

#[test]
fn test_timed_tasks_finish_in_order_and_cancel() {
    let mut tasks = TimedTasks::default();
    tasks.schedule(TaskKind::CloseDamageWindow, 0.15);
    tasks.schedule(TaskKind::CompleteSlamCombo, 1.0);
    assert_eq!(tasks.len(), 2);

    assert!(tasks.advance(0.1).is_empty());
    assert_eq!(tasks.advance(0.1), vec![TaskKind::CloseDamageWindow]);
    assert!(tasks.contains(TaskKind::CompleteSlamCombo));

    tasks.schedule(
        TaskKind::Hitstop {
            resume_velocity: Vec2::X,
        },
        0.08,
    );
    assert!(tasks.hitstop_active());

    tasks.cancel_all();
    assert!(tasks.is_empty());
    assert!(!tasks.hitstop_active());
}
