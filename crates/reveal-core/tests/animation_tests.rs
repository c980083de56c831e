// Host-side tests for the reveal ramp and ring decal state machines.

use glam::Vec3;
use reveal_core::reveal::{displacement_direction, RevealPhase};
use reveal_core::ring::RingPhase;
use reveal_core::{RevealAnimationController, RingAnimationController, SettleMode};

const HIT: Vec3 = Vec3::new(0.0, 0.0, 1.0);

#[test]
fn enter_then_full_duration_reaches_exactly_one() {
    let mut reveal = RevealAnimationController::default();
    assert_eq!(reveal.phase(), RevealPhase::Idle { rest: 0.0 });

    assert!(reveal.on_enter(HIT));
    assert!(reveal.in_transition());
    assert_eq!(reveal.target(), Some(1.0));

    for _ in 0..70 {
        reveal.advance(1.0 / 60.0);
    }
    assert_eq!(reveal.progress(), 1.0);
    assert!(!reveal.in_transition());
    assert_eq!(reveal.phase(), RevealPhase::Idle { rest: 1.0 });
}

#[test]
fn progress_ramps_linearly() {
    let mut reveal = RevealAnimationController::new(2.0, SettleMode::HoldTarget);
    reveal.on_enter(HIT);
    reveal.advance(0.5);
    assert!((reveal.progress() - 0.25).abs() < 1e-6);
    reveal.advance(0.5);
    assert!((reveal.progress() - 0.5).abs() < 1e-6);
}

#[test]
fn enter_mid_ramp_is_ignored() {
    let mut reveal = RevealAnimationController::default();
    reveal.on_enter(HIT);
    reveal.advance(0.4);

    let before = reveal.state();
    let target = reveal.target();
    assert!(!reveal.on_enter(Vec3::new(1.0, 0.0, 0.0)));

    let after = reveal.state();
    assert_eq!(reveal.target(), target);
    assert_eq!(after.direction, before.direction);
    assert_eq!(after.initial_intersection, before.initial_intersection);
    assert_eq!(after.progress, before.progress);
}

#[test]
fn second_enter_after_settling_runs_reverse_ramp() {
    let mut reveal = RevealAnimationController::default();
    reveal.on_enter(HIT);
    reveal.advance(1.5);
    assert_eq!(reveal.progress(), 1.0);

    assert!(reveal.on_enter(Vec3::new(0.0, 1.0, 0.0)));
    assert_eq!(reveal.target(), Some(0.0));
    reveal.advance(0.25);
    assert!((reveal.progress() - 0.75).abs() < 1e-6);
    reveal.advance(10.0);
    assert_eq!(reveal.progress(), 0.0);
    assert_eq!(reveal.phase(), RevealPhase::Idle { rest: 0.0 });
}

#[test]
fn exit_after_settling_runs_reverse_ramp() {
    let mut reveal = RevealAnimationController::default();
    reveal.on_enter(HIT);
    reveal.advance(1.5);
    let revealed = reveal.state();

    assert!(reveal.on_exit());
    assert_eq!(reveal.target(), Some(0.0));
    // the anchor of the reveal is kept for the way back
    assert_eq!(reveal.state().direction, revealed.direction);
    assert_eq!(reveal.state().initial_intersection, HIT);
    reveal.advance(0.5);
    assert!((reveal.progress() - 0.5).abs() < 1e-6);
    reveal.advance(0.6);
    assert_eq!(reveal.progress(), 0.0);
    assert_eq!(reveal.phase(), RevealPhase::Idle { rest: 0.0 });
}

#[test]
fn exit_is_ignored_mid_ramp_and_at_zero() {
    let mut reveal = RevealAnimationController::default();
    assert!(!reveal.on_exit());
    assert_eq!(reveal.phase(), RevealPhase::Idle { rest: 0.0 });

    reveal.on_enter(HIT);
    reveal.advance(0.3);
    assert!(!reveal.on_exit());
    assert_eq!(reveal.target(), Some(1.0));

    // snapping back leaves nothing to hide
    let mut snap = RevealAnimationController::new(1.0, SettleMode::SnapToRest);
    snap.on_enter(HIT);
    snap.advance(1.0);
    assert!(!snap.on_exit());
    assert!(!snap.in_transition());
}

#[test]
fn snap_to_rest_replays_forward_ramp() {
    let mut reveal = RevealAnimationController::new(1.0, SettleMode::SnapToRest);
    reveal.on_enter(HIT);
    reveal.advance(0.5);
    assert!((reveal.progress() - 0.5).abs() < 1e-6);
    reveal.advance(0.6);
    assert_eq!(reveal.progress(), 0.0);
    assert!(!reveal.in_transition());

    reveal.on_enter(HIT);
    assert_eq!(reveal.target(), Some(1.0));
}

#[test]
fn bad_deltas_never_leave_unit_range() {
    let mut reveal = RevealAnimationController::default();
    reveal.on_enter(HIT);
    for dt in [f32::NAN, -1.0, f32::NEG_INFINITY, 0.3, f32::INFINITY, 0.2] {
        reveal.advance(dt);
        let p = reveal.progress();
        assert!(p.is_finite());
        assert!((0.0..=1.0).contains(&p), "progress {p} after dt {dt}");
    }
}

#[test]
fn nan_and_negative_deltas_count_as_zero() {
    let mut reveal = RevealAnimationController::default();
    reveal.on_enter(HIT);
    reveal.advance(0.3);
    reveal.advance(f32::NAN);
    reveal.advance(-5.0);
    assert!((reveal.progress() - 0.3).abs() < 1e-6);
    assert!(reveal.in_transition());
}

#[test]
fn progress_stays_in_range_over_many_cycles() {
    let mut reveal = RevealAnimationController::default();
    let mut hovering = false;
    for frame in 0..2000 {
        // toggle hover every 37 frames
        let now_hovering = (frame / 37) % 2 == 0;
        if now_hovering && !hovering {
            reveal.on_enter(HIT);
        }
        hovering = now_hovering;
        reveal.advance(1.0 / 60.0);
        let p = reveal.progress();
        assert!((0.0..=1.0).contains(&p));
    }
}

#[test]
fn direction_points_from_hit_toward_origin() {
    let mut reveal = RevealAnimationController::default();
    reveal.on_enter(Vec3::new(0.0, 0.0, 2.0));
    assert_eq!(reveal.state().direction, Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(displacement_direction(Vec3::ZERO), Vec3::ZERO);
}

#[test]
fn ring_fades_out_while_hovering() {
    let mut ring = RingAnimationController::default();
    assert_eq!(ring.phase(), RingPhase::Inactive);
    assert_eq!(ring.ring_opacity(), 0.0);

    ring.trigger(HIT);
    assert_eq!(ring.ring_opacity(), 1.0);

    let mut last = ring.ring_opacity();
    for _ in 0..30 {
        ring.advance(1.0 / 30.0);
        let o = ring.ring_opacity();
        assert!(o <= last + 1e-6, "opacity rose from {last} to {o}");
        last = o;
    }
    ring.advance(0.05);
    assert!(ring.ring_opacity().abs() < 1e-5);
    assert_eq!(ring.ring_progress(), 1.0);
}

#[test]
fn ring_fades_in_after_pointer_leaves() {
    let mut ring = RingAnimationController::default();
    ring.trigger(HIT);
    ring.advance(0.01);
    ring.set_hovering(false);

    let mut last = ring.ring_opacity();
    assert!(last < 0.05);
    for _ in 0..40 {
        ring.advance(1.0 / 30.0);
        let o = ring.ring_opacity();
        assert!(o + 1e-6 >= last, "opacity fell from {last} to {o}");
        last = o;
    }
    assert_eq!(last, 1.0);
}

#[test]
fn ring_stays_active_once_saturated() {
    let mut ring = RingAnimationController::default();
    ring.trigger(HIT);
    ring.advance(100.0);
    assert!(matches!(ring.phase(), RingPhase::Active { .. }));
    assert_eq!(ring.ring_progress(), 1.0);
    assert_eq!(ring.displacement_progress(), 1.0);
}

#[test]
fn retrigger_restarts_the_ring() {
    let mut ring = RingAnimationController::default();
    ring.trigger(HIT);
    ring.advance(0.6);
    assert!((ring.ring_progress() - 0.6).abs() < 1e-6);

    let other = Vec3::new(1.0, 0.0, 0.0);
    ring.trigger(other);
    assert_eq!(ring.phase(), RingPhase::Active { elapsed: 0.0 });
    assert_eq!(ring.ring_progress(), 0.0);
    let state = ring.state();
    assert_eq!(state.initial_intersection, other);
    assert_eq!(state.displacement_direction, Vec3::new(-1.0, 0.0, 0.0));
}

#[test]
fn displacement_pulse_is_shorter_than_ring() {
    let mut ring = RingAnimationController::default();
    ring.trigger(HIT);
    ring.advance(0.8);
    assert!((ring.displacement_progress() - 1.0).abs() < 1e-6);
    assert!(ring.ring_progress() < 1.0);
}

#[test]
fn ring_ignores_bad_deltas() {
    let mut ring = RingAnimationController::default();
    ring.trigger(HIT);
    ring.advance(f32::NAN);
    ring.advance(-3.0);
    assert_eq!(ring.state().elapsed, Some(0.0));
}
