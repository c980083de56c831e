// Host-side tests for pushing controller state into named shader slots.

use glam::Vec3;
use reveal_core::constants::{INTERSECTION_RADIUS, RING_COLOR, RING_WIDTH, UNSET_MOUSE_POS};
use reveal_core::uniforms::{names, sync_reveal, sync_ripple};
use reveal_core::{
    IntersectionResult, RevealAnimationController, RevealUniforms, RingAnimationController,
    RippleUniforms, TextureHandle, UniformSet, UniformValue, REVEAL_WGSL, RIPPLE_WGSL,
};

fn hit_at(p: Vec3) -> IntersectionResult {
    IntersectionResult {
        local_point: Some(p),
        world_point: Some(p),
        distance: 9.0,
    }
}

#[test]
fn reveal_set_declares_shader_slots() {
    let set = UniformSet::reveal(TextureHandle(7));
    assert_eq!(set.len(), 5);
    assert_eq!(set.vec3(names::MOUSE_POS), Vec3::from(UNSET_MOUSE_POS));
    assert_eq!(set.float(names::PROGRESS), 0.0);
    assert_eq!(set.get(names::IS_PROGRESS), Some(UniformValue::Int(0)));
    assert_eq!(set.texture(names::TEXTURE), Some(TextureHandle(7)));
}

#[test]
fn ripple_set_carries_static_values() {
    let set = UniformSet::ripple(2.0);
    assert_eq!(set.float(names::INTERSECTION_RADIUS), INTERSECTION_RADIUS);
    assert_eq!(set.float(names::RING_WIDTH), RING_WIDTH);
    assert_eq!(set.vec3(names::RING_COLOR), Vec3::from(RING_COLOR));
    assert_eq!(set.float(names::DEBUG_MODE), 2.0);
    assert_eq!(set.texture(names::TEXTURE), None);
}

#[test]
fn sync_reveal_writes_controller_state() {
    let mut set = UniformSet::reveal(TextureHandle(0));
    let mut reveal = RevealAnimationController::default();
    let p = Vec3::new(0.0, 0.5, 0.0);
    reveal.on_enter(p);
    reveal.advance(0.5);

    sync_reveal(&mut set, &reveal.state());
    assert_eq!(set.vec3(names::MOUSE_POS), p);
    assert!((set.float(names::PROGRESS) - 0.5).abs() < 1e-6);
    assert_eq!(set.get(names::IS_PROGRESS), Some(UniformValue::Int(1)));
    assert_eq!(set.vec3(names::DIRECTION), Vec3::new(0.0, -1.0, 0.0));
}

#[test]
fn full_cycle_returns_progress_slots_to_start() {
    let mut set = UniformSet::reveal(TextureHandle(0));
    let mut reveal = RevealAnimationController::default();
    sync_reveal(&mut set, &reveal.state());
    let start_progress = set.float(names::PROGRESS);
    let start_flag = set.get(names::IS_PROGRESS);

    // enter → full ramp → exit → full reverse ramp
    reveal.on_enter(Vec3::Z);
    for _ in 0..80 {
        reveal.advance(1.0 / 60.0);
        sync_reveal(&mut set, &reveal.state());
    }
    assert_eq!(set.float(names::PROGRESS), 1.0);
    assert!(reveal.on_exit());
    for _ in 0..80 {
        reveal.advance(1.0 / 60.0);
        sync_reveal(&mut set, &reveal.state());
    }

    assert!((set.float(names::PROGRESS) - start_progress).abs() < 1e-6);
    assert_eq!(set.get(names::IS_PROGRESS), start_flag);
}

#[test]
fn sync_ripple_keeps_last_point_on_miss() {
    let mut set = UniformSet::ripple(1.0);
    let mut ring = RingAnimationController::default();
    let p = Vec3::new(0.0, 0.0, 1.0);
    ring.trigger(p);
    sync_ripple(&mut set, &hit_at(p), &ring.state());
    assert_eq!(set.vec3(names::MOUSE_INTERSECTION), p);
    assert_eq!(set.float(names::HAS_INTERSECTION), 1.0);
    assert_eq!(set.float(names::RING_OPACITY), 1.0);
    assert_eq!(set.vec3(names::INITIAL_INTERSECTION), p);
    assert_eq!(set.vec3(names::DISPLACEMENT_DIRECTION), Vec3::new(0.0, 0.0, -1.0));

    ring.set_hovering(false);
    ring.advance(0.5);
    sync_ripple(&mut set, &IntersectionResult::MISS, &ring.state());
    assert_eq!(set.vec3(names::MOUSE_INTERSECTION), p);
    assert_eq!(set.float(names::HAS_INTERSECTION), 0.0);
    assert!((set.float(names::RING_PROGRESS) - 0.5).abs() < 1e-6);
    assert!((set.float(names::ANIMATION_PROGRESS) - 0.625).abs() < 1e-6);
}

#[test]
fn gpu_blocks_match_wgsl_layout() {
    assert_eq!(std::mem::size_of::<RevealUniforms>(), 32);
    assert_eq!(std::mem::size_of::<RippleUniforms>(), 80);
    assert_eq!(std::mem::size_of::<RippleUniforms>() % 16, 0);
}

#[test]
fn shaders_read_every_uploaded_field() {
    for field in ["mouse_pos", "progress", "direction", "is_progress"] {
        assert!(REVEAL_WGSL.contains(&format!("fx.{field}")), "reveal ignores {field}");
    }
    for field in [
        "mouse_intersection",
        "has_intersection",
        "initial_intersection",
        "intersection_radius",
        "displacement_direction",
        "animation_progress",
        "ring_color",
        "ring_progress",
        "ring_width",
        "ring_opacity",
        "debug_mode",
    ] {
        assert!(RIPPLE_WGSL.contains(&format!("fx.{field}")), "ripple ignores {field}");
    }
    assert!(REVEAL_WGSL.contains("scene.time"));
}

#[test]
fn gpu_blocks_pack_from_sets() {
    let mut set = UniformSet::reveal(TextureHandle(0));
    set.set(names::PROGRESS, UniformValue::Float(0.4));
    set.set(names::IS_PROGRESS, UniformValue::Int(1));
    let block = RevealUniforms::from(&set);
    assert_eq!(block.mouse_pos, UNSET_MOUSE_POS);
    assert_eq!(block.progress, 0.4);
    assert_eq!(block.is_progress, 1.0);

    let block = RippleUniforms::from(&UniformSet::ripple(1.0));
    assert_eq!(block.ring_color, RING_COLOR);
    assert_eq!(block.ring_width, RING_WIDTH);
    assert_eq!(block.intersection_radius, INTERSECTION_RADIUS);
    assert_eq!(block.debug_mode, 1.0);
    assert_eq!(bytemuck::bytes_of(&block).len(), 80);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "not declared")]
fn writing_undeclared_slot_panics_in_debug() {
    let mut set = UniformSet::reveal(TextureHandle(0));
    set.set(names::RING_OPACITY, UniformValue::Float(1.0));
}
