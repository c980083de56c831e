//! Named uniform slots for one surface's shading stage.
//!
//! The frame loop writes the slots every frame from controller state; the
//! renderer packs them into the POD blocks below and uploads them. Slot
//! names match the uniform names used by the WGSL shaders' comments.

use crate::constants::{INTERSECTION_RADIUS, RING_COLOR, RING_WIDTH, UNSET_MOUSE_POS};
use crate::intersect::IntersectionResult;
use crate::reveal::RevealState;
use crate::ring::RingState;
use fnv::FnvHashMap;
use glam::Vec3;

pub mod names {
    // reveal (can) scene
    pub const MOUSE_POS: &str = "uMousePos";
    pub const PROGRESS: &str = "uProgress";
    pub const IS_PROGRESS: &str = "uIsProgress";
    pub const DIRECTION: &str = "uDirection";
    pub const TEXTURE: &str = "uTexture";

    // ripple (sphere) scene
    pub const MOUSE_INTERSECTION: &str = "uMouseIntersection";
    pub const INITIAL_INTERSECTION: &str = "uInitialIntersection";
    pub const INTERSECTION_RADIUS: &str = "uIntersectionRadius";
    pub const HAS_INTERSECTION: &str = "uHasIntersection";
    pub const ANIMATION_PROGRESS: &str = "uAnimationProgress";
    pub const DISPLACEMENT_DIRECTION: &str = "uDisplacementDirection";
    pub const RING_PROGRESS: &str = "uRingProgress";
    pub const RING_WIDTH: &str = "uRingWidth";
    pub const RING_COLOR: &str = "uRingColor";
    pub const RING_OPACITY: &str = "uRingOpacity";
    pub const DEBUG_MODE: &str = "uDebugMode";
}

/// Renderer-side texture id; the core never looks inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec3(Vec3),
    Color([f32; 3]),
    Texture(TextureHandle),
}

impl UniformValue {
    fn same_kind(&self, other: &UniformValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UniformSet {
    slots: FnvHashMap<&'static str, UniformValue>,
}

impl UniformSet {
    /// Slots used by the textured reveal shader.
    pub fn reveal(texture: TextureHandle) -> Self {
        let mut set = Self::default();
        set.declare(names::MOUSE_POS, UniformValue::Vec3(Vec3::from(UNSET_MOUSE_POS)));
        set.declare(names::PROGRESS, UniformValue::Float(0.0));
        set.declare(names::IS_PROGRESS, UniformValue::Int(0));
        set.declare(names::DIRECTION, UniformValue::Vec3(Vec3::ZERO));
        set.declare(names::TEXTURE, UniformValue::Texture(texture));
        set
    }

    /// Slots used by the ring/displacement shader.
    pub fn ripple(debug_mode: f32) -> Self {
        let mut set = Self::default();
        set.declare(names::MOUSE_INTERSECTION, UniformValue::Vec3(Vec3::ZERO));
        set.declare(names::INITIAL_INTERSECTION, UniformValue::Vec3(Vec3::ZERO));
        set.declare(names::INTERSECTION_RADIUS, UniformValue::Float(INTERSECTION_RADIUS));
        set.declare(names::HAS_INTERSECTION, UniformValue::Int(0));
        set.declare(names::ANIMATION_PROGRESS, UniformValue::Float(0.0));
        set.declare(names::DISPLACEMENT_DIRECTION, UniformValue::Vec3(Vec3::ZERO));
        set.declare(names::RING_PROGRESS, UniformValue::Float(0.0));
        set.declare(names::RING_WIDTH, UniformValue::Float(RING_WIDTH));
        set.declare(names::RING_COLOR, UniformValue::Color(RING_COLOR));
        set.declare(names::RING_OPACITY, UniformValue::Float(0.0));
        set.declare(names::DEBUG_MODE, UniformValue::Float(debug_mode));
        set
    }

    /// Add a slot with its initial value.
    pub fn declare(&mut self, name: &'static str, value: UniformValue) {
        self.slots.insert(name, value);
    }

    /// Overwrite an existing slot.
    ///
    /// Writing an undeclared slot, or changing a slot's kind, breaks the
    /// contract with the shader; debug builds panic, release builds drop the
    /// write and log it.
    pub fn set(&mut self, name: &'static str, value: UniformValue) {
        match self.slots.get_mut(name) {
            Some(slot) if slot.same_kind(&value) => *slot = value,
            Some(slot) => {
                debug_assert!(false, "uniform {name} written with {value:?}, declared as {slot:?}");
                log::warn!("[uniforms] kind mismatch on {}", name);
            }
            None => {
                debug_assert!(false, "uniform {name} is not declared");
                log::warn!("[uniforms] undeclared slot {}", name);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.slots.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn float(&self, name: &str) -> f32 {
        match self.get(name) {
            Some(UniformValue::Float(v)) => v,
            Some(UniformValue::Int(v)) => v as f32,
            _ => 0.0,
        }
    }

    pub fn vec3(&self, name: &str) -> Vec3 {
        match self.get(name) {
            Some(UniformValue::Vec3(v)) => v,
            Some(UniformValue::Color(c)) => Vec3::from(c),
            _ => Vec3::ZERO,
        }
    }

    pub fn texture(&self, name: &str) -> Option<TextureHandle> {
        match self.get(name) {
            Some(UniformValue::Texture(t)) => Some(t),
            _ => None,
        }
    }
}

/// Push reveal controller state into the reveal slots.
pub fn sync_reveal(uniforms: &mut UniformSet, reveal: &RevealState) {
    uniforms.set(names::MOUSE_POS, UniformValue::Vec3(reveal.initial_intersection));
    uniforms.set(names::PROGRESS, UniformValue::Float(reveal.progress));
    uniforms.set(names::IS_PROGRESS, UniformValue::Int(reveal.in_transition as i32));
    uniforms.set(names::DIRECTION, UniformValue::Vec3(reveal.direction));
}

/// Push this frame's hover result and ring state into the ripple slots.
/// The live hover point keeps its last value while the pointer is off the surface.
pub fn sync_ripple(uniforms: &mut UniformSet, hit: &IntersectionResult, ring: &RingState) {
    if let Some(p) = hit.local_point {
        uniforms.set(names::MOUSE_INTERSECTION, UniformValue::Vec3(p));
    }
    uniforms.set(names::HAS_INTERSECTION, UniformValue::Int(hit.hit() as i32));
    uniforms.set(names::INITIAL_INTERSECTION, UniformValue::Vec3(ring.initial_intersection));
    uniforms.set(names::DISPLACEMENT_DIRECTION, UniformValue::Vec3(ring.displacement_direction));
    uniforms.set(names::ANIMATION_PROGRESS, UniformValue::Float(ring.displacement_progress));
    uniforms.set(names::RING_PROGRESS, UniformValue::Float(ring.ring_progress));
    uniforms.set(names::RING_OPACITY, UniformValue::Float(ring.ring_opacity));
}

/// GPU block for the reveal shader (`RevealUniforms` in reveal.wgsl).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RevealUniforms {
    pub mouse_pos: [f32; 3],
    pub progress: f32,
    pub direction: [f32; 3],
    pub is_progress: f32,
}

impl From<&UniformSet> for RevealUniforms {
    fn from(u: &UniformSet) -> Self {
        Self {
            mouse_pos: u.vec3(names::MOUSE_POS).to_array(),
            progress: u.float(names::PROGRESS),
            direction: u.vec3(names::DIRECTION).to_array(),
            is_progress: u.float(names::IS_PROGRESS),
        }
    }
}

/// GPU block for the ripple shader (`RippleUniforms` in ripple.wgsl).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RippleUniforms {
    pub mouse_intersection: [f32; 3],
    pub has_intersection: f32,
    pub initial_intersection: [f32; 3],
    pub intersection_radius: f32,
    pub displacement_direction: [f32; 3],
    pub animation_progress: f32,
    pub ring_color: [f32; 3],
    pub ring_progress: f32,
    pub ring_width: f32,
    pub ring_opacity: f32,
    pub debug_mode: f32,
    pub _pad: f32,
}

impl From<&UniformSet> for RippleUniforms {
    fn from(u: &UniformSet) -> Self {
        Self {
            mouse_intersection: u.vec3(names::MOUSE_INTERSECTION).to_array(),
            has_intersection: u.float(names::HAS_INTERSECTION),
            initial_intersection: u.vec3(names::INITIAL_INTERSECTION).to_array(),
            intersection_radius: u.float(names::INTERSECTION_RADIUS),
            displacement_direction: u.vec3(names::DISPLACEMENT_DIRECTION).to_array(),
            animation_progress: u.float(names::ANIMATION_PROGRESS),
            ring_color: u.vec3(names::RING_COLOR).to_array(),
            ring_progress: u.float(names::RING_PROGRESS),
            ring_width: u.float(names::RING_WIDTH),
            ring_opacity: u.float(names::RING_OPACITY),
            debug_mode: u.float(names::DEBUG_MODE),
            _pad: 0.0,
        }
    }
}
