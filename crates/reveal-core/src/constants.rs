use glam::Vec3;

// Shared tuning constants for both scene variants.

// Animation timing (seconds)
pub const REVEAL_DURATION_SEC: f32 = 1.0; // one full reveal ramp
pub const RING_DURATION_SEC: f32 = 1.0; // ring expands from 0 to full radius
pub const DISPLACEMENT_DURATION_SEC: f32 = 0.8; // sphere push/pull pulse

// Sphere decal
pub const INTERSECTION_RADIUS: f32 = 0.2; // highlight radius around the hover point
pub const RING_WIDTH: f32 = 0.05;
pub const RING_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

// Can model placement
pub const CAN_TILT_Z: f32 = std::f32::consts::PI * 0.1; // fixed roll applied to the model
pub const CAN_SPIN_RATE: f32 = 1.0; // radians about Y per second of elapsed time

// Hover point before the first hit; matches the pointer's resting corner
pub const UNSET_MOUSE_POS: [f32; 3] = [-1.0, -1.0, -1.0];

// Camera
pub const CAMERA_FOVY_DEG: f32 = 40.0;
pub const CAMERA_ZNEAR: f32 = 0.01;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const CAMERA_Z: f32 = 10.0; // eye distance along +Z looking at the origin

// Primitive sphere tessellation
pub const SPHERE_RADIUS: f32 = 1.0;
pub const SPHERE_WIDTH_SEGMENTS: u32 = 32;
pub const SPHERE_HEIGHT_SEGMENTS: u32 = 32;

// Acceleration structure
pub const BVH_LEAF_TRIANGLES: usize = 4; // split until a node holds at most this many
pub const BVH_STACK_INLINE: usize = 64; // traversal stack entries kept off the heap

// Default asset locations, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "assets/model/canBottle.glb";
pub const DEFAULT_TEXTURE_PATH: &str = "assets/texture.png";

#[inline]
pub fn camera_eye() -> Vec3 {
    Vec3::new(0.0, 0.0, CAMERA_Z)
}
