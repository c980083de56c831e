use crate::constants::{CAN_SPIN_RATE, CAN_TILT_Z, REVEAL_DURATION_SEC};
use crate::frame::HoverEdge;
use crate::intersect::{IntersectionResult, SurfaceGeometry};
use crate::mesh::Mesh;
use crate::reveal::{RevealAnimationController, SettleMode};
use crate::ring::RingAnimationController;
use crate::uniforms::{sync_reveal, sync_ripple, TextureHandle, UniformSet};
use glam::Mat4;

/// Which effect a surface runs, with its controller.
#[derive(Clone, Debug)]
pub enum SurfaceAnimation {
    Reveal(RevealAnimationController),
    Ripple(RingAnimationController),
}

/// Fixed roll about Z plus a constant spin about Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub tilt_z: f32,
    pub rate_y: f32,
}

impl Spin {
    pub fn matrix(&self, elapsed: f32) -> Mat4 {
        Mat4::from_rotation_y(elapsed * self.rate_y) * Mat4::from_rotation_z(self.tilt_z)
    }
}

/// A renderable, pickable object: geometry, shader inputs and its effect state.
#[derive(Clone, Debug)]
pub struct Surface {
    pub label: &'static str,
    pub geometry: SurfaceGeometry,
    pub uniforms: UniformSet,
    pub animation: SurfaceAnimation,
    pub spin: Option<Spin>,
    previous_hit: bool,
    last_hit: IntersectionResult,
}

impl Surface {
    pub fn new(
        label: &'static str,
        geometry: SurfaceGeometry,
        uniforms: UniformSet,
        animation: SurfaceAnimation,
    ) -> Self {
        Self {
            label,
            geometry,
            uniforms,
            animation,
            spin: None,
            previous_hit: false,
            last_hit: IntersectionResult::MISS,
        }
    }

    /// Textured model running the reveal ramp, tilted and spinning.
    pub fn reveal(mesh: Mesh, texture: TextureHandle, settle: SettleMode) -> Self {
        let mut surface = Self::new(
            "reveal",
            SurfaceGeometry::new(mesh),
            UniformSet::reveal(texture),
            SurfaceAnimation::Reveal(RevealAnimationController::new(REVEAL_DURATION_SEC, settle)),
        );
        surface.spin = Some(Spin {
            tilt_z: CAN_TILT_Z,
            rate_y: CAN_SPIN_RATE,
        });
        surface.place(0.0);
        surface
    }

    /// Primitive running the ring decal and displacement pulse.
    pub fn ripple(mesh: Mesh, debug_mode: f32) -> Self {
        Self::new(
            "ripple",
            SurfaceGeometry::new(mesh),
            UniformSet::ripple(debug_mode),
            SurfaceAnimation::Ripple(RingAnimationController::default()),
        )
    }

    /// Recompute the model transform for the current time.
    pub fn place(&mut self, elapsed: f32) {
        if let Some(spin) = self.spin {
            self.geometry.model = spin.matrix(elapsed);
        }
    }

    #[inline]
    pub fn previous_hit(&self) -> bool {
        self.previous_hit
    }

    #[inline]
    pub fn last_hit(&self) -> &IntersectionResult {
        &self.last_hit
    }

    /// Record this frame's query result and return the hover edge it forms
    /// with the previous frame's.
    pub fn observe(&mut self, hit: IntersectionResult) -> HoverEdge {
        let edge = HoverEdge::detect(self.previous_hit, hit.hit());
        self.previous_hit = hit.hit();
        self.last_hit = hit;
        edge
    }

    /// Advance the controller by `dt`, then apply this frame's edge.
    pub fn animate(&mut self, edge: HoverEdge, dt: f32) {
        let point = self.last_hit.local_point;
        match &mut self.animation {
            SurfaceAnimation::Reveal(reveal) => {
                reveal.advance(dt);
                match (edge, point) {
                    (HoverEdge::Enter, Some(p)) => {
                        reveal.on_enter(p);
                    }
                    (HoverEdge::Exit, _) => {
                        reveal.on_exit();
                    }
                    _ => {}
                }
            }
            SurfaceAnimation::Ripple(ring) => {
                ring.advance(dt);
                ring.set_hovering(point.is_some());
                if let (HoverEdge::Enter, Some(p)) = (edge, point) {
                    ring.trigger(p);
                }
            }
        }
    }

    /// Write controller state into the uniform slots.
    pub fn sync_uniforms(&mut self) {
        match &self.animation {
            SurfaceAnimation::Reveal(reveal) => sync_reveal(&mut self.uniforms, &reveal.state()),
            SurfaceAnimation::Ripple(ring) => {
                sync_ripple(&mut self.uniforms, &self.last_hit, &ring.state())
            }
        }
    }

    pub fn reveal_controller(&self) -> Option<&RevealAnimationController> {
        match &self.animation {
            SurfaceAnimation::Reveal(c) => Some(c),
            SurfaceAnimation::Ripple(_) => None,
        }
    }

    pub fn ring_controller(&self) -> Option<&RingAnimationController> {
        match &self.animation {
            SurfaceAnimation::Ripple(c) => Some(c),
            SurfaceAnimation::Reveal(_) => None,
        }
    }
}
