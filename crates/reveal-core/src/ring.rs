//! Expanding ring decal for the sphere scene.
//!
//! Every hover-enter edge re-arms the ring at elapsed 0, discarding whatever
//! ring was still expanding. The ring never deactivates on its own; once
//! saturated it keeps reporting `ring_progress == 1`.
//!
//! The same trigger also starts a shorter displacement pulse that pushes
//! vertices along the direction captured at the hover point.

use crate::constants::{DISPLACEMENT_DURATION_SEC, RING_DURATION_SEC};
use crate::frame::sanitize_dt;
use crate::reveal::displacement_direction;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RingPhase {
    Inactive,
    Active { elapsed: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingState {
    pub ring_progress: f32,
    pub ring_opacity: f32,
    pub displacement_progress: f32,
    pub displacement_direction: Vec3,
    pub initial_intersection: Vec3,
    pub elapsed: Option<f32>,
}

#[derive(Clone, Debug)]
pub struct RingAnimationController {
    phase: RingPhase,
    hovering: bool,
    ring_duration: f32,
    displacement_duration: f32,
    initial_intersection: Vec3,
    direction: Vec3,
}

impl Default for RingAnimationController {
    fn default() -> Self {
        Self::new(RING_DURATION_SEC, DISPLACEMENT_DURATION_SEC)
    }
}

impl RingAnimationController {
    pub fn new(ring_duration_sec: f32, displacement_duration_sec: f32) -> Self {
        Self {
            phase: RingPhase::Inactive,
            hovering: false,
            ring_duration: ring_duration_sec,
            displacement_duration: displacement_duration_sec,
            initial_intersection: Vec3::ZERO,
            direction: Vec3::ZERO,
        }
    }

    /// Re-arm on a hover-enter edge at `local_point`.
    pub fn trigger(&mut self, local_point: Vec3) {
        if let RingPhase::Active { elapsed } = self.phase {
            log::debug!("[ring] re-armed after {:.2}s", elapsed);
        }
        self.phase = RingPhase::Active { elapsed: 0.0 };
        self.hovering = true;
        self.initial_intersection = local_point;
        self.direction = displacement_direction(local_point);
    }

    /// Record whether the pointer currently intersects the surface.
    /// Selects between the fade-out (hovering) and fade-in opacity branches.
    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn advance(&mut self, dt: f32) {
        let dt = sanitize_dt(dt);
        if let RingPhase::Active { elapsed } = &mut self.phase {
            *elapsed += dt;
        }
    }

    #[inline]
    pub fn phase(&self) -> RingPhase {
        self.phase
    }

    #[inline]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn ring_progress(&self) -> f32 {
        match self.phase {
            RingPhase::Inactive => 0.0,
            RingPhase::Active { elapsed } => ramp(elapsed, self.ring_duration),
        }
    }

    pub fn ring_opacity(&self) -> f32 {
        match self.phase {
            RingPhase::Inactive => 0.0,
            RingPhase::Active { .. } => {
                let p = self.ring_progress();
                if self.hovering {
                    1.0 - p
                } else {
                    p
                }
            }
        }
    }

    pub fn displacement_progress(&self) -> f32 {
        match self.phase {
            RingPhase::Inactive => 0.0,
            RingPhase::Active { elapsed } => ramp(elapsed, self.displacement_duration),
        }
    }

    pub fn state(&self) -> RingState {
        RingState {
            ring_progress: self.ring_progress(),
            ring_opacity: self.ring_opacity(),
            displacement_progress: self.displacement_progress(),
            displacement_direction: self.direction,
            initial_intersection: self.initial_intersection,
            elapsed: match self.phase {
                RingPhase::Inactive => None,
                RingPhase::Active { elapsed } => Some(elapsed),
            },
        }
    }
}

#[inline]
fn ramp(elapsed: f32, duration: f32) -> f32 {
    if duration > 0.0 && duration.is_finite() {
        (elapsed / duration).clamp(0.0, 1.0)
    } else {
        1.0
    }
}
