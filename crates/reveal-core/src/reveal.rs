//! Reveal ramp driven by hover enter and exit edges.
//!
//! ```text
//! Idle(rest) --enter--> Transitioning(from = rest, target = 1 - rest)
//! Idle(rest > 0) --exit--> Transitioning(from = rest, target = 0)
//! Transitioning --elapsed >= duration--> Idle(settled value)
//! ```
//!
//! Edges that arrive while transitioning are ignored.

use crate::constants::{REVEAL_DURATION_SEC, UNSET_MOUSE_POS};
use crate::frame::sanitize_dt;
use glam::Vec3;

/// Where progress lands when a ramp completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SettleMode {
    /// Stay at the ramp target; the next exit (or enter) runs the reverse ramp.
    #[default]
    HoldTarget,
    /// Drop back to 0 so every enter replays the same 0 → 1 ramp.
    SnapToRest,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealPhase {
    Idle { rest: f32 },
    Transitioning { from: f32, target: f32, elapsed: f32 },
}

/// Snapshot of the values the shading stage needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealState {
    pub progress: f32,
    pub direction: Vec3,
    pub in_transition: bool,
    pub initial_intersection: Vec3,
}

#[derive(Clone, Debug)]
pub struct RevealAnimationController {
    phase: RevealPhase,
    progress: f32,
    direction: Vec3,
    initial_intersection: Vec3,
    duration: f32,
    settle: SettleMode,
}

impl Default for RevealAnimationController {
    fn default() -> Self {
        Self::new(REVEAL_DURATION_SEC, SettleMode::default())
    }
}

impl RevealAnimationController {
    pub fn new(duration_sec: f32, settle: SettleMode) -> Self {
        Self {
            phase: RevealPhase::Idle { rest: 0.0 },
            progress: 0.0,
            direction: Vec3::ZERO,
            initial_intersection: Vec3::from(UNSET_MOUSE_POS),
            duration: duration_sec,
            settle,
        }
    }

    /// Start a ramp from the hover point `local_point` (object-local space).
    ///
    /// Returns `false` when the edge was swallowed because a ramp is running.
    pub fn on_enter(&mut self, local_point: Vec3) -> bool {
        let rest = match self.phase {
            RevealPhase::Idle { rest } => rest,
            RevealPhase::Transitioning { .. } => return false,
        };
        let target = if rest > 0.0 { 0.0 } else { 1.0 };
        self.initial_intersection = local_point;
        self.direction = displacement_direction(local_point);
        self.phase = RevealPhase::Transitioning {
            from: rest,
            target,
            elapsed: 0.0,
        };
        log::debug!("[reveal] start {:.0} -> {:.0}", rest, target);
        true
    }

    /// Run the reverse ramp back to 0 when the pointer leaves a revealed surface.
    ///
    /// Keeps the direction and anchor of the enter that revealed it. Returns
    /// `false` when a ramp is running or there is nothing to hide.
    pub fn on_exit(&mut self) -> bool {
        let rest = match self.phase {
            RevealPhase::Idle { rest } if rest > 0.0 => rest,
            _ => return false,
        };
        self.phase = RevealPhase::Transitioning {
            from: rest,
            target: 0.0,
            elapsed: 0.0,
        };
        log::debug!("[reveal] exit {:.0} -> 0", rest);
        true
    }

    /// Advance the running ramp by `dt` seconds. Bad deltas count as zero.
    pub fn advance(&mut self, dt: f32) {
        let dt = sanitize_dt(dt);
        let RevealPhase::Transitioning {
            from,
            target,
            elapsed,
        } = self.phase
        else {
            return;
        };
        let elapsed = elapsed + dt;
        let fraction = if self.duration > 0.0 && self.duration.is_finite() {
            (elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if fraction >= 1.0 {
            let rest = match self.settle {
                SettleMode::HoldTarget => target,
                SettleMode::SnapToRest => 0.0,
            };
            self.progress = rest;
            self.phase = RevealPhase::Idle { rest };
            log::debug!("[reveal] settled at {:.0}", rest);
        } else {
            self.progress = (from + (target - from) * fraction).clamp(0.0, 1.0);
            self.phase = RevealPhase::Transitioning {
                from,
                target,
                elapsed,
            };
        }
    }

    #[inline]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn in_transition(&self) -> bool {
        matches!(self.phase, RevealPhase::Transitioning { .. })
    }

    /// Target of the running ramp, if any.
    pub fn target(&self) -> Option<f32> {
        match self.phase {
            RevealPhase::Transitioning { target, .. } => Some(target),
            RevealPhase::Idle { .. } => None,
        }
    }

    pub fn state(&self) -> RevealState {
        RevealState {
            progress: self.progress,
            direction: self.direction,
            in_transition: self.in_transition(),
            initial_intersection: self.initial_intersection,
        }
    }
}

/// Unit vector from a local hit point toward the local origin.
/// A hit exactly at the origin has no direction and yields zero.
#[inline]
pub fn displacement_direction(local_point: Vec3) -> Vec3 {
    (Vec3::ZERO - local_point).normalize_or_zero()
}
