//! Per-frame orchestration.
//!
//! One `tick` runs, in order: install surfaces finished by the loader, advance
//! the clock, apply the latest pointer sample, then for every loaded surface
//! query → detect edge → animate → sync uniforms, and finally hand the scene
//! to the presenter.

use crate::camera::Camera;
use crate::intersect::{query, IntersectionResult};
use crate::pointer::PointerTracker;
use crate::surface::Surface;
use glam::Vec2;
use instant::Instant;
use smallvec::SmallVec;
use std::sync::mpsc::{Receiver, TryRecvError};

/// Clamp a time delta to something safe to feed into a ramp.
/// Negative, NaN and infinite deltas become zero.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEdge {
    Enter,
    Exit,
    None,
}

impl HoverEdge {
    #[inline]
    pub fn detect(previous_hit: bool, current_hit: bool) -> Self {
        match (previous_hit, current_hit) {
            (false, true) => HoverEdge::Enter,
            (true, false) => HoverEdge::Exit,
            _ => HoverEdge::None,
        }
    }
}

/// Monotonic frame clock.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    elapsed: f32,
    last_instant: Option<Instant>,
}

impl FrameClock {
    /// Advance by an explicit delta; returns the delta actually applied.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = sanitize_dt(dt);
        self.elapsed += dt;
        dt
    }

    /// Advance by the wall time since the previous call. The first call yields zero.
    pub fn advance_to(&mut self, now: Instant) -> f32 {
        let dt = match self.last_instant {
            Some(last) if now > last => (now - last).as_secs_f32(),
            _ => 0.0,
        };
        self.last_instant = Some(now);
        self.advance(dt)
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Values every per-surface step in a frame sees.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    pub camera: &'a Camera,
    pub pointer_ndc: Vec2,
    pub elapsed: f32,
    pub dt: f32,
}

/// Display boundary: receives the camera and every loaded surface once per frame.
pub trait Presenter {
    fn present(&mut self, camera: &Camera, surfaces: &[(SlotId, &Surface)]);
}

/// Raw pointer sample in window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Identifies where a surface lands once loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(pub usize);

/// A finished load handed across the loader boundary.
pub struct LoadedSurface {
    pub slot: SlotId,
    pub surface: Surface,
}

#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    pub elapsed: f32,
    pub dt: f32,
    pub edges: SmallVec<[(SlotId, HoverEdge); 4]>,
}

pub struct FrameLoop {
    camera: Camera,
    clock: FrameClock,
    pointer: PointerTracker,
    pending_sample: Option<PointerSample>,
    slots: Vec<Option<Surface>>,
    inbox: Option<Receiver<LoadedSurface>>,
}

impl FrameLoop {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            clock: FrameClock::default(),
            pointer: PointerTracker::default(),
            pending_sample: None,
            slots: Vec::new(),
            inbox: None,
        }
    }

    /// Reserve a slot for a surface that will arrive later.
    pub fn reserve_slot(&mut self) -> SlotId {
        self.slots.push(None);
        SlotId(self.slots.len() - 1)
    }

    /// Put a fully built surface into its slot. Takes effect from the next tick.
    pub fn install(&mut self, slot: SlotId, surface: Surface) {
        if slot.0 >= self.slots.len() {
            self.slots.resize_with(slot.0 + 1, || None);
        }
        log::info!(
            "[frame] installed {} surface in slot {} ({} triangles)",
            surface.label,
            slot.0,
            surface.geometry.mesh.triangle_count()
        );
        self.slots[slot.0] = Some(surface);
    }

    /// Receive surfaces from a background loader.
    pub fn attach_loader(&mut self, inbox: Receiver<LoadedSurface>) {
        self.inbox = Some(inbox);
    }

    /// Last-value-wins pointer input; applied at the start of the next tick.
    pub fn on_pointer_move(&mut self, sample: PointerSample) {
        self.pending_sample = Some(sample);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn surface(&self, slot: SlotId) -> Option<&Surface> {
        self.slots.get(slot.0).and_then(Option::as_ref)
    }

    pub fn surface_mut(&mut self, slot: SlotId) -> Option<&mut Surface> {
        self.slots.get_mut(slot.0).and_then(Option::as_mut)
    }

    /// Run one frame advanced by `dt` seconds.
    pub fn tick(&mut self, dt: f32, presenter: &mut dyn Presenter) -> FrameReport {
        self.drain_inbox();
        let dt = self.clock.advance(dt);
        self.run_frame(dt, presenter)
    }

    /// Run one frame advanced by the wall time since the previous call.
    pub fn tick_now(&mut self, presenter: &mut dyn Presenter) -> FrameReport {
        self.drain_inbox();
        let dt = self.clock.advance_to(Instant::now());
        self.run_frame(dt, presenter)
    }

    fn run_frame(&mut self, dt: f32, presenter: &mut dyn Presenter) -> FrameReport {
        if let Some(s) = self.pending_sample.take() {
            self.pointer.on_move(s.x, s.y, s.width, s.height);
        }

        let ctx = FrameContext {
            camera: &self.camera,
            pointer_ndc: self.pointer.ndc(),
            elapsed: self.clock.elapsed(),
            dt,
        };
        let pointer_live = self.pointer.has_moved();
        let mut edges = SmallVec::new();

        for (i, slot) in self.slots.iter_mut().enumerate() {
            let Some(surface) = slot.as_mut() else {
                continue;
            };
            surface.place(ctx.elapsed);
            // nothing reacts until the pointer has actually moved once
            if !pointer_live {
                continue;
            }
            let edge = step_surface(surface, &ctx);
            if edge != HoverEdge::None {
                log::debug!("[frame] slot {} {:?}", i, edge);
                edges.push((SlotId(i), edge));
            }
        }

        let loaded: SmallVec<[(SlotId, &Surface); 4]> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (SlotId(i), s)))
            .collect();
        presenter.present(&self.camera, &loaded);

        FrameReport {
            elapsed: ctx.elapsed,
            dt,
            edges,
        }
    }

    fn drain_inbox(&mut self) {
        let Some(inbox) = &self.inbox else {
            return;
        };
        let mut arrived = Vec::new();
        let disconnected = loop {
            match inbox.try_recv() {
                Ok(loaded) => arrived.push(loaded),
                Err(TryRecvError::Empty) => break false,
                Err(TryRecvError::Disconnected) => break true,
            }
        };
        if disconnected {
            self.inbox = None;
        }
        for LoadedSurface { slot, surface } in arrived {
            self.install(slot, surface);
        }
    }
}

/// Query, detect the hover edge, animate and sync one surface.
pub fn step_surface(surface: &mut Surface, ctx: &FrameContext<'_>) -> HoverEdge {
    let hit: IntersectionResult = query(ctx.camera, ctx.pointer_ndc, &surface.geometry);
    let edge = surface.observe(hit);
    surface.animate(edge, ctx.dt);
    surface.sync_uniforms();
    edge
}
