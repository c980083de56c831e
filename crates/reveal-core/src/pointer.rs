use glam::Vec2;

/// Latest pointer position in normalized device coordinates.
///
/// Raw pointer-move events may arrive at any rate; only the most recent
/// sample is kept and the frame loop reads it once per frame.
#[derive(Clone, Copy, Debug)]
pub struct PointerTracker {
    ndc: Vec2,
    moved: bool,
}

impl Default for PointerTracker {
    fn default() -> Self {
        // Bottom-left corner until the first event arrives.
        Self {
            ndc: Vec2::new(-1.0, -1.0),
            moved: false,
        }
    }
}

impl PointerTracker {
    /// Record a raw pointer sample in window pixels (origin top-left, +Y down).
    ///
    /// Samples from a zero-sized window or with non-finite coordinates are dropped.
    pub fn on_move(&mut self, x_px: f32, y_px: f32, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 || !x_px.is_finite() || !y_px.is_finite() {
            return;
        }
        let x = (x_px / width) * 2.0 - 1.0;
        let y = -(y_px / height) * 2.0 + 1.0;
        self.ndc = Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
        self.moved = true;
    }

    #[inline]
    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }

    /// Whether at least one pointer-move event has been seen.
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved
    }
}
