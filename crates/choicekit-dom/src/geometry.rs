//! Bounding boxes and the viewport capability.

/// An axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Source of viewport measurements.
///
/// Implementations are queried at the moment a decision is made; callers
/// must not cache the answer.
pub trait Viewport: Send + Sync {
    /// Current height of the visible viewport in pixels.
    fn height(&self) -> f64;

    /// Whether the viewport is at least `min_height` pixels tall.
    ///
    /// Mirrors a `(min-height: Npx)` media query.
    fn matches_min_height(&self, min_height: f64) -> bool {
        self.height() >= min_height
    }
}

/// A viewport with a fixed, settable height.
///
/// Useful for hosts that push resize notifications and for tests.
#[derive(Debug, Default)]
pub struct FixedViewport {
    height: parking_lot::RwLock<f64>,
}

impl FixedViewport {
    /// Create a viewport of the given height.
    pub fn new(height: f64) -> Self {
        Self {
            height: parking_lot::RwLock::new(height),
        }
    }

    /// Update the height, as after a host resize.
    pub fn set_height(&self, height: f64) {
        *self.height.write() = height;
    }
}

impl Viewport for FixedViewport {
    fn height(&self) -> f64 {
        *self.height.read()
    }
}
