//! View transform for pan/zoom between world and screen space.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom scale.
pub const MIN_SCALE: f64 = 0.01;

/// Maximum allowed zoom scale. The anchor-preserving zoom rule must hold all
/// the way out to this depth.
pub const MAX_SCALE: f64 = 1e12;

/// Multiplier applied per zoom step (multiply to zoom in, divide to zoom out).
pub const ZOOM_FACTOR: f64 = 1.05;

/// Scale + translate mapping between world and screen coordinates.
///
/// `screen_to_world` and `world_to_screen` are exact inverses of each other
/// for a fixed transform value, up to floating-point rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Current zoom scale, kept within `[MIN_SCALE, MAX_SCALE]`.
    pub scale: f64,
    /// Horizontal translation in screen pixels.
    pub translate_x: f64,
    /// Vertical translation in screen pixels.
    pub translate_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

/// The world-space rectangle visible through the current transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    /// Scale the viewport was computed at, for callers that size strokes.
    pub scale: f64,
}

impl Viewport {
    /// The viewport as a world-space rect.
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

impl Transform {
    /// Identity transform (scale 1, no translation).
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.translate_x) / self.scale,
            (screen.y - self.translate_y) / self.scale,
        )
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.translate_x,
            world.y * self.scale + self.translate_y,
        )
    }

    /// Zoom in one step, optionally keeping the world point under `anchor`
    /// (a screen point) fixed on screen.
    pub fn zoom_in(&mut self, anchor: Option<Point>) {
        self.zoom_by(ZOOM_FACTOR, anchor);
    }

    /// Zoom out one step, optionally anchored.
    pub fn zoom_out(&mut self, anchor: Option<Point>) {
        self.zoom_by(1.0 / ZOOM_FACTOR, anchor);
    }

    /// Apply a zoom factor, clamped to `[MIN_SCALE, MAX_SCALE]`.
    ///
    /// With an anchor, the translation is adjusted so the world point under
    /// the anchor stays under it after rescaling. Without one, translation is
    /// untouched and the zoom centers on the world origin's projection.
    ///
    /// A scale that has drifted outside the bounds (e.g. restored from a
    /// corrupted snapshot) is pulled back in here rather than treated as an
    /// error.
    fn zoom_by(&mut self, factor: f64, anchor: Option<Point>) {
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        if new_scale == self.scale {
            return;
        }

        if let Some(anchor) = anchor {
            let ratio = new_scale / self.scale;
            self.translate_x = anchor.x - (anchor.x - self.translate_x) * ratio;
            self.translate_y = anchor.y - (anchor.y - self.translate_y) * ratio;
        }
        self.scale = new_scale;
    }

    /// Pan by a screen-space delta. No scale interaction.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.translate_x += delta_x;
        self.translate_y += delta_y;
    }

    /// Reset to the identity transform.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// World-space rectangle visible in a screen of the given size.
    ///
    /// Maps both screen corners and takes min/max per axis, so the result
    /// stays well-formed under any sign convention of the scale.
    pub fn viewport(&self, screen_width: f64, screen_height: f64) -> Viewport {
        let top_left = self.screen_to_world(Point::ZERO);
        let bottom_right = self.screen_to_world(Point::new(screen_width, screen_height));

        Viewport {
            left: top_left.x.min(bottom_right.x),
            top: top_left.y.min(bottom_right.y),
            right: top_left.x.max(bottom_right.x),
            bottom: top_left.y.max(bottom_right.y),
            scale: self.scale,
        }
    }

    /// Frame a world-space rect inside a screen of the given size, with
    /// `padding` pixels of margin. Used by the minimap and fit-to-content.
    pub fn fit_to_bounds(&mut self, bounds: Rect, screen: Size, padding: f64) {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            self.reset();
            return;
        }

        let padded = Size::new(
            (screen.width - padding * 2.0).max(1.0),
            (screen.height - padding * 2.0).max(1.0),
        );

        let scale_x = padded.width / bounds.width();
        let scale_y = padded.height / bounds.height();
        self.scale = scale_x.min(scale_y).clamp(MIN_SCALE, MAX_SCALE);

        let bounds_center = bounds.center();
        let screen_center = Point::new(screen.width / 2.0, screen.height / 2.0);
        self.translate_x = screen_center.x - bounds_center.x * self.scale;
        self.translate_y = screen_center.y - bounds_center.y * self.scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_roundtrip() {
        let t = Transform::new();
        let p = Point::new(123.0, -456.0);
        assert_eq!(t.screen_to_world(p), p);
        assert_eq!(t.world_to_screen(p), p);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let t = Transform {
            scale: 1.5,
            translate_x: 30.0,
            translate_y: -20.0,
        };

        let original = Point::new(123.0, 456.0);
        let world = t.screen_to_world(original);
        let back = t.world_to_screen(world);
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);

        let screen = t.world_to_screen(original);
        let back = t.screen_to_world(screen);
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_without_anchor_keeps_translate() {
        let mut t = Transform {
            scale: 1.0,
            translate_x: 40.0,
            translate_y: 50.0,
        };
        t.zoom_in(None);
        assert!((t.scale - ZOOM_FACTOR).abs() < f64::EPSILON);
        assert_eq!(t.translate_x, 40.0);
        assert_eq!(t.translate_y, 50.0);
    }

    #[test]
    fn test_anchor_invariance_single_step() {
        let mut t = Transform::new();
        let anchor = Point::new(100.0, 100.0);
        let world_before = t.screen_to_world(anchor);

        t.zoom_in(Some(anchor));
        let screen_after = t.world_to_screen(world_before);
        assert!((screen_after.x - anchor.x).abs() < 1e-9);
        assert!((screen_after.y - anchor.y).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_invariance_to_max_depth() {
        // The world point initially under the anchor must stay under the
        // anchor all the way out to MAX_SCALE. Intermediate products reach
        // ~1e14, so the tolerance is relative to the current scale.
        let mut t = Transform::new();
        let anchor = Point::new(100.0, 100.0);
        let world = t.screen_to_world(anchor);

        while t.scale < MAX_SCALE {
            t.zoom_in(Some(anchor));
            // Roundtrip error is bounded by the ulp of the intermediate
            // product anchor·scale.
            let ulp_tol = 100.0 * t.scale * f64::EPSILON * 32.0 + 1e-9;
            let roundtrip = t.world_to_screen(t.screen_to_world(anchor));
            assert!((roundtrip.x - anchor.x).abs() < ulp_tol);
            assert!((roundtrip.y - anchor.y).abs() < ulp_tol);

            let screen = t.world_to_screen(world);
            let tol = (t.scale * 1e-11).max(1e-9);
            assert!(
                (screen.x - anchor.x).abs() < tol,
                "drift {} at scale {}",
                (screen.x - anchor.x).abs(),
                t.scale
            );
            assert!((screen.y - anchor.y).abs() < tol);
        }
        assert_eq!(t.scale, MAX_SCALE);
    }

    #[test]
    fn test_zoom_in_out_returns_to_identity() {
        let mut t = Transform::new();
        let anchor = Point::new(100.0, 100.0);
        for _ in 0..5 {
            t.zoom_in(Some(anchor));
        }
        for _ in 0..5 {
            t.zoom_out(Some(anchor));
        }
        assert!((t.scale - 1.0).abs() < 1e-12);
        assert!(t.translate_x.abs() < 1e-9);
        assert!(t.translate_y.abs() < 1e-9);
    }

    #[test]
    fn test_scale_clamped() {
        let mut t = Transform::new();
        for _ in 0..1_000 {
            t.zoom_out(None);
        }
        assert_eq!(t.scale, MIN_SCALE);

        for _ in 0..10_000 {
            t.zoom_in(None);
        }
        assert_eq!(t.scale, MAX_SCALE);
    }

    #[test]
    fn test_corrupted_scale_recovers_on_zoom() {
        let mut t = Transform {
            scale: 1e30,
            translate_x: 0.0,
            translate_y: 0.0,
        };
        t.zoom_in(None);
        assert_eq!(t.scale, MAX_SCALE);

        t.scale = 1e-9;
        t.zoom_out(None);
        assert_eq!(t.scale, MIN_SCALE);
    }

    #[test]
    fn test_pan() {
        let mut t = Transform::new();
        t.pan(10.0, -20.0);
        t.pan(5.0, 5.0);
        assert_eq!(t.translate_x, 15.0);
        assert_eq!(t.translate_y, -15.0);
        assert_eq!(t.scale, 1.0);
    }

    #[test]
    fn test_reset() {
        let mut t = Transform {
            scale: 3.0,
            translate_x: 7.0,
            translate_y: 9.0,
        };
        t.reset();
        assert_eq!(t, Transform::default());
    }

    #[test]
    fn test_viewport_identity() {
        let t = Transform::new();
        let vp = t.viewport(800.0, 600.0);
        assert_eq!(vp.left, 0.0);
        assert_eq!(vp.top, 0.0);
        assert_eq!(vp.right, 800.0);
        assert_eq!(vp.bottom, 600.0);
        assert_eq!(vp.scale, 1.0);
    }

    #[test]
    fn test_viewport_zoomed_and_panned() {
        let t = Transform {
            scale: 2.0,
            translate_x: 100.0,
            translate_y: -50.0,
        };
        let vp = t.viewport(800.0, 600.0);
        assert!((vp.left - (-50.0)).abs() < 1e-12);
        assert!((vp.top - 25.0).abs() < 1e-12);
        assert!((vp.right - 350.0).abs() < 1e-12);
        assert!((vp.bottom - 325.0).abs() < 1e-12);
        assert!((vp.width() - 400.0).abs() < 1e-12);
        assert!((vp.height() - 300.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_to_bounds_centers_content() {
        let mut t = Transform::new();
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        t.fit_to_bounds(bounds, Size::new(800.0, 600.0), 50.0);

        assert!(t.scale >= MIN_SCALE && t.scale <= MAX_SCALE);
        let center_on_screen = t.world_to_screen(bounds.center());
        assert!((center_on_screen.x - 400.0).abs() < 1e-9);
        assert!((center_on_screen.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_to_degenerate_bounds_resets() {
        let mut t = Transform {
            scale: 4.0,
            translate_x: 1.0,
            translate_y: 2.0,
        };
        t.fit_to_bounds(Rect::ZERO, Size::new(800.0, 600.0), 50.0);
        assert_eq!(t, Transform::default());
    }
}
