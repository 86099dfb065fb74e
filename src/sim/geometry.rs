//! Axis-aligned collision tests and bounce helpers
//!
//! Everything here is a pure function over rectangles: the ball is treated as
//! a square, bricks/paddle/power-ups as their on-screen boxes. The step engine
//! decides which positions (current vs. next) to test; these functions only
//! answer overlap and reflection questions.

use glam::Vec2;

/// An axis-aligned rectangle (top-left origin, +y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }
}

/// Which velocity component a brick hit reflects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Strict-inequality overlap test: touching edges do not collide
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.right() > b.left() && a.left() < b.right() && a.bottom() > b.top() && a.top() < b.bottom()
}

/// Pick the reflection axis for a brick hit.
///
/// The ball struck whichever side its center is furthest from the brick's
/// center along; a larger |dx| means a side hit (reflect vx), otherwise a
/// top/bottom hit (reflect vy).
#[inline]
pub fn deflection_axis(ball_center: Vec2, brick_center: Vec2) -> Axis {
    let d = ball_center - brick_center;
    if d.x.abs() > d.y.abs() {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// Horizontal velocity after a paddle bounce.
///
/// `hit_fraction` is the ball center's position across the paddle, clamped to
/// [0, 1]. Center hits go straight up, edge hits leave at +/- `speed`.
#[inline]
pub fn paddle_bounce_vx(ball_center_x: f32, paddle_left: f32, paddle_width: f32, speed: f32) -> f32 {
    let hit_fraction = ((ball_center_x - paddle_left) / paddle_width).clamp(0.0, 1.0);
    (hit_fraction - 0.5) * speed * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &b));

        let c = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert!(!rects_overlap(&a, &c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares the x=10 edge exactly
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &b));

        // Shares the y=10 edge exactly
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &c));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(rects_overlap(&outer, &inner));
        assert!(rects_overlap(&inner, &outer));
    }

    #[test]
    fn test_deflection_axis_side_hit() {
        // Ball center well to the left of the brick center: side hit
        let axis = deflection_axis(Vec2::new(10.0, 50.0), Vec2::new(40.0, 52.0));
        assert_eq!(axis, Axis::Horizontal);
    }

    #[test]
    fn test_deflection_axis_top_hit() {
        // Ball center above the brick center: vertical reflection
        let axis = deflection_axis(Vec2::new(42.0, 20.0), Vec2::new(40.0, 52.0));
        assert_eq!(axis, Axis::Vertical);

        // Exact diagonal ties break vertical, matching |dx| > |dy|
        let axis = deflection_axis(Vec2::new(50.0, 30.0), Vec2::new(40.0, 40.0));
        assert_eq!(axis, Axis::Vertical);
    }

    #[test]
    fn test_paddle_bounce_center_goes_straight() {
        let vx = paddle_bounce_vx(60.0, 0.0, 120.0, 6.0);
        assert!(vx.abs() < 1e-6);
    }

    #[test]
    fn test_paddle_bounce_edges() {
        // Left edge: full speed left
        let vx = paddle_bounce_vx(0.0, 0.0, 120.0, 6.0);
        assert!((vx - (-6.0)).abs() < 1e-6);

        // Right edge: full speed right
        let vx = paddle_bounce_vx(120.0, 0.0, 120.0, 6.0);
        assert!((vx - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_paddle_bounce_clamps_outside_strikes() {
        // Center past the right edge clamps to the edge value
        let vx = paddle_bounce_vx(500.0, 0.0, 120.0, 6.0);
        assert!((vx - 6.0).abs() < 1e-6);

        let vx = paddle_bounce_vx(-500.0, 0.0, 120.0, 6.0);
        assert!((vx - (-6.0)).abs() < 1e-6);
    }
}
