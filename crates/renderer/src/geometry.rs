//! Path construction helpers for the card shapes.

use card_common::Rect;
use tiny_skia::{Path, PathBuilder};

/// Cubic Bezier control distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_75;

/// Corner radius actually used for a `w` x `h` rectangle.
///
/// Clamped to `[0, min(w, h) / 2]` so opposite corners never overlap.
/// A negative extent yields zero.
pub fn effective_radius(width: f32, height: f32, radius: f32) -> f32 {
    let r = radius.min(width.min(height) / 2.0);
    if r.is_nan() {
        0.0
    } else {
        r.max(0.0)
    }
}

/// Closed path for a rectangle with four equal rounded corners.
///
/// Corners are emitted clockwise starting from the top-left corner's end
/// point: top-right, bottom-right, bottom-left, top-left. Negative extents
/// are normalized so the path covers the same area as the canvas would fill.
///
/// Returns `None` for non-finite input or a zero-area rectangle.
pub fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
        return None;
    }
    if w == 0.0 || h == 0.0 {
        return None;
    }

    let r = effective_radius(w, h, radius);
    let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
    let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };

    if r <= 0.0 {
        let rect = tiny_skia::Rect::from_xywh(x, y, w, h)?;
        return Some(PathBuilder::from_rect(rect));
    }

    let k = r * KAPPA;
    let (right, bottom) = (x + w, y + h);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

/// Rounded rectangle path for a layout rectangle.
pub fn rounded_rect(rect: &Rect, radius: f64) -> Option<Path> {
    rounded_rect_path(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
        radius as f32,
    )
}

/// Full circle inscribed in `bounds`.
pub fn circle_path(bounds: &Rect) -> Option<Path> {
    if !bounds.is_finite() || bounds.width <= 0.0 {
        return None;
    }
    let (cx, cy) = bounds.center();
    PathBuilder::from_circle(cx as f32, cy as f32, (bounds.width / 2.0) as f32)
}

/// Plain rectangle path for `bounds`.
pub fn rect_path(bounds: &Rect) -> Option<Path> {
    rounded_rect(bounds, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_radius_clamps_to_half_short_side() {
        assert_eq!(effective_radius(190.0, 48.0, 24.0), 24.0);
        assert_eq!(effective_radius(190.0, 48.0, 100.0), 24.0);
        assert_eq!(effective_radius(20.0, 48.0, 100.0), 10.0);
        assert_eq!(effective_radius(190.0, 48.0, -5.0), 0.0);
        assert_eq!(effective_radius(-10.0, 48.0, 5.0), 0.0);
        assert_eq!(effective_radius(10.0, 10.0, f32::NAN), 0.0);
    }

    #[test]
    fn test_rounded_rect_bounds() {
        let path = rounded_rect_path(300.0, 90.0, 190.0, 48.0, 24.0).unwrap();
        let b = path.bounds();
        assert!((b.left() - 300.0).abs() < 0.01);
        assert!((b.top() - 90.0).abs() < 0.01);
        assert!((b.right() - 490.0).abs() < 0.01);
        assert!((b.bottom() - 138.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_radius_is_plain_rect() {
        let path = rounded_rect_path(0.0, 0.0, 10.0, 5.0, 0.0).unwrap();
        let b = path.bounds();
        assert_eq!((b.left(), b.top(), b.right(), b.bottom()), (0.0, 0.0, 10.0, 5.0));
    }

    #[test]
    fn test_negative_extent_is_normalized() {
        let path = rounded_rect_path(100.0, 10.0, -40.0, 20.0, 8.0).unwrap();
        let b = path.bounds();
        assert!((b.left() - 60.0).abs() < 0.01);
        assert!((b.right() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_degenerate_input_yields_none() {
        assert!(rounded_rect_path(f32::NAN, 0.0, 10.0, 10.0, 2.0).is_none());
        assert!(rounded_rect_path(0.0, 0.0, 0.0, 10.0, 2.0).is_none());
        assert!(circle_path(&Rect::new(0.0, 0.0, 0.0, 0.0)).is_none());
        assert!(circle_path(&Rect::new(0.0, 0.0, -4.0, -4.0)).is_none());
    }

    #[test]
    fn test_circle_path_bounds() {
        let path = circle_path(&Rect::new(40.0, 95.0, 180.0, 180.0)).unwrap();
        let b = path.bounds();
        assert!((b.left() - 40.0).abs() < 0.01);
        assert!((b.bottom() - 275.0).abs() < 0.01);
    }
}
