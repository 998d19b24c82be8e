use crate::foundation::core::{Point, Rect, Size};

pub(crate) const EPSILON: f64 = 1e-9;

/// Translate `rect` so it lies inside `bounds`, keeping its size.
///
/// A side larger than `bounds` is capped to the bounds extent on that axis. Degenerate bounds
/// (non-positive or non-finite extent) leave `rect` untouched.
pub fn clamp_rect_into(rect: Rect, bounds: Rect) -> Rect {
    let bounds = bounds.abs();
    if !is_usable_rect(bounds) {
        return rect;
    }
    let rect = rect.abs();

    let w = finite_or(rect.width(), 0.0).min(bounds.width());
    let h = finite_or(rect.height(), 0.0).min(bounds.height());
    let x = finite_or(rect.x0, bounds.x0).clamp(bounds.x0, (bounds.x1 - w).max(bounds.x0));
    let y = finite_or(rect.y0, bounds.y0).clamp(bounds.y0, (bounds.y1 - h).max(bounds.y0));

    Rect::from_origin_size(Point::new(x, y), Size::new(w, h))
}

/// `true` when `rect` has finite, strictly positive width and height.
pub fn is_usable_rect(rect: Rect) -> bool {
    let w = rect.width();
    let h = rect.height();
    w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
}

/// Bilinear blend across four corners ordered bottom-left, bottom-right, top-right, top-left.
pub(crate) fn bilerp(quad: &[Point; 4], s: f64, t: f64) -> Point {
    let w0 = (1.0 - s) * (1.0 - t);
    let w1 = s * (1.0 - t);
    let w2 = s * t;
    let w3 = (1.0 - s) * t;
    Point::new(
        quad[0].x * w0 + quad[1].x * w1 + quad[2].x * w2 + quad[3].x * w3,
        quad[0].y * w0 + quad[1].y * w1 + quad[2].y * w2 + quad[3].y * w3,
    )
}

pub(crate) fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
