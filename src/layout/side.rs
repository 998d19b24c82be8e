use crate::foundation::{
    core::{Axis, Point, Rect, Rgba8, Size},
    math::{clamp_rect_into, is_usable_rect},
};

/// One of the six cube faces laid out on the atlas.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum SideId {
    /// +Y face.
    Top,
    /// -Y face.
    Bottom,
    /// +Z face.
    Front,
    /// -Z face.
    Back,
    /// -X face.
    Left,
    /// +X face.
    Right,
}

impl SideId {
    /// All sides in index order.
    pub const ALL: [SideId; 6] = [
        SideId::Top,
        SideId::Bottom,
        SideId::Front,
        SideId::Back,
        SideId::Left,
        SideId::Right,
    ];

    /// Stable index in `0..6`, used as the per-triangle tag.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`SideId::index`].
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            SideId::Top => "Top",
            SideId::Bottom => "Bottom",
            SideId::Front => "Front",
            SideId::Back => "Back",
            SideId::Left => "Left",
            SideId::Right => "Right",
        }
    }

    /// Mesh axes spanned by this face as `(u, v)`, before any rotation.
    pub fn axes(self) -> (Axis, Axis) {
        match self {
            SideId::Top | SideId::Bottom => (Axis::X, Axis::Z),
            SideId::Front | SideId::Back => (Axis::X, Axis::Y),
            SideId::Left | SideId::Right => (Axis::Z, Axis::Y),
        }
    }

    /// Swatch color used by hosts when drawing the side; carries no layout meaning.
    pub fn base_color(self) -> Rgba8 {
        match self {
            SideId::Top => Rgba8::new(231, 76, 60, 96),
            SideId::Bottom => Rgba8::new(46, 204, 113, 96),
            SideId::Front => Rgba8::new(52, 152, 219, 96),
            SideId::Back => Rgba8::new(241, 196, 15, 96),
            SideId::Left => Rgba8::new(155, 89, 182, 96),
            SideId::Right => Rgba8::new(26, 188, 156, 96),
        }
    }
}

impl std::fmt::Display for SideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized placement of a side: bottom-left origin and size, V growing upwards.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UvRect {
    /// Bottom-left corner in `[0, 1]²`.
    pub origin: Point,
    /// Extent in `[0, 1]²`.
    pub size: Size,
}

impl UvRect {
    /// Build a normalized rectangle.
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Clamp into the unit square, shrinking first and then translating.
    pub fn clamped(self) -> Self {
        let w = unit(self.size.width);
        let h = unit(self.size.height);
        Self {
            origin: Point::new(
                unit(self.origin.x).min(1.0 - w),
                unit(self.origin.y).min(1.0 - h),
            ),
            size: Size::new(w, h),
        }
    }

    /// Corners ordered bottom-left, bottom-right, top-right, top-left.
    pub fn corners(self) -> [Point; 4] {
        let (x0, y0) = (self.origin.x, self.origin.y);
        let (x1, y1) = (x0 + self.size.width, y0 + self.size.height);
        [
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }
}

fn unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

/// Placement, orientation, and lock state of one cube face.
///
/// The canvas-space rectangle and the normalized [`UvRect`] are kept in step by every mutator;
/// the UV quad itself is never stored and is derived on demand by [`Side::uv_quad`].
#[derive(Clone, Debug, PartialEq)]
pub struct Side {
    id: SideId,
    rect: Rect,
    uv: UvRect,
    rotation: u8,
    mirrored: bool,
    /// Locked sides cannot be picked up by a drag; orientation commands still apply.
    pub locked: bool,
}

impl Side {
    /// Create a side from its normalized placement, deriving its canvas rectangle.
    pub fn new(id: SideId, uv: UvRect, canvas: Rect) -> Self {
        let uv = uv.clamped();
        Self {
            id,
            rect: uv_to_rect(uv, canvas),
            uv,
            rotation: 0,
            mirrored: false,
            locked: false,
        }
    }

    /// Which face this is.
    pub fn id(&self) -> SideId {
        self.id
    }

    /// Placement rectangle in canvas space.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Normalized placement (fractions of the canvas, V up).
    pub fn uv_rect(&self) -> UvRect {
        self.uv
    }

    /// Quarter turns applied to the UV quad, `0..4`.
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Whether U is reflected.
    pub fn mirrored(&self) -> bool {
        self.mirrored
    }

    /// Move the side, keeping it fully inside `canvas`, and re-derive its UV placement.
    pub fn set_rect(&mut self, rect: Rect, canvas: Rect) {
        self.rect = clamp_rect_into(rect, canvas);
        self.map_rect_to_uv(canvas);
    }

    /// Recompute the normalized placement from the canvas rectangle.
    ///
    /// Screen Y grows downwards while V grows upwards, so the rectangle's bottom edge becomes
    /// the UV origin. A degenerate canvas keeps the previous placement.
    pub fn map_rect_to_uv(&mut self, canvas: Rect) {
        if let Some(uv) = rect_to_uv(self.rect, canvas) {
            self.uv = uv;
        }
    }

    /// Canvas rectangle described by the normalized placement (inverse of
    /// [`Side::map_rect_to_uv`]).
    pub fn rect_from_uv(&self, canvas: Rect) -> Rect {
        uv_to_rect(self.uv, canvas)
    }

    /// Rebuild the canvas rectangle from the stored fractions against a new canvas.
    pub fn rebind(&mut self, canvas: Rect) {
        if is_usable_rect(canvas) {
            self.rect = clamp_rect_into(uv_to_rect(self.uv, canvas), canvas);
        }
    }

    /// Replace the normalized placement and re-derive the canvas rectangle.
    pub fn set_uv_rect(&mut self, uv: UvRect, canvas: Rect) {
        self.uv = uv.clamped();
        self.rebind(canvas);
    }

    /// Four UV corners in `[0, 1]²` with mirror and rotation applied.
    ///
    /// Unrotated, unmirrored order is bottom-left, bottom-right, top-right, top-left.
    pub fn uv_quad(&self) -> [Point; 4] {
        let mut base = self.uv.corners();
        if self.mirrored {
            base.swap(0, 1);
            base.swap(2, 3);
        }
        let r = usize::from(self.rotation % 4);
        std::array::from_fn(|i| base[(i + r) % 4])
    }

    /// Advance the quad by one quarter turn. The placement rectangle does not move.
    pub fn rotate_uv(&mut self) {
        self.rotation = (self.rotation + 1) % 4;
    }

    /// Swap width and height about the rectangle's center, then re-clamp and re-map.
    pub fn rotate_rect(&mut self, canvas: Rect) {
        let size = Size::new(self.rect.height(), self.rect.width());
        let rotated = Rect::from_center_size(self.rect.center(), size);
        self.set_rect(rotated, canvas);
    }

    /// Reflect the quad horizontally.
    pub fn toggle_mirror(&mut self) {
        self.mirrored = !self.mirrored;
    }

    /// Hit test for drag start; locked sides never report a hit.
    pub fn contains(&self, p: Point) -> bool {
        !self.locked && self.rect.contains(p)
    }

    pub(crate) fn restore_orientation(&mut self, rotation: u8, mirrored: bool, locked: bool) {
        self.rotation = rotation % 4;
        self.mirrored = mirrored;
        self.locked = locked;
    }

    pub(crate) fn reset_orientation(&mut self) {
        self.restore_orientation(0, false, false);
    }
}

fn rect_to_uv(rect: Rect, canvas: Rect) -> Option<UvRect> {
    if !is_usable_rect(canvas) {
        return None;
    }
    let (cw, ch) = (canvas.width(), canvas.height());
    let u = (rect.x0 - canvas.x0) / cw;
    let v = 1.0 - (rect.y1 - canvas.y0) / ch;
    Some(
        UvRect::new(
            Point::new(u, v),
            Size::new(rect.width() / cw, rect.height() / ch),
        )
        .clamped(),
    )
}

fn uv_to_rect(uv: UvRect, canvas: Rect) -> Rect {
    let (cw, ch) = (canvas.width(), canvas.height());
    let x = canvas.x0 + uv.origin.x * cw;
    let y = canvas.y0 + (1.0 - uv.origin.y - uv.size.height) * ch;
    Rect::from_origin_size(
        Point::new(x, y),
        Size::new(uv.size.width * cw, uv.size.height * ch),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/side.rs"]
mod tests;
