use crate::{
    foundation::core::{Axis, Point, Rect, Rgba8, Size, Vec3},
    foundation::error::UnwrapResult,
    foundation::math::{bilerp, is_usable_rect},
    layout::grid::Grid,
    layout::side::{Side, SideId, UvRect},
    layout::state::{
        LayoutConfig, LayoutState, SideState, TextureInfo, UvChannel, validate_pixel_scale,
    },
    mesh::target::TargetMesh,
    texture::fill::FillKind,
};

/// Scale ceiling used when no target texture is bound.
pub const UNBOUND_MAX_SCALE: f64 = 512.0;
/// Smallest accepted zoom.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest accepted zoom.
pub const MAX_ZOOM: f64 = 8.0;

/// The six sides of one editing session plus the canvas they live on.
///
/// A `Layout` is an explicit value owned by the session controller. Hosts feed it canvas
/// geometry and configuration; it keeps every side clamped to the canvas and derives UVs on
/// demand. Target meshes are only borrowed for the duration of a call.
#[derive(Clone, Debug)]
pub struct Layout {
    config: LayoutConfig,
    available: Rect,
    fit_to_texture: bool,
    window_size: Size,
    canvas: Rect,
    grid: Grid,
    sides: [Side; 6],
    texture: Option<TextureInfo>,
    scale: Vec3,
}

impl Default for Layout {
    fn default() -> Self {
        Self::with_config_unchecked(LayoutConfig::default())
    }
}

impl Layout {
    /// Create a layout with the default cross unfold placement and no canvas yet.
    pub fn new(config: LayoutConfig) -> UnwrapResult<Self> {
        config.validate()?;
        Ok(Self::with_config_unchecked(config))
    }

    fn with_config_unchecked(config: LayoutConfig) -> Self {
        let canvas = Rect::ZERO;
        Self {
            config,
            available: Rect::ZERO,
            fit_to_texture: false,
            window_size: Size::ZERO,
            canvas,
            grid: Grid::default(),
            sides: SideId::ALL.map(|id| Side::new(id, default_uv_rect(id), canvas)),
            texture: None,
            scale: Vec3::ONE,
        }
    }

    /// Session settings.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Current canvas rectangle.
    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    /// Current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// All sides in [`SideId`] index order.
    pub fn sides(&self) -> &[Side; 6] {
        &self.sides
    }

    /// One side.
    pub fn side(&self, id: SideId) -> &Side {
        &self.sides[id.index()]
    }

    /// Bound target texture, if any.
    pub fn texture(&self) -> Option<TextureInfo> {
        self.texture
    }

    /// Scale vector applied to the target.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Texture dimensions that drive aspect and texel alignment: the bound texture when
    /// present, otherwise the configured size.
    pub fn texture_dims(&self) -> (u32, u32) {
        match self.texture {
            Some(t) => (t.width, t.height),
            None => (self.config.texture_width, self.config.texture_height),
        }
    }

    /// Screen pixels per texel along X.
    pub fn points_per_texel(&self) -> f64 {
        let (w, _) = self.texture_dims();
        if w == 0 {
            return 0.0;
        }
        self.canvas.width() / f64::from(w)
    }

    /// `true` when the grid is dense enough on screen to draw and snap to.
    pub fn grid_usable(&self) -> bool {
        self.grid.supports_snapping()
    }

    /// Snap a canvas point to the nearest grid lines when snapping is enabled and usable.
    pub fn snap(&self, p: Point) -> Point {
        if self.config.snap_to_grid && self.grid_usable() {
            Point::new(self.grid.nearest_column(p.x), self.grid.nearest_row(p.y))
        } else {
            p
        }
    }

    /// Largest rectangle with the texture aspect fitted into `available`, times `zoom`.
    pub fn scaled_texture_rect(&self, zoom: f64, available: Rect) -> Rect {
        let available = available.abs();
        let (tw, th) = self.texture_dims();
        if !is_usable_rect(available) || tw == 0 || th == 0 {
            return Rect::from_origin_size(available.origin(), Size::ZERO);
        }
        let aspect = f64::from(tw) / f64::from(th);
        let (aw, ah) = (available.width(), available.height());
        let (w, h) = if aw / ah > aspect {
            (ah * aspect, ah)
        } else {
            (aw, aw / aspect)
        };
        Rect::from_origin_size(available.origin(), Size::new(w * zoom, h * zoom))
    }

    /// Feed the host's drawable area and window size.
    ///
    /// Returns `true` when the canvas moved, in which case the grid was rebuilt and every side
    /// was rebound to the new canvas.
    pub fn set_window(&mut self, available: Rect, window_size: Size) -> bool {
        self.available = available;
        self.fit_to_texture = true;
        let canvas = self.scaled_texture_rect(self.config.zoom, available);
        if window_size == self.window_size && canvas == self.canvas {
            return false;
        }
        self.window_size = window_size;
        self.relayout(canvas);
        true
    }

    /// Use `canvas` directly as the canvas rectangle, bypassing aspect fitting and zoom.
    pub fn set_canvas(&mut self, canvas: Rect) {
        let canvas = canvas.abs();
        self.available = canvas;
        self.fit_to_texture = false;
        self.relayout(canvas);
    }

    /// Change zoom (clamped to `[0.1, 8]`) and refit the canvas. Zoom only affects canvases
    /// fitted through [`Layout::set_window`].
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.config.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.refit();
    }

    fn relayout(&mut self, canvas: Rect) {
        let old = self.canvas;
        self.rebind_sides_to_container(old, canvas);
        self.recalculate_grid();
    }

    /// Rebuild the grid from the canvas and the points-per-texel cell size.
    pub fn recalculate_grid(&mut self) {
        self.grid = Grid::rebuild(self.canvas, self.points_per_texel());
    }

    /// Adopt `new` as the canvas and rebuild every side rectangle from its stored fractions.
    ///
    /// Idempotent for a given `new`.
    #[tracing::instrument(skip(self))]
    pub fn rebind_sides_to_container(&mut self, old: Rect, new: Rect) {
        self.canvas = new;
        if !is_usable_rect(new) {
            tracing::debug!("canvas is degenerate; side rectangles left as-is");
            return;
        }
        for side in &mut self.sides {
            side.rebind(new);
        }
    }

    /// Move one side, clamped into the canvas.
    pub fn set_side_rect(&mut self, id: SideId, rect: Rect) {
        let canvas = self.canvas;
        self.sides[id.index()].set_rect(rect, canvas);
    }

    /// Advance a side's UV quad by one quarter turn.
    pub fn rotate_uv(&mut self, id: SideId) {
        self.sides[id.index()].rotate_uv();
    }

    /// Swap a side's rectangle extent about its center.
    pub fn rotate_rect(&mut self, id: SideId) {
        let canvas = self.canvas;
        self.sides[id.index()].rotate_rect(canvas);
    }

    /// Reflect a side's UV quad horizontally.
    pub fn toggle_mirror(&mut self, id: SideId) {
        self.sides[id.index()].toggle_mirror();
    }

    /// Lock or unlock a side against dragging.
    pub fn set_locked(&mut self, id: SideId, locked: bool) {
        self.sides[id.index()].locked = locked;
    }

    /// First unlocked side whose rectangle contains `p`.
    pub fn hit_test(&self, p: Point) -> Option<SideId> {
        self.sides.iter().find(|s| s.contains(p)).map(Side::id)
    }

    /// Restore the default cross unfold and clear orientation and lock state.
    pub fn reset_sides(&mut self) {
        let canvas = self.canvas;
        for side in &mut self.sides {
            side.reset_orientation();
            side.set_uv_rect(default_uv_rect(side.id()), canvas);
        }
    }

    /// Toggle grid drawing.
    pub fn set_show_grid(&mut self, on: bool) {
        self.config.show_grid = on;
    }

    /// Toggle snap-to-grid.
    pub fn set_snap_to_grid(&mut self, on: bool) {
        self.config.snap_to_grid = on;
    }

    /// Toggle automatic target UV regeneration.
    pub fn set_auto_update_target_uv(&mut self, on: bool) {
        self.config.auto_update_target_uv = on;
    }

    /// Choose the destination UV set.
    pub fn set_uv_channel(&mut self, channel: UvChannel) {
        self.config.uv_channel = channel;
    }

    /// Choose the generated fill and its colors.
    pub fn set_fill(&mut self, kind: FillKind, colors: [Rgba8; 2]) {
        self.config.generate_texture_type = kind;
        self.config.fill_colors = colors;
    }

    /// Change the configured texture size and refit the canvas.
    pub fn set_texture_size(&mut self, width: u32, height: u32) -> UnwrapResult<()> {
        TextureInfo::new(width, height)?;
        self.config.texture_width = width;
        self.config.texture_height = height;
        self.refit();
        Ok(())
    }

    /// Change the pixel scale. Callers follow up with [`Layout::apply_pixel_scale`].
    pub fn set_pixel_scale(&mut self, pixel_scale: f64) -> UnwrapResult<()> {
        validate_pixel_scale(pixel_scale)?;
        self.config.pixel_scale = pixel_scale;
        Ok(())
    }

    /// Bind or unbind the target texture and refit the canvas to its aspect.
    pub fn bind_texture(&mut self, texture: Option<TextureInfo>) {
        self.texture = texture;
        self.refit();
    }

    fn refit(&mut self) {
        let canvas = if self.fit_to_texture {
            self.scaled_texture_rect(self.config.zoom, self.available)
        } else {
            self.canvas
        };
        self.relayout(canvas);
    }

    /// Per-axis scale ceiling: texture dimension over pixel scale (X and Z use the width,
    /// Y the height), or [`UNBOUND_MAX_SCALE`] with no texture bound.
    pub fn max_scale(&self) -> Vec3 {
        match self.texture {
            Some(t) => {
                let ps = self.config.pixel_scale;
                let w = f64::from(t.width) / ps;
                let h = f64::from(t.height) / ps;
                Vec3::new(w, h, w)
            }
            None => Vec3::new(UNBOUND_MAX_SCALE, UNBOUND_MAX_SCALE, UNBOUND_MAX_SCALE),
        }
    }

    /// Clamp `scale` per axis into `[1, max_scale]`; non-finite components become 1.
    pub fn clamp_scale(&self, scale: Vec3) -> Vec3 {
        let max = self.max_scale();
        let clamp = |v: f64, hi: f64| {
            if v.is_finite() {
                v.clamp(1.0, hi.max(1.0))
            } else {
                1.0
            }
        };
        Vec3::new(
            clamp(scale.x, max.x),
            clamp(scale.y, max.y),
            clamp(scale.z, max.z),
        )
    }

    /// Set the target scale (clamped) and apply the pixel scale.
    pub fn set_scale(&mut self, scale: Vec3, target: Option<&mut dyn TargetMesh>) -> Vec3 {
        self.scale = self.clamp_scale(scale);
        self.apply_pixel_scale(target)
    }

    /// Re-derive the target scale from the desired texel density.
    ///
    /// Each axis extent is rounded to a whole number of texels (`extent * pixel_scale`), sides
    /// are resized so their UV footprint covers exactly that texel block (top-left corner kept),
    /// and the resulting scale is clamped into `[1, max_scale]` and written to `target`.
    #[tracing::instrument(skip(self, target))]
    pub fn apply_pixel_scale(&mut self, target: Option<&mut dyn TargetMesh>) -> Vec3 {
        let ps = self.config.pixel_scale;
        let (tw, th) = self.texture_dims();
        let max = self.max_scale();
        let start = self.clamp_scale(self.scale);

        let texels_for = |axis: Axis| -> f64 {
            let ceiling = (max.get(axis) * ps + 1e-9).floor().max(1.0);
            (start.get(axis) * ps).round().clamp(1.0, ceiling)
        };
        let texels = Vec3::new(texels_for(Axis::X), texels_for(Axis::Y), texels_for(Axis::Z));
        self.scale = self.clamp_scale(Vec3::new(texels.x / ps, texels.y / ps, texels.z / ps));

        let canvas = self.canvas;
        for side in &mut self.sides {
            let (a, b) = side.id().axes();
            let (a, b) = if side.rotation() % 2 == 1 { (b, a) } else { (a, b) };
            let uv = side.uv_rect();
            let size = Size::new(
                texels.get(a) / f64::from(tw),
                texels.get(b) / f64::from(th),
            );
            let top = uv.origin.y + uv.size.height;
            let origin = Point::new(uv.origin.x, top - size.height);
            side.set_uv_rect(UvRect::new(origin, size), canvas);
        }
        tracing::debug!(?texels, scale = ?self.scale, "pixel scale applied");

        match target {
            Some(t) => t.write_scale(self.scale),
            None => tracing::debug!("no target bound; scale kept on the layout only"),
        }
        self.scale
    }

    /// Per-vertex UVs for `mesh`, one entry per vertex position.
    ///
    /// Each vertex takes the side of the first triangle that references it and is placed by a
    /// bilinear blend over that side's UV quad, using its coordinates within the face's unit
    /// square. Unreferenced vertices map to the origin.
    #[tracing::instrument(skip(self, mesh))]
    pub fn generate_uv(&self, mesh: &dyn TargetMesh) -> Vec<Point> {
        let positions = mesh.positions();
        let triangles = mesh.triangles();
        let tags = mesh.triangle_sides();
        if triangles.len() != tags.len() {
            tracing::warn!(
                triangles = triangles.len(),
                tags = tags.len(),
                "triangle/side tag count mismatch; extra entries ignored"
            );
        }

        let supplied = mesh
            .face_coords()
            .filter(|coords| coords.len() == positions.len());
        let bounds = MeshBounds::of(positions);
        let quads: [[Point; 4]; 6] = std::array::from_fn(|i| self.sides[i].uv_quad());

        let mut owner: Vec<Option<SideId>> = vec![None; positions.len()];
        let mut uvs = vec![Point::ZERO; positions.len()];
        let mut seams = 0usize;
        for (tri, &side) in triangles.iter().zip(tags) {
            for &vi in tri {
                let vi = vi as usize;
                let Some(slot) = owner.get_mut(vi) else {
                    tracing::warn!(vertex = vi, "triangle references a missing vertex");
                    continue;
                };
                match *slot {
                    None => {
                        *slot = Some(side);
                        let local = match supplied {
                            Some(coords) => coords[vi],
                            None => bounds.face_coord(side, positions[vi]),
                        };
                        uvs[vi] = bilerp(&quads[side.index()], local.x, local.y);
                    }
                    Some(prev) if prev != side => seams += 1,
                    Some(_) => {}
                }
            }
        }

        let unreferenced = owner.iter().filter(|o| o.is_none()).count();
        if unreferenced > 0 {
            tracing::debug!(unreferenced, "vertices not referenced by any triangle");
        }
        if seams > 0 {
            tracing::warn!(
                seams,
                "vertices shared across sides; the first side wins, duplicate seam vertices instead"
            );
        }
        uvs
    }

    /// Generate UVs and write them into the configured channel of `target`.
    ///
    /// Without a target this is a no-op and returns `false`.
    pub fn update_target_uv(&self, target: Option<&mut dyn TargetMesh>) -> bool {
        let Some(target) = target else {
            tracing::debug!("no target bound; UV update skipped");
            return false;
        };
        let uvs = self.generate_uv(&*target);
        target.write_uvs(self.config.uv_channel, uvs);
        true
    }

    /// Capture everything needed to rebuild this layout.
    pub fn snapshot(&self) -> LayoutState {
        LayoutState {
            config: self.config.clone(),
            sides: self
                .sides
                .iter()
                .map(|s| SideState {
                    side: s.id(),
                    uv: s.uv_rect(),
                    rotation: s.rotation(),
                    mirrored: s.mirrored(),
                    locked: s.locked,
                })
                .collect(),
            scale: self.scale,
        }
    }

    /// Restore a snapshot, then refit the canvas, rebuild the grid, and rebind every side.
    pub fn restore(&mut self, state: &LayoutState) -> UnwrapResult<()> {
        state.validate()?;
        self.config = state.config.clone();
        self.scale = self.clamp_scale(state.scale);
        let canvas = self.canvas;
        for s in &state.sides {
            let side = &mut self.sides[s.side.index()];
            side.restore_orientation(s.rotation, s.mirrored, s.locked);
            side.set_uv_rect(s.uv, canvas);
        }
        self.refit();
        Ok(())
    }

    /// Build a layout from a snapshot for a given canvas.
    pub fn from_state(state: &LayoutState, canvas: Rect) -> UnwrapResult<Self> {
        let mut layout = Self::new(state.config.clone())?;
        layout.set_canvas(canvas);
        layout.restore(state)?;
        Ok(layout)
    }
}

/// Cross unfold placement on a 4x3 cell layout.
pub fn default_uv_rect(id: SideId) -> UvRect {
    let (col, row) = match id {
        SideId::Top => (1.0, 0.0),
        SideId::Left => (0.0, 1.0),
        SideId::Front => (1.0, 1.0),
        SideId::Right => (2.0, 1.0),
        SideId::Back => (3.0, 1.0),
        SideId::Bottom => (1.0, 2.0),
    };
    let (w, h) = (1.0 / 4.0, 1.0 / 3.0);
    // Rows count from the top of the canvas; V counts from the bottom.
    UvRect::new(Point::new(col * w, 1.0 - (row + 1.0) * h), Size::new(w, h))
}

#[derive(Clone, Copy, Debug)]
struct MeshBounds {
    min: Vec3,
    extent: Vec3,
}

impl MeshBounds {
    fn of(positions: &[Vec3]) -> Self {
        let Some(first) = positions.first().copied() else {
            return Self {
                min: Vec3::ZERO,
                extent: Vec3::ZERO,
            };
        };
        let (min, max) = positions
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        Self {
            min,
            extent: Vec3::new(max.x - min.x, max.y - min.y, max.z - min.z),
        }
    }

    fn norm(&self, p: Vec3, axis: Axis) -> f64 {
        let e = self.extent.get(axis);
        if e > 0.0 {
            ((p.get(axis) - self.min.get(axis)) / e).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Coordinates inside the face's unit square, as seen from outside the cube.
    fn face_coord(&self, side: SideId, p: Vec3) -> Point {
        let (x, y, z) = (
            self.norm(p, Axis::X),
            self.norm(p, Axis::Y),
            self.norm(p, Axis::Z),
        );
        let (s, t) = match side {
            SideId::Front => (x, y),
            SideId::Back => (1.0 - x, y),
            SideId::Right => (1.0 - z, y),
            SideId::Left => (z, y),
            SideId::Top => (x, 1.0 - z),
            SideId::Bottom => (x, z),
        };
        Point::new(s, t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/model.rs"]
mod tests;
