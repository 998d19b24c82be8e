use crate::{
    foundation::core::{Point, Rect, Size, Vec3},
    foundation::error::UnwrapResult,
    foundation::math::clamp_rect_into,
    host::hooks::{HookRegistration, HostEvents, HostHook},
    layout::model::Layout,
    layout::side::SideId,
    layout::state::{LayoutState, TextureInfo},
    mesh::target::TargetMesh,
};

/// Hooks a session subscribes to for its whole lifetime.
pub const SESSION_HOOKS: [HostHook; 2] = [HostHook::UndoRedo, HostHook::SceneFrame];

/// Pointer interaction state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    /// Nothing selected.
    Idle,
    /// A side is selected for inspection but not being dragged.
    SideSelected(SideId),
    /// A side follows the pointer.
    Dragging {
        /// Dragged side.
        side: SideId,
        /// Pointer position at press.
        press: Point,
        /// Side rectangle origin at press.
        origin: Point,
    },
}

/// Session controller: owns the [`Layout`] and turns host input into layout edits.
///
/// Every method runs to completion synchronously. Target meshes are passed per call and, when
/// auto-update is enabled, receive regenerated UVs after each edit.
#[derive(Clone, Debug)]
pub struct LayoutHost {
    layout: Layout,
    state: DragState,
    change_scale: bool,
}

impl LayoutHost {
    /// Wrap a layout.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            state: DragState::Idle,
            change_scale: false,
        }
    }

    /// Subscribe the session's host hooks; they are released when the guard drops.
    pub fn attach<'h, H: HostEvents + ?Sized>(host: &'h mut H) -> HookRegistration<'h, H> {
        HookRegistration::register(host, &SESSION_HOOKS)
    }

    /// The layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Mutable layout access for settings that need no regeneration.
    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// Current interaction state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Side shown in the inspector, if any.
    pub fn selected(&self) -> Option<SideId> {
        match self.state {
            DragState::Idle => None,
            DragState::SideSelected(side) | DragState::Dragging { side, .. } => Some(side),
        }
    }

    /// Select a side without starting a drag (inspector fold-out).
    pub fn select(&mut self, side: SideId) {
        self.state = DragState::SideSelected(side);
    }

    /// Whether the scene scale handle is active.
    pub fn change_scale(&self) -> bool {
        self.change_scale
    }

    /// Toggle the scene scale handle.
    pub fn set_change_scale(&mut self, on: bool) {
        self.change_scale = on;
    }

    /// Primary button press. Starts dragging the first unlocked side under `p`.
    ///
    /// Presses outside the canvas are ignored; presses on empty canvas clear the selection.
    pub fn pointer_down(&mut self, p: Point) -> Option<SideId> {
        if !self.layout.canvas().contains(p) {
            return self.selected();
        }
        match self.layout.hit_test(p) {
            Some(side) => {
                let origin = self.layout.side(side).rect().origin();
                self.state = DragState::Dragging {
                    side,
                    press: p,
                    origin,
                };
                Some(side)
            }
            None => {
                self.state = DragState::Idle;
                None
            }
        }
    }

    /// Pointer motion. Moves the dragged side by the pointer delta, clamped to the canvas and
    /// snapped to the grid when enabled. Returns `true` when a side moved.
    pub fn pointer_move(&mut self, p: Point, target: Option<&mut dyn TargetMesh>) -> bool {
        let DragState::Dragging {
            side,
            press,
            origin,
        } = self.state
        else {
            return false;
        };

        let canvas = self.layout.canvas();
        let size = self.layout.side(side).rect().size();
        let moved = Rect::from_origin_size(origin + (p - press), size);
        let clamped = clamp_rect_into(moved, canvas);
        let snapped = self.layout.snap(clamped.origin());
        let before = self.layout.side(side).rect();
        self.layout
            .set_side_rect(side, Rect::from_origin_size(snapped, size));

        let changed = self.layout.side(side).rect() != before;
        if changed {
            self.auto_update(target);
        }
        changed
    }

    /// Primary button release. Ends a drag, keeping the side selected.
    pub fn pointer_up(&mut self) {
        if let DragState::Dragging { side, .. } = self.state {
            self.state = DragState::SideSelected(side);
        }
    }

    /// Rotate a side's UV quad by a quarter turn.
    pub fn rotate_uv(&mut self, side: SideId, target: Option<&mut dyn TargetMesh>) {
        self.layout.rotate_uv(side);
        self.auto_update(target);
    }

    /// Swap a side's rectangle extent.
    pub fn rotate_rect(&mut self, side: SideId, target: Option<&mut dyn TargetMesh>) {
        self.layout.rotate_rect(side);
        self.auto_update(target);
    }

    /// Reflect a side's UV quad.
    pub fn toggle_mirror(&mut self, side: SideId, target: Option<&mut dyn TargetMesh>) {
        self.layout.toggle_mirror(side);
        self.auto_update(target);
    }

    /// Lock or unlock a side against dragging.
    pub fn set_locked(&mut self, side: SideId, locked: bool) {
        self.layout.set_locked(side, locked);
    }

    /// Regenerate target UVs unconditionally ("Update UVs"). No-op without a target.
    pub fn update_target_uv(&self, target: Option<&mut dyn TargetMesh>) -> bool {
        self.layout.update_target_uv(target)
    }

    /// Per-frame window geometry. Rebinds and regenerates when the canvas moved.
    pub fn set_window(
        &mut self,
        available: Rect,
        window_size: Size,
        target: Option<&mut dyn TargetMesh>,
    ) -> bool {
        let changed = self.layout.set_window(available, window_size);
        if changed {
            self.auto_update(target);
        }
        changed
    }

    /// Change the pixel scale and re-derive the target scale.
    pub fn set_pixel_scale(
        &mut self,
        pixel_scale: f64,
        target: Option<&mut dyn TargetMesh>,
    ) -> UnwrapResult<Vec3> {
        self.layout.set_pixel_scale(pixel_scale)?;
        Ok(self.layout.apply_pixel_scale(target))
    }

    /// Bind or unbind the target texture and re-derive the target scale.
    pub fn bind_texture(
        &mut self,
        texture: Option<TextureInfo>,
        target: Option<&mut dyn TargetMesh>,
    ) -> Vec3 {
        self.layout.bind_texture(texture);
        self.layout.apply_pixel_scale(target)
    }

    /// [`HostHook::UndoRedo`]: restore the host's snapshot, then refresh target UVs.
    pub fn on_undo_redo(
        &mut self,
        state: &LayoutState,
        target: Option<&mut dyn TargetMesh>,
    ) -> UnwrapResult<()> {
        self.layout.restore(state)?;
        if let DragState::Dragging { side, .. } = self.state {
            self.state = DragState::SideSelected(side);
        }
        self.auto_update(target);
        Ok(())
    }

    /// [`HostHook::SceneFrame`]: feed the scale handle value while change-scale mode is on.
    ///
    /// Returns the applied scale when it changed.
    pub fn on_scene_frame(
        &mut self,
        handle_scale: Vec3,
        target: Option<&mut dyn TargetMesh>,
    ) -> Option<Vec3> {
        if !self.change_scale {
            return None;
        }
        let Some(target) = target else {
            tracing::debug!("scale handle ignored without a target");
            return None;
        };
        let clamped = self.layout.clamp_scale(handle_scale);
        if clamped == self.layout.scale() {
            return None;
        }
        Some(self.layout.set_scale(clamped, Some(target)))
    }

    fn auto_update(&self, target: Option<&mut dyn TargetMesh>) {
        if self.layout.config().auto_update_target_uv {
            self.layout.update_target_uv(target);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/controller.rs"]
mod tests;
