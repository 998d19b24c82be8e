use super::*;
use crate::{
    layout::state::{LayoutConfig, UvChannel},
    mesh::cube::CubeMesh,
};

const TOL: f64 = 1e-9;

fn host_512() -> LayoutHost {
    let mut layout = Layout::new(LayoutConfig::default()).unwrap();
    layout.set_canvas(Rect::new(0.0, 0.0, 512.0, 512.0));
    LayoutHost::new(layout)
}

fn front_press() -> Point {
    // Front sits in the middle cell of the cross: x 128..256, y 170.6..341.3.
    Point::new(150.0, 200.0)
}

#[test]
fn press_on_side_starts_drag_and_release_keeps_selection() {
    let mut host = host_512();
    assert_eq!(host.pointer_down(front_press()), Some(SideId::Front));
    assert!(matches!(
        host.state(),
        DragState::Dragging {
            side: SideId::Front,
            ..
        }
    ));
    host.pointer_up();
    assert_eq!(host.state(), DragState::SideSelected(SideId::Front));
    assert_eq!(host.selected(), Some(SideId::Front));
}

#[test]
fn press_on_empty_canvas_clears_selection_and_outside_is_ignored() {
    let mut host = host_512();
    host.select(SideId::Back);
    assert_eq!(host.pointer_down(Point::new(600.0, 10.0)), Some(SideId::Back));
    assert_eq!(host.state(), DragState::SideSelected(SideId::Back));

    // Top-left cell of the cross is empty.
    assert_eq!(host.pointer_down(Point::new(20.0, 20.0)), None);
    assert_eq!(host.state(), DragState::Idle);
}

#[test]
fn drag_moves_by_pointer_delta_and_snaps_to_texel_grid() {
    let mut host = host_512();
    assert!(host.layout().grid_usable());
    host.pointer_down(front_press());
    assert!(host.pointer_move(Point::new(163.0, 215.0), None));
    let r = host.layout().side(SideId::Front).rect();
    assert!((r.x0 - 144.0).abs() < TOL);
    assert!((r.y0 - 184.0).abs() < TOL);
}

#[test]
fn drag_without_snapping_follows_pointer_exactly() {
    let mut host = host_512();
    host.layout_mut().set_snap_to_grid(false);
    let start = host.layout().side(SideId::Front).rect();
    host.pointer_down(front_press());
    host.pointer_move(Point::new(163.0, 215.0), None);
    let r = host.layout().side(SideId::Front).rect();
    assert!((r.x0 - (start.x0 + 13.0)).abs() < TOL);
    assert!((r.y0 - (start.y0 + 15.0)).abs() < TOL);
    assert!((r.width() - start.width()).abs() < TOL);
}

#[test]
fn drag_is_clamped_to_canvas() {
    let mut host = host_512();
    host.pointer_down(front_press());
    host.pointer_move(Point::new(10_000.0, 10_000.0), None);
    let r = host.layout().side(SideId::Front).rect();
    assert!((r.x1 - 512.0).abs() < TOL);
    assert!((r.y1 - 512.0).abs() < TOL);

    host.pointer_move(Point::new(-10_000.0, -10_000.0), None);
    let r = host.layout().side(SideId::Front).rect();
    assert_eq!(r.origin(), Point::ZERO);
}

#[test]
fn locked_side_cannot_be_dragged() {
    let mut host = host_512();
    host.set_locked(SideId::Front, true);
    assert_eq!(host.pointer_down(front_press()), None);
    assert!(!host.pointer_move(Point::new(300.0, 300.0), None));
}

#[test]
fn move_without_drag_is_a_no_op() {
    let mut host = host_512();
    host.select(SideId::Front);
    assert!(!host.pointer_move(Point::new(300.0, 300.0), None));
}

#[test]
fn auto_update_writes_target_uvs_after_edits() {
    let mut host = host_512();
    let mut cube = CubeMesh::default();
    host.pointer_down(front_press());
    host.pointer_move(Point::new(200.0, 260.0), Some(&mut cube));
    let after_move = cube.uvs(UvChannel::Primary).to_vec();
    assert!(after_move.iter().any(|p| *p != Point::ZERO));

    host.rotate_uv(SideId::Front, Some(&mut cube));
    assert_ne!(cube.uvs(UvChannel::Primary), after_move.as_slice());
}

#[test]
fn auto_update_off_leaves_target_alone() {
    let mut host = host_512();
    host.layout_mut().set_auto_update_target_uv(false);
    let mut cube = CubeMesh::default();
    host.toggle_mirror(SideId::Top, Some(&mut cube));
    assert!(cube.uvs(UvChannel::Primary).iter().all(|p| *p == Point::ZERO));

    assert!(host.update_target_uv(Some(&mut cube)));
    assert!(cube.uvs(UvChannel::Primary).iter().any(|p| *p != Point::ZERO));
    assert!(!host.update_target_uv(None));
}

#[test]
fn undo_restores_snapshot_and_ends_drag() {
    let mut host = host_512();
    let before = host.layout().snapshot();
    let front_before = host.layout().side(SideId::Front).rect();

    host.pointer_down(front_press());
    host.pointer_move(Point::new(400.0, 450.0), None);
    host.rotate_uv(SideId::Front, None);
    assert_ne!(host.layout().side(SideId::Front).rect(), front_before);

    let mut cube = CubeMesh::default();
    host.on_undo_redo(&before, Some(&mut cube)).unwrap();
    let r = host.layout().side(SideId::Front).rect();
    assert!((r.x0 - front_before.x0).abs() < TOL);
    assert!((r.y0 - front_before.y0).abs() < TOL);
    assert_eq!(host.layout().side(SideId::Front).rotation(), 0);
    assert_eq!(host.state(), DragState::SideSelected(SideId::Front));
    assert!(cube.uvs(UvChannel::Primary).iter().any(|p| *p != Point::ZERO));
}

#[test]
fn scene_frame_applies_handle_scale_only_in_change_scale_mode() {
    let mut host = host_512();
    let mut cube = CubeMesh::default();
    let handle = Vec3::new(300.0, 0.2, 1000.0);
    assert_eq!(host.on_scene_frame(handle, Some(&mut cube)), None);

    host.set_change_scale(true);
    assert_eq!(host.on_scene_frame(handle, None), None);
    let applied = host.on_scene_frame(handle, Some(&mut cube)).unwrap();
    assert_eq!(applied, Vec3::new(300.0, 100.0, 500.0));
    assert_eq!(cube.scale(), applied);

    let current = host.layout().scale();
    assert_eq!(host.on_scene_frame(current, Some(&mut cube)), None);
}

#[test]
fn pixel_scale_changes_are_validated() {
    let mut host = host_512();
    assert!(host.set_pixel_scale(0.2, None).is_err());
    assert!(host.set_pixel_scale(0.0, None).is_err());
    let mut cube = CubeMesh::default();
    let s = host.set_pixel_scale(0.1, Some(&mut cube)).unwrap();
    assert_eq!(s, Vec3::new(10.0, 10.0, 10.0));
    assert_eq!(cube.scale(), s);
}

#[test]
fn window_resize_rebinds_and_refreshes_target() {
    let mut host = host_512();
    let mut cube = CubeMesh::default();
    let frac = host.layout().side(SideId::Right).uv_rect();
    assert!(host.set_window(
        Rect::new(10.0, 10.0, 330.0, 250.0),
        Size::new(700.0, 260.0),
        Some(&mut cube),
    ));
    assert_eq!(host.layout().canvas(), Rect::new(10.0, 10.0, 250.0, 250.0));
    let uv = host.layout().side(SideId::Right).uv_rect();
    assert!((uv.origin.x - frac.origin.x).abs() < TOL);
    assert!(cube.uvs(UvChannel::Primary).iter().any(|p| *p != Point::ZERO));
    assert!(!host.set_window(
        Rect::new(10.0, 10.0, 330.0, 250.0),
        Size::new(700.0, 260.0),
        Some(&mut cube),
    ));
}
