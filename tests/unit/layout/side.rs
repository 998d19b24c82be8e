use super::*;

const TOL: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < TOL
}

fn rect_close(a: Rect, b: Rect) -> bool {
    close(a.x0, b.x0) && close(a.y0, b.y0) && close(a.x1, b.x1) && close(a.y1, b.y1)
}

fn side_at(rect: Rect, canvas: Rect) -> Side {
    let mut s = Side::new(
        SideId::Front,
        UvRect::new(Point::ZERO, Size::new(0.1, 0.1)),
        canvas,
    );
    s.set_rect(rect, canvas);
    s
}

#[test]
fn top_left_rect_maps_to_top_half_of_uv_space() {
    let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
    let s = side_at(Rect::new(0.0, 0.0, 50.0, 50.0), canvas);
    let uv = s.uv_rect();
    assert!(close(uv.origin.x, 0.0));
    assert!(close(uv.origin.y, 0.5));
    assert!(close(uv.size.width, 0.5));
    assert!(close(uv.size.height, 0.5));

    let q = s.uv_quad();
    assert_eq!(q[0], Point::new(0.0, 0.5));
    assert_eq!(q[1], Point::new(0.5, 0.5));
    assert_eq!(q[2], Point::new(0.5, 1.0));
    assert_eq!(q[3], Point::new(0.0, 1.0));
}

#[test]
fn mapping_round_trips_for_rects_inside_canvas() {
    let canvas = Rect::new(12.0, 40.0, 412.0, 340.0);
    for (x, y, w, h) in [
        (12.0, 40.0, 400.0, 300.0),
        (30.5, 77.25, 64.0, 32.0),
        (300.0, 200.0, 112.0, 140.0),
        (12.0, 339.0, 1.0, 1.0),
    ] {
        let r = Rect::from_origin_size(Point::new(x, y), Size::new(w, h));
        let s = side_at(r, canvas);
        assert!(rect_close(s.rect(), r), "{r:?}");
        assert!(rect_close(s.rect_from_uv(canvas), r), "{r:?}");
    }
}

#[test]
fn set_rect_clamps_into_canvas_and_keeps_uv_in_unit_square() {
    let canvas = Rect::new(0.0, 0.0, 200.0, 100.0);
    let s = side_at(Rect::new(180.0, -30.0, 230.0, 20.0), canvas);
    assert_eq!(s.rect(), Rect::new(150.0, 0.0, 200.0, 50.0));
    for p in s.uv_quad() {
        assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
    }
}

#[test]
fn rotate_uv_has_order_four_and_does_not_move_rect() {
    let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut s = side_at(Rect::new(10.0, 10.0, 40.0, 30.0), canvas);
    let rect = s.rect();
    let q0 = s.uv_quad();

    s.rotate_uv();
    let q1 = s.uv_quad();
    assert_eq!(q1, [q0[1], q0[2], q0[3], q0[0]]);
    assert_eq!(s.rect(), rect);

    s.rotate_uv();
    s.rotate_uv();
    assert_ne!(s.uv_quad(), q0);
    s.rotate_uv();
    assert_eq!(s.rotation(), 0);
    assert_eq!(s.uv_quad(), q0);
}

#[test]
fn mirror_swaps_horizontal_order_and_is_an_involution() {
    let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut s = side_at(Rect::new(10.0, 10.0, 40.0, 30.0), canvas);
    s.rotate_uv();
    let q0 = s.uv_quad();

    s.toggle_mirror();
    assert!(s.mirrored());
    let q1 = s.uv_quad();
    assert_ne!(q1, q0);
    let us0: Vec<f64> = q0.iter().map(|p| p.x).collect();
    let us1: Vec<f64> = q1.iter().map(|p| p.x).collect();
    let lo = us0.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = us0.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    for (a, b) in us0.iter().zip(&us1) {
        assert!(close(*a + *b, lo + hi));
    }

    s.toggle_mirror();
    assert_eq!(s.uv_quad(), q0);
}

#[test]
fn rotate_rect_swaps_extent_about_center() {
    let canvas = Rect::new(0.0, 0.0, 200.0, 200.0);
    let mut s = side_at(Rect::new(50.0, 80.0, 110.0, 100.0), canvas);
    s.rotate_rect(canvas);
    let r = s.rect();
    assert!(close(r.width(), 20.0));
    assert!(close(r.height(), 60.0));
    assert!(close(r.center().x, 80.0));
    assert!(close(r.center().y, 90.0));
    assert!(rect_close(s.rect_from_uv(canvas), r));
}

#[test]
fn rotate_rect_reclamps_near_edges() {
    let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut s = side_at(Rect::new(0.0, 90.0, 60.0, 100.0), canvas);
    s.rotate_rect(canvas);
    let r = s.rect();
    assert!(r.y0 >= 0.0 && r.y1 <= 100.0 + TOL);
    assert!(close(r.height(), 60.0));
    assert!(close(r.y1, 100.0));
}

#[test]
fn locked_side_is_not_hit_but_accepts_orientation_edits() {
    let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut s = side_at(Rect::new(10.0, 10.0, 40.0, 30.0), canvas);
    let p = Point::new(20.0, 20.0);
    assert!(s.contains(p));
    assert!(!s.contains(Point::new(50.0, 50.0)));

    s.locked = true;
    assert!(!s.contains(p));
    s.rotate_uv();
    s.toggle_mirror();
    assert_eq!(s.rotation(), 1);
    assert!(s.mirrored());
}

#[test]
fn rebind_scales_with_canvas_and_is_idempotent() {
    let small = Rect::new(0.0, 0.0, 100.0, 100.0);
    let big = Rect::new(20.0, 10.0, 420.0, 210.0);
    let mut s = side_at(Rect::new(25.0, 50.0, 50.0, 75.0), small);

    s.rebind(big);
    let once = s.rect();
    assert!(rect_close(once, Rect::new(120.0, 110.0, 220.0, 160.0)));
    s.rebind(big);
    assert_eq!(s.rect(), once);
}

#[test]
fn degenerate_canvas_keeps_previous_placement() {
    let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut s = side_at(Rect::new(10.0, 10.0, 40.0, 30.0), canvas);
    let uv = s.uv_rect();
    let rect = s.rect();
    s.map_rect_to_uv(Rect::new(0.0, 0.0, 0.0, 0.0));
    s.rebind(Rect::new(0.0, 0.0, 0.0, 0.0));
    assert_eq!(s.uv_rect(), uv);
    assert_eq!(s.rect(), rect);
}

#[test]
fn side_index_round_trips() {
    for (i, id) in SideId::ALL.iter().enumerate() {
        assert_eq!(id.index(), i);
        assert_eq!(SideId::from_index(i), Some(*id));
    }
    assert_eq!(SideId::from_index(6), None);
    assert_eq!(SideId::Front.to_string(), "Front");
}
