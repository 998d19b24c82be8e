use super::*;
use crate::foundation::core::{Point, Size};

fn sample_state() -> LayoutState {
    LayoutState {
        config: LayoutConfig {
            snap_to_grid: false,
            texture_width: 128,
            pixel_scale: 0.05,
            uv_channel: UvChannel::Secondary,
            ..LayoutConfig::default()
        },
        sides: vec![
            SideState {
                side: SideId::Front,
                uv: UvRect::new(Point::new(0.25, 0.25), Size::new(0.25, 0.5)),
                rotation: 3,
                mirrored: true,
                locked: false,
            },
            SideState {
                side: SideId::Top,
                uv: UvRect::new(Point::new(0.0, 0.75), Size::new(0.25, 0.25)),
                rotation: 0,
                mirrored: false,
                locked: true,
            },
        ],
        scale: Vec3::new(2.0, 3.0, 4.0),
    }
}

#[test]
fn json_round_trip_preserves_state() {
    let state = sample_state();
    let json = state.to_json_string().unwrap();
    assert!(json.contains("\"Secondary\""));
    let back = LayoutState::from_json_str(&json).unwrap();
    assert_eq!(back, state);
}

#[test]
fn missing_fields_take_defaults() {
    let json = r#"{
        "sides": [
            { "side": "Left", "uv": { "origin": { "x": 0.0, "y": 0.5 }, "size": { "width": 0.25, "height": 0.25 } } }
        ]
    }"#;
    let state = LayoutState::from_json_str(json).unwrap();
    assert_eq!(state.config, LayoutConfig::default());
    assert_eq!(state.scale, Vec3::ONE);
    assert_eq!(state.sides[0].rotation, 0);
    assert!(!state.sides[0].locked);
}

#[test]
fn validation_rejects_bad_records() {
    let mut dup = sample_state();
    dup.sides[1].side = SideId::Front;
    let err = dup.validate().unwrap_err();
    assert!(err.to_string().contains("more than once"));

    let mut rot = sample_state();
    rot.sides[0].rotation = 4;
    assert!(rot.validate().is_err());

    let mut scale = sample_state();
    scale.scale.y = f64::NAN;
    assert!(scale.validate().is_err());

    let mut ps = sample_state();
    ps.config.pixel_scale = 0.25;
    assert!(matches!(ps.validate(), Err(UnwrapError::InvalidArgument(_))));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = LayoutState::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, UnwrapError::Serde(_)));
}

#[test]
fn texture_info_rejects_zero_sides() {
    assert!(TextureInfo::new(0, 4).is_err());
    assert!(TextureInfo::new(4, 0).is_err());
    assert_eq!(
        TextureInfo::new(4, 8).unwrap(),
        TextureInfo {
            width: 4,
            height: 8
        }
    );
}

#[test]
fn file_round_trip_creates_parent_dirs() {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_state")
        .join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("layout.json");

    let state = sample_state();
    state.write_to_path(&path).unwrap();
    assert_eq!(LayoutState::from_path(&path).unwrap(), state);

    let missing = LayoutState::from_path(&dir.join("missing.json")).unwrap_err();
    assert!(matches!(missing, UnwrapError::Other(_)));
}
