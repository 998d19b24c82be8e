//! cube-unwrap lays out the six faces of a box mesh on a texture atlas and generates the
//! matching per-vertex UV coordinates.
//!
//! # Model overview
//!
//! 1. **Layout**: a [`Layout`] owns a canvas rectangle, a texel [`Grid`], and six [`Side`]s.
//!    Each side carries a placement rectangle plus a rotation step, mirror flag, and lock.
//! 2. **Edit**: a [`LayoutHost`] turns pointer input and commands into side edits, clamping
//!    every rectangle into the canvas and snapping to the grid when enabled.
//! 3. **Generate**: [`Layout::generate_uv`] maps every vertex of a [`TargetMesh`] into its
//!    side's UV quad; [`Layout::apply_pixel_scale`] keeps the mesh scale on whole texels.
//! 4. **Persist**: [`LayoutState`] snapshots round-trip through JSON so hosts can restore a
//!    session after undo or on a different canvas size.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No globals**: the layout is an explicit value; targets are borrowed per call.
//! - **Pure derivations**: UV quads, previews, and fill textures are recomputed from state on
//!   demand and never cached.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod foundation;
mod host;
mod layout;
mod mesh;
mod texture;

pub use foundation::core::{Axis, Point, Rect, Rgba8, Size, Vec2, Vec3};
pub use foundation::error::{UnwrapError, UnwrapResult};
pub use foundation::math::{clamp_rect_into, is_usable_rect};
pub use host::controller::{DragState, LayoutHost, SESSION_HOOKS};
pub use host::hooks::{HookRegistration, HostEvents, HostHook};
pub use layout::grid::{Grid, MIN_SNAP_CELL_PX};
pub use layout::model::{Layout, MAX_ZOOM, MIN_ZOOM, UNBOUND_MAX_SCALE, default_uv_rect};
pub use layout::side::{Side, SideId, UvRect};
pub use layout::state::{
    LayoutConfig, LayoutState, MAX_PIXEL_SCALE, SideState, TextureInfo, UvChannel,
};
pub use mesh::cube::CubeMesh;
pub use mesh::target::TargetMesh;
pub use texture::fill::{FillKind, encode_png, generate_fill_texture};
pub use texture::preview::side_preview;

pub use image::RgbaImage;
