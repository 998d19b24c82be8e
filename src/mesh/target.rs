use crate::{
    foundation::core::{Point, Vec3},
    layout::side::SideId,
    layout::state::UvChannel,
};

/// Host-owned mesh that receives generated UVs.
///
/// The layout only borrows a target for the duration of one call and never keeps it.
pub trait TargetMesh {
    /// Vertex positions in mesh space.
    fn positions(&self) -> &[Vec3];

    /// Triangle vertex indices.
    fn triangles(&self) -> &[[u32; 3]];

    /// Side tag for each triangle, parallel to [`TargetMesh::triangles`].
    fn triangle_sides(&self) -> &[SideId];

    /// Optional per-vertex coordinates inside each vertex's face unit square.
    ///
    /// When absent (or of the wrong length) they are derived from positions and the mesh
    /// bounding box.
    fn face_coords(&self) -> Option<&[Point]> {
        None
    }

    /// Replace the UV set `channel` with `uvs` (one per vertex).
    fn write_uvs(&mut self, channel: UvChannel, uvs: Vec<Point>);

    /// Apply a new mesh-space scale.
    fn write_scale(&mut self, scale: Vec3);
}
