use std::fmt::Write as _;

use crate::{
    foundation::core::{Point, Vec3},
    layout::side::SideId,
    layout::state::UvChannel,
    mesh::target::TargetMesh,
};

/// Box mesh with four vertices per face, so every cube corner is duplicated per adjacent side.
///
/// Faces follow [`SideId`] index order; each face is two triangles wound counter-clockwise as
/// seen from outside. Vertex corners within a face run bottom-left, bottom-right, top-right,
/// top-left in that face's unit square.
#[derive(Clone, Debug, PartialEq)]
pub struct CubeMesh {
    unit: Vec<Vec3>,
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    sides: Vec<SideId>,
    uv: Vec<Point>,
    uv2: Vec<Point>,
    scale: Vec3,
}

impl Default for CubeMesh {
    fn default() -> Self {
        Self::new(Vec3::ONE)
    }
}

impl CubeMesh {
    /// Cube centered on the origin with extents `scale`.
    pub fn new(scale: Vec3) -> Self {
        let mut unit = Vec::with_capacity(24);
        let mut triangles = Vec::with_capacity(12);
        let mut sides = Vec::with_capacity(12);

        for side in SideId::ALL {
            let base = unit.len() as u32;
            for [x, y, z] in face_corners(side) {
                unit.push(Vec3::new(x * 0.5, y * 0.5, z * 0.5));
            }
            triangles.push([base, base + 1, base + 2]);
            triangles.push([base, base + 2, base + 3]);
            sides.extend([side, side]);
        }

        let positions = unit.iter().map(|p| p.mul(scale)).collect();
        Self {
            positions,
            triangles,
            sides,
            uv: vec![Point::ZERO; unit.len()],
            uv2: vec![Point::ZERO; unit.len()],
            unit,
            scale,
        }
    }

    /// Number of vertices (24).
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Current extents.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// UV set `channel`.
    pub fn uvs(&self, channel: UvChannel) -> &[Point] {
        match channel {
            UvChannel::Primary => &self.uv,
            UvChannel::Secondary => &self.uv2,
        }
    }

    /// Wavefront OBJ text with positions, primary UVs, and faces.
    pub fn to_obj_string(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# cube-unwrap");
        for p in &self.positions {
            let _ = writeln!(out, "v {} {} {}", p.x, p.y, p.z);
        }
        for uv in &self.uv {
            let _ = writeln!(out, "vt {} {}", uv.x, uv.y);
        }
        let mut current = None;
        for (tri, side) in self.triangles.iter().zip(&self.sides) {
            if current != Some(*side) {
                let _ = writeln!(out, "g {}", side.name());
                current = Some(*side);
            }
            let [a, b, c] = tri.map(|i| i + 1);
            let _ = writeln!(out, "f {a}/{a} {b}/{b} {c}/{c}");
        }
        out
    }
}

impl TargetMesh for CubeMesh {
    fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    fn triangle_sides(&self) -> &[SideId] {
        &self.sides
    }

    fn write_uvs(&mut self, channel: UvChannel, uvs: Vec<Point>) {
        match channel {
            UvChannel::Primary => self.uv = uvs,
            UvChannel::Secondary => self.uv2 = uvs,
        }
    }

    fn write_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.positions = self.unit.iter().map(|p| p.mul(scale)).collect();
    }
}

/// Corner signs for one face, ordered bottom-left, bottom-right, top-right, top-left as seen
/// from outside the cube.
fn face_corners(side: SideId) -> [[f64; 3]; 4] {
    match side {
        SideId::Front => [
            [-1.0, -1.0, 1.0],
            [1.0, -1.0, 1.0],
            [1.0, 1.0, 1.0],
            [-1.0, 1.0, 1.0],
        ],
        SideId::Back => [
            [1.0, -1.0, -1.0],
            [-1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [1.0, 1.0, -1.0],
        ],
        SideId::Right => [
            [1.0, -1.0, 1.0],
            [1.0, -1.0, -1.0],
            [1.0, 1.0, -1.0],
            [1.0, 1.0, 1.0],
        ],
        SideId::Left => [
            [-1.0, -1.0, -1.0],
            [-1.0, -1.0, 1.0],
            [-1.0, 1.0, 1.0],
            [-1.0, 1.0, -1.0],
        ],
        SideId::Top => [
            [-1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, -1.0],
            [-1.0, 1.0, -1.0],
        ],
        SideId::Bottom => [
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, -1.0, 1.0],
            [-1.0, -1.0, 1.0],
        ],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/cube.rs"]
mod tests;
