//! Model -> flat per-corner buffers.

use corelib::{Rgba, Vec2, Vec3};

use crate::mesh::FlattenedMesh;
use crate::obj::ObjModel;

impl ObjModel {
    /// Color for a `usemtl` name: first material across all libraries whose name
    /// matches after trimming, else [`Rgba::FALLBACK`].
    pub fn find_color(&self, name: &str) -> Rgba {
        self.libraries
            .iter()
            .find_map(|lib| lib.find(name))
            .map(|m| m.color)
            .unwrap_or(Rgba::FALLBACK)
    }

    /// Emit every triangulated corner of every face, groups and faces in source
    /// order. Corners without `vt` get `(0, 0)`; corners without `vn` get the
    /// face normal.
    ///
    /// Call once [`ObjModel::is_ready`] holds; earlier calls resolve colors
    /// against whatever materials have arrived.
    pub fn flatten(&self) -> FlattenedMesh {
        if !self.is_ready() {
            log::warn!(
                "Flattening '{}' before all resources are ready ({} pending)",
                self.source,
                self.resources.pending()
            );
        }

        let total = self.corner_count();
        let mut mesh = FlattenedMesh::with_corners(total);
        let mut ii = 0usize;

        for group in &self.groups {
            for face in group.faces() {
                let tris = face.triangulate();
                let color = self.find_color(tris.material).to_array();

                for (k, corner) in tris.corners.iter().enumerate() {
                    mesh.indices[ii] = ii as u32;

                    let p = self
                        .positions
                        .get(corner.vertex)
                        .copied()
                        .unwrap_or(Vec3::ZERO);
                    p.write_to_slice(&mut mesh.positions[ii * 3..ii * 3 + 3]);

                    let bary = &mut mesh.barycentrics[ii * 3..ii * 3 + 3];
                    bary[k % 3] = 1.0;

                    let uv = corner
                        .texcoord
                        .and_then(|t| self.texcoords.get(t).copied())
                        .unwrap_or(Vec2::ZERO);
                    uv.write_to_slice(&mut mesh.texcoords[ii * 2..ii * 2 + 2]);

                    mesh.colors[ii * 4..ii * 4 + 4].copy_from_slice(&color);

                    let n = corner
                        .normal
                        .and_then(|n| self.normals.get(n).copied())
                        .unwrap_or(tris.normal);
                    n.write_to_slice(&mut mesh.normals[ii * 3..ii * 3 + 3]);

                    ii += 1;
                }
            }
        }

        log::info!(
            "Flattened '{}': {} corners, {} triangles (vertex count: {})",
            self.source,
            mesh.corner_count(),
            mesh.triangle_count(),
            self.vertex_count()
        );
        mesh
    }
}
