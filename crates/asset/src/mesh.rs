//! Flattened, GPU-ready mesh buffers.

/// Per-corner vertex attributes, in the order the buffers are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Normal,
    Texcoord,
    /// One-hot `(1,0,0)`/`(0,1,0)`/`(0,0,1)` per triangle corner, for wireframe edges.
    Barycentric,
    Color,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Position,
        Attribute::Normal,
        Attribute::Texcoord,
        Attribute::Barycentric,
        Attribute::Color,
    ];

    /// Floats per corner.
    pub const fn components(self) -> usize {
        match self {
            Attribute::Position | Attribute::Normal | Attribute::Barycentric => 3,
            Attribute::Texcoord => 2,
            Attribute::Color => 4,
        }
    }
}

/// Unindexed triangle list: every corner is its own vertex and `indices` is
/// `0..corner_count`. A snapshot; rebuild it from the model to refresh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlattenedMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub barycentrics: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u32>,
}

impl FlattenedMesh {
    /// Zero-filled buffers sized for `corners`.
    pub fn with_corners(corners: usize) -> Self {
        let buf = |a: Attribute| vec![0.0; corners * a.components()];
        Self {
            positions: buf(Attribute::Position),
            normals: buf(Attribute::Normal),
            texcoords: buf(Attribute::Texcoord),
            barycentrics: buf(Attribute::Barycentric),
            colors: buf(Attribute::Color),
            indices: vec![0; corners],
        }
    }

    pub fn corner_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn attribute(&self, attribute: Attribute) -> &[f32] {
        match attribute {
            Attribute::Position => &self.positions,
            Attribute::Normal => &self.normals,
            Attribute::Texcoord => &self.texcoords,
            Attribute::Barycentric => &self.barycentrics,
            Attribute::Color => &self.colors,
        }
    }

    /// Raw bytes of one attribute buffer, ready for upload.
    pub fn attribute_bytes(&self, attribute: Attribute) -> &[u8] {
        bytemuck::cast_slice(self.attribute(attribute))
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Returns `true` if every buffer matches the corner count and the count
    /// is a whole number of triangles.
    pub fn is_valid(&self) -> bool {
        let n = self.corner_count();
        n % 3 == 0
            && Attribute::ALL
                .iter()
                .all(|&a| self.attribute(a).len() == n * a.components())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preallocated_buffers_are_consistent() {
        let mesh = FlattenedMesh::with_corners(6);
        assert!(mesh.is_valid());
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.colors.len(), 24);
        assert_eq!(mesh.attribute_bytes(Attribute::Texcoord).len(), 6 * 2 * 4);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }

    #[test]
    fn empty_mesh_is_valid_but_empty() {
        let mesh = FlattenedMesh::default();
        assert!(mesh.is_valid());
        assert!(mesh.is_empty());
    }

    #[test]
    fn mismatched_buffers_are_invalid() {
        let mut mesh = FlattenedMesh::with_corners(3);
        mesh.normals.pop();
        assert!(!mesh.is_valid());
    }
}
