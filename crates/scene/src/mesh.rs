use glam::Vec3;
use std::fmt;

/// A per-vertex attribute stream and the vertex buffer slot it binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    Position,
    Colour,
    Normal,
}

impl VertexAttribute {
    pub const ALL: [VertexAttribute; 3] = [
        VertexAttribute::Position,
        VertexAttribute::Colour,
        VertexAttribute::Normal,
    ];

    pub fn slot(self) -> u32 {
        match self {
            VertexAttribute::Position => 0,
            VertexAttribute::Colour => 1,
            VertexAttribute::Normal => 2,
        }
    }
}

impl fmt::Display for VertexAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VertexAttribute::Position => "position",
            VertexAttribute::Colour => "colour",
            VertexAttribute::Normal => "normal",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("mesh {mesh}: {attribute} stream has {got} entries, expected {expected}")]
    AttributeLength {
        mesh: String,
        attribute: VertexAttribute,
        expected: usize,
        got: usize,
    },
    #[error("mesh {mesh}: index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        mesh: String,
        index: u32,
        vertex_count: usize,
    },
    #[error("mesh {mesh}: {count} indices do not form whole triangles")]
    PartialTriangle { mesh: String, count: usize },
}

/// Indexed triangle mesh with one typed array per vertex attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    label: String,
    positions: Vec<Vec3>,
    colours: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl MeshData {
    pub fn new(
        label: impl Into<String>,
        positions: Vec<Vec3>,
        colours: Vec<Vec3>,
        normals: Vec<Vec3>,
        indices: Vec<u32>,
    ) -> Result<Self, MeshError> {
        let mesh = Self {
            label: label.into(),
            positions,
            colours,
            normals,
            indices,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Build a flat-shaded mesh: every triangle gets its own three vertices
    /// carrying that face's normal.
    pub fn flat_shaded(
        label: impl Into<String>,
        positions: &[Vec3],
        indices: &[u32],
        colour: Vec3,
    ) -> Result<Self, MeshError> {
        let label = label.into();
        if indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle {
                mesh: label,
                count: indices.len(),
            });
        }
        let mut out_positions = Vec::with_capacity(indices.len());
        let mut out_normals = Vec::with_capacity(indices.len());
        for tri in indices.chunks_exact(3) {
            let mut corners = [Vec3::ZERO; 3];
            for (corner, &index) in corners.iter_mut().zip(tri) {
                *corner = *positions.get(index as usize).ok_or_else(|| {
                    MeshError::IndexOutOfRange {
                        mesh: label.clone(),
                        index,
                        vertex_count: positions.len(),
                    }
                })?;
            }
            let normal = face_normal(corners[0], corners[1], corners[2]);
            out_positions.extend_from_slice(&corners);
            out_normals.extend_from_slice(&[normal; 3]);
        }
        let count = out_positions.len();
        Self::new(
            label,
            out_positions,
            vec![colour; count],
            out_normals,
            (0..count as u32).collect(),
        )
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        let expected = self.positions.len();
        for (attribute, got) in [
            (VertexAttribute::Colour, self.colours.len()),
            (VertexAttribute::Normal, self.normals.len()),
        ] {
            if got != expected {
                return Err(MeshError::AttributeLength {
                    mesh: self.label.clone(),
                    attribute,
                    expected,
                    got,
                });
            }
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle {
                mesh: self.label.clone(),
                count: self.indices.len(),
            });
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= expected) {
            return Err(MeshError::IndexOutOfRange {
                mesh: self.label.clone(),
                index,
                vertex_count: expected,
            });
        }
        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colours(&self) -> &[Vec3] {
        &self.colours
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The typed array backing one attribute slot.
    pub fn attribute(&self, attribute: VertexAttribute) -> &[Vec3] {
        match attribute {
            VertexAttribute::Position => &self.positions,
            VertexAttribute::Colour => &self.colours,
            VertexAttribute::Normal => &self.normals,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.positions[t[0] as usize],
                self.positions[t[1] as usize],
                self.positions[t[2] as usize],
            ]
        })
    }
}

/// Unit normal of the triangle `a, b, c`, wound counter-clockwise.
/// Zero for degenerate triangles.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}
