//! Owned triangle mesh handed back by kernel backends.

/// Triangle soup with shared vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]`.
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]`.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// `true` if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.num_triangles() == 0
    }

    /// Append a vertex, returning its index.
    pub fn push_vertex(&mut self, p: [f32; 3]) -> u32 {
        let idx = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&p);
        idx
    }

    /// Append a triangle by vertex indices.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Scale every vertex uniformly about the origin.
    pub fn scale_uniform(&mut self, factor: f32) {
        for v in &mut self.vertices {
            *v *= factor;
        }
    }

    /// Axis-aligned bounds as `(min, max)`, `None` without vertices.
    pub fn bounding_box(&self) -> Option<([f32; 3], [f32; 3])> {
        let mut points = self.vertices.chunks_exact(3);
        let first = points.next()?;
        let mut min = [first[0], first[1], first[2]];
        let mut max = min;
        for p in points {
            for k in 0..3 {
                min[k] = min[k].min(p[k]);
                max[k] = max[k].max(p[k]);
            }
        }
        Some((min, max))
    }

    /// Largest side of the bounding box, 0 for an empty mesh.
    pub fn max_extent(&self) -> f64 {
        self.bounding_box().map_or(0.0, |(min, max)| {
            (0..3)
                .map(|k| f64::from(max[k] - min[k]))
                .fold(0.0, f64::max)
        })
    }

    /// Position of vertex `i`.
    pub fn vertex(&self, i: u32) -> [f32; 3] {
        let i = i as usize * 3;
        [self.vertices[i], self.vertices[i + 1], self.vertices[i + 2]]
    }

    /// Iterate over triangles as corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [self.vertex(t[0]), self.vertex(t[1]), self.vertex(t[2])])
    }
}
