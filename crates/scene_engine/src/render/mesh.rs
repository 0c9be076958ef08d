//! Mesh representation for 3D models
//!
//! Backend-agnostic geometry: interleaved vertices (position, normal, texture
//! coordinate) plus a `u32` index list describing triangles. Backends decide how
//! the data is uploaded; [`Mesh::vertex_data`] gives them the interleaved floats.

/// 3D vertex data structure for rendering
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Number of floats per vertex in [`Mesh::vertex_data`]
    pub const FLOATS: usize = 8;

    /// Create a new vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Index data for triangles
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Unit square on the XY plane facing +Z, centered on the origin, UVs spanning 0..1
    pub fn square() -> Self {
        let normal = [0.0, 0.0, 1.0];
        let vertices = vec![
            Vertex::new([-0.5, -0.5, 0.0], normal, [0.0, 1.0]),
            Vertex::new([0.5, -0.5, 0.0], normal, [1.0, 1.0]),
            Vertex::new([0.5, 0.5, 0.0], normal, [1.0, 0.0]),
            Vertex::new([-0.5, 0.5, 0.0], normal, [0.0, 0.0]),
        ];
        let indices = vec![0, 1, 2, 2, 3, 0];
        Self::new(vertices, indices)
    }

    /// Unit cube centered on the origin with per-face normals and UVs
    pub fn cube() -> Self {
        // (normal, tangent u, tangent v) per face
        const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ];
        const CORNERS: [(f32, f32); 4] = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u_axis, v_axis) in FACES {
            let base = vertices.len() as u32;
            for (u, v) in CORNERS {
                let position = [
                    normal[0] * 0.5 + u_axis[0] * u + v_axis[0] * v,
                    normal[1] * 0.5 + u_axis[1] * u + v_axis[1] * v,
                    normal[2] * 0.5 + u_axis[2] * u + v_axis[2] * v,
                ];
                vertices.push(Vertex::new(position, normal, [u + 0.5, 0.5 - v]));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        Self::new(vertices, indices)
    }

    /// Number of triangles described by the index list
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Interleaved vertex floats in `position, normal, tex_coord` order
    pub fn vertex_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * Vertex::FLOATS);
        for vertex in &self.vertices {
            data.extend_from_slice(&vertex.position);
            data.extend_from_slice(&vertex.normal);
            data.extend_from_slice(&vertex.tex_coord);
        }
        data
    }

    /// Mirror the V texture coordinate of every vertex
    pub fn flip_v(&mut self) {
        for vertex in &mut self.vertices {
            vertex.tex_coord[1] = 1.0 - vertex.tex_coord[1];
        }
    }
}
