//! Hypercube geometry
//!
//! The tesseract is the set of sign vectors {-1, +1}^4. Two vertices are
//! joined by an edge when they differ in exactly one coordinate.

use heapless::Vec;

/// Number of hypercube vertices
pub const VERTEX_COUNT: usize = 16;

/// Number of hypercube edges
pub const EDGE_COUNT: usize = 32;

/// Upper bound on edges between 16 arbitrary vertices (16 choose 2)
pub const MAX_EDGES: usize = VERTEX_COUNT * (VERTEX_COUNT - 1) / 2;

/// Point in the plane
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Point in 3D space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Lift into 4D with the given `w`
    pub const fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }

    /// Largest absolute coordinate
    pub fn max_abs(&self) -> f32 {
        libm::fabsf(self.x)
            .max(libm::fabsf(self.y))
            .max(libm::fabsf(self.z))
    }
}

impl core::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

/// Point in 4D space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

/// Hypercube vertex: one sign (-1 or +1) per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vertex {
    signs: [i8; 4],
}

impl Vertex {
    /// Create a vertex from per-axis signs
    ///
    /// Negative values map to -1, everything else to +1.
    pub const fn new(x: i8, y: i8, z: i8, w: i8) -> Self {
        const fn sign(v: i8) -> i8 {
            if v < 0 {
                -1
            } else {
                1
            }
        }
        Self {
            signs: [sign(x), sign(y), sign(z), sign(w)],
        }
    }

    /// Signs in x, y, z, w order
    pub const fn signs(&self) -> [i8; 4] {
        self.signs
    }

    /// Number of coordinates in which two vertices differ
    pub fn hamming(&self, other: &Vertex) -> u32 {
        self.signs
            .iter()
            .zip(other.signs.iter())
            .filter(|(a, b)| a != b)
            .count() as u32
    }

    /// Vertex as a point in 4D space
    pub fn to_point(self) -> Vec4 {
        let [x, y, z, w] = self.signs;
        Vec4::new(x as f32, y as f32, z as f32, w as f32)
    }
}

/// Edge between two vertex indices, `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Edge {
    pub a: u8,
    pub b: u8,
}

impl Edge {
    /// Create an edge, ordering the endpoints
    pub fn new(i: u8, j: u8) -> Self {
        Self {
            a: i.min(j),
            b: i.max(j),
        }
    }
}

/// Generate the 16 hypercube vertices
///
/// Enumeration is nested x, y, z, w (outermost first), each over -1 then
/// +1, so vertex indices are stable.
pub fn generate_vertices() -> [Vertex; VERTEX_COUNT] {
    core::array::from_fn(|i| {
        let bit = |shift: usize| if (i >> shift) & 1 == 0 { -1 } else { 1 };
        Vertex::new(bit(3), bit(2), bit(1), bit(0))
    })
}

/// Generate edges between every vertex pair at Hamming distance 1
///
/// Edges come out in lexicographic (i, j) order.
pub fn generate_edges(vertices: &[Vertex; VERTEX_COUNT]) -> Vec<Edge, MAX_EDGES> {
    let mut edges = Vec::new();
    for i in 0..VERTEX_COUNT {
        for j in (i + 1)..VERTEX_COUNT {
            if vertices[i].hamming(&vertices[j]) == 1 {
                // Capacity covers every pair, so this cannot fail
                let _ = edges.push(Edge::new(i as u8, j as u8));
            }
        }
    }
    edges
}

/// Hypercube mesh, built once at startup
#[derive(Debug, Clone)]
pub struct Tesseract {
    vertices: [Vertex; VERTEX_COUNT],
    edges: Vec<Edge, MAX_EDGES>,
}

impl Default for Tesseract {
    fn default() -> Self {
        Self::new()
    }
}

impl Tesseract {
    pub fn new() -> Self {
        let vertices = generate_vertices();
        let edges = generate_edges(&vertices);
        debug_assert_eq!(edges.len(), EDGE_COUNT);
        Self { vertices, edges }
    }

    pub fn vertices(&self) -> &[Vertex; VERTEX_COUNT] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
