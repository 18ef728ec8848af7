use std::collections::{HashMap, HashSet};

use glam::Vec3;

use crate::geometry::{icosahedron, Quality};

/// Unit-radius geodesic sphere: a regular icosahedron whose faces have been
/// split 1-to-4 `quality` times, with every new vertex pushed back onto the
/// unit sphere.
///
/// The mesh is fully built by [`IcosahedronMesh::new`] and is read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct IcosahedronMesh {
    quality: Quality,
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl IcosahedronMesh {
    pub fn new(quality: Quality) -> Self {
        let mut builder = Builder::with_capacity(quality);
        builder.seed();
        for _ in 0..quality.get() {
            builder.subdivide();
        }

        log::debug!(
            "built geodesic sphere: quality={} vertices={} triangles={} midpoints={}",
            quality,
            builder.vertices.len(),
            builder.triangles.len(),
            builder.midpoints.len(),
        );

        Self {
            quality,
            vertices: builder.vertices,
            triangles: builder.triangles,
        }
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Interleaved `x, y, z` positions, ready for a vertex buffer.
    pub fn flat_positions(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    /// Three indices per triangle, in winding order.
    pub fn flat_indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Every undirected edge once, in the order it is first met while
    /// walking the triangle list. Each pair is stored as `(min, max)`.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut seen = HashSet::with_capacity(self.triangles.len() * 3 / 2);
        let mut edges = Vec::with_capacity(self.triangles.len() * 3 / 2);
        for tri in &self.triangles {
            for i in 0..3 {
                let key = EdgeKey::new(tri[i], tri[(i + 1) % 3]);
                if seen.insert(key) {
                    edges.push([key.0, key.1]);
                }
            }
        }
        edges
    }
}

/// Unordered pair of vertex indices, stored as `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EdgeKey(u32, u32);

impl EdgeKey {
    fn new(a: u32, b: u32) -> Self {
        Self(a.min(b), a.max(b))
    }
}

/// Construction-time state. Dropped once the mesh is built, taking the
/// midpoint cache with it.
struct Builder {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    midpoints: HashMap<EdgeKey, u32>,
}

impl Builder {
    fn with_capacity(quality: Quality) -> Self {
        Self {
            vertices: Vec::with_capacity(quality.vertex_count()),
            triangles: Vec::with_capacity(quality.triangle_count()),
            midpoints: HashMap::with_capacity(quality.vertex_count()),
        }
    }

    fn seed(&mut self) {
        for v in icosahedron::RAW_VERTICES.iter() {
            self.add_vertex(*v);
        }
        for [a, b, c] in icosahedron::FACES {
            self.add_face(a, b, c);
        }
    }

    fn add_vertex(&mut self, raw: Vec3) -> u32 {
        let length = raw.length();
        debug_assert!(length > 0.0, "zero-length vertex {:?}", raw);
        let index = self.vertices.len() as u32;
        self.vertices.push(raw / length);
        index
    }

    fn add_face(&mut self, a: u32, b: u32, c: u32) {
        debug_assert!(
            [a, b, c].iter().all(|&i| (i as usize) < self.vertices.len()),
            "face ({}, {}, {}) references a missing vertex",
            a,
            b,
            c
        );
        self.triangles.push([a, b, c]);
    }

    fn midpoint(&mut self, p1: u32, p2: u32) -> u32 {
        let key = EdgeKey::new(p1, p2);
        if let Some(&index) = self.midpoints.get(&key) {
            return index;
        }

        let a = self.vertices[p1 as usize];
        let b = self.vertices[p2 as usize];
        let index = self.add_vertex((a + b) / 2.0);
        self.midpoints.insert(key, index);
        index
    }

    /// One refinement pass. Only the triangles present when the pass starts
    /// are split; the parents are replaced by their four children.
    fn subdivide(&mut self) {
        let next = Vec::with_capacity(self.triangles.len() * 4);
        let parents = std::mem::replace(&mut self.triangles, next);

        for [v0, v1, v2] in parents {
            let a = self.midpoint(v0, v1);
            let b = self.midpoint(v1, v2);
            let c = self.midpoint(v2, v0);

            self.add_face(v0, a, c);
            self.add_face(v1, b, a);
            self.add_face(v2, c, b);
            self.add_face(a, b, c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-6;

    fn quality(q: u32) -> Quality {
        Quality::new(q).unwrap()
    }

    fn seeded() -> Builder {
        let mut builder = Builder::with_capacity(quality(1));
        builder.seed();
        builder
    }

    #[test]
    fn base_shape() {
        let mesh = IcosahedronMesh::new(quality(0));
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 20);
        for &[a, b, c] in mesh.triangles() {
            assert!(a != b && b != c && c != a);
            assert!(a < 12 && b < 12 && c < 12);
        }
    }

    #[test]
    fn vertices_lie_on_unit_sphere() {
        for q in 0..=3 {
            let mesh = IcosahedronMesh::new(quality(q));
            for v in mesh.vertices() {
                assert!(
                    (v.length() - 1.0).abs() < TOLERANCE,
                    "quality {}: |{:?}| = {}",
                    q,
                    v,
                    v.length()
                );
            }
        }
    }

    #[test]
    fn triangle_count_grows_fourfold() {
        for q in 0..=4 {
            let mesh = IcosahedronMesh::new(quality(q));
            assert_eq!(mesh.triangle_count(), 20 * 4usize.pow(q));
            assert_eq!(mesh.vertex_count(), 10 * 4usize.pow(q) + 2);
        }
    }

    #[test]
    fn first_pass_adds_one_vertex_per_edge() {
        let mesh = IcosahedronMesh::new(quality(1));
        assert_eq!(mesh.vertex_count(), 12 + 30);
        assert_eq!(mesh.triangle_count(), 80);
    }

    #[test]
    fn each_pass_replaces_parents() {
        let mut builder = seeded();
        builder.subdivide();
        assert_eq!(builder.triangles.len(), 80);
        builder.subdivide();
        assert_eq!(builder.triangles.len(), 320);
        // the first child of the first base face keeps its corner
        assert_eq!(builder.triangles[0][0], icosahedron::FACES[0][0]);
    }

    #[test]
    fn second_pass() {
        assert_eq!(IcosahedronMesh::new(quality(2)).triangle_count(), 320);
    }

    #[test]
    fn midpoint_ignores_argument_order() {
        let mut builder = seeded();
        let before = builder.vertices.len();

        let forward = builder.midpoint(0, 11);
        assert_eq!(builder.vertices.len(), before + 1);

        let backward = builder.midpoint(11, 0);
        let again = builder.midpoint(0, 11);
        assert_eq!(forward, backward);
        assert_eq!(forward, again);
        assert_eq!(builder.vertices.len(), before + 1);
    }

    #[test]
    fn midpoint_is_renormalized() {
        let mut builder = seeded();
        let index = builder.midpoint(0, 1);
        let expected = (builder.vertices[0] + builder.vertices[1]).normalize();
        let actual = builder.vertices[index as usize];
        assert!((actual - expected).length() < TOLERANCE);
        assert!((actual.length() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn shared_edge_gets_one_midpoint() {
        // Faces 0 (0, 11, 5) and 1 (0, 5, 1) share the edge 0-5.
        let mut builder = seeded();
        builder.subdivide();

        let first = &builder.triangles[0..4];
        let second = &builder.triangles[4..8];
        // Children of (v0, v1, v2) are (v0, a, c), (v1, b, a), (v2, c, b), (a, b, c)
        // with a = mid(v0, v1), b = mid(v1, v2), c = mid(v2, v0).
        let mid_in_first = first[0][2]; // c = mid(5, 0)
        let mid_in_second = second[0][1]; // a = mid(0, 5)
        assert_eq!(mid_in_first, mid_in_second);

        let occurrences = builder
            .vertices
            .iter()
            .filter(|v| (**v - builder.vertices[mid_in_first as usize]).length() < TOLERANCE)
            .count();
        assert_eq!(occurrences, 1);
    }

    #[test]
    fn no_coincident_vertices() {
        let mesh = IcosahedronMesh::new(quality(2));
        let vertices = mesh.vertices();
        for (i, a) in vertices.iter().enumerate() {
            for b in &vertices[i + 1..] {
                assert!((*a - *b).length() > 1e-3);
            }
        }
    }

    #[test]
    fn winding_faces_outward() {
        for q in 0..=2 {
            let mesh = IcosahedronMesh::new(quality(q));
            let v = mesh.vertices();
            for &[a, b, c] in mesh.triangles() {
                let (a, b, c) = (v[a as usize], v[b as usize], v[c as usize]);
                let normal = (b - a).cross(c - a);
                let centroid = (a + b + c) / 3.0;
                assert!(normal.dot(centroid) > 0.0);
            }
        }
    }

    #[test]
    fn euler_characteristic() {
        for q in 0..=3 {
            let mesh = IcosahedronMesh::new(quality(q));
            let edges = mesh.edges();
            assert_eq!(edges.len(), 30 * 4usize.pow(q));
            let chi = mesh.vertex_count() as i64 - edges.len() as i64
                + mesh.triangle_count() as i64;
            assert_eq!(chi, 2);
        }
    }

    #[test]
    fn rebuild_is_deterministic() {
        let a = IcosahedronMesh::new(quality(3));
        let b = IcosahedronMesh::new(quality(3));
        assert_eq!(a.triangles(), b.triangles());
        assert_eq!(a.vertices(), b.vertices());
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn flattened_views() {
        let mesh = IcosahedronMesh::new(quality(1));
        let positions = mesh.flat_positions();
        assert_eq!(positions.len(), mesh.vertex_count() * 3);
        assert_eq!(positions[3..6], mesh.vertices()[1].to_array());

        let indices = mesh.flat_indices();
        assert_eq!(indices.len(), mesh.triangle_count() * 3);
        assert_eq!(indices[3..6], mesh.triangles()[1]);
    }
}
