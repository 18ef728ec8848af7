use glam::Vec3;
use once_cell::sync::Lazy;

/// Unnormalized seed coordinates: the cyclic permutations of `(±1, ±φ, 0)`.
fn raw_vertices() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

pub static RAW_VERTICES: Lazy<[Vec3; 12]> = Lazy::new(raw_vertices);

pub const VERTEX_COUNT: usize = 12;
pub const FACE_COUNT: usize = 20;
pub const EDGE_COUNT: usize = 30;

/// Faces of the base icosahedron, wound counter-clockwise when seen from
/// outside the solid.
#[rustfmt::skip]
pub const FACES: [[u32; 3]; FACE_COUNT] = [
    // around vertex 0
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],

    // adjacent faces
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],

    // around vertex 3
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],

    // adjacent faces
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];
