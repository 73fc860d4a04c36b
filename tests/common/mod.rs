//! Shared fixture helpers for integration tests

#![allow(dead_code)]

use meshload::Vec3;

/// Build a binary STL buffer from (normal, v0, v1, v2) facets
pub fn stl_buffer(facets: &[[Vec3; 4]]) -> Vec<u8> {
    let mut bytes = vec![0u8; 80];
    bytes.extend_from_slice(&(facets.len() as i32).to_le_bytes());
    for facet in facets {
        for vec in facet {
            bytes.extend_from_slice(&vec.x.to_le_bytes());
            bytes.extend_from_slice(&vec.y.to_le_bytes());
            bytes.extend_from_slice(&vec.z.to_le_bytes());
        }
        // attribute byte count, uninterpreted
        bytes.extend_from_slice(&[0, 0]);
    }
    bytes
}

/// A unit quad in the XY plane, no materials
pub const QUAD_OBJ: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";
