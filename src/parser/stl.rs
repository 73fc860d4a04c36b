//! Binary STL parsing
//!
//! Layout (all little-endian): an ignored 80-byte header, a 32-bit
//! signed triangle count at offset 80, then one 50-byte record per
//! facet starting at offset 84: facet normal, three vertices (12 bytes
//! each), and 2 uninterpreted attribute bytes.
//!
//! Exporters frequently write zero or unnormalized facet normals, so
//! the stored normal is repaired: a zero-length normal is recomputed
//! from the edge vectors, a normal whose length strays from 1 by more
//! than [`NORMAL_TOLERANCE`] is renormalized, and anything else is used
//! as stored.

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{BoundingBox3, StlModel, Vec3};
use crate::source::TextSource;

/// Byte offset of the triangle count field
const COUNT_OFFSET: usize = 80;
/// Byte offset of the first facet record
const FACETS_OFFSET: usize = 84;
/// Size of one facet record
const FACET_SIZE: usize = 50;
/// Allowed deviation of a stored normal's length from 1 before it is
/// renormalized
const NORMAL_TOLERANCE: f32 = 1e-4;

fn read_f32(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn read_vec3(bytes: &[u8], offset: usize) -> Vec3 {
    Vec3::new(
        read_f32(bytes, offset),
        read_f32(bytes, offset + 4),
        read_f32(bytes, offset + 8),
    )
}

/// Resolve the normal to emit for one facet
fn resolve_normal(stored: Vec3, v0: &Vec3, v1: &Vec3, v2: &Vec3) -> Vec3 {
    let length = stored.length();
    if length == 0.0 {
        v0.sub(v1).cross(&v0.sub(v2)).normalized()
    } else if (length - 1.0).abs() > NORMAL_TOLERANCE {
        stored.normalized()
    } else {
        stored
    }
}

/// Parse the binary STL model at `path`
///
/// # Example
///
/// ```
/// use meshload::source::MemorySource;
/// use meshload::parse_stl_model;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> meshload::Result<()> {
/// // header + zero triangle count: a valid, empty model
/// let source = MemorySource::new().with_bytes("empty.stl", vec![0u8; 84]);
/// let model = parse_stl_model(&source, "empty.stl").await?;
/// assert!(model.position.is_empty());
/// # Ok(())
/// # }
/// ```
pub async fn parse_stl_model<S>(source: &S, path: &str) -> Result<StlModel>
where
    S: TextSource + ?Sized,
{
    let bytes = source.fetch_bytes(path).await?;
    let model = parse_stl_bytes(&bytes)?;
    debug!(
        path,
        triangles = model.position.len() / 3,
        "parsed binary STL model"
    );
    Ok(model)
}

/// Parse a binary STL byte buffer
pub fn parse_stl_bytes(bytes: &[u8]) -> Result<StlModel> {
    if bytes.len() < FACETS_OFFSET {
        return Err(Error::MalformedRecord(format!(
            "STL buffer of {} bytes is shorter than the {}-byte header",
            bytes.len(),
            FACETS_OFFSET
        )));
    }

    let raw_count = i32::from_le_bytes([
        bytes[COUNT_OFFSET],
        bytes[COUNT_OFFSET + 1],
        bytes[COUNT_OFFSET + 2],
        bytes[COUNT_OFFSET + 3],
    ]);
    let count = usize::try_from(raw_count).map_err(|_| {
        Error::MalformedRecord(format!("negative STL triangle count {}", raw_count))
    })?;

    let needed = FACETS_OFFSET + count * FACET_SIZE;
    if bytes.len() < needed {
        return Err(Error::MalformedRecord(format!(
            "STL buffer truncated: {} triangles need {} bytes, got {}",
            count,
            needed,
            bytes.len()
        )));
    }

    let mut position = Vec::with_capacity(count * 3);
    let mut normal = Vec::with_capacity(count * 3);
    let mut bounding_box = BoundingBox3::new();

    for index in 0..count {
        let facet = FACETS_OFFSET + index * FACET_SIZE;
        let stored_normal = read_vec3(bytes, facet);
        let v0 = read_vec3(bytes, facet + 12);
        let v1 = read_vec3(bytes, facet + 24);
        let v2 = read_vec3(bytes, facet + 36);

        let facet_normal = resolve_normal(stored_normal, &v0, &v1, &v2);

        for vertex in [v0, v1, v2] {
            bounding_box.include(&vertex);
            position.push(vertex);
            normal.push(facet_normal);
        }
    }

    Ok(StlModel {
        position,
        normal,
        bounding_box,
    })
}
