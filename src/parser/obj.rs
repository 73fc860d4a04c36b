//! Wavefront OBJ model parsing
//!
//! Parsing proceeds in two phases. The line scan accumulates raw vertex
//! pools (`v`, `vn`, `vt`), face records, and `mtllib` references into
//! an owned builder; face indices are normalized to 0-based during the
//! scan because negative indices are relative to the pool size *at the
//! point of reference*, not the final size. After the scan, all
//! referenced material libraries are fetched concurrently and unioned
//! in declaration order, then faces are triangulated and resolved into
//! flat per-material vertex data.

use std::collections::HashMap;

use futures::future::try_join_all;
use tracing::{debug, trace};

use super::{parse_floats, parse_materials_with_config, record_lines, tokenize};
use crate::error::{Error, Result};
use crate::model::{
    BoundingBox3, LoaderConfig, Material, MaterialLibrary, ModelData, Vec2, Vec3, VertexData,
};
use crate::path::resolve_relative_with;
use crate::source::TextSource;

/// Normal used when a face vertex carries no `vn` reference
const FALLBACK_NORMAL: Vec3 = Vec3 {
    x: 1.0,
    y: 0.0,
    z: 0.0,
};

/// A polygon face before triangulation
///
/// The three channel lists are parallel; texcoord and normal entries
/// are `None` when the face-vertex token omitted that component
/// (`v//vn`, `v/vt`).
#[derive(Debug, Clone)]
struct Face {
    position: Vec<usize>,
    tex_coords: Vec<Option<usize>>,
    normal: Vec<Option<usize>>,
    material: String,
}

/// Accumulator threaded through one OBJ parse
struct ObjBuilder<'a> {
    path: &'a str,
    config: &'a LoaderConfig,
    material: String,
    mtllibs: Vec<String>,
    v: Vec<Vec3>,
    vn: Vec<Vec3>,
    vt: Vec<Vec2>,
    faces: Vec<Face>,
}

/// Normalize a raw 1-based face index against a pool
///
/// Positive indices are 1-based; zero and negative indices count back
/// from the current end of the pool. `pool_len` must be the pool size
/// at the moment the face line is scanned.
fn normalize_index(record: &str, raw: i64, pool_len: usize) -> Result<usize> {
    let resolved = if raw > 0 { raw - 1 } else { pool_len as i64 + raw };
    usize::try_from(resolved).map_err(|_| {
        Error::malformed_record(record, &format!("index {} is out of range", raw))
    })
}

impl<'a> ObjBuilder<'a> {
    fn new(path: &'a str, config: &'a LoaderConfig) -> Self {
        Self {
            path,
            config,
            material: String::new(),
            mtllibs: Vec::new(),
            v: Vec::new(),
            vn: Vec::new(),
            vt: Vec::new(),
            faces: Vec::new(),
        }
    }

    fn handle_face(&mut self, parts: &[&str]) -> Result<()> {
        let mut face = Face {
            position: Vec::with_capacity(parts.len()),
            tex_coords: Vec::with_capacity(parts.len()),
            normal: Vec::with_capacity(parts.len()),
            material: self.material.clone(),
        };
        for token in parts {
            let mut components = token.split('/');
            let v_field = components.next().unwrap_or("");
            let raw_v: i64 = v_field
                .parse()
                .map_err(|_| Error::bad_field("f", token, "integer vertex index"))?;
            face.position.push(normalize_index("f", raw_v, self.v.len())?);

            let raw_vt = match components.next().filter(|c| !c.is_empty()) {
                Some(field) => Some(
                    field
                        .parse::<i64>()
                        .map_err(|_| Error::bad_field("f", token, "integer texcoord index"))?,
                ),
                None => None,
            };
            face.tex_coords.push(match raw_vt {
                Some(raw) => Some(normalize_index("f", raw, self.vt.len())?),
                None => None,
            });

            let raw_vn = match components.next().filter(|c| !c.is_empty()) {
                Some(field) => Some(
                    field
                        .parse::<i64>()
                        .map_err(|_| Error::bad_field("f", token, "integer normal index"))?,
                ),
                None => None,
            };
            face.normal.push(match raw_vn {
                Some(raw) => Some(normalize_index("f", raw, self.vn.len())?),
                None => None,
            });
        }
        self.faces.push(face);
        Ok(())
    }

    fn handle_record(&mut self, record: &str, parts: &[&str]) -> Result<()> {
        match record {
            "v" => {
                let [x, y, z] = parse_floats::<3>(record, parts)?;
                self.v.push(Vec3::new(x, y, z));
            }
            "vn" => {
                let [x, y, z] = parse_floats::<3>(record, parts)?;
                self.vn.push(Vec3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_floats::<2>(record, parts)?;
                self.vt.push(Vec2::new(u, v));
            }
            "f" => self.handle_face(parts)?,
            "mtllib" => {
                let relative = parts
                    .first()
                    .ok_or_else(|| Error::malformed_record(record, "missing library path"))?;
                let resolved =
                    resolve_relative_with(self.path, relative, self.config.preferred_separator)?;
                self.mtllibs.push(resolved);
            }
            "usemtl" => {
                let name = parts
                    .first()
                    .ok_or_else(|| Error::malformed_record(record, "missing material name"))?;
                self.material = name.to_string();
            }
            _ => trace!(record, "skipping unrecognized OBJ record"),
        }
        Ok(())
    }
}

/// The triangle corner orders a face of the given arity decomposes into
///
/// Quadrilaterals split along the 0-2 diagonal. Anything outside 3..=4
/// vertices is unsupported.
fn triangle_corners(arity: usize) -> Result<&'static [[usize; 3]]> {
    match arity {
        0 | 1 => Err(Error::UnsupportedGeometry(
            "not enough vertices".to_string(),
        )),
        2 => Err(Error::UnsupportedGeometry(
            "can't handle 2 component vertices".to_string(),
        )),
        3 => Ok(&[[0, 1, 2]]),
        4 => Ok(&[[0, 1, 2], [2, 3, 0]]),
        n => Err(Error::UnsupportedGeometry(format!(
            "{}-vertex faces are not supported",
            n
        ))),
    }
}

/// Parse the OBJ model at `path`
///
/// All `mtllib` references are fetched through `source` concurrently
/// and merged before face resolution; a failure in any library load
/// fails the whole parse.
///
/// # Example
///
/// ```
/// use meshload::source::MemorySource;
/// use meshload::parse_obj_model;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> meshload::Result<()> {
/// let source = MemorySource::new().with_text(
///     "quad.obj",
///     "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
/// );
/// let model = parse_obj_model(&source, "quad.obj").await?;
/// // one quad becomes two triangles under the empty-string material
/// assert_eq!(model.data[""].position.len(), 6);
/// # Ok(())
/// # }
/// ```
pub async fn parse_obj_model<S>(source: &S, path: &str) -> Result<ModelData>
where
    S: TextSource + ?Sized,
{
    parse_obj_model_with_config(source, path, &LoaderConfig::default()).await
}

/// Parse the OBJ model at `path` with custom configuration
pub async fn parse_obj_model_with_config<S>(
    source: &S,
    path: &str,
    config: &LoaderConfig,
) -> Result<ModelData>
where
    S: TextSource + ?Sized,
{
    let text = source.fetch_text(path).await?;

    let mut builder = ObjBuilder::new(path, config);
    for line in record_lines(&text) {
        let parts = tokenize(line);
        let Some((record, fields)) = parts.split_first() else {
            continue;
        };
        builder.handle_record(record, fields)?;
    }
    debug!(
        path,
        vertices = builder.v.len(),
        faces = builder.faces.len(),
        libraries = builder.mtllibs.len(),
        "scanned OBJ records"
    );

    // fan-out over the material libraries, fan-in before face resolution
    let libraries = try_join_all(
        builder
            .mtllibs
            .iter()
            .map(|lib| parse_materials_with_config(source, lib, config)),
    )
    .await?;

    // declaration order: later libraries overwrite duplicate names
    let mut materials = MaterialLibrary::new();
    for library in libraries {
        materials.extend(library);
    }

    assemble_model(builder, materials)
}

fn assemble_model(builder: ObjBuilder<'_>, mut materials: MaterialLibrary) -> Result<ModelData> {
    // every known material gets a bucket up front, even if no face uses it
    let mut data: HashMap<String, VertexData> = materials
        .keys()
        .map(|name| (name.clone(), VertexData::new()))
        .collect();

    for face in &builder.faces {
        for corners in triangle_corners(face.position.len())? {
            if !data.contains_key(&face.material) {
                // face material never declared in any library
                data.insert(face.material.clone(), VertexData::new());
                materials.insert(face.material.clone(), Material::new());
            }
            let bucket = data
                .get_mut(&face.material)
                .ok_or_else(|| Error::malformed_record("f", "material bucket missing"))?;

            for &corner in corners {
                let position_index = face.position[corner];
                let position = builder.v.get(position_index).ok_or_else(|| {
                    Error::malformed_record(
                        "f",
                        &format!("vertex index {} is out of range", position_index),
                    )
                })?;
                bucket.position.push(*position);

                let normal = match face.normal[corner] {
                    Some(index) => *builder.vn.get(index).ok_or_else(|| {
                        Error::malformed_record(
                            "f",
                            &format!("normal index {} is out of range", index),
                        )
                    })?,
                    None => FALLBACK_NORMAL,
                };
                bucket.normal.push(normal);

                let tex = match face.tex_coords[corner] {
                    Some(index) => *builder.vt.get(index).ok_or_else(|| {
                        Error::malformed_record(
                            "f",
                            &format!("texcoord index {} is out of range", index),
                        )
                    })?,
                    None => Vec2::ZERO,
                };
                bucket.tex_coords.push(tex);
            }
        }
    }

    // bounds cover the whole v pool, used or not
    let mut bounding_box = BoundingBox3::new();
    for vertex in &builder.v {
        bounding_box.include(vertex);
    }

    debug!(
        path = builder.path,
        buckets = data.len(),
        "assembled OBJ model"
    );
    Ok(ModelData {
        data,
        materials,
        bounding_box,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_index_positive_is_one_based() {
        assert_eq!(normalize_index("f", 1, 0).unwrap(), 0);
        assert_eq!(normalize_index("f", 7, 3).unwrap(), 6);
    }

    #[test]
    fn test_normalize_index_negative_counts_from_end() {
        assert_eq!(normalize_index("f", -1, 3).unwrap(), 2);
        assert_eq!(normalize_index("f", -3, 3).unwrap(), 0);
    }

    #[test]
    fn test_normalize_index_underflow_rejected() {
        let err = normalize_index("f", -4, 3).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_triangle_corners_arity() {
        assert!(matches!(
            triangle_corners(2),
            Err(Error::UnsupportedGeometry(_))
        ));
        assert_eq!(triangle_corners(3).unwrap().len(), 1);
        assert_eq!(triangle_corners(4).unwrap().len(), 2);
        assert!(matches!(
            triangle_corners(5),
            Err(Error::UnsupportedGeometry(_))
        ));
    }
}
