//! Wavefront MTL material library parsing
//!
//! An MTL file is a sequence of whitespace-separated records, one per
//! line. `newmtl` opens a material that subsequent property records
//! mutate until the next `newmtl`. Unrecognized records are skipped for
//! forward compatibility.
//!
//! The diffuse (`map_Kd`) and specular (`map_Ks`) texture records share
//! one `color_map` slot: re-declaring the same resolved path is a
//! no-op, while a second distinct path is rejected.

use tracing::{debug, trace};

use super::{parse_floats, record_lines, tokenize};
use crate::error::{Error, Result};
use crate::model::{LoaderConfig, Material, MaterialLibrary, Vec3};
use crate::path::resolve_relative_with;
use crate::source::TextSource;

/// Accumulator threaded through one MTL parse
struct MtlBuilder<'a> {
    library: MaterialLibrary,
    current: Option<String>,
    path: &'a str,
    config: &'a LoaderConfig,
}

impl<'a> MtlBuilder<'a> {
    fn new(path: &'a str, config: &'a LoaderConfig) -> Self {
        Self {
            library: MaterialLibrary::new(),
            current: None,
            path,
            config,
        }
    }

    /// The material opened by the most recent `newmtl`
    fn current_material(&mut self, record: &str) -> Result<&mut Material> {
        let name = self.current.as_ref().ok_or_else(|| {
            Error::malformed_record(record, "property record before any 'newmtl'")
        })?;
        self.library
            .get_mut(name)
            .ok_or_else(|| Error::malformed_record(record, "current material missing"))
    }

    fn resolve_texture_path(&self, record: &str, parts: &[&str]) -> Result<String> {
        let relative = parts
            .first()
            .ok_or_else(|| Error::malformed_record(record, "missing texture path"))?;
        resolve_relative_with(self.path, relative, self.config.preferred_separator)
    }

    fn handle_record(&mut self, record: &str, parts: &[&str]) -> Result<()> {
        match record {
            "newmtl" => {
                let name = parts
                    .first()
                    .ok_or_else(|| Error::malformed_record(record, "missing material name"))?;
                if self.library.contains_key(*name) {
                    return Err(Error::DuplicateMaterial(name.to_string()));
                }
                self.library.insert(name.to_string(), Material::new());
                self.current = Some(name.to_string());
            }
            "Ka" => {
                let [x, y, z] = parse_floats::<3>(record, parts)?;
                self.current_material(record)?.ambient = Vec3::new(x, y, z);
            }
            "Kd" => {
                let [x, y, z] = parse_floats::<3>(record, parts)?;
                self.current_material(record)?.diffuse = Vec3::new(x, y, z);
            }
            "Ks" => {
                let [x, y, z] = parse_floats::<3>(record, parts)?;
                self.current_material(record)?.specular = Vec3::new(x, y, z);
            }
            "Ns" => {
                let [exp] = parse_floats::<1>(record, parts)?;
                self.current_material(record)?.specular_exp = exp;
            }
            "d" => {
                let [opacity] = parse_floats::<1>(record, parts)?;
                self.current_material(record)?.opacity = opacity;
            }
            "illum" => {
                let field = parts
                    .first()
                    .ok_or_else(|| Error::malformed_record(record, "missing illumination model"))?;
                let illum = field
                    .parse()
                    .map_err(|_| Error::bad_field(record, field, "integer"))?;
                self.current_material(record)?.illum = illum;
            }
            // diffuse and specular maps share the color_map slot
            "map_Kd" | "map_Ks" => {
                let full_path = self.resolve_texture_path(record, parts)?;
                let material = self.current_material(record)?;
                match &material.color_map {
                    Some(existing) if *existing == full_path => {}
                    Some(_) => {
                        return Err(Error::UnsupportedMaterial(
                            "divergent color/specular maps not supported".to_string(),
                        ));
                    }
                    None => material.color_map = Some(full_path),
                }
            }
            // last write wins, no conflict check
            "map_Bump" => {
                let full_path = self.resolve_texture_path(record, parts)?;
                self.current_material(record)?.bump_map = Some(full_path);
            }
            _ => trace!(record, "skipping unrecognized MTL record"),
        }
        Ok(())
    }
}

/// Parse the material library at `path`
///
/// Texture paths inside the library are resolved against `path` itself.
///
/// # Example
///
/// ```
/// use meshload::source::MemorySource;
/// use meshload::parse_materials;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> meshload::Result<()> {
/// let source = MemorySource::new()
///     .with_text("m.mtl", "newmtl red\nKd 1 0 0\n");
/// let library = parse_materials(&source, "m.mtl").await?;
/// assert_eq!(library["red"].diffuse.x, 1.0);
/// # Ok(())
/// # }
/// ```
pub async fn parse_materials<S>(source: &S, path: &str) -> Result<MaterialLibrary>
where
    S: TextSource + ?Sized,
{
    parse_materials_with_config(source, path, &LoaderConfig::default()).await
}

/// Parse the material library at `path` with custom configuration
pub async fn parse_materials_with_config<S>(
    source: &S,
    path: &str,
    config: &LoaderConfig,
) -> Result<MaterialLibrary>
where
    S: TextSource + ?Sized,
{
    let text = source.fetch_text(path).await?;
    let library = parse_mtl_text(&text, path, config)?;
    debug!(path, materials = library.len(), "parsed material library");
    Ok(library)
}

fn parse_mtl_text(text: &str, path: &str, config: &LoaderConfig) -> Result<MaterialLibrary> {
    let mut builder = MtlBuilder::new(path, config);
    for line in record_lines(text) {
        let parts = tokenize(line);
        let Some((record, fields)) = parts.split_first() else {
            continue;
        };
        builder.handle_record(record, fields)?;
    }
    Ok(builder.library)
}
