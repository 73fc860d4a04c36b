//! # meshload
//!
//! Pure Rust loaders for Wavefront OBJ/MTL text assets and binary STL
//! assets.
//!
//! The loaders turn raw mesh/material files into flat, per-material
//! vertex-attribute data ready for GPU upload: polygon faces are
//! triangulated, relative indices resolved, referenced material
//! libraries merged, and a bounding box computed. File content is
//! pulled through the asynchronous [`TextSource`](source::TextSource)
//! trait, so the same parsers work against the filesystem, an HTTP
//! layer, or in-memory fixtures.
//!
//! ## Features
//!
//! - Wavefront OBJ subset: `v`, `vn`, `vt`, `f`, `mtllib`, `usemtl`
//! - Wavefront MTL subset: `newmtl`, `Ka`, `Kd`, `Ks`, `Ns`, `d`,
//!   `illum`, `map_Kd`/`map_Ks`, `map_Bump`
//! - Binary STL with facet-normal validation and repair
//! - Relative and negative OBJ face indices
//! - Quadrilateral triangulation
//! - Concurrent material-library loading
//!
//! ## Example
//!
//! ```no_run
//! use meshload::source::FileSource;
//! use meshload::{LoadedModel, load_model};
//!
//! # #[tokio::main]
//! # async fn main() -> meshload::Result<()> {
//! let source = FileSource::new("assets");
//! match load_model(&source, "models/teapot.obj").await? {
//!     LoadedModel::Obj(model) => {
//!         println!("{} material buckets", model.data.len());
//!     }
//!     LoadedModel::Stl(model) => {
//!         println!("{} triangles", model.position.len() / 3);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod model;
pub mod parser;
pub mod path;
pub mod source;

pub use error::{Error, Result};
pub use model::{
    AxisRange, BoundingBox3, LoadedModel, LoaderConfig, Material, MaterialLibrary, ModelData,
    StlModel, Vec2, Vec3, VertexData,
};
pub use parser::{
    load_model, load_model_with_config, parse_materials, parse_materials_with_config,
    parse_obj_model, parse_obj_model_with_config, parse_stl_bytes, parse_stl_model,
};
pub use path::{resolve_relative, resolve_relative_with};
