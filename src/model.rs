//! Data structures produced by the OBJ/MTL/STL loaders
//!
//! Everything in this module is created once per load call, fully
//! populated by the parser, and returned as an immutable result. The
//! caller owns the returned value exclusively.

use std::collections::HashMap;

/// A 3-component float vector
///
/// Used for positions, normals, and material colors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// The zero vector
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new vector
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise subtraction `self - other`
    pub fn sub(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Cross product `self x other`
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit-length copy of this vector
    ///
    /// A zero-length vector normalizes to the zero vector rather than NaN.
    pub fn normalized(&self) -> Vec3 {
        let len = self.length();
        if len > 0.0 {
            Vec3::new(self.x / len, self.y / len, self.z / len)
        } else {
            Vec3::ZERO
        }
    }
}

/// A 2-component float vector, used for texture coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// X (u) component
    pub x: f32,
    /// Y (v) component
    pub y: f32,
}

impl Vec2 {
    /// The zero vector
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new vector
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A `{min, max}` pair for one axis
///
/// The empty state is `min = +inf, max = -inf`, which any included
/// value immediately collapses to a real range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// Smallest value seen so far
    pub min: f32,
    /// Largest value seen so far
    pub max: f32,
}

impl AxisRange {
    /// Create an empty range (`+inf / -inf`)
    pub fn new() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }

    /// Widen the range to include `value`
    pub fn include(&mut self, value: f32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis-aligned bounding box built from three independent axis ranges
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox3 {
    /// X axis extent
    pub x: AxisRange,
    /// Y axis extent
    pub y: AxisRange,
    /// Z axis extent
    pub z: AxisRange,
}

impl BoundingBox3 {
    /// Create an empty bounding box (all axes `+inf / -inf`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Widen the box to include `point`
    pub fn include(&mut self, point: &Vec3) {
        self.x.include(point.x);
        self.y.include(point.y);
        self.z.include(point.z);
    }
}

/// A Wavefront material, as accumulated from MTL records
///
/// Diffuse (`map_Kd`) and specular (`map_Ks`) texture maps are unified
/// onto the single [`color_map`](Material::color_map) slot; assigning
/// two distinct paths is rejected during parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Ambient reflectivity (`Ka`)
    pub ambient: Vec3,
    /// Diffuse reflectivity (`Kd`)
    pub diffuse: Vec3,
    /// Specular reflectivity (`Ks`)
    pub specular: Vec3,
    /// Specular exponent (`Ns`), conventionally 0-1000 (not enforced)
    pub specular_exp: f32,
    /// Opacity (`d`), conventionally 0-1 (not enforced)
    pub opacity: f32,
    /// Illumination model (`illum`)
    pub illum: i32,
    /// Resolved path of the diffuse/specular texture, if any
    pub color_map: Option<String>,
    /// Resolved path of the bump map texture, if any
    pub bump_map: Option<String>,
}

impl Material {
    /// Create a material with Wavefront defaults
    pub fn new() -> Self {
        Self {
            ambient: Vec3::ZERO,
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
            specular_exp: 0.0,
            opacity: 1.0,
            illum: 2,
            color_map: None,
            bump_map: None,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

/// Mapping from material name to [`Material`]
pub type MaterialLibrary = HashMap<String, Material>;

/// Flat per-material vertex attributes, one entry per triangle vertex
///
/// The three sequences always have equal length; no index buffer is
/// produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexData {
    /// Triangle-vertex positions
    pub position: Vec<Vec3>,
    /// Triangle-vertex normals
    pub normal: Vec<Vec3>,
    /// Triangle-vertex texture coordinates
    pub tex_coords: Vec<Vec2>,
}

impl VertexData {
    /// Create an empty attribute set
    pub fn new() -> Self {
        Self::default()
    }
}

/// Parsed OBJ model: triangulated vertex data grouped by material
///
/// Invariant: `data` and `materials` hold the same key set. Faces whose
/// material was never declared in any referenced MTL library get a
/// synthesized default [`Material`] entry (the empty-string name covers
/// faces seen before any `usemtl`).
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    /// Per-material flattened triangle vertices
    pub data: HashMap<String, VertexData>,
    /// Materials merged from all referenced MTL libraries
    pub materials: MaterialLibrary,
    /// Bounds of the entire `v` pool, including unreferenced vertices
    pub bounding_box: BoundingBox3,
}

/// Parsed binary STL model: a flat, unindexed triangle vertex stream
///
/// Invariant: `position.len() == normal.len()`, always a multiple of 3.
/// Each facet contributes three positions and its resolved normal three
/// times.
#[derive(Debug, Clone, PartialEq)]
pub struct StlModel {
    /// Triangle-vertex positions, 3 per facet
    pub position: Vec<Vec3>,
    /// Facet normals, repeated once per vertex
    pub normal: Vec<Vec3>,
    /// Bounds of all facet vertices
    pub bounding_box: BoundingBox3,
}

/// Result of the extension-dispatched [`load_model`](crate::load_model)
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedModel {
    /// A Wavefront OBJ model with materials
    Obj(ModelData),
    /// A binary STL model
    Stl(StlModel),
}

/// Loader configuration
///
/// Controls cross-file path resolution performed while parsing (the
/// `mtllib` and `map_*` records).
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Separator used when a path contains neither `/` nor `\`, and to
    /// join resolved paths
    pub preferred_separator: char,
}

impl LoaderConfig {
    /// Create the default configuration (forward-slash separator)
    pub fn new() -> Self {
        Self {
            preferred_separator: '/',
        }
    }

    /// Set the preferred path separator
    pub fn with_separator(mut self, separator: char) -> Self {
        self.preferred_separator = separator;
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_cross_product() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_vec3_normalized() {
        let v = Vec3::new(3.0, 0.0, 4.0);
        let n = v.normalized();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
        assert!((n.z - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_vec3_zero_normalizes_to_zero() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }

    #[test]
    fn test_axis_range_starts_degenerate() {
        let range = AxisRange::new();
        assert_eq!(range.min, f32::INFINITY);
        assert_eq!(range.max, f32::NEG_INFINITY);
    }

    #[test]
    fn test_bounding_box_include() {
        let mut bbox = BoundingBox3::new();
        bbox.include(&Vec3::new(1.0, -2.0, 3.0));
        bbox.include(&Vec3::new(-1.0, 2.0, 0.0));
        assert_eq!(bbox.x.min, -1.0);
        assert_eq!(bbox.x.max, 1.0);
        assert_eq!(bbox.y.min, -2.0);
        assert_eq!(bbox.y.max, 2.0);
        assert_eq!(bbox.z.min, 0.0);
        assert_eq!(bbox.z.max, 3.0);
    }

    #[test]
    fn test_material_defaults() {
        let mat = Material::new();
        assert_eq!(mat.ambient, Vec3::ZERO);
        assert_eq!(mat.specular_exp, 0.0);
        assert_eq!(mat.opacity, 1.0);
        assert_eq!(mat.illum, 2);
        assert!(mat.color_map.is_none());
        assert!(mat.bump_map.is_none());
    }
}
