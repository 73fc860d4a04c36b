//! Integration tests for MTL material library loading

use meshload::source::MemorySource;
use meshload::{Error, LoaderConfig, Vec3, parse_materials, parse_materials_with_config};

#[tokio::test]
async fn full_material_definition() {
    let text = "\
# example library
newmtl steel
Ka 0.2 0.2 0.2
Kd 0.6 0.6 0.7
Ks 0.9 0.9 0.9
Ns 250
d 0.8
illum 3
map_Kd textures/steel.png
map_Bump textures/steel_bump.png
";
    let source = MemorySource::new().with_text("materials/scene.mtl", text);
    let library = parse_materials(&source, "materials/scene.mtl")
        .await
        .unwrap();

    let steel = &library["steel"];
    assert_eq!(steel.ambient, Vec3::new(0.2, 0.2, 0.2));
    assert_eq!(steel.diffuse, Vec3::new(0.6, 0.6, 0.7));
    assert_eq!(steel.specular, Vec3::new(0.9, 0.9, 0.9));
    assert_eq!(steel.specular_exp, 250.0);
    assert_eq!(steel.opacity, 0.8);
    assert_eq!(steel.illum, 3);
    assert_eq!(
        steel.color_map.as_deref(),
        Some("materials/textures/steel.png")
    );
    assert_eq!(
        steel.bump_map.as_deref(),
        Some("materials/textures/steel_bump.png")
    );
}

#[tokio::test]
async fn defaults_apply_when_records_are_absent() {
    let source = MemorySource::new().with_text("m.mtl", "newmtl A\nKd 1 0 0\nNs 50\n");
    let library = parse_materials(&source, "m.mtl").await.unwrap();

    let material = &library["A"];
    assert_eq!(material.diffuse, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(material.specular_exp, 50.0);
    assert_eq!(material.opacity, 1.0);
    assert_eq!(material.illum, 2);
    assert_eq!(material.ambient, Vec3::ZERO);
}

#[tokio::test]
async fn duplicate_newmtl_is_rejected() {
    let source = MemorySource::new().with_text("m.mtl", "newmtl A\nnewmtl B\nnewmtl A\n");
    let err = parse_materials(&source, "m.mtl").await.unwrap_err();
    assert!(matches!(err, Error::DuplicateMaterial(name) if name == "A"));
}

#[tokio::test]
async fn missing_file_propagates_fetch_failure() {
    let source = MemorySource::new();
    let err = parse_materials(&source, "nowhere.mtl").await.unwrap_err();
    assert!(matches!(err, Error::Fetch { .. }));
}

#[tokio::test]
async fn backslash_separator_config_respected() {
    let source = MemorySource::new().with_text(r"m.mtl", "newmtl A\nmap_Kd tex.png\n");
    let config = LoaderConfig::new().with_separator('\\');
    let err = parse_materials_with_config(&source, r"assets\m.mtl", &config)
        .await
        .unwrap_err();
    // m.mtl is not present under the backslash path
    assert!(matches!(err, Error::Fetch { .. }));

    let source = MemorySource::new().with_text(r"assets\m.mtl", "newmtl A\nmap_Kd tex.png\n");
    let library = parse_materials_with_config(&source, r"assets\m.mtl", &config)
        .await
        .unwrap();
    assert_eq!(library["A"].color_map.as_deref(), Some(r"assets\tex.png"));
}

#[tokio::test]
async fn reparsing_the_same_content_is_idempotent() {
    let text = "newmtl A\nKd 1 0 0\nmap_Kd tex.png\nnewmtl B\nKs 0 1 0\n";
    let source = MemorySource::new().with_text("m.mtl", text);
    let first = parse_materials(&source, "m.mtl").await.unwrap();
    let second = parse_materials(&source, "m.mtl").await.unwrap();
    assert_eq!(first, second);
}
