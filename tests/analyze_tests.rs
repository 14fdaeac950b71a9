//! Analyzer Tests
//!
//! Tests for:
//! - Duplicate geometry table (counts, unique names, single-use pruning)
//! - Duplicate material counts
//! - has_instances / get_info instancing decisions
//! - Construction failures (missing root, stale handles)
//! - Options parsing from camelCase JSON, component names from file names

use glam::Vec3;
use myth_jsx::analyze::AnalyzedScene;
use myth_jsx::analyze::naming::is_var_name;
use myth_jsx::errors::JsxError;
use myth_jsx::options::{AnalyzeOptions, GenerateOptions, Options};
use myth_jsx::resources::{Geometry, Material};
use myth_jsx::scene::{MeshData, Node, NodeHandle, Scene, Transform};
use myth_jsx::AnimationClip;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn placed_mesh(name: &str, mesh: MeshData, x: f32) -> Node {
    Node::mesh(name, mesh).with_transform(Transform::from_position(Vec3::new(x, 0.0, 0.0)))
}

/// Two wheels sharing one geometry and one material, plus a unique body.
fn car_scene() -> (Scene, NodeHandle, NodeHandle, NodeHandle) {
    let mut scene = Scene::new();
    let wheel = scene.add_geometry(Geometry::new("wheel"));
    let body = scene.add_geometry(Geometry::new("body"));
    let rubber = scene.add_material(Material::standard("Rubber"));
    let paint = scene.add_material(Material::physical("Paint"));

    let front = scene.add_node(placed_mesh("Wheel", MeshData::new(wheel, rubber), 1.0));
    let back = scene.add_node(placed_mesh("Wheel.001", MeshData::new(wheel, rubber), -1.0));
    let chassis = scene.add_node(placed_mesh("Body", MeshData::new(body, paint), 0.0));
    (scene, front, back, chassis)
}

fn instancing() -> AnalyzeOptions {
    AnalyzeOptions {
        instance: true,
        ..Default::default()
    }
}

// ============================================================================
// Duplicate Geometries
// ============================================================================

#[test]
fn duplicates_count_shared_geometry() {
    init_logger();
    let (scene, ..) = car_scene();
    let analyzed = AnalyzedScene::new(scene, instancing()).unwrap();

    // The body occurs once and is dropped from the table
    let dups = analyzed.duplicate_geometry_values();
    assert_eq!(dups.len(), 1);
    assert_eq!(dups[0].count, 2);
    assert_eq!(dups[0].name, "Wheel");
    assert_eq!(dups[0].node, "nodes.Wheel");
}

#[test]
fn duplicates_count_matches_mesh_nodes() {
    let (mut scene, ..) = car_scene();
    let wheel = scene.nodes[scene.descendants()[1]].mesh_data().unwrap().clone();
    scene.add_node(placed_mesh("Spare", wheel, 5.0));

    let analyzed = AnalyzedScene::new(scene, instancing()).unwrap();
    let expected = analyzed
        .meshes()
        .iter()
        .filter(|&&h| analyzed.duplicate_of(h).is_some())
        .count();

    let dups = analyzed.duplicate_geometry_values();
    assert_eq!(dups.len(), 1);
    assert_eq!(dups[0].count, 3);
    assert_eq!(dups[0].count, expected);
}

#[test]
fn duplicates_names_are_unique() {
    let mut scene = Scene::new();
    let small = scene.add_geometry(Geometry::new("small"));
    let large = scene.add_geometry(Geometry::new("large"));
    let wood = scene.add_material(Material::standard("Wood"));

    for (i, geometry) in [small, small, large, large].into_iter().enumerate() {
        scene.add_node(placed_mesh("Box", MeshData::new(geometry, wood), i as f32));
    }

    let analyzed = AnalyzedScene::new(scene, instancing()).unwrap();
    let names: Vec<_> = analyzed
        .duplicate_geometry_values()
        .iter()
        .map(|d| d.name.clone())
        .collect();
    assert_eq!(names, ["Box", "Box1"]);
}

#[test]
fn duplicates_split_by_material() {
    let mut scene = Scene::new();
    let cube = scene.add_geometry(Geometry::new("cube"));
    let red = scene.add_material(Material::standard("Red"));
    let blue = scene.add_material(Material::standard("Blue"));
    scene.add_node(placed_mesh("A", MeshData::new(cube, red), 0.0));
    scene.add_node(placed_mesh("B", MeshData::new(cube, blue), 1.0));

    let analyzed = AnalyzedScene::new(scene, instancing()).unwrap();
    assert!(analyzed.duplicate_geometries().is_empty());
    assert!(!analyzed.has_instances());
}

#[test]
fn duplicates_instance_all_keeps_single_use() {
    let (scene, _, _, chassis) = car_scene();
    let options = AnalyzeOptions {
        instance_all: true,
        ..Default::default()
    };
    let analyzed = AnalyzedScene::new(scene, options).unwrap();

    assert_eq!(analyzed.duplicate_geometries().len(), 2);
    assert!(analyzed.has_instances());
    assert!(analyzed.get_info(chassis).unwrap().instanced);
}

#[test]
fn duplicate_materials_are_counted_by_name() {
    let (scene, ..) = car_scene();
    let analyzed = AnalyzedScene::new(scene, AnalyzeOptions::default()).unwrap();

    let materials = analyzed.duplicate_materials();
    assert_eq!(materials.get("Rubber"), Some(&2));
    assert_eq!(materials.get("Paint"), Some(&1));

    // Shape materials are listed once each
    assert_eq!(analyzed.materials().len(), 2);
}

// ============================================================================
// Object Info
// ============================================================================

#[test]
fn info_instanced_requires_instancing() {
    let (scene, front, back, chassis) = car_scene();
    let analyzed = AnalyzedScene::new(scene, AnalyzeOptions::default()).unwrap();

    // The table is built either way, instancing decides whether it is used
    assert_eq!(analyzed.duplicate_geometries().len(), 1);
    assert!(!analyzed.has_instances());
    assert!(!analyzed.get_info(front).unwrap().instanced);
    assert!(!analyzed.get_info(back).unwrap().instanced);
    assert!(!analyzed.get_info(chassis).unwrap().instanced);
}

#[test]
fn info_instanced_for_shared_meshes() {
    let (scene, front, back, chassis) = car_scene();
    let analyzed = AnalyzedScene::new(scene, instancing()).unwrap();

    assert!(analyzed.has_instances());
    assert!(analyzed.get_info(front).unwrap().instanced);
    assert!(analyzed.get_info(back).unwrap().instanced);
    assert!(!analyzed.get_info(chassis).unwrap().instanced);

    let info = analyzed.get_info(back).unwrap();
    assert_eq!(info.node, "nodes['Wheel.001']");
    assert!(!info.animated);
}

#[test]
fn info_animated_follows_clips() {
    let (mut scene, front, ..) = car_scene();
    scene.add_animation(AnimationClip::new("Drive", 2.0));
    let analyzed = AnalyzedScene::new(scene, AnalyzeOptions::default()).unwrap();

    assert!(analyzed.has_animations());
    assert!(analyzed.get_info(front).unwrap().animated);
}

#[test]
fn info_unknown_node_fails() {
    let (mut scene, ..) = car_scene();
    let stale = scene.create_node(Node::group("Gone"));
    scene.nodes.remove(stale);

    let analyzed = AnalyzedScene::new(scene, AnalyzeOptions::default()).unwrap();
    assert!(matches!(analyzed.get_info(stale), Err(JsxError::NodeNotFound(h)) if h == stale));
    assert!(analyzed.calculate_props(stale).is_err());
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn analyze_requires_root() {
    let mut scene = Scene::new();
    let root = scene.root();
    scene.nodes.remove(root);

    let result = AnalyzedScene::new(scene, AnalyzeOptions::default());
    assert!(matches!(result, Err(JsxError::MissingRoot)));
}

#[test]
fn analyze_returns_scene() {
    let (scene, front, ..) = car_scene();
    let analyzed = AnalyzedScene::new(scene, AnalyzeOptions::default()).unwrap();
    assert_eq!(analyzed.objects().len(), 4);

    let scene = analyzed.into_scene();
    assert_eq!(scene.nodes[front].name, "Wheel");
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn options_defaults() {
    let options = Options::default();
    assert_eq!(options.analyze.precision, 3);
    assert!(!options.analyze.instancing());
    assert_eq!(options.generate.component_name, "Model");
    assert_eq!(options.generate.model_load_path, "model.glb");
    assert!(options.generate.types);
}

#[test]
fn options_for_model_names_component_after_file() {
    let options = GenerateOptions::for_model("models/my-car.glb");
    assert_eq!(options.component_name, "My_car");
    assert_eq!(options.model_load_path, "models/my-car.glb");
    assert!(options.types);

    assert_eq!(GenerateOptions::for_model("C:\\assets\\helmet.gltf").component_name, "Helmet");
    assert_eq!(GenerateOptions::for_model("3d scene.glb").component_name, "_3d_scene");
    // Capitalizing may produce a reserved word
    assert_eq!(GenerateOptions::for_model("infinity.glb").component_name, "Infinity_");
    assert_eq!(GenerateOptions::for_model("models/.glb").component_name, "Model");
}

#[test]
fn options_for_model_names_are_valid_identifiers() {
    for path in ["a-b.glb", "über model.glb", "new.glb", "9.glb", "x.y.z.glb"] {
        let name = GenerateOptions::for_model(path).component_name;
        assert!(is_var_name(&name), "{path} gave {name}");
    }
}

#[test]
fn options_from_camel_case_json() -> anyhow::Result<()> {
    let options = Options::from_json_str(
        r#"{
            "componentName": "Helmet",
            "modelLoadPath": "models/helmet.glb",
            "instanceAll": true,
            "keepGroups": true,
            "precision": 2,
            "exportDefault": true
        }"#,
    )?;

    assert_eq!(options.generate.component_name, "Helmet");
    assert_eq!(options.generate.model_load_path, "models/helmet.glb");
    assert!(options.generate.export_default);
    assert!(options.generate.types);
    assert!(options.analyze.instance_all);
    assert!(options.analyze.instancing());
    assert!(options.analyze.keep_groups);
    assert_eq!(options.analyze.precision, 2);
    assert!(!options.analyze.bones);
    Ok(())
}

#[test]
fn options_reject_malformed_json() {
    let result = Options::from_json_str(r#"{ "precision": "high" }"#);
    assert!(matches!(result, Err(JsxError::Config(_))));
}
