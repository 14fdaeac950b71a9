//! Prop Calculator Tests
//!
//! Tests for:
//! - Transform props: rounding, symbolic rotations, uniform scale
//! - Option-driven props: names, shadows, userData
//! - Mesh resources: geometry/material references, instanced omission
//! - Light and camera props against three.js defaults
//! - Non-finite numbers written as JavaScript globals

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::Vec3;
use myth_jsx::analyze::{AnalyzedScene, PropValue, SymbolicAngle, format_number, round_angle, round_number};
use myth_jsx::options::AnalyzeOptions;
use myth_jsx::resources::{Geometry, Material};
use myth_jsx::scene::{Camera, Light, MeshData, Node, NodeHandle, Scene, Transform};

fn expr(s: &str) -> PropValue {
    PropValue::Expr(s.to_string())
}

fn analyze_single(node: Node, options: AnalyzeOptions) -> (AnalyzedScene, NodeHandle) {
    let mut scene = Scene::new();
    let handle = scene.add_node(node);
    (AnalyzedScene::new(scene, options).unwrap(), handle)
}

/// Adds a mesh with its own geometry and the named material.
fn add_mesh(scene: &mut Scene, name: &str, material: &str) -> NodeHandle {
    let geometry = scene.add_geometry(Geometry::new(name));
    let material = scene.add_material(Material::standard(material));
    scene.add_node(Node::mesh(name, MeshData::new(geometry, material)))
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn props_position_is_rounded() {
    let node = Node::group("G").with_transform(Transform::from_position(Vec3::new(1.234_56, 0.0, -2.0)));
    let (analyzed, handle) = analyze_single(node, AnalyzeOptions::default());

    let props = analyzed.calculate_props(handle).unwrap();
    assert_eq!(props.get("position"), Some(&expr("[1.235, 0, -2]")));
    assert!(!props.contains_key("rotation"));
    assert!(!props.contains_key("scale"));
}

#[test]
fn props_precision_is_configurable() {
    let node = Node::group("G").with_transform(Transform::from_position(Vec3::new(1.234_56, 0.0, 0.0)));
    let options = AnalyzeOptions {
        precision: 1,
        ..Default::default()
    };
    let (analyzed, handle) = analyze_single(node, options);

    let props = analyzed.calculate_props(handle).unwrap();
    assert_eq!(props.get("position"), Some(&expr("[1.2, 0, 0]")));
}

#[test]
fn props_rotation_is_symbolic() {
    let mut transform = Transform::new();
    transform.set_rotation_euler(FRAC_PI_4, 0.0, -FRAC_PI_2);
    let (analyzed, handle) = analyze_single(Node::group("G").with_transform(transform), AnalyzeOptions::default());

    let props = analyzed.calculate_props(handle).unwrap();
    assert_eq!(props.get("rotation"), Some(&expr("[Math.PI / 4, 0, -Math.PI / 2]")));
}

#[test]
fn angle_symbol_evaluates_to_input() {
    for angle in [FRAC_PI_4, FRAC_PI_2, PI, -PI / 3.0, PI * 2.0] {
        let symbol = round_angle(f64::from(angle), 3);
        assert!(!matches!(symbol, SymbolicAngle::Number(_)), "{angle} not recognized");
        assert!((symbol.value() - f64::from(angle)).abs() < 1e-5);
    }
    assert_eq!(round_angle(0.123_456, 3), SymbolicAngle::Number(0.123));
}

#[test]
fn props_uniform_scale_is_single_number() {
    let mut uniform = Transform::new();
    uniform.scale = Vec3::splat(2.0);
    let (analyzed, handle) = analyze_single(Node::group("G").with_transform(uniform), AnalyzeOptions::default());
    let props = analyzed.calculate_props(handle).unwrap();
    assert_eq!(props.get("scale"), Some(&PropValue::Number(2.0)));

    let mut stretched = Transform::new();
    stretched.scale = Vec3::new(1.0, 2.0, 1.0);
    let (analyzed, handle) = analyze_single(Node::group("G").with_transform(stretched), AnalyzeOptions::default());
    let props = analyzed.calculate_props(handle).unwrap();
    assert_eq!(props.get("scale"), Some(&expr("[1, 2, 1]")));
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn props_name_only_with_keep_names() {
    let node = || Node::group("Door").with_transform(Transform::from_position(Vec3::X));

    let (analyzed, handle) = analyze_single(node(), AnalyzeOptions::default());
    assert!(!analyzed.calculate_props(handle).unwrap().contains_key("name"));

    let options = AnalyzeOptions {
        keep_names: true,
        ..Default::default()
    };
    let (analyzed, handle) = analyze_single(node(), options);
    let props = analyzed.calculate_props(handle).unwrap();
    assert_eq!(props.get("name"), Some(&PropValue::Str("Door".to_string())));
    // Name comes first
    assert_eq!(props.keys().next(), Some(&"name"));
}

#[test]
fn props_shadows_flag_meshes() {
    let mut scene = Scene::new();
    let mesh = add_mesh(&mut scene, "Crate", "Wood");
    let options = AnalyzeOptions {
        shadows: true,
        ..Default::default()
    };
    let analyzed = AnalyzedScene::new(scene, options).unwrap();

    let props = analyzed.calculate_props(mesh).unwrap();
    assert_eq!(props.get("castShadow"), Some(&PropValue::Flag));
    assert_eq!(props.get("receiveShadow"), Some(&PropValue::Flag));
}

#[test]
fn props_flags_differing_from_defaults() {
    let mut node = Node::group("G");
    node.visible = false;
    node.frustum_culled = false;
    node.render_order = 2;
    let (analyzed, handle) = analyze_single(node, AnalyzeOptions::default());

    let props = analyzed.calculate_props(handle).unwrap();
    assert_eq!(props.get("visible"), Some(&PropValue::Bool(false)));
    assert_eq!(props.get("frustumCulled"), Some(&PropValue::Bool(false)));
    assert_eq!(props.get("renderOrder"), Some(&PropValue::Number(2.0)));
}

#[test]
fn props_user_data_with_meta() {
    let mut node = Node::group("G").with_transform(Transform::from_position(Vec3::Y));
    node.user_data.insert("tag".into(), "door".into());

    let (analyzed, handle) = analyze_single(node.clone(), AnalyzeOptions::default());
    assert!(!analyzed.calculate_props(handle).unwrap().contains_key("userData"));

    let options = AnalyzeOptions {
        meta: true,
        ..Default::default()
    };
    let (analyzed, handle) = analyze_single(node, options);
    let props = analyzed.calculate_props(handle).unwrap();
    assert_eq!(props.get("userData"), Some(&expr(r#"{"tag":"door"}"#)));
}

// ============================================================================
// Mesh Resources
// ============================================================================

#[test]
fn props_mesh_references_resources() {
    let mut scene = Scene::new();
    let mesh = add_mesh(&mut scene, "Helmet", "Metal");
    let glass = add_mesh(&mut scene, "Visor", "Glass Plate");
    let analyzed = AnalyzedScene::new(scene, AnalyzeOptions::default()).unwrap();

    let props = analyzed.calculate_props(mesh).unwrap();
    assert_eq!(props.get("geometry"), Some(&expr("nodes.Helmet.geometry")));
    assert_eq!(props.get("material"), Some(&expr("materials.Metal")));

    let props = analyzed.calculate_props(glass).unwrap();
    assert_eq!(props.get("material"), Some(&expr("materials['Glass Plate']")));
}

#[test]
fn props_unnamed_material_uses_node() {
    let mut scene = Scene::new();
    let geometry = scene.add_geometry(Geometry::new("g"));
    let material = scene.add_material(Material::standard(""));
    let mesh = scene.add_node(Node::mesh("Rock", MeshData::new(geometry, material)));
    let analyzed = AnalyzedScene::new(scene, AnalyzeOptions::default()).unwrap();

    let props = analyzed.calculate_props(mesh).unwrap();
    assert_eq!(props.get("material"), Some(&expr("nodes.Rock.material")));
}

#[test]
fn props_instanced_mesh_omits_resources() {
    let mut scene = Scene::new();
    let geometry = scene.add_geometry(Geometry::new("bolt"));
    let material = scene.add_material(Material::standard("Steel"));
    let bolt = scene.add_node(
        Node::mesh("Bolt", MeshData::new(geometry, material)).with_transform(Transform::from_position(Vec3::X)),
    );
    scene.add_node(Node::mesh("Bolt2", MeshData::new(geometry, material)));
    let options = AnalyzeOptions {
        instance: true,
        ..Default::default()
    };
    let analyzed = AnalyzedScene::new(scene, options).unwrap();

    let props = analyzed.calculate_props(bolt).unwrap();
    assert!(!props.contains_key("geometry"));
    assert!(!props.contains_key("material"));
    assert!(props.contains_key("position"));
}

#[test]
fn props_morph_targets_force_name() {
    let mut scene = Scene::new();
    let geometry = scene.add_geometry(Geometry::new("face").with_morph_targets(&["smile", "blink"]));
    let material = scene.add_material(Material::standard("Skin"));
    let face = scene.add_node(Node::mesh("Face", MeshData::new(geometry, material)));
    let analyzed = AnalyzedScene::new(scene, AnalyzeOptions::default()).unwrap();

    let props = analyzed.calculate_props(face).unwrap();
    assert_eq!(props.get("name"), Some(&PropValue::Str("Face".to_string())));
    assert_eq!(props.get("morphTargetDictionary"), Some(&expr("nodes.Face.morphTargetDictionary")));
    assert_eq!(props.get("morphTargetInfluences"), Some(&expr("nodes.Face.morphTargetInfluences")));
}

#[test]
fn props_skinned_mesh_binds_skeleton() {
    let mut scene = Scene::new();
    let geometry = scene.add_geometry(Geometry::new("body"));
    let material = scene.add_material(Material::standard("Skin"));
    let mut mesh = MeshData::new(geometry, material);
    mesh.skinned = true;
    let body = scene.add_node(Node::mesh("Body", mesh));
    let analyzed = AnalyzedScene::new(scene, AnalyzeOptions::default()).unwrap();

    let props = analyzed.calculate_props(body).unwrap();
    assert_eq!(props.get("skeleton"), Some(&expr("nodes.Body.skeleton")));
}

// ============================================================================
// Lights & Cameras
// ============================================================================

#[test]
fn props_point_light() {
    let light = Light::new_point(Vec3::new(1.0, 0.0, 0.0), 2.5, 10.0);
    let (analyzed, handle) = analyze_single(Node::light("Lamp", light), AnalyzeOptions::default());

    let props = analyzed.calculate_props(handle).unwrap();
    assert_eq!(props.get("color"), Some(&PropValue::Str("#ff0000".to_string())));
    assert_eq!(props.get("intensity"), Some(&PropValue::Number(2.5)));
    assert_eq!(props.get("distance"), Some(&PropValue::Number(10.0)));
    assert!(!props.contains_key("decay"));
    assert!(!props.contains_key("angle"));
}

#[test]
fn props_spot_light_angle_is_symbolic() {
    let mut light = Light::new_spot(Vec3::ONE, 1.0, 0.0, FRAC_PI_4, 0.5);
    light.cast_shadow = true;
    let (analyzed, handle) = analyze_single(Node::light("Spot", light.clone()), AnalyzeOptions::default());

    let props = analyzed.calculate_props(handle).unwrap();
    assert_eq!(props.get("angle"), Some(&expr("Math.PI / 4")));
    assert!(!props.contains_key("castShadow"));

    let options = AnalyzeOptions {
        shadows: true,
        ..Default::default()
    };
    let (analyzed, handle) = analyze_single(Node::light("Spot", light), options);
    let props = analyzed.calculate_props(handle).unwrap();
    assert_eq!(props.get("penumbra"), Some(&PropValue::Number(0.5)));
    assert_eq!(props.get("castShadow"), Some(&PropValue::Flag));
    assert!(!props.contains_key("color"));
    assert!(!props.contains_key("intensity"));
}

#[test]
fn props_cameras() {
    let camera = Camera::new_perspective(35.0, 0.1, 100.0);
    let (analyzed, handle) = analyze_single(Node::camera("Cam", camera), AnalyzeOptions::default());
    let props = analyzed.calculate_props(handle).unwrap();
    assert_eq!(props.get("fov"), Some(&PropValue::Number(35.0)));
    assert_eq!(props.get("far"), Some(&PropValue::Number(100.0)));
    assert!(!props.contains_key("near"));

    let camera = Camera::new_orthographic(-1.0, 1.0, 1.0, -1.0, 0.1, 2000.0);
    let (analyzed, handle) = analyze_single(Node::camera("Ortho", camera), AnalyzeOptions::default());
    let props = analyzed.calculate_props(handle).unwrap();
    assert_eq!(props.get("left"), Some(&PropValue::Number(-1.0)));
    assert_eq!(props.get("top"), Some(&PropValue::Number(1.0)));
    assert!(!props.contains_key("fov"));
}

#[test]
fn props_infinite_camera_far_is_valid_expression() {
    let camera = Camera::new_perspective(Camera::DEFAULT_FOV, Camera::DEFAULT_NEAR, f32::INFINITY);
    let (analyzed, handle) = analyze_single(Node::camera("Cam", camera), AnalyzeOptions::default());

    let props = analyzed.calculate_props(handle).unwrap();
    let far = props.get("far").unwrap();
    assert_eq!(far, &PropValue::Number(f64::INFINITY));
    assert_eq!(far.to_string(), "Infinity");
}

#[test]
fn non_finite_numbers_use_js_names() {
    assert_eq!(format_number(f64::INFINITY), "Infinity");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(round_number(f64::INFINITY, 3)), "Infinity");
    assert_eq!(format_number(-0.5), "-0.5");

    assert_eq!(round_angle(f64::NEG_INFINITY, 3).to_string(), "-Infinity");
}
