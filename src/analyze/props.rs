//! Prop Calculator
//!
//! Derives the serializable property set of a node from its live state and
//! the analysis options. Values are rounded to the configured precision,
//! clean fractions and multiples of π are written symbolically, and anything
//! equal to the runtime default is left out.

use std::f64::consts::PI;
use std::fmt;

use glam::Vec3;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde_json::Value;

use crate::analyze::analyzed::AnalyzedScene;
use crate::analyze::naming::material_name;
use crate::errors::{JsxError, Result};
use crate::scene::{Camera, Light, LightKind, MeshData, NodeHandle, NodeKind, ProjectionType};

/// Prop name → value, in emission order.
pub type Props = IndexMap<&'static str, PropValue, FxBuildHasher>;

/// A single property value of an emitted element.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Boolean `true`, written as a bare attribute (`castShadow`).
    Flag,
    /// Explicit boolean that differs from the default (`visible={false}`).
    Bool(bool),
    Number(f64),
    /// Quoted string literal (`name="Helmet"`).
    Str(String),
    /// Embedded expression, usually referencing shared resources.
    Expr(String),
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => f.write_str("true"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Str(s) | Self::Expr(s) => f.write_str(s),
        }
    }
}

// ============================================================================
// Numeric helpers
// ============================================================================

/// Rounds to `precision` decimal digits. Negative zero collapses to zero.
#[must_use]
pub fn round_number(n: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(15) as i32);
    let rounded = (n * factor).round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Shortest decimal representation, without a trailing `.0`. Non-finite
/// values use their JavaScript global names.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{n}")
    }
}

/// A rotation component written either as a π expression or a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SymbolicAngle {
    /// `±Math.PI / divisor` (divisor 1 is plain `Math.PI`)
    Fraction { negative: bool, divisor: u32 },
    /// `±Math.PI * factor`
    Multiple { negative: bool, factor: u32 },
    Number(f64),
}

impl SymbolicAngle {
    /// Numeric value the emitted expression evaluates to.
    #[must_use]
    pub fn value(&self) -> f64 {
        let sign = |negative: bool| if negative { -1.0 } else { 1.0 };
        match *self {
            Self::Fraction { negative, divisor } => sign(negative) * PI / f64::from(divisor),
            Self::Multiple { negative, factor } => sign(negative) * PI * f64::from(factor),
            Self::Number(n) => n,
        }
    }
}

impl fmt::Display for SymbolicAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = |negative: bool| if negative { "-" } else { "" };
        match *self {
            Self::Fraction { negative, divisor: 1 } | Self::Multiple { negative, factor: 1 } => {
                write!(f, "{}Math.PI", sign(negative))
            }
            Self::Fraction { negative, divisor } => write!(f, "{}Math.PI / {divisor}", sign(negative)),
            Self::Multiple { negative, factor } => write!(f, "{}Math.PI * {factor}", sign(negative)),
            Self::Number(n) => f.write_str(&format_number(n)),
        }
    }
}

/// Recognizes π/i and π·i (i in 1..=10) at five decimal places, falling back
/// to the rounded number.
#[must_use]
pub fn round_angle(n: f64, precision: u32) -> SymbolicAngle {
    const SCALE: f64 = 100_000.0;
    if !n.is_finite() {
        return SymbolicAngle::Number(n);
    }
    let scaled = |v: f64| (v * SCALE).round() as i64;
    let abs = scaled(n).abs();
    let negative = n < 0.0;

    if let Some(divisor) = (1..=10u32).find(|&i| abs == scaled(PI / f64::from(i))) {
        return SymbolicAngle::Fraction { negative, divisor };
    }
    if let Some(factor) = (1..=10u32).find(|&i| abs == scaled(PI * f64::from(i))) {
        return SymbolicAngle::Multiple { negative, factor };
    }
    SymbolicAngle::Number(round_number(n, precision))
}

fn differs(value: f32, default: f32) -> bool {
    (value - default).abs() > f32::EPSILON
}

fn number(value: f32, precision: u32) -> PropValue {
    PropValue::Number(round_number(f64::from(value), precision))
}

fn vec3_expr(v: Vec3, precision: u32) -> PropValue {
    let [x, y, z] = v.to_array().map(|c| format_number(round_number(f64::from(c), precision)));
    PropValue::Expr(format!("[{x}, {y}, {z}]"))
}

fn rotation_expr(v: Vec3, precision: u32) -> PropValue {
    let [x, y, z] = v.to_array().map(|c| round_angle(f64::from(c), precision).to_string());
    PropValue::Expr(format!("[{x}, {y}, {z}]"))
}

// ============================================================================
// Prop calculation
// ============================================================================

/// Computes the emitted props of `handle`.
pub fn calculate_props(analyzed: &AnalyzedScene, handle: NodeHandle) -> Result<Props> {
    let scene = analyzed.scene();
    let node = scene.get_node(handle).ok_or(JsxError::NodeNotFound(handle))?;
    let info = analyzed.get_info(handle)?;
    let options = analyzed.options();
    let precision = options.precision;
    let mut props = Props::default();

    let has_morph_targets = node
        .mesh_data()
        .and_then(|mesh| mesh.geometry)
        .and_then(|key| scene.geometry(key))
        .is_some_and(crate::resources::Geometry::has_morph_targets);

    // Names are needed at runtime by animation bindings and morph dictionaries
    if !node.name.is_empty() && (options.keep_names || has_morph_targets || info.animated) {
        props.insert("name", PropValue::Str(node.name.clone()));
    }

    match &node.kind {
        NodeKind::Camera(camera) => camera_props(&mut props, camera, precision),
        NodeKind::Light(light) => {
            light_props(&mut props, light, precision);
            if options.shadows && (light.cast_shadow || node.cast_shadow) {
                props.insert("castShadow", PropValue::Flag);
            }
        }
        NodeKind::Mesh(mesh) => {
            if options.shadows || node.cast_shadow {
                props.insert("castShadow", PropValue::Flag);
            }
            if options.shadows || node.receive_shadow {
                props.insert("receiveShadow", PropValue::Flag);
            }
            if !info.instanced {
                mesh_resource_props(&mut props, analyzed, mesh, &info.node);
            }
            if mesh.skinned {
                props.insert("skeleton", PropValue::Expr(format!("{}.skeleton", info.node)));
            }
            if has_morph_targets {
                props.insert(
                    "morphTargetDictionary",
                    PropValue::Expr(format!("{}.morphTargetDictionary", info.node)),
                );
                props.insert(
                    "morphTargetInfluences",
                    PropValue::Expr(format!("{}.morphTargetInfluences", info.node)),
                );
            }
        }
        NodeKind::Group | NodeKind::Bone | NodeKind::Primitive { .. } => {}
    }

    if !node.visible {
        props.insert("visible", PropValue::Bool(false));
    }
    if !node.frustum_culled {
        props.insert("frustumCulled", PropValue::Bool(false));
    }
    if node.render_order != 0 {
        props.insert("renderOrder", PropValue::Number(f64::from(node.render_order)));
    }
    if options.meta && !node.user_data.is_empty() {
        props.insert("userData", PropValue::Expr(Value::Object(node.user_data.clone()).to_string()));
    }

    let transform = &node.transform;
    if transform.position != Vec3::ZERO {
        props.insert("position", vec3_expr(transform.position, precision));
    }
    if transform.rotation != Vec3::ZERO {
        props.insert("rotation", rotation_expr(transform.rotation, precision));
    }
    if transform.scale != Vec3::ONE {
        let s = transform.scale;
        let uniform = s == Vec3::splat(s.x);
        props.insert("scale", if uniform { number(s.x, precision) } else { vec3_expr(s, precision) });
    }

    Ok(props)
}

fn mesh_resource_props(props: &mut Props, analyzed: &AnalyzedScene, mesh: &MeshData, node: &str) {
    if mesh.geometry.is_some() {
        props.insert("geometry", PropValue::Expr(format!("{node}.geometry")));
    }
    let named = match mesh.materials.as_slice() {
        [key] => analyzed.scene().material(*key).filter(|m| !m.name.is_empty()),
        _ => None,
    };
    match named {
        Some(material) => {
            props.insert("material", PropValue::Expr(material_name(&material.name)));
        }
        None if !mesh.materials.is_empty() => {
            props.insert("material", PropValue::Expr(format!("{node}.material")));
        }
        None => {}
    }
}

fn camera_props(props: &mut Props, camera: &Camera, precision: u32) {
    if differs(camera.zoom, 1.0) {
        props.insert("zoom", number(camera.zoom, precision));
    }
    if differs(camera.near, Camera::DEFAULT_NEAR) {
        props.insert("near", number(camera.near, precision));
    }
    if differs(camera.far, Camera::DEFAULT_FAR) {
        props.insert("far", number(camera.far, precision));
    }
    match camera.projection_type {
        ProjectionType::Perspective => {
            if differs(camera.fov, Camera::DEFAULT_FOV) {
                props.insert("fov", number(camera.fov, precision));
            }
        }
        ProjectionType::Orthographic => {
            props.insert("left", number(camera.left, precision));
            props.insert("right", number(camera.right, precision));
            props.insert("top", number(camera.top, precision));
            props.insert("bottom", number(camera.bottom, precision));
        }
    }
}

fn light_props(props: &mut Props, light: &Light, precision: u32) {
    if light.color != Vec3::ONE {
        props.insert("color", PropValue::Str(light.hex_color()));
    }
    if differs(light.intensity, 1.0) {
        props.insert("intensity", number(light.intensity, precision));
    }
    if matches!(light.kind, LightKind::Point | LightKind::Spot) {
        if differs(light.distance, 0.0) {
            props.insert("distance", number(light.distance, precision));
        }
        if differs(light.decay, Light::DEFAULT_DECAY) {
            props.insert("decay", number(light.decay, precision));
        }
    }
    if light.kind == LightKind::Spot {
        if differs(light.angle, Light::DEFAULT_ANGLE) {
            let angle = round_angle(f64::from(light.angle), precision);
            props.insert("angle", PropValue::Expr(angle.to_string()));
        }
        if differs(light.penumbra, 0.0) {
            props.insert("penumbra", number(light.penumbra, precision));
        }
    }
}
