//! Identifier and accessor naming.
//!
//! Generated code reaches loaded objects through `nodes.<name>` and
//! `materials.<name>`. Names that are not valid identifiers switch to the
//! bracket form `nodes['my node']`.

use uuid::Uuid;

use crate::scene::{Node, NodeKind, Scene};

const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "Infinity", "instanceof", "interface",
    "let", "NaN", "new", "null", "package", "private", "protected", "public", "return", "static",
    "super", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void",
    "while", "with", "yield",
];

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// True when `name` can be used as a variable or dotted property name.
#[must_use]
pub fn is_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => {}
        _ => return false,
    }
    chars.all(is_ident_continue) && !RESERVED_WORDS.contains(&name)
}

/// Rewrites `name` into a valid identifier: illegal characters become `_`,
/// a leading digit or a reserved word gets an extra `_`.
#[must_use]
pub fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if is_ident_continue(c) { c } else { '_' })
        .collect();
    if !ident.chars().next().is_some_and(is_ident_start) {
        ident.insert(0, '_');
    }
    if RESERVED_WORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Single-quoted string literal.
#[must_use]
pub fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Property access suffix: `.name` or `['name']`.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    if is_var_name(name) {
        format!(".{name}")
    } else {
        format!("[{}]", quote(name))
    }
}

/// Object key for a typed shape field: the bare name or a quoted key.
#[must_use]
pub fn property_key(name: &str) -> String {
    if is_var_name(name) { name.to_string() } else { quote(name) }
}

/// Accessor of a loaded node, e.g. `nodes.Helmet` or `nodes['Helmet 01']`.
#[must_use]
pub fn node_name(node: &Node) -> String {
    format!("nodes{}", sanitize_name(&node.name))
}

/// Accessor of a loaded material, e.g. `materials.Glass`.
#[must_use]
pub fn material_name(name: &str) -> String {
    format!("materials{}", sanitize_name(name))
}

/// Base name for a shared instance: letters only, first upper-cased.
#[must_use]
pub fn sanitize_mesh_name(node: &Node) -> String {
    let letters: String = node.name.chars().filter(char::is_ascii_alphabetic).collect();
    let mut chars = letters.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => "Part".to_string(),
    }
}

/// Identity of the mesh data a node renders: the geometry object plus the
/// material(s) applied to it. Nodes with equal signatures can share one
/// instanced definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeometrySignature {
    pub geometry: Uuid,
    pub material: String,
}

/// Signature of a mesh node, `None` for other kinds or meshes without geometry.
#[must_use]
pub fn mesh_key(scene: &Scene, node: &Node) -> Option<GeometrySignature> {
    let NodeKind::Mesh(mesh) = &node.kind else {
        return None;
    };
    let geometry = scene.geometry(mesh.geometry?)?;
    let material = mesh
        .materials
        .iter()
        .filter_map(|&key| scene.material(key))
        .map(crate::resources::Material::identity)
        .collect::<Vec<_>>()
        .join("|");
    Some(GeometrySignature {
        geometry: geometry.uuid,
        material,
    })
}
