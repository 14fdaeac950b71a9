//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`JsxError`] covers all failure modes including:
//! - Malformed input graphs (missing root, stale node handles)
//! - Code generation failures (template lookup and rendering)
//! - Configuration parsing errors
//!
//! Errors raised while pruning are not surfaced through this type: the prune
//! engine logs them and keeps the partially pruned graph.
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, JsxError>`.
//!
//! ```rust,ignore
//! use myth_jsx::errors::{JsxError, Result};
//!
//! fn analyze() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::scene::NodeHandle;

/// The main error type for scene analysis and code generation.
#[derive(Error, Debug)]
pub enum JsxError {
    // ========================================================================
    // Scene Graph Errors
    // ========================================================================
    /// The scene has no traversable root node.
    #[error("Scene has no traversable root node")]
    MissingRoot,

    /// A node handle does not refer to a live node of the scene.
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeHandle),

    // ========================================================================
    // Code Generation Errors
    // ========================================================================
    /// The component name cannot be used as a source identifier.
    #[error("Invalid component name: '{0}'")]
    InvalidComponentName(String),

    /// A required source template is not embedded in the crate.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Template compilation or rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The external source formatter rejected the generated code.
    #[error("Format error: {0}")]
    Format(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration record could not be parsed.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Alias for `Result<T, JsxError>`.
pub type Result<T> = std::result::Result<T, JsxError>;
