//! Component template environment
//!
//! Source templates are embedded with rust-embed and rendered by minijinja
//! with line statements (`$$ if ...`) and `{$ ... $}` blocks, so JSX braces
//! in the template body never collide with template syntax.

use std::borrow::Cow;
use std::sync::OnceLock;

use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment, Error, ErrorKind};
use rust_embed::RustEmbed;
use serde::Serialize;

use crate::errors::{JsxError, Result};

/// Template of a complete component module.
pub const COMPONENT_TEMPLATE: &str = "component.tsx";

pub static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(RustEmbed)]
#[folder = "src/codegen/templates"]
struct TemplateAssets;

pub fn get_env() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(|| {
        let mut env = Environment::new();

        match SyntaxConfig::builder()
            .block_delimiters("{$", "$}")
            .variable_delimiters("{{", "}}")
            .line_statement_prefix("$$")
            .build()
        {
            Ok(syntax) => env.set_syntax(syntax),
            Err(e) => log::error!("Failed to configure template syntax: {e}"),
        }

        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(minijinja::UndefinedBehavior::SemiStrict);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.set_loader(template_loader);

        env
    })
}

fn template_loader(name: &str) -> std::result::Result<Option<String>, Error> {
    let filename = if std::path::Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jinja"))
    {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{name}.jinja"))
    };

    #[cfg(debug_assertions)]
    {
        let path = std::path::Path::new("src/codegen/templates").join(filename.as_ref());
        if path.exists() {
            return match std::fs::read_to_string(&path) {
                Ok(source) => Ok(Some(source)),
                Err(e) => Err(Error::new(
                    ErrorKind::TemplateNotFound,
                    format!("Failed to read file: {e}"),
                )),
            };
        }
    }

    if let Some(file) = TemplateAssets::get(&filename)
        && let Ok(source) = std::str::from_utf8(file.data.as_ref())
    {
        return Ok(Some(source.to_string()));
    }

    Ok(None)
}

/// Renders the named template with `ctx`.
pub fn render<S: Serialize>(name: &str, ctx: &S) -> Result<String> {
    let template = get_env().get_template(name).map_err(|e| match e.kind() {
        ErrorKind::TemplateNotFound => JsxError::TemplateNotFound(name.to_string()),
        _ => JsxError::Template(e),
    })?;
    Ok(template.render(ctx)?)
}
