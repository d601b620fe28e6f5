//! Rendering of resolved parts into a full page.
//!
//! Templates are loaded from disk at render time, enabling rapid iteration
//! without recompilation. Each configured part resolves independently; a
//! part with no winning candidate renders as empty output, never an error.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use minijinja::{Environment, context};

use crate::core::context::RequestInfo;
use crate::io::init::ThemePaths;
use crate::io::manifest::AssetManifest;
use crate::resolve::TemplateResolver;

/// Values exposed to every template.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub site_title: String,
    pub request_path: String,
    pub manifest: AssetManifest,
}

impl RenderContext {
    /// Build a render context from the theme's config and asset manifest.
    pub fn for_theme(resolver: &TemplateResolver, request_path: &str) -> Result<Self> {
        let paths = ThemePaths::new(resolver.theme_root());
        Ok(Self {
            site_title: resolver.config().title.clone(),
            request_path: request_path.to_string(),
            manifest: AssetManifest::load(&paths.manifest_path)?,
        })
    }
}

/// Render one resolved template file.
pub fn render_part(template_path: &Path, ctx: &RenderContext) -> Result<String> {
    let template_content = fs::read_to_string(template_path)
        .with_context(|| format!("read template {}", template_path.display()))?;

    let mut env = environment(&ctx.manifest);
    env.add_template("part", &template_content)
        .context("parse template")?;
    let template = env.get_template("part")?;

    let rendered = template.render(context! {
        site_title => &ctx.site_title,
        request_path => &ctx.request_path,
    })?;
    Ok(rendered)
}

/// Resolve and render every configured part, then wrap them in `base.html`.
///
/// Without a wrapper template the parts are concatenated in configured
/// order.
pub fn render_page(
    resolver: &mut TemplateResolver,
    request: &RequestInfo,
    ctx: &RenderContext,
) -> Result<String> {
    let part_names = resolver.config().parts.clone();
    let mut parts = BTreeMap::new();
    for part in &part_names {
        let rendered = match resolver.resolve_part(request, part)? {
            Some(path) => render_part(&path, ctx)?,
            None => String::new(),
        };
        parts.insert(part.clone(), rendered);
    }

    let base_path = ThemePaths::new(resolver.theme_root()).base_template_path;
    if !base_path.is_file() {
        let joined = part_names
            .iter()
            .filter_map(|part| parts.get(part))
            .filter(|rendered| !rendered.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");
        return Ok(joined);
    }

    let base_content = fs::read_to_string(&base_path)
        .with_context(|| format!("read template {}", base_path.display()))?;
    let mut env = environment(&ctx.manifest);
    env.add_template("base", &base_content).context("parse base template")?;
    let template = env.get_template("base")?;

    let rendered = template.render(context! {
        site_title => &ctx.site_title,
        request_path => &ctx.request_path,
        parts => parts,
    })?;
    Ok(rendered)
}

/// Template environment with the `asset` manifest lookup installed.
///
/// The returned environment owns its manifest clone, so its lifetime is
/// free to match the caller's template sources.
fn environment<'env>(manifest: &AssetManifest) -> Environment<'env> {
    let mut env = Environment::new();
    let manifest = manifest.clone();
    env.add_function("asset", move |name: String| manifest.asset_path(&name));
    env
}
