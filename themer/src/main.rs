//! Theme template resolver CLI.
//!
//! Operates on a theme directory (`theme.toml` + `templates/`), resolving
//! template parts for a request context described by flags, listing
//! candidate hierarchies and discovered custom templates, and rendering
//! full pages.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};

use themer::core::context::{AuthorRef, PostRef, RequestInfo, TermRef};
use themer::exit_codes;
use themer::io::config::load_config;
use themer::io::init::{InitOptions, ThemePaths, init_theme};
use themer::io::scan::cached_custom_templates;
use themer::render::{RenderContext, render_page};
use themer::resolve::TemplateResolver;

#[derive(Parser)]
#[command(
    name = "themer",
    version,
    about = "Template-hierarchy resolver for file-based themes"
)]
struct Cli {
    /// Theme directory (contains theme.toml and templates/).
    #[arg(long, default_value = ".", global = true)]
    theme_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a starter theme layout if missing.
    Init {
        /// Overwrite existing scaffolded files.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the resolved template path for a part.
    Resolve {
        /// Template part name (e.g. `header`, `main`).
        part: String,
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Print the candidate hierarchy for a part, one path per line.
    Hierarchy {
        part: String,
        #[command(flatten)]
        context: ContextArgs,
    },
    /// List discovered custom templates per post type.
    Templates,
    /// Render the page for a request context to stdout.
    Render {
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Drop both cache tiers.
    ClearCache,
}

/// Request conditionals, one flag per predicate the classifier checks.
#[derive(Args, Debug, Clone, Default)]
struct ContextArgs {
    /// Treat the request as a 404.
    #[arg(long)]
    not_found: bool,

    /// Treat the request as search results.
    #[arg(long)]
    search: bool,

    /// Author archive nicename.
    #[arg(long)]
    author: Option<String>,

    /// Taxonomy term as `taxonomy:slug`.
    #[arg(long)]
    taxonomy: Option<String>,

    /// Post-type archive.
    #[arg(long)]
    archive: Option<String>,

    /// Treat the request as a date archive.
    #[arg(long)]
    date: bool,

    /// Treat the request as the blog home.
    #[arg(long)]
    home: bool,

    /// Singular request for the given post type.
    #[arg(long)]
    post: Option<String>,

    /// Custom template name for `--post`.
    #[arg(long, requires = "post")]
    template: Option<String>,
}

impl ContextArgs {
    fn to_request(&self) -> Result<RequestInfo> {
        let term = match &self.taxonomy {
            Some(raw) => {
                let (taxonomy, slug) = raw
                    .split_once(':')
                    .ok_or_else(|| anyhow!("--taxonomy expects `taxonomy:slug`, got '{raw}'"))?;
                Some(TermRef {
                    taxonomy: taxonomy.to_string(),
                    slug: slug.to_string(),
                })
            }
            None => None,
        };

        Ok(RequestInfo {
            is_404: self.not_found,
            is_search: self.search,
            author: self.author.clone().map(|nicename| AuthorRef { nicename }),
            term,
            archive_post_type: self.archive.clone(),
            is_date: self.date,
            is_home: self.home,
            post: self.post.clone().map(|post_type| PostRef {
                post_type,
                custom_template: self.template.clone(),
            }),
        })
    }
}

fn main() {
    themer::logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.theme_dir, force),
        Command::Resolve { part, context } => cmd_resolve(&cli.theme_dir, &part, &context),
        Command::Hierarchy { part, context } => cmd_hierarchy(&cli.theme_dir, &part, &context),
        Command::Templates => cmd_templates(&cli.theme_dir),
        Command::Render { context } => cmd_render(&cli.theme_dir, &context),
        Command::ClearCache => cmd_clear_cache(&cli.theme_dir),
    }
}

fn cmd_init(theme_dir: &Path, force: bool) -> Result<i32> {
    let paths = init_theme(theme_dir, &InitOptions { force })?;
    println!("init: theme={}", paths.root.display());
    Ok(exit_codes::OK)
}

fn cmd_resolve(theme_dir: &Path, part: &str, context: &ContextArgs) -> Result<i32> {
    let mut resolver = resolver_for(theme_dir)?;
    let request = context.to_request()?;
    match resolver.resolve_part(&request, part)? {
        Some(path) => {
            println!("{}", path.display());
            Ok(exit_codes::OK)
        }
        None => Ok(exit_codes::NOT_FOUND),
    }
}

fn cmd_hierarchy(theme_dir: &Path, part: &str, context: &ContextArgs) -> Result<i32> {
    let resolver = resolver_for(theme_dir)?;
    let request = context.to_request()?;
    for candidate in resolver.hierarchy(&request, part)? {
        println!("{candidate}");
    }
    Ok(exit_codes::OK)
}

fn cmd_templates(theme_dir: &Path) -> Result<i32> {
    let paths = ThemePaths::new(theme_dir);
    let config = load_config(&paths.config_path).context("load theme config")?;
    let index = cached_custom_templates(theme_dir, &config)?;
    for (post_type, variants) in index {
        for (raw, display) in variants {
            println!("{post_type}/{raw}\t{display}");
        }
    }
    Ok(exit_codes::OK)
}

fn cmd_render(theme_dir: &Path, context: &ContextArgs) -> Result<i32> {
    let mut resolver = resolver_for(theme_dir)?;
    let request = context.to_request()?;
    let ctx = RenderContext::for_theme(&resolver, "/")?;
    let page = render_page(&mut resolver, &request, &ctx)?;
    println!("{page}");
    Ok(exit_codes::OK)
}

fn cmd_clear_cache(theme_dir: &Path) -> Result<i32> {
    let paths = ThemePaths::new(theme_dir);
    if paths.cache_dir.exists() {
        fs::remove_dir_all(&paths.cache_dir)
            .with_context(|| format!("remove {}", paths.cache_dir.display()))?;
    }
    println!("clear-cache: {}", paths.cache_dir.display());
    Ok(exit_codes::OK)
}

fn resolver_for(theme_dir: &Path) -> Result<TemplateResolver> {
    let paths = ThemePaths::new(theme_dir);
    if !paths.templates_dir.is_dir() {
        return Err(anyhow!(
            "no templates/ under {} (run `themer init`?)",
            theme_dir.display()
        ));
    }
    let config = load_config(&paths.config_path).context("load theme config")?;
    Ok(TemplateResolver::new(theme_dir, config))
}
