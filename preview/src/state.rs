//! Shared application state for the preview server.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use themer::io::config::ThemeConfig;
use themer::resolve::TemplateResolver;

/// Shared state accessible from all request handlers.
///
/// The resolver itself is synchronous; handlers take the mutex for the
/// duration of one resolution or render.
#[derive(Clone)]
pub struct AppState {
    pub theme_dir: PathBuf,
    pub config: ThemeConfig,
    pub resolver: Arc<Mutex<TemplateResolver>>,
}

impl AppState {
    pub fn new(theme_dir: PathBuf, config: ThemeConfig) -> Self {
        let resolver = TemplateResolver::new(theme_dir.clone(), config.clone());
        Self {
            theme_dir,
            config,
            resolver: Arc::new(Mutex::new(resolver)),
        }
    }
}
