//! Manifest-driven discovery
//!
//! A manifest lists pages explicitly, in order, together with the metadata
//! their modules declare. Useful when pages are known at build time.
//!
//! ```toml
//! [[pages]]
//! path = "index/tasks/Create"
//! name = "TaskCreate"
//! layout = "AppLayoutMain"
//!
//! [pages.middlewares]
//! auth = true
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ModuleLoader, PageDescriptor, PageSource};
use crate::PageModule;

/// Parsed manifest file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub pages: Vec<ManifestPage>,
}

/// One page of the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestPage {
    /// Slash-separated page path relative to the pages root, without extension
    pub path: String,

    #[serde(flatten)]
    pub module: PageModule,
}

impl Manifest {
    /// Parse manifest from TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML manifest")
    }

    /// Parse manifest from JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse JSON manifest")
    }

    /// Load a manifest file, picking the format from its extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {:?}", path))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => bail!("Unsupported manifest format {:?} for {:?}", other, path),
        }
    }
}

/// In-memory loader serving pre-declared modules
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    modules: HashMap<String, PageModule>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module under a slash-separated page path
    pub fn with_page(mut self, path: impl Into<String>, module: PageModule) -> Self {
        self.insert(path, module);
        self
    }

    /// Empty pieces are dropped from the path, as [`PageDescriptor::from_path`] does
    pub fn insert(&mut self, path: impl Into<String>, module: PageModule) {
        let path = path.into();
        let key = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        self.modules.insert(key, module);
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[async_trait]
impl ModuleLoader for StaticLoader {
    async fn load(&self, segments: &[String]) -> Result<PageModule> {
        let key = segments.join("/");
        self.modules
            .get(&key)
            .cloned()
            .ok_or_else(|| anyhow!("No module registered for page '{}'", key))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Page source backed by a [`Manifest`]
#[derive(Debug, Clone)]
pub struct ManifestSource {
    paths: Vec<String>,
    loader: Arc<StaticLoader>,
}

impl ManifestSource {
    pub fn new(manifest: Manifest) -> Self {
        let mut loader = StaticLoader::new();
        let paths = manifest
            .pages
            .into_iter()
            .map(|page| {
                loader.insert(page.path.clone(), page.module);
                page.path
            })
            .collect();

        Self {
            paths,
            loader: Arc::new(loader),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Manifest::from_file(path).map(Self::new)
    }
}

#[async_trait]
impl PageSource for ManifestSource {
    async fn discover(&self) -> Result<Vec<PageDescriptor>> {
        let loader: Arc<dyn ModuleLoader> = self.loader.clone();
        self.paths
            .iter()
            .map(|path| {
                PageDescriptor::from_path(path, loader.clone())
                    .with_context(|| format!("Invalid manifest entry '{}'", path))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "manifest"
    }
}
