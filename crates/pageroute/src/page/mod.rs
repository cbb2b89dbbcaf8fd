//! Page discovery and module loading seams
//!
//! The compiler never scans directories or imports modules itself. A host
//! supplies a [`PageSource`] that enumerates pages, and every
//! [`PageDescriptor`] it yields carries the [`ModuleLoader`] able to load it.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::error::RouteError;
use crate::{PageModule, PagesConfig};

pub mod fs;
pub mod manifest;

pub use fs::{DirectorySource, SidecarLoader};
pub use manifest::{Manifest, ManifestSource, StaticLoader};

/// Loads the module behind a page
///
/// Loads may suspend; the compiler runs them concurrently and does not
/// share any state between them.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    /// Load the module identified by the page's segments
    async fn load(&self, segments: &[String]) -> Result<PageModule>;

    /// Loader name for diagnostics
    fn name(&self) -> &'static str;
}

/// Enumerates the pages of an application
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Every page, in discovery order
    async fn discover(&self) -> Result<Vec<PageDescriptor>>;

    /// Source name for diagnostics
    fn name(&self) -> &'static str;
}

/// A discovered page: its path segments and how to load it
#[derive(Clone)]
pub struct PageDescriptor {
    segments: Vec<String>,
    loader: Arc<dyn ModuleLoader>,
}

impl PageDescriptor {
    /// Creates a descriptor; a page always has at least one segment
    pub fn new<I, S>(segments: I, loader: Arc<dyn ModuleLoader>) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(RouteError::EmptySegments);
        }
        Ok(Self { segments, loader })
    }

    /// Splits a relative page path such as `index/tasks/Create` into segments
    pub fn from_path(path: &str, loader: Arc<dyn ModuleLoader>) -> Result<Self, RouteError> {
        Self::new(
            path.split('/').filter(|segment| !segment.is_empty()),
            loader,
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Slash-joined segments, used to name the page in errors and logs
    pub fn key(&self) -> String {
        self.segments.join("/")
    }

    /// Load this page's module
    pub async fn load(&self) -> Result<PageModule> {
        self.loader.load(&self.segments).await
    }
}

impl fmt::Debug for PageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageDescriptor")
            .field("segments", &self.segments)
            .field("loader", &self.loader.name())
            .finish()
    }
}

/// Picks the page source a configuration asks for
///
/// A manifest, when configured, wins over the directory walk.
pub fn source_from_config(config: &PagesConfig) -> Result<Box<dyn PageSource>> {
    match &config.manifest {
        Some(manifest) => Ok(Box::new(ManifestSource::from_file(manifest)?)),
        None => Ok(Box::new(DirectorySource::new(&config.dir, &config.extension))),
    }
}
