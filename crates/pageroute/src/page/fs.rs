//! Directory-walk discovery
//!
//! Walks a pages directory recursively, keeps files with the configured
//! extension and turns `index/tasks/Create.vue` into the segments
//! `["index", "tasks", "Create"]`. Entries are sorted by file name at every
//! level so discovery order is stable across platforms.
//!
//! Page metadata lives in an optional sidecar next to the page file:
//! `Create.vue` → `Create.page.toml`. A missing sidecar is not an error.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use walkdir::WalkDir;

use super::{ModuleLoader, PageDescriptor, PageSource};
use crate::PageModule;

/// Suffix of sidecar metadata files, replacing the page extension
pub const SIDECAR_SUFFIX: &str = "page.toml";

/// Page source scanning a directory tree
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    extension: String,
    loader: Arc<SidecarLoader>,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let root = root.into();
        let extension = extension.into();
        let loader = Arc::new(SidecarLoader::new(&root, &extension));
        Self {
            root,
            extension,
            loader,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Synchronous walk; returns relative page paths split into segments
    fn scan(root: &Path, extension: &str) -> Result<Vec<Vec<String>>> {
        if !root.is_dir() {
            bail!("Pages directory not found: {:?}", root);
        }

        let mut pages = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {:?}", root))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
                continue;
            }

            let relative = path
                .strip_prefix(root)
                .with_context(|| format!("{:?} is outside {:?}", path, root))?
                .with_extension("");

            pages.push(path_segments(&relative)?);
        }
        Ok(pages)
    }
}

/// Splits a relative path into UTF-8 segments
fn path_segments(relative: &Path) -> Result<Vec<String>> {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .map(|part| {
            part.to_str()
                .map(str::to_string)
                .with_context(|| format!("Non UTF-8 page path: {:?}", relative))
        })
        .collect()
}

#[async_trait]
impl PageSource for DirectorySource {
    async fn discover(&self) -> Result<Vec<PageDescriptor>> {
        let root = self.root.clone();
        let extension = self.extension.clone();
        let pages = tokio::task::spawn_blocking(move || Self::scan(&root, &extension)).await??;

        tracing::debug!(root = ?self.root, count = pages.len(), "Scanned pages directory");

        let loader: Arc<dyn ModuleLoader> = self.loader.clone();
        pages
            .into_iter()
            .map(|segments| PageDescriptor::new(segments, loader.clone()).map_err(Into::into))
            .collect()
    }

    fn name(&self) -> &'static str {
        "directory"
    }
}

/// Loads page metadata from sidecar TOML files
#[derive(Debug, Clone)]
pub struct SidecarLoader {
    root: PathBuf,
    extension: String,
}

impl SidecarLoader {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    fn page_file(&self, segments: &[String]) -> PathBuf {
        self.file_with_suffix(segments, &self.extension)
    }

    fn sidecar_file(&self, segments: &[String]) -> PathBuf {
        self.file_with_suffix(segments, SIDECAR_SUFFIX)
    }

    /// Appends `.suffix` to the page path; dots inside the page name are kept
    fn file_with_suffix(&self, segments: &[String], suffix: &str) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(segments);

        let mut file = path.into_os_string();
        file.push(".");
        file.push(suffix);
        PathBuf::from(file)
    }
}

#[async_trait]
impl ModuleLoader for SidecarLoader {
    async fn load(&self, segments: &[String]) -> Result<PageModule> {
        let page = self.page_file(segments);
        tokio::fs::metadata(&page)
            .await
            .with_context(|| format!("Page file is not readable: {:?}", page))?;

        let sidecar = self.sidecar_file(segments);
        let content = match tokio::fs::read_to_string(&sidecar).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(PageModule::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read sidecar: {:?}", sidecar))
            }
        };

        toml::from_str(&content).with_context(|| format!("Failed to parse sidecar: {:?}", sidecar))
    }

    fn name(&self) -> &'static str {
        "sidecar"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn task_board() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "Login.vue", "");
        write(root, "Login.page.toml", "name = \"Login\"\nlayout = \"AppLayoutEmpty\"\n");
        write(root, "NotFound.vue", "");
        write(root, "index/IndexHome.vue", "");
        write(root, "index/^_id.vue", "");
        write(root, "index/tasks/Create.vue", "");
        write(root, "index/tasks/edit/_id.vue", "");
        write(root, "index/tasks/README.md", "not a page");
        dir
    }

    #[tokio::test]
    async fn test_discover_sorted_segments() {
        let dir = task_board();
        let source = DirectorySource::new(dir.path(), "vue");
        let pages = source.discover().await.unwrap();

        let keys: Vec<String> = pages.iter().map(PageDescriptor::key).collect();
        assert_eq!(
            keys,
            vec![
                "Login",
                "NotFound",
                "index/IndexHome",
                "index/^_id",
                "index/tasks/Create",
                "index/tasks/edit/_id",
            ]
        );
    }

    #[tokio::test]
    async fn test_sidecar_metadata() {
        let dir = task_board();
        let source = DirectorySource::new(dir.path(), "vue");
        let pages = source.discover().await.unwrap();

        let login = pages[0].load().await.unwrap();
        assert_eq!(login.name.as_deref(), Some("Login"));
        assert_eq!(login.layout.as_deref(), Some("AppLayoutEmpty"));

        let home = pages[2].load().await.unwrap();
        assert_eq!(home, PageModule::default());
    }

    #[tokio::test]
    async fn test_dotted_page_name_keeps_its_own_metadata() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Task.vue", "");
        write(dir.path(), "Task.page.toml", "name = \"Task\"\n");
        write(dir.path(), "Task.detail.vue", "");
        write(dir.path(), "Task.detail.page.toml", "name = \"TaskDetail\"\n");
        write(dir.path(), "Task.summary.vue", "");

        let source = DirectorySource::new(dir.path(), "vue");
        let pages = source.discover().await.unwrap();
        let keys: Vec<String> = pages.iter().map(PageDescriptor::key).collect();
        assert_eq!(keys, vec!["Task.detail", "Task.summary", "Task"]);

        let detail = pages[0].load().await.unwrap();
        assert_eq!(detail.name.as_deref(), Some("TaskDetail"));

        let task = pages[2].load().await.unwrap();
        assert_eq!(task.name.as_deref(), Some("Task"));

        // No sidecar of its own: defaults, not Task's metadata
        let summary = pages[1].load().await.unwrap();
        assert_eq!(summary, PageModule::default());
    }

    #[tokio::test]
    async fn test_missing_page_file_fails_to_load() {
        let dir = task_board();
        let loader = SidecarLoader::new(dir.path(), "vue");
        assert!(loader.load(&["Gone".to_string()]).await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_sidecar_fails_to_load() {
        let dir = task_board();
        write(dir.path(), "index/tasks/Create.page.toml", "layout = [");
        let loader = SidecarLoader::new(dir.path(), "vue");
        let segments: Vec<String> = vec!["index".into(), "tasks".into(), "Create".into()];
        assert!(loader.load(&segments).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_root_is_a_discovery_error() {
        let source = DirectorySource::new("/definitely/not/here", "vue");
        let err = source.discover().await.unwrap_err();
        assert!(err.to_string().contains("Pages directory not found"));
    }
}
