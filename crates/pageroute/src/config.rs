// File: src/config.rs
// Purpose: Naming conventions and discovery configuration parsed from pageroute.toml

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Compiler configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub conventions: Conventions,

    #[serde(default)]
    pub pages: PagesConfig,
}

/// Reserved lexical conventions recognised in page segments
///
/// These are configured once and passed everywhere a segment is inspected,
/// so no other module spells out a marker literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    /// Leading character turning a segment into a URL parameter (`_id` → `:id`)
    #[serde(default = "default_dynamic_marker")]
    pub dynamic_marker: char,

    /// Leading character on the last segment marking a nested child page (`^_id`)
    #[serde(default = "default_child_marker")]
    pub child_marker: char,

    /// Prefix written in place of the dynamic marker
    #[serde(default = "default_param_prefix")]
    pub param_prefix: char,

    /// Case-insensitive prefix of index (landing) pages and wrapper directories
    #[serde(default = "default_index_keyword")]
    pub index_keyword: String,

    /// Page name whose module becomes the wildcard fallback
    #[serde(default = "default_not_found_page")]
    pub not_found_page: String,

    /// Layout used when a page module does not declare one
    #[serde(default = "default_layout")]
    pub default_layout: String,
}

/// Where pages are discovered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    /// Directory containing page files (default: "views")
    #[serde(default = "default_pages_dir")]
    pub dir: PathBuf,

    /// Page file extension without the dot (default: "vue")
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Optional manifest listing pages explicitly; takes precedence over the directory walk
    #[serde(default)]
    pub manifest: Option<PathBuf>,
}

// Default values
fn default_dynamic_marker() -> char {
    '_'
}

fn default_child_marker() -> char {
    '^'
}

fn default_param_prefix() -> char {
    ':'
}

fn default_index_keyword() -> String {
    "index".to_string()
}

fn default_not_found_page() -> String {
    "NotFound".to_string()
}

fn default_layout() -> String {
    "AppLayoutDefault".to_string()
}

fn default_pages_dir() -> PathBuf {
    PathBuf::from("views")
}

fn default_extension() -> String {
    "vue".to_string()
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            dynamic_marker: default_dynamic_marker(),
            child_marker: default_child_marker(),
            param_prefix: default_param_prefix(),
            index_keyword: default_index_keyword(),
            not_found_page: default_not_found_page(),
            default_layout: default_layout(),
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            dir: default_pages_dir(),
            extension: default_extension(),
            manifest: None,
        }
    }
}

impl Conventions {
    /// Case-insensitive check for the index keyword at the start of a segment
    pub fn is_index(&self, segment: &str) -> bool {
        segment
            .to_lowercase()
            .starts_with(&self.index_keyword.to_lowercase())
    }

    /// Returns the segment without its child marker, if it carries one
    pub fn strip_child_marker<'a>(&self, segment: &'a str) -> Option<&'a str> {
        segment.strip_prefix(self.child_marker)
    }

    /// Whether a segment sequence names the not-found page
    pub fn is_not_found<S: AsRef<str>>(&self, segments: &[S]) -> bool {
        matches!(segments, [only] if only.as_ref() == self.not_found_page)
    }

    /// Rejects conventions that would make segments ambiguous
    pub fn validate(&self) -> Result<()> {
        if self.dynamic_marker == self.child_marker {
            bail!(
                "dynamic marker and child marker must differ (both are {:?})",
                self.dynamic_marker
            );
        }
        if self.dynamic_marker == '/' || self.child_marker == '/' {
            bail!("markers cannot be the path separator '/'");
        }
        if self.param_prefix == '/' {
            bail!("parameter prefix cannot be the path separator '/'");
        }
        if self.param_prefix == self.dynamic_marker || self.param_prefix == self.child_marker {
            bail!(
                "parameter prefix {:?} must differ from the dynamic and child markers",
                self.param_prefix
            );
        }
        if self.index_keyword.is_empty() {
            bail!("index keyword cannot be empty");
        }
        if self.not_found_page.is_empty() {
            bail!("not-found page name cannot be empty");
        }
        if self.default_layout.is_empty() {
            bail!("default layout cannot be empty");
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from pageroute.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from pageroute.toml in the current directory
    pub fn load_default() -> Result<Self> {
        Self::load("pageroute.toml")
    }

    pub fn validate(&self) -> Result<()> {
        self.conventions
            .validate()
            .context("Invalid [conventions] section")?;

        if self.pages.extension.starts_with('.') {
            bail!(
                "pages.extension must not include the leading dot: {:?}",
                self.pages.extension
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.conventions.dynamic_marker, '_');
        assert_eq!(config.conventions.child_marker, '^');
        assert_eq!(config.conventions.param_prefix, ':');
        assert_eq!(config.conventions.index_keyword, "index");
        assert_eq!(config.conventions.not_found_page, "NotFound");
        assert_eq!(config.conventions.default_layout, "AppLayoutDefault");
        assert_eq!(config.pages.dir, PathBuf::from("views"));
        assert_eq!(config.pages.extension, "vue");
        assert!(config.pages.manifest.is_none());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
            [conventions]
            dynamic_marker = "$"
            default_layout = "Blank"

            [pages]
            dir = "src/views"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.conventions.dynamic_marker, '$');
        assert_eq!(config.conventions.child_marker, '^');
        assert_eq!(config.conventions.default_layout, "Blank");
        assert_eq!(config.pages.dir, PathBuf::from("src/views"));
        assert_eq!(config.pages.extension, "vue");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("does/not/exist/pageroute.toml").unwrap();
        assert_eq!(config.conventions, Conventions::default());
    }

    #[test]
    fn test_load_rejects_identical_markers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pageroute.toml");
        fs::write(&path, "[conventions]\ndynamic_marker = \"^\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("must differ"));
    }

    #[test]
    fn test_rejects_param_prefix_equal_to_a_marker() {
        let conventions = Conventions {
            param_prefix: '_',
            ..Conventions::default()
        };
        assert!(conventions.validate().is_err());

        let conventions = Conventions {
            param_prefix: '^',
            ..Conventions::default()
        };
        let err = conventions.validate().unwrap_err();
        assert!(err.to_string().contains("must differ"));

        assert!(Conventions::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_dotted_extension() {
        let mut config = Config::default();
        config.pages.extension = ".vue".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_index_case_insensitive() {
        let conv = Conventions::default();
        assert!(conv.is_index("index"));
        assert!(conv.is_index("Index"));
        assert!(conv.is_index("IndexHome"));
        assert!(!conv.is_index("Home"));
        assert!(!conv.is_index("_index"));
    }

    #[test]
    fn test_is_not_found_is_exact() {
        let conv = Conventions::default();
        assert!(conv.is_not_found(&["NotFound"]));
        assert!(!conv.is_not_found(&["notfound"]));
        assert!(!conv.is_not_found(&["errors", "NotFound"]));
        assert!(!conv.is_not_found::<&str>(&[]));
    }
}
