//! # Pageroute
//!
//! A convention-based route compiler. Give it the pages of an application,
//! each identified only by its path segments, and it derives the ordered,
//! nested route table a client-side router registers:
//! - Static routes (`Login.vue` → `/login`)
//! - Index flattening (`index/IndexHome.vue` → `/`)
//! - Dynamic parameters (`index/tasks/edit/_id.vue` → `/tasks/edit/:id`)
//! - Nested children (`index/^_id.vue` → child `/:id` of `/`)
//! - A wildcard fallback (`NotFound.vue` → `*`, always last)
//!
//! ## Pipeline
//!
//! Data flows one way: descriptors → (namer, grouper) → assembler → route table.
//! Naming and grouping are pure functions in [`route`]. The
//! [`RouteCompiler`] plans the table, detects conflicts before loading
//! anything, then loads every page module concurrently and reassembles the
//! results in discovery order.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use pageroute::{PageDescriptor, PageModule, RouteCompiler, StaticLoader};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let loader = Arc::new(
//!     StaticLoader::new()
//!         .with_page("NotFound", PageModule::default())
//!         .with_page("index/IndexHome", PageModule::named("IndexHome"))
//!         .with_page("index/^_id", PageModule::named("TaskCard")),
//! );
//!
//! let pages = ["NotFound", "index/IndexHome", "index/^_id"]
//!     .iter()
//!     .map(|path| PageDescriptor::from_path(path, loader.clone()))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let table = RouteCompiler::default().assemble(&pages).await.unwrap();
//!
//! assert_eq!(table.routes()[0].path, "/");
//! assert_eq!(table.routes()[0].children[0].path, "/:id");
//! assert_eq!(table.routes()[1].path, "*");
//! # });
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ============================================================================
// Module Declarations
// ============================================================================

pub mod compiler;
pub mod config;
pub mod error;
pub mod page;
pub mod route;

pub use compiler::{PlannedChild, PlannedRoute, RouteCompiler, RoutePlan, WILDCARD_PATH};
pub use config::{Config, Conventions, PagesConfig};
pub use error::{Diagnostic, RouteError};
pub use page::{
    source_from_config, DirectorySource, Manifest, ManifestSource, ModuleLoader, PageDescriptor,
    PageSource, SidecarLoader, StaticLoader,
};
pub use route::{resolve_path, ChildGroups, ChildPage, SegmentKind};

// ============================================================================
// Core Types
// ============================================================================

/// Middleware name → configuration, ordered for reproducible output
pub type Middlewares = BTreeMap<String, serde_json::Value>;

/// Metadata a loaded page module exposes; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageModule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middlewares: Option<Middlewares>,
}

impl PageModule {
    /// A module declaring only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn with_middleware(mut self, name: impl Into<String>, config: serde_json::Value) -> Self {
        self.middlewares
            .get_or_insert_with(Middlewares::new)
            .insert(name.into(), config);
        self
    }
}

/// Resolved route metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMeta {
    /// Declared layout, or the default layout; never empty
    pub layout: String,
    pub middlewares: Middlewares,
}

impl RouteMeta {
    /// Applies defaults to what a module declares
    pub fn resolve(module: &PageModule, conventions: &Conventions) -> Self {
        Self {
            layout: module
                .layout
                .clone()
                .filter(|layout| !layout.is_empty())
                .unwrap_or_else(|| conventions.default_layout.clone()),
            middlewares: module.middlewares.clone().unwrap_or_default(),
        }
    }
}

/// One entry of the route table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEntry {
    /// `*` for the fallback, otherwise `/`-prefixed and lower-cased
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub component: Arc<PageModule>,
    pub meta: RouteMeta,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    /// Whether this is the wildcard fallback
    pub fn is_fallback(&self) -> bool {
        self.path == WILDCARD_PATH
    }
}

/// Ordered route table plus whatever was worth reporting while building it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
    diagnostics: Vec<Diagnostic>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteEntry>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            routes,
            diagnostics,
        }
    }

    /// Routes in registration order; the fallback, if any, is last
    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The wildcard fallback route
    pub fn not_found(&self) -> Option<&RouteEntry> {
        self.routes.last().filter(|route| route.is_fallback())
    }

    /// Finds a route or child route by its exact path
    pub fn find(&self, path: &str) -> Option<&RouteEntry> {
        self.routes.iter().find_map(|route| {
            if route.path == path {
                Some(route)
            } else {
                route.children.iter().find(|child| child.path == path)
            }
        })
    }

    pub fn into_routes(self) -> Vec<RouteEntry> {
        self.routes
    }
}
