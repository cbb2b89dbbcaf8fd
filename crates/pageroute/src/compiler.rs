//! Route tree assembly
//!
//! Compilation runs in two phases:
//!
//! 1. **Plan** (pure): partition pages into children, the not-found page and
//!    top-level routes, resolve every path, attach children to their parent
//!    and reject conflicts. Nothing is loaded, so a conflicting page set fails
//!    before any module is touched.
//! 2. **Assemble**: load every module concurrently and rebuild the table in
//!    discovery order, whatever order the loads finish in. The not-found
//!    fallback is always appended last.
//!
//! Any failure aborts the whole compilation; there is no partial table.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, info, instrument, warn};

use crate::error::{Diagnostic, Result, RouteError};
use crate::page::{PageDescriptor, PageSource};
use crate::route::{group_children, is_child_page, resolve_path, to_route_path};
use crate::{Config, Conventions, PageModule, RouteEntry, RouteMeta, RouteTable};

/// Path of the catch-all fallback route
pub const WILDCARD_PATH: &str = "*";

/// A top-level route, resolved but not loaded
#[derive(Debug, Clone)]
pub struct PlannedRoute<'a> {
    pub page: &'a PageDescriptor,
    /// `/`-prefixed route path
    pub path: String,
    pub children: Vec<PlannedChild<'a>>,
}

/// A child route, resolved but not loaded
#[derive(Debug, Clone)]
pub struct PlannedChild<'a> {
    pub page: &'a PageDescriptor,
    /// `/`-prefixed route path of the child itself
    pub path: String,
}

/// Output of the planning phase
#[derive(Debug, Clone)]
pub struct RoutePlan<'a> {
    routes: Vec<PlannedRoute<'a>>,
    not_found: Option<&'a PageDescriptor>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RoutePlan<'a> {
    /// Top-level routes in discovery order
    pub fn routes(&self) -> &[PlannedRoute<'a>] {
        &self.routes
    }

    pub fn not_found(&self) -> Option<&'a PageDescriptor> {
        self.not_found
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of pages that will be loaded
    pub fn page_count(&self) -> usize {
        self.routes
            .iter()
            .map(|route| 1 + route.children.len())
            .sum::<usize>()
            + usize::from(self.not_found.is_some())
    }
}

/// Compiles discovered pages into a [`RouteTable`]
#[derive(Debug, Clone, Default)]
pub struct RouteCompiler {
    conventions: Conventions,
}

impl RouteCompiler {
    pub fn new(conventions: Conventions) -> Self {
        Self { conventions }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.conventions.clone())
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Discovers pages from `source` and assembles them
    #[instrument(skip_all, fields(source = source.name()))]
    pub async fn compile(&self, source: &dyn PageSource) -> Result<RouteTable> {
        let pages = source.discover().await.map_err(RouteError::Discovery)?;
        debug!(pages = pages.len(), "Discovered pages");
        self.assemble(&pages).await
    }

    /// Resolves and validates the route tree without loading anything
    pub fn plan<'a>(&self, pages: &'a [PageDescriptor]) -> Result<RoutePlan<'a>> {
        let conventions = &self.conventions;
        let groups = group_children(pages.iter().map(PageDescriptor::segments), conventions);

        let mut not_found = Vec::new();
        let mut routes: Vec<PlannedRoute<'a>> = Vec::new();
        let mut claimed: HashMap<String, &'a PageDescriptor> = HashMap::new();

        for page in pages {
            let segments = page.segments();
            if segments.is_empty() {
                return Err(RouteError::EmptySegments);
            }
            if is_child_page(segments, conventions) {
                continue;
            }
            if conventions.is_not_found(segments) {
                not_found.push(page);
                continue;
            }

            let resolved = resolve_path(segments, conventions);
            let path = to_route_path(&resolved);
            if let Some(first) = claimed.insert(path.clone(), page) {
                return Err(RouteError::DuplicateRoute {
                    path,
                    first: first.key(),
                    second: page.key(),
                });
            }

            let children = match groups.get(&resolved) {
                Some(children) => plan_children(&path, children, pages)?,
                None => Vec::new(),
            };

            debug!(page = %page.key(), path = %path, children = children.len(), "Resolved route");
            routes.push(PlannedRoute {
                page,
                path,
                children,
            });
        }

        let not_found = match not_found.as_slice() {
            [] => None,
            [page] => Some(*page),
            many => {
                return Err(RouteError::MultipleNotFound {
                    pages: many.iter().map(|page| page.key()).collect(),
                })
            }
        };

        let mut diagnostics = Vec::new();
        if not_found.is_none() {
            diagnostics.push(Diagnostic::MissingNotFound {
                expected: conventions.not_found_page.clone(),
            });
        }

        let parents: HashSet<&str> = claimed
            .keys()
            .map(|path| path.trim_start_matches('/'))
            .collect();
        for (parent, children) in groups.iter() {
            if parents.contains(parent) {
                continue;
            }
            diagnostics.extend(children.iter().map(|child| Diagnostic::OrphanChild {
                page: pages[child.index].key(),
                parent: parent.to_string(),
            }));
        }

        for diagnostic in &diagnostics {
            warn!("{}", diagnostic);
        }

        Ok(RoutePlan {
            routes,
            not_found,
            diagnostics,
        })
    }

    /// Plans, then loads every page module and builds the route table
    #[instrument(skip_all, fields(pages = pages.len()))]
    pub async fn assemble(&self, pages: &[PageDescriptor]) -> Result<RouteTable> {
        let plan = self.plan(pages)?;

        let fallback = async {
            match plan.not_found {
                Some(page) => self.load_not_found(page).await.map(Some),
                None => Ok(None),
            }
        };
        let routes = try_join_all(plan.routes.iter().map(|route| self.load_route(route)));

        let (mut routes, fallback) = futures::try_join!(routes, fallback)?;
        routes.extend(fallback);

        info!(
            routes = routes.len(),
            children = routes.iter().map(|route| route.children.len()).sum::<usize>(),
            "Compiled route table"
        );

        Ok(RouteTable::new(routes, plan.diagnostics))
    }

    async fn load_route(&self, planned: &PlannedRoute<'_>) -> Result<RouteEntry> {
        let children = try_join_all(
            planned
                .children
                .iter()
                .map(|child| self.load_child(child)),
        );
        let (component, children) = futures::try_join!(load_module(planned.page), children)?;

        Ok(self.entry(planned.path.clone(), component, children))
    }

    async fn load_child(&self, planned: &PlannedChild<'_>) -> Result<RouteEntry> {
        let component = load_module(planned.page).await?;
        Ok(self.entry(planned.path.clone(), component, Vec::new()))
    }

    /// The fallback takes no name and never has children
    async fn load_not_found(&self, page: &PageDescriptor) -> Result<RouteEntry> {
        let component = load_module(page).await?;
        Ok(RouteEntry {
            path: WILDCARD_PATH.to_string(),
            name: None,
            meta: RouteMeta::resolve(&component, &self.conventions),
            component,
            children: Vec::new(),
        })
    }

    fn entry(&self, path: String, component: Arc<PageModule>, children: Vec<RouteEntry>) -> RouteEntry {
        RouteEntry {
            path,
            name: component.name.clone(),
            meta: RouteMeta::resolve(&component, &self.conventions),
            component,
            children,
        }
    }
}

/// Plans the children of one parent, rejecting two children on one path
fn plan_children<'a>(
    parent: &str,
    children: &[crate::ChildPage],
    pages: &'a [PageDescriptor],
) -> Result<Vec<PlannedChild<'a>>> {
    let mut claimed: HashMap<String, &'a PageDescriptor> = HashMap::new();

    children
        .iter()
        .map(|child| {
            let page = &pages[child.index];
            let path = to_route_path(&child.child_route);
            if let Some(first) = claimed.insert(path.clone(), page) {
                return Err(RouteError::DuplicateRoute {
                    path: format!("{} > {}", parent, path),
                    first: first.key(),
                    second: page.key(),
                });
            }
            debug!(page = %page.key(), parent, path = %path, "Resolved child route");
            Ok(PlannedChild { page, path })
        })
        .collect()
}

async fn load_module(page: &PageDescriptor) -> Result<Arc<PageModule>> {
    page.load()
        .await
        .map(Arc::new)
        .map_err(|source| RouteError::ModuleLoad {
            page: page.key(),
            source,
        })
}
