//! Route naming for page paths
//!
//! Pure functional parser that transforms a page's segment sequence into
//! its canonical URL path. All functions are **pure**: same input → same
//! output, no side effects.

use super::pattern::classify_segment;
use crate::Conventions;

/// Resolves a segment sequence into a route path without the leading `/`
///
/// # Rules
///
/// 1. A leading index wrapper directory is dropped when more segments follow
/// 2. The last remaining segment is classified: index pages vanish, dynamic
///    segments become parameters, everything else is lower-cased
/// 3. Intermediate segments are lower-cased as-is and joined with `/`
///
/// Never fails; an empty sequence resolves to the root (`""`).
///
/// # Examples
///
/// ```
/// use pageroute::{Conventions, route::parser::resolve_path};
///
/// let conv = Conventions::default();
///
/// assert_eq!(resolve_path(&["Login"], &conv), "login");
/// assert_eq!(resolve_path(&["index", "IndexHome"], &conv), "");
/// assert_eq!(resolve_path(&["index", "tasks", "Create"], &conv), "tasks/create");
/// assert_eq!(resolve_path(&["index", "tasks", "edit", "_id"], &conv), "tasks/edit/:id");
/// ```
///
/// # Performance
///
/// - O(n) where n is total segment length
/// - Single pass, no backtracking
pub fn resolve_path<S: AsRef<str>>(segments: &[S], conventions: &Conventions) -> String {
    let segments = match segments {
        [first, rest @ ..] if !rest.is_empty() && conventions.is_index(first.as_ref()) => rest,
        all => all,
    };

    let Some((last, parents)) = segments.split_last() else {
        return String::new();
    };

    parents
        .iter()
        .map(|segment| segment.as_ref().to_lowercase())
        .chain(classify_segment(last.as_ref(), conventions).render(conventions))
        .collect::<Vec<_>>()
        .join("/")
}

/// Prefixes a resolved path with `/`, the form stored in route entries
///
/// ```
/// use pageroute::route::parser::to_route_path;
///
/// assert_eq!(to_route_path(""), "/");
/// assert_eq!(to_route_path("tasks/create"), "/tasks/create");
/// ```
pub fn to_route_path(resolved: &str) -> String {
    format!("/{}", resolved)
}
