//! Child page grouping
//!
//! Finds child-marked pages and groups them under the route they nest in.
//! Pure: works on segment sequences only and never loads anything.

use std::collections::HashMap;

use super::parser::resolve_path;
use super::pattern::strip_child_marker;
use crate::Conventions;

/// A child-marked page, resolved against its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildPage {
    /// Position of the page in discovery order
    pub index: usize,
    /// Segments with the child marker removed from the last one
    pub segments: Vec<String>,
    /// Resolved path of the child itself, e.g. ":id"
    pub child_route: String,
    /// Resolved path of the parent, e.g. "" for the root
    pub parent_key: String,
}

/// Children grouped by parent key, both levels in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildGroups {
    groups: Vec<(String, Vec<ChildPage>)>,
    by_key: HashMap<String, usize>,
}

impl ChildGroups {
    /// Children registered under a parent key
    pub fn get(&self, parent_key: &str) -> Option<&[ChildPage]> {
        self.by_key
            .get(parent_key)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    /// Iterates `(parent_key, children)` in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ChildPage])> {
        self.groups
            .iter()
            .map(|(key, children)| (key.as_str(), children.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of child pages across all parents
    pub fn child_count(&self) -> usize {
        self.groups.iter().map(|(_, children)| children.len()).sum()
    }

    fn push(&mut self, child: ChildPage) {
        match self.by_key.get(&child.parent_key) {
            Some(&slot) => self.groups[slot].1.push(child),
            None => {
                self.by_key.insert(child.parent_key.clone(), self.groups.len());
                self.groups.push((child.parent_key.clone(), vec![child]));
            }
        }
    }
}

/// Whether a page's last segment carries the child marker
pub fn is_child_page(segments: &[String], conventions: &Conventions) -> bool {
    segments
        .last()
        .is_some_and(|last| last.starts_with(conventions.child_marker))
}

/// Resolves a single child-marked page, `None` if it is not marked
///
/// # Examples
///
/// ```
/// use pageroute::{Conventions, route::children::resolve_child};
///
/// let conv = Conventions::default();
/// let child = resolve_child(3, &["index".to_string(), "^_id".to_string()], &conv).unwrap();
///
/// assert_eq!(child.child_route, ":id");
/// assert_eq!(child.parent_key, "");
/// assert_eq!(child.segments, vec!["index", "_id"]);
/// ```
pub fn resolve_child(index: usize, segments: &[String], conventions: &Conventions) -> Option<ChildPage> {
    let segments = strip_child_marker(segments, conventions)?;
    let child_route = resolve_path(&segments, conventions);
    let parent_key = resolve_path(&segments[..segments.len() - 1], conventions);

    Some(ChildPage {
        index,
        segments,
        child_route,
        parent_key,
    })
}

/// Groups every child-marked page by the route it nests under
///
/// Pages are identified by their position in `pages`, which must be the
/// discovery order. Unmarked pages are skipped.
pub fn group_children<'a, I>(pages: I, conventions: &Conventions) -> ChildGroups
where
    I: IntoIterator<Item = &'a [String]>,
{
    pages
        .into_iter()
        .enumerate()
        .filter_map(|(index, segments)| resolve_child(index, segments, conventions))
        .fold(ChildGroups::default(), |mut groups, child| {
            groups.push(child);
            groups
        })
}
