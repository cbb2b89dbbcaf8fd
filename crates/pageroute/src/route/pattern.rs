//! Segment classification for page paths
//!
//! Pure functional classification of the final segment of a page path.
//! All functions are **pure**: same input → same output, no side effects.

use crate::Conventions;

/// What a leaf segment contributes to the URL
///
/// # Examples
///
/// ```
/// use pageroute::{Conventions, route::pattern::{classify_segment, SegmentKind}};
///
/// let conv = Conventions::default();
///
/// assert_eq!(classify_segment("IndexHome", &conv), SegmentKind::Index);
/// assert_eq!(classify_segment("_Id", &conv), SegmentKind::Dynamic("id".to_string()));
/// assert_eq!(classify_segment("Create", &conv), SegmentKind::Static("create".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// Landing page or wrapper directory: contributes nothing
    Index,
    /// URL parameter, carries the lower-cased parameter name
    Dynamic(String),
    /// Literal, lower-cased path component
    Static(String),
}

impl SegmentKind {
    /// Renders the segment as a URL component, `None` for index pages
    pub fn render(&self, conventions: &Conventions) -> Option<String> {
        match self {
            SegmentKind::Index => None,
            SegmentKind::Dynamic(name) => {
                let mut out = String::with_capacity(name.len() + 1);
                out.push(conventions.param_prefix);
                out.push_str(name);
                Some(out)
            }
            SegmentKind::Static(name) => Some(name.clone()),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, SegmentKind::Dynamic(_))
    }
}

/// Classifies a leaf segment (pure function)
///
/// # Rules (evaluated in order)
///
/// 1. **Index**: starts with the index keyword, case-insensitively
/// 2. **Dynamic**: starts with the dynamic marker; the marker is dropped and
///    the remainder lower-cased
/// 3. **Static**: anything else, lower-cased
///
/// Only the final segment of a path is classified. Intermediate directories
/// are always taken literally.
pub fn classify_segment(segment: &str, conventions: &Conventions) -> SegmentKind {
    if conventions.is_index(segment) {
        return SegmentKind::Index;
    }

    match segment.strip_prefix(conventions.dynamic_marker) {
        Some(name) => SegmentKind::Dynamic(name.to_lowercase()),
        None => SegmentKind::Static(segment.to_lowercase()),
    }
}

/// Removes the child marker from the last segment (pure function)
///
/// Returns `None` when the last segment is not child-marked.
///
/// # Examples
///
/// ```
/// use pageroute::{Conventions, route::pattern::strip_child_marker};
///
/// let conv = Conventions::default();
/// let stripped = strip_child_marker(&["index".to_string(), "^_id".to_string()], &conv);
/// assert_eq!(stripped, Some(vec!["index".to_string(), "_id".to_string()]));
///
/// assert_eq!(strip_child_marker(&["Login".to_string()], &conv), None);
/// ```
pub fn strip_child_marker(segments: &[String], conventions: &Conventions) -> Option<Vec<String>> {
    let (last, parents) = segments.split_last()?;
    let unmarked = conventions.strip_child_marker(last)?;

    Some(
        parents
            .iter()
            .cloned()
            .chain(std::iter::once(unmarked.to_string()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv() -> Conventions {
        Conventions::default()
    }

    #[test]
    fn test_classify_index() {
        assert_eq!(classify_segment("index", &conv()), SegmentKind::Index);
        assert_eq!(classify_segment("INDEX", &conv()), SegmentKind::Index);
        assert_eq!(classify_segment("IndexHome", &conv()), SegmentKind::Index);
    }

    #[test]
    fn test_classify_dynamic() {
        assert_eq!(
            classify_segment("_id", &conv()),
            SegmentKind::Dynamic("id".to_string())
        );
        assert_eq!(
            classify_segment("_TaskId", &conv()),
            SegmentKind::Dynamic("taskid".to_string())
        );
    }

    #[test]
    fn test_classify_dynamic_only_strips_leading_marker() {
        assert_eq!(
            classify_segment("_user_id", &conv()),
            SegmentKind::Dynamic("user_id".to_string())
        );
    }

    #[test]
    fn test_classify_static() {
        assert_eq!(
            classify_segment("Create", &conv()),
            SegmentKind::Static("create".to_string())
        );
        assert_eq!(
            classify_segment("my_page", &conv()),
            SegmentKind::Static("my_page".to_string())
        );
    }

    #[test]
    fn test_index_wins_over_other_rules() {
        let conventions = Conventions {
            dynamic_marker: 'i',
            ..Conventions::default()
        };
        assert_eq!(classify_segment("index", &conventions), SegmentKind::Index);
    }

    #[test]
    fn test_render_uses_param_prefix() {
        let conventions = Conventions {
            param_prefix: '$',
            ..Conventions::default()
        };
        let kind = classify_segment("_id", &conventions);
        assert!(kind.is_dynamic());
        assert_eq!(kind.render(&conventions), Some("$id".to_string()));
        assert_eq!(SegmentKind::Index.render(&conventions), None);
    }

    #[test]
    fn test_strip_child_marker_ignores_inner_segments() {
        let segments = vec!["^tasks".to_string(), "Create".to_string()];
        assert_eq!(strip_child_marker(&segments, &conv()), None);
    }

    #[test]
    fn test_strip_child_marker_empty() {
        assert_eq!(strip_child_marker(&[], &conv()), None);
    }
}
