//! Route module for convention-based routing
//!
//! Contains the pure components of the compiler: nothing here loads a
//! module or touches the filesystem.
//! - `pattern`: classifies leaf segments
//! - `parser`: resolves a segment sequence into a route path
//! - `children`: groups child-marked pages under their parent route

pub mod children;
pub mod parser;
pub mod pattern;

// Re-export commonly used types
pub use children::{group_children, is_child_page, resolve_child, ChildGroups, ChildPage};
pub use parser::{resolve_path, to_route_path};
pub use pattern::{classify_segment, strip_child_marker, SegmentKind};
