//! Canonical tree-ensemble representations.

/// Canonical node identifier.
///
/// Internally this is just an index into the tree's SoA arrays.
pub type NodeId = u32;

pub mod forest;
pub mod node;
pub mod tree;

pub use forest::{Forest, MalformedModelError};
pub use node::{SplitComparator, SplitCondition};
pub use tree::{Tree, TreeBuilder, TreeValidationError};
