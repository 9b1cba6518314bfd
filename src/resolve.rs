//! Jump target lookup.
//!
//! Targets are matched against request names only. Ids are assigned while the
//! document is read and never match anything a script author could write.
//! When several requests share a name the first one in registry order wins.

use crate::registry::Registry;

/// Position in `registry.order()` of the first request named exactly `target`.
pub fn resolve_target(registry: &Registry, target: &str) -> Option<usize> {
    registry.items().position(|item| item.name == target)
}
