//! Collection layer: JSON schema + validated in-memory tree.
//!
//! It owns:
//! - request item types (id, name, event handlers, script line buffers)
//! - the raw document shape (serde-friendly)
//! - the closed `Node` tree built from it

pub mod item;
pub mod schema;
pub mod tree;

pub use item::{Event, ItemId, RequestItem, Script};
pub use schema::{RawCollection, RawItem};
pub use tree::{Collection, Group, Node};
