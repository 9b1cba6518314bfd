//! Directive-driven linearization of API-test collections.
//!
//! A collection is a tree of folders and requests. Request test scripts may
//! carry a `setNextRequest(...)` call that tells the test runner which request
//! to run next. This crate resolves those calls statically into one flat
//! request order, disables them in the scripts, and hands back a flat
//! collection that any runner can execute top to bottom.
//!
//! Pipeline:
//! - `collection`: document schema + typed tree (parse time validation)
//! - `registry`: pre-order flattening into ids + owned items
//! - `directive`: per-item extraction and neutralization
//! - `resolve`: name lookup of jump targets
//! - `linearize`: bounded traversal
//! - `rebuild`: flat output collection
//! - `pipeline`: glue for one document or a directory of them

pub mod collection;
pub mod config;
pub mod directive;
pub mod error;
pub mod linearize;
pub mod pipeline;
pub mod rebuild;
pub mod registry;
pub mod resolve;

pub use error::{LinearizeError, Result};
