//! Typed collection tree.
//!
//! Requests and folders are told apart once, here, from the raw document:
//! - `request` present, `item` absent  => `Node::Request`
//! - `item` present, `request` absent  => `Node::Group`
//! - both or neither                   => structural error
//!
//! Request ids come from the document when present; missing ids are generated.
//! Duplicate ids and unnamed requests are rejected before any directive is
//! looked at.

use crate::collection::{ItemId, RawCollection, RawItem, RequestItem};
use crate::error::{LinearizeError, Result};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Request(RequestItem),
    Group(Group),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub name: String,
    pub children: Vec<Node>,
}

/// A parsed collection: header fields plus the root group.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    /// Every top-level field except `item`, in document order.
    pub header: Map<String, Value>,
    pub root: Group,
}

impl Collection {
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawCollection = serde_json::from_str(text)?;
        raw.validate_and_build()
    }

    /// Display name from `info.name`, if any.
    pub fn name(&self) -> Option<&str> {
        self.header
            .get("info")
            .and_then(|info| info.get("name"))
            .and_then(Value::as_str)
    }
}

impl RawCollection {
    /// Build the typed tree, assigning ids and checking structure.
    pub fn validate_and_build(self) -> Result<Collection> {
        let RawCollection { item, rest } = self;

        let mut seen = HashSet::new();
        let children = build_children(item, "", &mut seen)?;

        let root = Group {
            name: rest
                .get("info")
                .and_then(|info| info.get("name"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            children,
        };

        Ok(Collection { header: rest, root })
    }
}

fn build_children(
    items: Vec<RawItem>,
    parent: &str,
    seen: &mut HashSet<ItemId>,
) -> Result<Vec<Node>> {
    let mut out = Vec::with_capacity(items.len());
    for (index, raw) in items.into_iter().enumerate() {
        out.push(build_node(raw, parent, index, seen)?);
    }
    Ok(out)
}

fn build_node(
    raw: RawItem,
    parent: &str,
    index: usize,
    seen: &mut HashSet<ItemId>,
) -> Result<Node> {
    let label = raw.name.clone().unwrap_or_else(|| format!("#{}", index));
    let path = if parent.is_empty() {
        label
    } else {
        format!("{} / {}", parent, label)
    };

    match (raw.request, raw.item) {
        (Some(_), Some(_)) => Err(LinearizeError::structural(format!(
            "item '{}' has both a request and child items",
            path
        ))),
        (None, None) => Err(LinearizeError::structural(format!(
            "item '{}' is neither a request nor a folder",
            path
        ))),
        (None, Some(children)) => Ok(Node::Group(Group {
            name: raw.name.unwrap_or_default(),
            children: build_children(children, &path, seen)?,
        })),
        (Some(request), None) => {
            let Some(name) = raw.name else {
                return Err(LinearizeError::structural(format!(
                    "request '{}' has no name",
                    path
                )));
            };

            let id = match &raw.id {
                Some(id) => ItemId::new(id.clone()),
                None => {
                    let id = ItemId::generate();
                    debug!("generated id {} for request '{}'", id, path);
                    id
                }
            };
            if !seen.insert(id.clone()) {
                return Err(LinearizeError::structural(format!(
                    "duplicate request id '{}' at '{}'",
                    id, path
                )));
            }

            Ok(Node::Request(RequestItem {
                id,
                document_id: raw.id,
                name,
                request,
                events: raw.event.unwrap_or_default(),
                rest: raw.rest,
            }))
        }
    }
}
