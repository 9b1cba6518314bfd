//! Flattened, addressable view of a collection.
//!
//! `order` holds request ids in depth-first pre-order (folders are recursed
//! into before their next sibling, folders themselves are not emitted).
//! `by_id` owns the request items for the rest of the run.

use crate::collection::{Group, ItemId, Node, RequestItem};
use crate::error::{LinearizeError, Result};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct Registry {
    order: Vec<ItemId>,
    by_id: HashMap<ItemId, RequestItem>,
}

impl Registry {
    /// Take ownership of every request under `root`.
    ///
    /// Fails only if two requests share an id; the typed tree already rejects
    /// that for parsed documents.
    pub fn build(root: Group) -> Result<Self> {
        let mut registry = Registry::default();
        registry.collect(root.children)?;
        registry.warn_duplicate_names();
        Ok(registry)
    }

    fn collect(&mut self, nodes: Vec<Node>) -> Result<()> {
        for node in nodes {
            match node {
                Node::Request(item) => {
                    debug!("registered #{} id={} name={:?}", self.order.len(), item.id, item.name);
                    let id = item.id.clone();
                    if self.by_id.insert(id.clone(), item).is_some() {
                        return Err(LinearizeError::structural(format!(
                            "duplicate request id '{}'",
                            id
                        )));
                    }
                    self.order.push(id);
                }
                Node::Group(group) => self.collect(group.children)?,
            }
        }
        Ok(())
    }

    // Jump targets resolve to the first request with a given name, so later
    // namesakes are unreachable by name.
    fn warn_duplicate_names(&self) {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for item in self.items() {
            *counts.entry(item.name.as_str()).or_default() += 1;
        }
        for (name, count) in counts.into_iter().filter(|(_, c)| *c > 1) {
            warn!(
                "{} requests are named {:?}; setNextRequest() targets resolve to the first one",
                count, name
            );
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn order(&self) -> &[ItemId] {
        &self.order
    }

    pub fn get(&self, id: &ItemId) -> Option<&RequestItem> {
        self.by_id.get(id)
    }

    pub fn get_mut(&mut self, id: &ItemId) -> Option<&mut RequestItem> {
        self.by_id.get_mut(id)
    }

    /// Items in `order`.
    pub fn items(&self) -> impl Iterator<Item = &RequestItem> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    pub fn into_parts(self) -> (Vec<ItemId>, HashMap<ItemId, RequestItem>) {
        (self.order, self.by_id)
    }
}
