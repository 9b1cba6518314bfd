//! Flat output collection.
//!
//! Folder structure is dropped: the output `item` array holds the requests of
//! the linear order, in that order. A request placed several times appears
//! several times, each entry sharing the same item.

use crate::collection::{ItemId, RequestItem};
use crate::error::{LinearizeError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Serialize)]
pub struct FlatCollection {
    #[serde(flatten)]
    pub header: Map<String, Value>,

    #[serde(rename = "item")]
    pub items: Vec<Rc<RequestItem>>,
}

impl FlatCollection {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Project `order` onto the owned items. Items never placed are dropped.
pub fn rebuild(order: &[ItemId], by_id: HashMap<ItemId, RequestItem>) -> Result<Vec<Rc<RequestItem>>> {
    let shared: HashMap<ItemId, Rc<RequestItem>> = by_id
        .into_iter()
        .map(|(id, item)| (id, Rc::new(item)))
        .collect();

    order
        .iter()
        .map(|id| {
            shared.get(id).cloned().ok_or_else(|| {
                LinearizeError::structural(format!("request id '{}' is not registered", id))
            })
        })
        .collect()
}
