//! Raw collection document as it appears on disk.
//!
//! JSON shape (Postman collection v2.x, only the parts we read):
//! {
//!   "info": { "name": "...", "schema": "..." },
//!   "item": [
//!     { "name": "folder", "item": [ ... ] },
//!     {
//!       "id": "optional",
//!       "name": "login",
//!       "request": { ... },
//!       "event": [
//!         { "listen": "test", "script": { "exec": ["postman.setNextRequest('next');"] } }
//!       ]
//!     }
//!   ],
//!   ...
//! }
//!
//! A raw item is turned into a request or a folder in `tree`; the raw shape
//! itself does not decide which one it is.

use crate::collection::Event;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct RawCollection {
    #[serde(default)]
    pub item: Vec<RawItem>,

    /// `info`, `variable`, `auth`, collection-level `event`, ...
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub request: Option<Value>,

    #[serde(default)]
    pub item: Option<Vec<RawItem>>,

    /// Some exporters write `"event": null`.
    #[serde(default)]
    pub event: Option<Vec<Event>>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}
