//! Bounded traversal of the registry driven by directives.
//!
//! Two counters:
//! - `step` counts placements and alone bounds the loop (`step < len`);
//! - `cursor` is the position in `order` of the request being placed.
//!
//! No directive moves the cursor to the next request, `Stop` ends the order,
//! `Jump` moves the cursor to the named request. Because only `step` bounds the
//! loop, directive cycles still terminate after `len` placements; the order may
//! then repeat some requests and miss others.
//!
//! Directives are extracted the first time a request is placed and remembered
//! for the rest of the run. Extraction disables the script line, so a revisit
//! must reuse the remembered directive instead of scanning again.

use crate::collection::ItemId;
use crate::config::{LinearizeOptions, UnresolvedPolicy};
use crate::directive::{self, Directive};
use crate::error::{LinearizeError, Result};
use crate::registry::Registry;
use crate::resolve::resolve_target;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Final request sequence; may contain repeats.
pub type LinearOrder = Vec<ItemId>;

pub fn linearize(registry: &mut Registry, options: &LinearizeOptions) -> Result<LinearOrder> {
    let len = registry.len();
    let mut out = LinearOrder::with_capacity(len);
    let mut directives: HashMap<ItemId, Option<Directive>> = HashMap::new();

    let mut step = 0;
    let mut cursor = 0;
    while step < len {
        // Falling through from the last request ends the collection.
        let Some(id) = registry.order().get(cursor).cloned() else {
            debug!("reached the end of the collection after {} placements", out.len());
            break;
        };

        out.push(id.clone());

        let directive = match directives.get(&id) {
            Some(known) => known.clone(),
            None => {
                let item = registry.get_mut(&id).ok_or_else(|| {
                    LinearizeError::structural(format!("request id '{}' is not registered", id))
                })?;
                let found = directive::extract(item)?;
                directives.insert(id.clone(), found.clone());
                found
            }
        };

        let name = registry.get(&id).map(|i| i.name.as_str()).unwrap_or_default();
        debug!("placed #{}: {:?} (position {})", step, name, cursor);

        match directive {
            None => cursor += 1,
            Some(Directive::Stop) => {
                debug!("stopping after {:?}", name);
                break;
            }
            Some(Directive::Jump(target)) => match resolve_target(registry, &target) {
                Some(index) => {
                    debug!("{:?} jumps to {:?} (position {})", name, target, index);
                    cursor = index;
                }
                None => match options.on_unresolved {
                    UnresolvedPolicy::Stop => {
                        warn!(
                            "'{}' jumps to unknown request '{}'; stopping the order here",
                            name, target
                        );
                        break;
                    }
                    UnresolvedPolicy::Next => {
                        warn!(
                            "'{}' jumps to unknown request '{}'; continuing with the next request",
                            name, target
                        );
                        cursor += 1;
                    }
                    UnresolvedPolicy::Fail => {
                        return Err(LinearizeError::UnresolvedJumpTarget {
                            item: name.to_string(),
                            target,
                        });
                    }
                },
            },
        }

        step += 1;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Node;
    use crate::registry::tests::{folder, request, root};
    use pretty_assertions::assert_eq;

    fn run(nodes: Vec<Node>, policy: UnresolvedPolicy) -> Result<Vec<String>> {
        let mut registry = Registry::build(root(nodes))?;
        let options = LinearizeOptions {
            on_unresolved: policy,
        };
        let order = linearize(&mut registry, &options)?;
        Ok(order
            .iter()
            .map(|id| registry.get(id).unwrap().name.clone())
            .collect())
    }

    fn names(nodes: Vec<Node>) -> Vec<String> {
        run(nodes, UnresolvedPolicy::Stop).unwrap()
    }

    #[test]
    fn no_directives_keeps_document_order() {
        let order = names(vec![
            request("A", &[]),
            folder("F", vec![request("B", &[]), request("C", &[])]),
        ]);
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn empty_registry() {
        assert!(names(vec![folder("F", vec![])]).is_empty());
    }

    #[test]
    fn jump_moves_cursor_to_target() {
        let order = names(vec![
            request("A", &["setNextRequest('C');"]),
            request("B", &[]),
            request("C", &[]),
        ]);
        // Falls off the end after C.
        assert_eq!(order, vec!["A", "C"]);
    }

    #[test]
    fn backward_jump_repeats_until_bound() {
        let order = names(vec![
            request("A", &[]),
            request("B", &["setNextRequest('A');"]),
            request("C", &[]),
        ]);
        assert_eq!(order, vec!["A", "B", "A"]);
    }

    #[test]
    fn stop_ends_the_order() {
        let order = names(vec![
            request("A", &[]),
            request("B", &["setNextRequest(null);"]),
            request("C", &[]),
        ]);
        assert_eq!(order, vec!["A", "B"]);
    }

    #[test]
    fn self_loop_is_bounded() {
        let order = names(vec![
            request("A", &["setNextRequest('A');"]),
            request("B", &["setNextRequest('A');"]),
            request("C", &["setNextRequest('B');"]),
            request("D", &["setNextRequest('C');"]),
        ]);
        assert_eq!(order, vec!["A", "A", "A", "A"]);
    }

    #[test]
    fn revisits_reuse_the_first_directive() {
        let order = names(vec![
            request("A", &["postman.setNextRequest('C');"]),
            request("B", &[]),
            request("C", &["postman.setNextRequest('A');"]),
            request("D", &[]),
        ]);
        assert_eq!(order, vec!["A", "C", "A", "C"]);
    }

    #[test]
    fn forward_then_back_reorders() {
        let order = names(vec![
            request("login", &["setNextRequest('create');"]),
            request("delete", &["setNextRequest(null);"]),
            request("create", &["setNextRequest('read');"]),
            request("read", &["setNextRequest('delete');"]),
        ]);
        assert_eq!(order, vec!["login", "create", "read", "delete"]);
    }

    #[test]
    fn unresolved_target_policies() {
        let nodes = || {
            vec![
                request("A", &[]),
                request("B", &["setNextRequest('missing');"]),
                request("C", &[]),
            ]
        };

        assert_eq!(run(nodes(), UnresolvedPolicy::Stop).unwrap(), vec!["A", "B"]);
        assert_eq!(
            run(nodes(), UnresolvedPolicy::Next).unwrap(),
            vec!["A", "B", "C"]
        );
        match run(nodes(), UnresolvedPolicy::Fail) {
            Err(LinearizeError::UnresolvedJumpTarget { item, target }) => {
                assert_eq!(item, "B");
                assert_eq!(target, "missing");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn bad_argument_aborts() {
        let result = run(
            vec![request("A", &[]), request("B", &["setNextRequest(next);"])],
            UnresolvedPolicy::Stop,
        );
        assert!(matches!(
            result,
            Err(LinearizeError::UnrecognizedDirectiveArgument { .. })
        ));
    }

    #[test]
    fn unplaced_requests_are_never_parsed() {
        // C is never reached, so its broken directive is not an error.
        let order = names(vec![
            request("A", &["setNextRequest(null);"]),
            request("B", &[]),
            request("C", &["setNextRequest(x);"]),
        ]);
        assert_eq!(order, vec!["A"]);
    }

    #[test]
    fn placements_never_exceed_registry_size() {
        let nodes: Vec<Node> = (0..6)
            .map(|i| {
                let target = format!("setNextRequest('r{}');", (i + 3) % 6);
                request(&format!("r{}", i), &[target.as_str()])
            })
            .collect();
        let order = names(nodes);
        assert_eq!(order, vec!["r0", "r3", "r0", "r3", "r0", "r3"]);
    }
}
