use crate::collection::RequestItem;
use crate::directive::{Directive, directive_argument, neutralize_line, parse_argument};
use crate::error::{LinearizeError, Result};
use tracing::debug;

/// Find the first directive in the item's `test` scripts.
///
/// The matching line is commented out before returning, so the test runner
/// does not act on it again and a second call returns `Ok(None)`. A directive
/// whose argument is not `null` or a plain string aborts with
/// `UnrecognizedDirectiveArgument`; the line is left untouched in that case.
pub fn extract(item: &mut RequestItem) -> Result<Option<Directive>> {
    let RequestItem { name, events, .. } = item;

    for event in events.iter_mut().filter(|e| e.is_test()) {
        let Some(script) = event.script.as_mut() else {
            continue;
        };

        for (index, line) in script.exec.iter_mut().enumerate() {
            let Some(arg) = directive_argument(line) else {
                continue;
            };

            let directive = parse_argument(arg).ok_or_else(|| {
                LinearizeError::UnrecognizedDirectiveArgument {
                    item: name.clone(),
                    line: index + 1,
                    argument: arg.to_string(),
                }
            })?;

            *line = neutralize_line(line);
            debug!("'{}' line {}: {:?} (neutralized)", name, index + 1, directive);
            return Ok(Some(directive));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{Event, ItemId, Node, Script};
    use crate::registry::tests::request;
    use pretty_assertions::assert_eq;
    use serde_json::{Map, json};

    fn item(name: &str, test: &[&str]) -> RequestItem {
        match request(name, test) {
            Node::Request(item) => item,
            Node::Group(_) => unreachable!(),
        }
    }

    fn test_lines(item: &RequestItem) -> Vec<String> {
        item.events
            .iter()
            .filter(|e| e.is_test())
            .flat_map(|e| e.script.iter().flat_map(|s| s.exec.clone()))
            .collect()
    }

    #[test]
    fn no_test_handler_is_absent() {
        let mut a = item("A", &[]);
        a.events.push(Event {
            listen: "prerequest".to_string(),
            script: Some(Script::from_lines(["setNextRequest(null);"])),
            rest: Map::new(),
        });
        let before = a.clone();

        assert_eq!(extract(&mut a).unwrap(), None);
        assert_eq!(a, before);
    }

    #[test]
    fn no_matching_line_leaves_script_alone() {
        let mut a = item(
            "A",
            &[
                "pm.test('ok', function () {",
                "    pm.response.to.have.status(200);",
                "});",
                "// setNextRequest('B');",
            ],
        );
        let before = a.clone();

        assert_eq!(extract(&mut a).unwrap(), None);
        assert_eq!(a, before);
    }

    #[test]
    fn stop_is_neutralized_and_idempotent() {
        let mut b = item("B", &["pm.test('x', () => {});", "setNextRequest(null);\r"]);

        assert_eq!(extract(&mut b).unwrap(), Some(Directive::Stop));
        assert_eq!(
            test_lines(&b),
            vec!["pm.test('x', () => {});", ";// setNextRequest(null);\r"]
        );

        assert_eq!(extract(&mut b).unwrap(), None);
        assert_eq!(
            test_lines(&b),
            vec!["pm.test('x', () => {});", ";// setNextRequest(null);\r"]
        );
    }

    #[test]
    fn only_first_directive_is_taken() {
        let mut a = item(
            "A",
            &[
                "if (pm.response.code === 200) {",
                "  postman.setNextRequest(\"B\");",
                "}",
                "postman.setNextRequest('C');",
            ],
        );

        assert_eq!(extract(&mut a).unwrap(), Some(Directive::Jump("B".into())));
        let lines = test_lines(&a);
        assert_eq!(lines[1], "  ;// postman.setNextRequest(\"B\");");
        assert_eq!(lines[3], "postman.setNextRequest('C');");

        // A second pass reaches the next directive only because the first one
        // was disabled.
        assert_eq!(extract(&mut a).unwrap(), Some(Directive::Jump("C".into())));
    }

    #[test]
    fn unbraced_if_body_stays_a_statement() {
        let mut a = item(
            "A",
            &["if (ok)", "    postman.setNextRequest('C');", "cleanup();"],
        );

        assert_eq!(extract(&mut a).unwrap(), Some(Directive::Jump("C".into())));
        assert_eq!(
            test_lines(&a),
            vec!["if (ok)", "    ;// postman.setNextRequest('C');", "cleanup();"]
        );
        assert_eq!(extract(&mut a).unwrap(), None);
    }

    #[test]
    fn later_test_handlers_are_scanned() {
        let mut a = item("A", &["console.log('no directive');"]);
        a.events.push(Event {
            listen: "test".to_string(),
            script: None,
            rest: Map::new(),
        });
        a.events.push(Event {
            listen: "test".to_string(),
            script: Some(Script::from_lines(["setNextRequest('Z');"])),
            rest: Map::new(),
        });

        assert_eq!(extract(&mut a).unwrap(), Some(Directive::Jump("Z".into())));
    }

    #[test]
    fn expression_argument_is_fatal() {
        let mut a = item("A", &["const x = 'B';", "setNextRequest(x + y);"]);
        let before = a.clone();

        let err = extract(&mut a).unwrap_err();
        match err {
            LinearizeError::UnrecognizedDirectiveArgument {
                item,
                line,
                argument,
            } => {
                assert_eq!(item, "A");
                assert_eq!(line, 2);
                assert_eq!(argument, "x + y");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(a, before);
    }

    #[test]
    fn parsed_document_scripts() {
        let mut a = RequestItem {
            id: ItemId::new("a"),
            document_id: None,
            name: "A".to_string(),
            request: json!({}),
            events: serde_json::from_value(json!([
                { "listen": "test", "script": { "exec": "pm.test('t');\nsetNextRequest('B');", "type": "text/javascript" } }
            ]))
            .unwrap(),
            rest: Map::new(),
        };

        assert_eq!(extract(&mut a).unwrap(), Some(Directive::Jump("B".into())));
        assert_eq!(test_lines(&a), vec!["pm.test('t');", ";// setNextRequest('B');"]);
    }
}
