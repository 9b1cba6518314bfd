use crate::directive::Directive;
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::unwrap_used)] // Static regex pattern is hardcoded and valid
static RE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    // Match: setNextRequest(...);  postman.setNextRequest(...);  pm.execution.setNextRequest(...);
    Regex::new(r#"^(?:postman\.|pm\.execution\.)?setNextRequest\((.*)\);$"#).unwrap()
});

#[allow(clippy::unwrap_used)] // Static regex pattern is hardcoded and valid
static RE_STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    // 'name' or "name", no escapes, no quote of the delimiting kind inside.
    Regex::new(r#"^(?:'([^'\\]*)'|"([^"\\]*)")$"#).unwrap()
});

/// Raw argument text if `line` is a directive call, `None` otherwise.
///
/// One trailing `\r` is dropped and surrounding whitespace is ignored; nothing
/// else around the call is tolerated.
pub fn directive_argument(line: &str) -> Option<&str> {
    let line = line.strip_suffix('\r').unwrap_or(line).trim();
    RE_CALL
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Interpret a directive argument. `None` means it is not a literal we accept.
pub fn parse_argument(arg: &str) -> Option<Directive> {
    if arg == "null" {
        return Some(Directive::Stop);
    }
    let caps = RE_STRING_LITERAL.captures(arg)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| Directive::Jump(m.as_str().to_string()))
}

/// Replace a directive line with an empty statement, keeping the call as a
/// trailing comment and the indentation as is.
///
/// The `;` matters when the directive is the unbraced body of an `if`/`else`:
/// a bare comment would hand that body to the next statement.
pub fn neutralize_line(line: &str) -> String {
    let code = line.trim_start();
    let indent = &line[..line.len() - code.len()];
    format!("{};// {}", indent, code)
}
