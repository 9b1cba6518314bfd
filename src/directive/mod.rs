//! Navigation directives embedded in test scripts.
//!
//! A directive is a whole script line of the form
//! `setNextRequest(<arg>);` (optionally called through `postman.` or
//! `pm.execution.`), where `<arg>` is `null` or a plain quoted string.
//! A missing directive is represented as `None`.

pub mod extract;
pub mod line;

pub use extract::extract;
pub use line::{directive_argument, neutralize_line, parse_argument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `setNextRequest(null)`: end the run after this request.
    Stop,
    /// `setNextRequest('name')`: continue with the first request named `name`.
    Jump(String),
}
