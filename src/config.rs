//! Run options shared by the CLI and the pipeline.

use clap::ValueEnum;

/// What to do with `setNextRequest('name')` when no request is called `name`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UnresolvedPolicy {
    /// End the order after the request, as with `setNextRequest(null)`.
    #[default]
    Stop,
    /// Abort the collection with an error.
    Fail,
    /// Ignore the directive and continue with the next request in the document.
    Next,
}

#[derive(Debug, Clone, Default)]
pub struct LinearizeOptions {
    pub on_unresolved: UnresolvedPolicy,
}
