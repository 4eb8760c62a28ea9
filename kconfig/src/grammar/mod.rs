//! The `grammar` module turns a tree of Kconfig files into a [`Scope`]
//! tree while reporting how every physical line was classified.
//!
//! Each scope kind owns a table of terminator and production keywords.
//! Scopes recurse depth-first: a container hands each nested block to a
//! fresh parser sharing its open file, and leaf entries end by pushing the
//! first foreign line back to their parent.

/// Per-scope view of the stack of open files, with single-line pushback.
pub mod cursor;

/// Line records, the sinks that receive them, and the buffer a choice
/// keeps until it knows its name.
pub mod diagnostics;

/// Line classification patterns.
pub mod keyword;

/// The parsed tree.
pub mod scope;

/// `$(NAME)` substitution.
pub mod variables;

pub(crate) mod engine;

pub use cursor::Cursor;
pub use diagnostics::{Classification, DeferredLog, LogSink, Record, Sink};
pub use keyword::Keyword;
pub use scope::{Scope, ScopeKind};
pub use variables::Variables;
