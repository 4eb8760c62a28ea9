pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod snapshot;

pub use error::{KconfigError, KconfigResult};
pub use grammar::{Classification, Keyword, LogSink, Record, Scope, ScopeKind, Sink, Variables};
pub use parser::Parser;
pub use snapshot::Snapshot;

#[derive(pest_derive::Parser)]
#[grammar = "snapshot.pest"]
pub struct SnapshotParser;
