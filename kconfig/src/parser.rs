use std::path::{Path, PathBuf};

use log::debug;

use crate::error::KconfigResult;
use crate::grammar::engine::ScopeParser;
use crate::grammar::{Cursor, LogSink, Scope, ScopeKind, Sink, Variables};

/// Entry file looked up directly under the base directory.
pub const ENTRY_FILE: &str = "Kconfig";

/// Parses the Kconfig tree rooted at a base directory. Every `source`
/// path is resolved against that same directory.
#[derive(Debug, Clone)]
pub struct Parser {
    base: PathBuf,
    variables: Variables,
}

impl Parser {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            variables: Variables::kernel_defaults(),
        }
    }

    pub fn variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Builds the scope tree, feeding one record per classified line to
    /// `sink` as parsing goes.
    pub fn parse<S: Sink + ?Sized>(&self, sink: &mut S) -> KconfigResult<Scope> {
        debug!("parsing {} under {}", ENTRY_FILE, self.base.display());

        let cursor = Cursor::open(&self.base, ENTRY_FILE)?;
        let root = Scope::new(ScopeKind::Root, "");
        let (root, mut cursor) = ScopeParser::new(root, cursor, &self.variables, sink).run()?;
        cursor.pop();
        Ok(root)
    }
}

/// Parses with the kernel default variables, sending records to `log`.
pub fn parse(base: impl Into<PathBuf>) -> KconfigResult<Scope> {
    Parser::new(base).parse(&mut LogSink)
}
