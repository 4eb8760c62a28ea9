use log::{debug, warn};

use super::cursor::Cursor;
use super::diagnostics::{Classification, DeferredLog, Record, Sink};
use super::keyword::Keyword;
use super::scope::{Scope, ScopeKind};
use super::variables::Variables;
use crate::error::{KconfigError, KconfigResult};

/// What a terminator does to the scope that sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// Explicit closing keyword: must belong to this scope.
    Close,
    /// Push the line back and let the parent match it.
    Yield,
}

/// Where a `help` body stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HelpEnd {
    /// At the next `config` line.
    Declaration,
    /// At anything that terminates the owning scope.
    Terminator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Production {
    Log,
    /// Log, then absorb `\`-continued physical lines.
    Continued,
    Open(ScopeKind),
    MainMenu,
    Source,
    Help(HelpEnd),
    /// Names the enclosing choice.
    Prompt,
}

/// Keyword tables of one scope kind, checked in order.
struct Grammar {
    terminators: &'static [(Keyword, Terminator)],
    productions: &'static [(Keyword, Production)],
}

static ROOT: Grammar = Grammar {
    terminators: &[],
    productions: &[
        (Keyword::Comment, Production::Log),
        (Keyword::MainMenu, Production::MainMenu),
        (Keyword::Newline, Production::Log),
    ],
};

static CONTAINER: Grammar = Grammar {
    terminators: &[
        (Keyword::EndChoice, Terminator::Close),
        (Keyword::EndIf, Terminator::Close),
        (Keyword::EndMenu, Terminator::Close),
    ],
    productions: &[
        (Keyword::Choice, Production::Open(ScopeKind::Choice)),
        (Keyword::Comment, Production::Log),
        (Keyword::Config, Production::Open(ScopeKind::Config)),
        (Keyword::If, Production::Open(ScopeKind::If)),
        (Keyword::Menu, Production::Open(ScopeKind::Menu)),
        (Keyword::MenuConfig, Production::Open(ScopeKind::MenuConfig)),
        (Keyword::Newline, Production::Log),
        (Keyword::Source, Production::Source),
    ],
};

static CHOICE: Grammar = Grammar {
    terminators: &[
        (Keyword::EndChoice, Terminator::Close),
        (Keyword::EndMenu, Terminator::Close),
    ],
    productions: &[
        (Keyword::Choice, Production::Open(ScopeKind::Choice)),
        (Keyword::Config, Production::Open(ScopeKind::Config)),
        (Keyword::Comment, Production::Log),
        (Keyword::Default, Production::Log),
        (Keyword::Depends, Production::Log),
        (Keyword::Help, Production::Help(HelpEnd::Declaration)),
        (Keyword::Menu, Production::Open(ScopeKind::Menu)),
        (Keyword::Newline, Production::Log),
        (Keyword::Prompt, Production::Prompt),
        (Keyword::Source, Production::Source),
    ],
};

static ENTRY: Grammar = Grammar {
    terminators: &[
        (Keyword::Choice, Terminator::Yield),
        (Keyword::Config, Terminator::Yield),
        (Keyword::EndChoice, Terminator::Yield),
        (Keyword::EndIf, Terminator::Yield),
        (Keyword::EndMenu, Terminator::Yield),
        (Keyword::If, Terminator::Yield),
        (Keyword::Menu, Terminator::Yield),
        (Keyword::MenuConfig, Terminator::Yield),
        (Keyword::Source, Terminator::Yield),
    ],
    productions: &[
        (Keyword::Comment, Production::Log),
        (Keyword::Default, Production::Continued),
        (Keyword::Depends, Production::Continued),
        (Keyword::Help, Production::Help(HelpEnd::Terminator)),
        (Keyword::Imply, Production::Continued),
        (Keyword::Newline, Production::Log),
        (Keyword::Prompt, Production::Continued),
        (Keyword::Range, Production::Continued),
        (Keyword::Select, Production::Continued),
        (Keyword::Tristate, Production::Continued),
        (Keyword::Type, Production::Continued),
    ],
};

fn grammar(kind: ScopeKind) -> &'static Grammar {
    match kind {
        ScopeKind::Root => &ROOT,
        ScopeKind::Menu | ScopeKind::If => &CONTAINER,
        ScopeKind::Choice => &CHOICE,
        ScopeKind::Config | ScopeKind::MenuConfig => &ENTRY,
    }
}

enum Flow {
    Continue,
    Closed,
}

/// Drives one scope over its cursor until it closes or its bottom file
/// runs out. Nested scopes get their own parser and run to completion
/// before this one reads again.
pub(crate) struct ScopeParser<'p, S: Sink + ?Sized> {
    scope: Scope,
    cursor: Cursor,
    variables: &'p Variables,
    sink: &'p mut S,
    // present until a choice sees its `prompt`
    deferred: Option<DeferredLog>,
}

impl<'p, S: Sink + ?Sized> ScopeParser<'p, S> {
    pub(crate) fn new(
        scope: Scope,
        cursor: Cursor,
        variables: &'p Variables,
        sink: &'p mut S,
    ) -> Self {
        let deferred = (scope.kind() == ScopeKind::Choice).then(DeferredLog::new);
        Self {
            scope,
            cursor,
            variables,
            sink,
            deferred,
        }
    }

    /// Consumes lines until this scope ends and hands back the finished
    /// node together with the cursor, so the caller can resync.
    pub(crate) fn run(mut self) -> KconfigResult<(Scope, Cursor)> {
        self.drain()?;
        Ok(self.finish())
    }

    fn finish(self) -> (Scope, Cursor) {
        if let Some(deferred) = &self.deferred
            && !deferred.is_empty()
        {
            warn!(
                "choice ending at {}:{} has no prompt; {} records dropped",
                self.cursor.file_name(),
                self.cursor.line(),
                deferred.len()
            );
        }
        (self.scope, self.cursor)
    }

    fn drain(&mut self) -> KconfigResult<Flow> {
        while let Some(line) = self.cursor.next_line()? {
            if let Flow::Closed = self.dispatch(line)? {
                return Ok(Flow::Closed);
            }
        }
        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, line: String) -> KconfigResult<Flow> {
        let grammar = grammar(self.scope.kind());

        for &(keyword, terminator) in grammar.terminators {
            if keyword.matches(&line) {
                return self.terminate(keyword, terminator, line);
            }
        }

        for &(keyword, production) in grammar.productions {
            if let Some(arg) = keyword.argument(&line) {
                let arg = arg.to_string();
                return self.produce(production, &arg, &line);
            }
        }

        self.log(Classification::NotParsed, &line);
        Ok(Flow::Continue)
    }

    fn terminate(
        &mut self,
        keyword: Keyword,
        terminator: Terminator,
        line: String,
    ) -> KconfigResult<Flow> {
        match terminator {
            Terminator::Close => {
                if !self.closes(keyword) {
                    return Err(KconfigError::UnexpectedTerminator {
                        keyword,
                        scope: self.scope.kind(),
                        file: self.cursor.file_name(),
                        line: self.cursor.line(),
                    });
                }
                self.log(Classification::Parsed, &line);
            }
            Terminator::Yield => self.cursor.push_back(line)?,
        }
        Ok(Flow::Closed)
    }

    fn closes(&self, keyword: Keyword) -> bool {
        match keyword {
            Keyword::EndChoice => self.scope.kind() == ScopeKind::Choice,
            Keyword::EndIf => self.scope.kind() == ScopeKind::If,
            Keyword::EndMenu => self.scope.kind() == ScopeKind::Menu && !self.scope.is_main(),
            _ => false,
        }
    }

    fn produce(&mut self, production: Production, arg: &str, line: &str) -> KconfigResult<Flow> {
        match production {
            Production::Log => self.log(Classification::Parsed, line),
            Production::Continued => self.continued(line)?,
            Production::Open(kind) => {
                let name = match kind {
                    ScopeKind::Menu => self.variables.expand(arg)?,
                    _ => arg.to_string(),
                };
                self.open(Scope::new(kind, name), line)?;
            }
            Production::MainMenu => {
                let title = self.variables.expand(arg)?;
                self.open(Scope::main_menu(title), line)?;
            }
            Production::Source => self.include(arg, line)?,
            Production::Help(end) => self.help(end, line)?,
            Production::Prompt => self.name_choice(arg, line),
        }
        Ok(Flow::Continue)
    }

    fn open(&mut self, scope: Scope, line: &str) -> KconfigResult<()> {
        debug!(
            "{} {:?} opened at {}:{}",
            scope.kind(),
            scope.name(),
            self.cursor.file_name(),
            self.cursor.line()
        );

        let mut child = ScopeParser::new(scope, self.cursor.fork(), self.variables, &mut *self.sink);
        child.log(Classification::Parsed, line);
        let (scope, cursor) = child.run()?;
        self.cursor.resync(&cursor);

        debug!(
            "{} {:?} ended at {}:{}",
            scope.kind(),
            scope.name(),
            self.cursor.file_name(),
            self.cursor.line()
        );
        self.scope.push_child(scope);
        Ok(())
    }

    /// Runs this scope over an included file, then resumes in the
    /// including one. A closing keyword met in the included file only ends
    /// that file's loop.
    fn include(&mut self, path: &str, line: &str) -> KconfigResult<()> {
        let path = self.variables.expand(path)?;
        self.log(Classification::Parsed, line);

        self.cursor.push(&path)?;
        let flow = self.drain();
        // popped on every outcome, errors included
        self.cursor.pop();

        if let Flow::Closed = flow? {
            warn!(
                "{} {:?} closed inside {}; the rest of that file is skipped",
                self.scope.kind(),
                self.scope.name(),
                path
            );
        }
        Ok(())
    }

    fn continued(&mut self, line: &str) -> KconfigResult<()> {
        self.log(Classification::Parsed, line);

        let mut continues = line.ends_with('\\');
        while continues {
            let Some(next) = self.cursor.next_line()? else {
                break;
            };
            self.log(Classification::Parsed, &next);
            continues = next.ends_with('\\');
        }
        Ok(())
    }

    fn help(&mut self, end: HelpEnd, line: &str) -> KconfigResult<()> {
        self.log(Classification::Parsed, line);

        while let Some(next) = self.cursor.next_line()? {
            let stop = match end {
                HelpEnd::Declaration => Keyword::Config.matches(&next),
                HelpEnd::Terminator => grammar(self.scope.kind())
                    .terminators
                    .iter()
                    .any(|(keyword, _)| keyword.matches(&next)),
            };
            if stop {
                self.cursor.push_back(next)?;
                break;
            }
            self.log(Classification::Parsed, &next);
        }
        Ok(())
    }

    fn name_choice(&mut self, name: &str, line: &str) {
        self.scope.set_name(name);
        self.log(Classification::Parsed, line);

        if let Some(deferred) = self.deferred.take() {
            for record in deferred.flush(self.scope.name()) {
                self.sink.record(record);
            }
        }
    }

    fn log(&mut self, class: Classification, text: &str) {
        let file = self.cursor.file_name();
        let line = self.cursor.line();
        match &mut self.deferred {
            Some(deferred) => deferred.push(class, &file, line, text),
            None => self.sink.record(Record {
                file,
                line,
                scope: self.scope.name().to_string(),
                class,
                text: text.to_string(),
            }),
        }
    }
}
