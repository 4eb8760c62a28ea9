use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Parsed,
    NotParsed,
    Partial,
}

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub file: String,
    pub line: usize,
    /// Display name of the scope that consumed the line.
    pub scope: String,
    pub class: Classification,
    pub text: String,
}

/// Receives records as the parser classifies lines.
pub trait Sink {
    fn record(&mut self, record: Record);
}

impl Sink for Vec<Record> {
    fn record(&mut self, record: Record) {
        self.push(record);
    }
}

/// Forwards every record to the `log` facade.
#[derive(Debug, Default)]
pub struct LogSink;

impl Sink for LogSink {
    fn record(&mut self, record: Record) {
        trace!(
            "{}:{} [{}] {:?}: {}",
            record.file, record.line, record.scope, record.class, record.text
        );
    }
}

#[derive(Debug)]
struct Deferred {
    class: Classification,
    file: String,
    line: usize,
    text: String,
}

/// Records held back until a choice learns its name from `prompt`.
#[derive(Debug, Default)]
pub struct DeferredLog {
    entries: Vec<Deferred>,
}

impl DeferredLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, class: Classification, file: &str, line: usize, text: &str) {
        self.entries.push(Deferred {
            class,
            file: file.to_string(),
            line,
            text: text.to_string(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tags every held entry with `scope`, in the order they were pushed.
    pub fn flush(self, scope: &str) -> impl Iterator<Item = Record> + '_ {
        self.entries.into_iter().map(move |d| Record {
            file: d.file,
            line: d.line,
            scope: scope.to_string(),
            class: d.class,
            text: d.text,
        })
    }
}
