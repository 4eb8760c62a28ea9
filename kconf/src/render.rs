use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use kconfig::{Classification, Record, Sink};

/// Prints each record as soon as it is classified, so a fatal error
/// still leaves the trace leading up to it on screen.
pub struct Printer {
    out: Box<dyn Write>,
}

impl Printer {
    pub fn stdout() -> Self {
        Self {
            out: Box::new(io::stdout().lock()),
        }
    }

    fn paint(class: Classification, text: &str) -> ColoredString {
        match class {
            Classification::Parsed => text.green(),
            Classification::NotParsed => text.red(),
            Classification::Partial => text.yellow(),
        }
    }
}

fn mark(class: Classification) -> &'static str {
    match class {
        Classification::Parsed => "    parsed",
        Classification::NotParsed => "not parsed",
        Classification::Partial => "   partial",
    }
}

impl Sink for Printer {
    fn record(&mut self, record: Record) {
        let line = format!(
            "{:30} : {:6} : {:40} : {} : {}",
            record.file,
            record.line,
            record.scope,
            Self::paint(record.class, mark(record.class)),
            Self::paint(record.class, &record.text),
        );
        if let Err(err) = writeln!(self.out, "{line}") {
            log::error!("failed to write trace: {err}");
        }
    }
}
