use std::cell::RefCell;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::rc::Rc;

use log::debug;

use crate::error::{KconfigError, KconfigResult};

/// Single-slot lookahead: at most one line is ever waiting to be re-read.
#[derive(Debug, Default)]
pub struct Lookahead(Option<String>);

impl Lookahead {
    pub fn put(&mut self, line: String) -> Result<(), String> {
        if self.0.is_some() {
            return Err(line);
        }
        self.0 = Some(line);
        Ok(())
    }

    pub fn take(&mut self) -> Option<String> {
        self.0.take()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

/// One physical input file. Shared by every scope reading it.
pub struct SourceFile {
    name: String,
    lines: Lines<BufReader<File>>,
    lookahead: Lookahead,
}

impl SourceFile {
    fn open(base: &Path, name: &str) -> KconfigResult<Self> {
        let path = base.join(name);
        let file = File::open(&path).map_err(|source| KconfigError::MissingFile { path, source })?;
        Ok(Self {
            name: name.to_string(),
            lines: BufReader::new(file).lines(),
            lookahead: Lookahead::default(),
        })
    }
}

/// A file plus this scope's own view of how far into it we are.
#[derive(Clone)]
struct Frame {
    file: Rc<RefCell<SourceFile>>,
    line: usize,
}

/// Stack of open files as seen by one scope.
///
/// A forked cursor shares the parent's top file but counts lines on its
/// own; the parent takes the count back with [`Cursor::resync`] once the
/// child is done.
pub struct Cursor {
    base: Rc<Path>,
    frames: Vec<Frame>,
}

impl Cursor {
    /// Opens `name` under `base` as the bottom frame.
    pub fn open(base: impl AsRef<Path>, name: &str) -> KconfigResult<Self> {
        let mut cursor = Self {
            base: Rc::from(base.as_ref()),
            frames: Vec::new(),
        };
        cursor.push(name)?;
        Ok(cursor)
    }

    /// Cursor for a nested scope, seeded with our current file.
    pub fn fork(&self) -> Self {
        Self {
            base: Rc::clone(&self.base),
            frames: self.frames.last().cloned().into_iter().collect(),
        }
    }

    /// Takes over the line count of a child forked from our top frame.
    pub fn resync(&mut self, child: &Cursor) {
        debug_assert_eq!(child.frames.len(), 1, "child left frames open");
        if let (Some(top), Some(bottom)) = (self.frames.last_mut(), child.frames.first()) {
            top.line = bottom.line;
        }
    }

    pub fn push(&mut self, name: &str) -> KconfigResult<()> {
        let file = SourceFile::open(&self.base, name)?;
        debug!("opened {}", name);
        self.frames.push(Frame {
            file: Rc::new(RefCell::new(file)),
            line: 0,
        });
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "pop on an empty cursor");
        if let Some(frame) = self.frames.pop() {
            debug!("closed {} after line {}", frame.file.borrow().name, frame.line);
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Next raw line of the top file without its terminator, or `None` once
    /// that file is exhausted. Never pops.
    pub fn next_line(&mut self) -> KconfigResult<Option<String>> {
        let Some(frame) = self.frames.last_mut() else {
            return Ok(None);
        };
        let mut file = frame.file.borrow_mut();
        let line = match file.lookahead.take() {
            Some(line) => line,
            None => match file.lines.next() {
                Some(line) => line?,
                None => return Ok(None),
            },
        };
        frame.line += 1;
        Ok(Some(line))
    }

    /// Hands `line` back so the next `next_line` replays it.
    pub fn push_back(&mut self, line: String) -> KconfigResult<()> {
        let Some(frame) = self.frames.last_mut() else {
            return Ok(());
        };
        let mut file = frame.file.borrow_mut();
        if file.lookahead.put(line).is_err() {
            return Err(KconfigError::LookaheadOccupied {
                file: file.name.clone(),
                line: frame.line,
            });
        }
        frame.line -= 1;
        Ok(())
    }

    /// Name of the top file relative to the base directory.
    pub fn file_name(&self) -> String {
        self.frames
            .last()
            .map(|f| f.file.borrow().name.clone())
            .unwrap_or_default()
    }

    /// Number of the line most recently returned by `next_line`.
    pub fn line(&self) -> usize {
        self.frames.last().map_or(0, |f| f.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }
        dir
    }

    #[test]
    fn lookahead_holds_one_line() {
        let mut slot = Lookahead::default();
        assert!(slot.put("a".to_string()).is_ok());
        assert_eq!(slot.put("b".to_string()), Err("b".to_string()));
        assert_eq!(slot.take().as_deref(), Some("a"));
        assert!(slot.is_empty());
    }

    #[test]
    fn push_back_replays_with_the_same_number() {
        let dir = tree(&[("Kconfig", "one\ntwo\n")]);
        let mut cursor = Cursor::open(dir.path(), "Kconfig").unwrap();

        assert_eq!(cursor.next_line().unwrap().as_deref(), Some("one"));
        let two = cursor.next_line().unwrap().unwrap();
        assert_eq!(cursor.line(), 2);

        cursor.push_back(two).unwrap();
        assert_eq!(cursor.line(), 1);
        assert!(matches!(
            cursor.push_back("again".to_string()),
            Err(KconfigError::LookaheadOccupied { line: 1, .. })
        ));

        assert_eq!(cursor.next_line().unwrap().as_deref(), Some("two"));
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.next_line().unwrap(), None);
    }

    #[test]
    fn forked_cursor_shares_the_file_and_resyncs() {
        let dir = tree(&[("Kconfig", "a\nb\nc\n")]);
        let mut parent = Cursor::open(dir.path(), "Kconfig").unwrap();
        parent.next_line().unwrap();

        let mut child = parent.fork();
        assert_eq!(child.next_line().unwrap().as_deref(), Some("b"));
        assert_eq!(parent.line(), 1);

        parent.resync(&child);
        assert_eq!(parent.line(), 2);
        assert_eq!(parent.next_line().unwrap().as_deref(), Some("c"));
        assert_eq!(parent.line(), 3);
    }

    #[test]
    fn missing_files_are_reported() {
        let dir = tree(&[("Kconfig", "")]);
        let mut cursor = Cursor::open(dir.path(), "Kconfig").unwrap();
        let err = cursor.push("arch/x86/Kconfig").err().unwrap();
        assert!(matches!(err, KconfigError::MissingFile { .. }));
        assert_eq!(cursor.depth(), 1);
    }
}
