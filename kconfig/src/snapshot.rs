use std::collections::HashMap;
use std::fmt;
use std::ops::BitAnd;
use std::path::Path;

use pest::Parser;

use crate::error::KconfigResult;
use crate::grammar::Scope;
use crate::{Rule, SnapshotParser, snapshot_error};

/// A resolved configuration: `CONFIG_` names (prefix stripped) mapped to
/// their values, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_str(input: &str) -> KconfigResult<Self> {
        let mut pairs = SnapshotParser::parse(Rule::file, input)
            .map_err(|e| snapshot_error!("{e}"))?;
        let file = pairs
            .next()
            .ok_or_else(|| snapshot_error!("empty parse tree"))?;

        let mut snapshot = Self::new();
        for entry in file.into_inner().filter(|p| p.as_rule() == Rule::entry) {
            let mut inner = entry.into_inner();
            // SAFETY: grammar guarantees `name` and `value` inside an entry
            let name = inner.next().unwrap().as_str();
            let value = inner.next().unwrap().as_str();
            snapshot.insert(name, value);
        }
        Ok(snapshot)
    }

    pub fn from_path(path: impl AsRef<Path>) -> KconfigResult<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::parse_str(&input)
    }

    /// Sets `name`, keeping its original position if already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.index.get(&name) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries present in both snapshots with the same value, in our order.
    pub fn intersection(&self, other: &Snapshot) -> Snapshot {
        let mut result = Snapshot::new();
        for (name, value) in self.iter() {
            if other.get(name) == Some(value) {
                result.insert(name, value);
            }
        }
        result
    }

    /// Drops every entry not declared somewhere in `tree`.
    pub fn retain_symbols(&self, tree: &Scope) -> Snapshot {
        let declared: std::collections::HashSet<&str> = tree.symbols().collect();
        let mut result = Snapshot::new();
        for (name, value) in self.iter().filter(|(name, _)| declared.contains(name)) {
            result.insert(name, value);
        }
        result
    }
}

impl BitAnd for &Snapshot {
    type Output = Snapshot;

    fn bitand(self, rhs: &Snapshot) -> Snapshot {
        self.intersection(rhs)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .iter()
            .map(|(name, value)| format!("CONFIG_{name}={value}"))
            .collect();
        f.write_str(&lines.join("\n"))
    }
}
