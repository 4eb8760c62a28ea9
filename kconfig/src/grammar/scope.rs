use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Root,
    Menu,
    If,
    Choice,
    Config,
    MenuConfig,
}

impl ScopeKind {
    /// Containers own nested entries and close on their own keyword; the
    /// rest are leaves that end only when a parent keyword shows up.
    pub const fn is_container(self) -> bool {
        !matches!(self, ScopeKind::Config | ScopeKind::MenuConfig)
    }

    pub const fn declares_symbol(self) -> bool {
        !self.is_container()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ScopeKind::Root => "Root",
            ScopeKind::Menu => "Menu",
            ScopeKind::If => "If",
            ScopeKind::Choice => "Choice",
            ScopeKind::Config => "Config",
            ScopeKind::MenuConfig => "MenuConfig",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the parsed tree. Children are kept in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    kind: ScopeKind,
    name: String,
    main: bool,
    children: Vec<Scope>,
}

impl Scope {
    pub fn new(kind: ScopeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            main: false,
            children: Vec::new(),
        }
    }

    /// The menu opened by `mainmenu`, which nothing may close.
    pub fn main_menu(name: impl Into<String>) -> Self {
        Self {
            main: true,
            ..Self::new(ScopeKind::Menu, name)
        }
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_main(&self) -> bool {
        self.main
    }

    pub fn children(&self) -> &[Scope] {
        &self.children
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn push_child(&mut self, child: Scope) {
        self.children.push(child);
    }

    /// Depth-first, pre-order walk including `self`.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Names of every `config`/`menuconfig` in discovery order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.walk()
            .filter(|s| s.kind.declares_symbol())
            .map(|s| s.name.as_str())
    }

    pub fn find(&self, kind: ScopeKind, name: &str) -> Option<&Scope> {
        self.walk().find(|s| s.kind == kind && s.name == name)
    }

    fn fmt_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{:indent$}{}({})", "", self.kind, self.name, indent = depth * 2)?;
        for child in &self.children {
            child.fmt_outline(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_outline(f, 0)
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a Scope>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Scope;

    fn next(&mut self) -> Option<Self::Item> {
        let scope = self.stack.pop()?;
        self.stack.extend(scope.children.iter().rev());
        Some(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Scope {
        let mut menu = Scope::new(ScopeKind::Menu, "Drivers");
        menu.push_child(Scope::new(ScopeKind::Config, "FOO"));
        menu.push_child(Scope::new(ScopeKind::MenuConfig, "BAR"));
        let mut main = Scope::main_menu("Linux");
        main.push_child(Scope::new(ScopeKind::Config, "EARLY"));
        main.push_child(menu);
        let mut root = Scope::new(ScopeKind::Root, "");
        root.push_child(main);
        root
    }

    #[test]
    fn symbols_follow_discovery_order() {
        let root = sample();
        assert_eq!(root.symbols().collect::<Vec<_>>(), vec!["EARLY", "FOO", "BAR"]);
    }

    #[test]
    fn outline_is_indented_by_depth() {
        let outline = sample().to_string();
        assert_eq!(
            outline,
            "Root()\n  Menu(Linux)\n    Config(EARLY)\n    Menu(Drivers)\n      Config(FOO)\n      MenuConfig(BAR)\n"
        );
    }

    #[test]
    fn find_searches_the_whole_tree() {
        let root = sample();
        assert!(root.find(ScopeKind::MenuConfig, "BAR").is_some());
        assert!(root.find(ScopeKind::Config, "BAR").is_none());
        assert!(root.find(ScopeKind::Menu, "Linux").unwrap().is_main());
    }
}
