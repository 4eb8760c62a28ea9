use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Every line form the grammar can classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Choice,
    Comment,
    Config,
    Default,
    Depends,
    EndChoice,
    EndIf,
    EndMenu,
    Help,
    If,
    Imply,
    MainMenu,
    Menu,
    MenuConfig,
    Newline,
    Prompt,
    Range,
    Select,
    Source,
    Tristate,
    Type,
}

// Block keywords sit at column 0, attributes need leading indentation.
static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    Keyword::ALL
        .iter()
        .map(|k| Regex::new(&format!("^(?:{})", k.pattern())).unwrap())
        .collect()
});

impl Keyword {
    /// Indexed by discriminant.
    pub const ALL: [Keyword; 21] = [
        Keyword::Choice,
        Keyword::Comment,
        Keyword::Config,
        Keyword::Default,
        Keyword::Depends,
        Keyword::EndChoice,
        Keyword::EndIf,
        Keyword::EndMenu,
        Keyword::Help,
        Keyword::If,
        Keyword::Imply,
        Keyword::MainMenu,
        Keyword::Menu,
        Keyword::MenuConfig,
        Keyword::Newline,
        Keyword::Prompt,
        Keyword::Range,
        Keyword::Select,
        Keyword::Source,
        Keyword::Tristate,
        Keyword::Type,
    ];

    const fn pattern(self) -> &'static str {
        match self {
            Keyword::Choice => r"choice",
            Keyword::Comment => r"\t*#",
            Keyword::Config => r"config ([0-9A-Z_]+)",
            Keyword::Default => r"(?:\t|\s+)(default|def_bool|def_tristate) (.+)",
            Keyword::Depends => r"(?:\t|\s+)depends on (.+)",
            Keyword::EndChoice => r"endchoice",
            Keyword::EndIf => r"endif",
            Keyword::EndMenu => r"endmenu",
            Keyword::Help => r"(?:\t|\s+)(?:help|---help---)",
            Keyword::If => r"if (.+)",
            Keyword::Imply => r"(?:\t|\s+)imply (.+)",
            Keyword::MainMenu => r#"mainmenu "(.+?)""#,
            Keyword::Menu => r#"menu "(.+)""#,
            Keyword::MenuConfig => r"menuconfig ([0-9A-Z_]+)",
            Keyword::Newline => r"[ \t]*$",
            Keyword::Prompt => r#"(?:\t|\s+)prompt "(.+)""#,
            Keyword::Range => r"(?:\t|\s+)range (.+)",
            Keyword::Select => r"(?:\t|\s+)select (.+)",
            Keyword::Source => r#"\s*source[\t\s]"(.+?)""#,
            Keyword::Tristate => r"(?:\t|\s+)tristate(?: (.+))?",
            Keyword::Type => r"(?:\t|\s+)(bool|hex|int|string)",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Choice => "choice",
            Keyword::Comment => "#",
            Keyword::Config => "config",
            Keyword::Default => "default",
            Keyword::Depends => "depends on",
            Keyword::EndChoice => "endchoice",
            Keyword::EndIf => "endif",
            Keyword::EndMenu => "endmenu",
            Keyword::Help => "help",
            Keyword::If => "if",
            Keyword::Imply => "imply",
            Keyword::MainMenu => "mainmenu",
            Keyword::Menu => "menu",
            Keyword::MenuConfig => "menuconfig",
            Keyword::Newline => "newline",
            Keyword::Prompt => "prompt",
            Keyword::Range => "range",
            Keyword::Select => "select",
            Keyword::Source => "source",
            Keyword::Tristate => "tristate",
            Keyword::Type => "type",
        }
    }

    fn regex(self) -> &'static Regex {
        &PATTERNS[self as usize]
    }

    pub fn matches(self, line: &str) -> bool {
        self.regex().is_match(line)
    }

    pub fn captures(self, line: &str) -> Option<Captures<'_>> {
        self.regex().captures(line)
    }

    /// The first capture group of a match, or an empty string for
    /// keywords without one.
    pub fn argument(self, line: &str) -> Option<&str> {
        let caps = self.captures(line)?;
        Some(caps.get(1).map_or("", |m| m.as_str()))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
