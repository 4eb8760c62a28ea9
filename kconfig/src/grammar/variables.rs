use std::collections::HashMap;

use logos::Logos;

use crate::error::{KconfigError, KconfigResult};
use crate::lexer::Fragment;

/// Values for `$(NAME)` tokens. Fixed once handed to the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: HashMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// The entries a kernel tree needs before anything else is known.
    pub fn kernel_defaults() -> Self {
        Self::new()
            .with("ARCH", "x86")
            .with("KERNELVERSION", "")
            .with("SRCARCH", "x86")
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replaces every `$(NAME)` in `text` with its value.
    pub fn expand(&self, text: &str) -> KconfigResult<String> {
        let mut out = String::with_capacity(text.len());
        let mut lexer = Fragment::lexer(text);
        while let Some(token) = lexer.next() {
            match token {
                Ok(Fragment::Variable(name)) => {
                    let value = self
                        .get(&name)
                        .ok_or_else(|| KconfigError::UndefinedVariable(name.clone()))?;
                    out.push_str(value);
                }
                _ => out.push_str(lexer.slice()),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_source_paths() {
        let vars = Variables::kernel_defaults();
        assert_eq!(vars.expand("$(ARCH)/Kconfig").unwrap(), "x86/Kconfig");
        assert_eq!(
            vars.expand("Linux/$(ARCH) $(KERNELVERSION) Kernel").unwrap(),
            "Linux/x86  Kernel"
        );
    }

    #[test]
    fn overrides_replace_defaults() {
        let vars = Variables::kernel_defaults().with("SRCARCH", "arm64");
        assert_eq!(vars.expand("arch/$(SRCARCH)/Kconfig").unwrap(), "arch/arm64/Kconfig");
    }

    #[test]
    fn text_without_tokens_is_untouched() {
        let vars = Variables::new();
        assert_eq!(vars.expand("costs $5 (or $(lower))").unwrap(), "costs $5 (or $(lower))");
    }

    #[test]
    fn unknown_names_are_fatal() {
        let err = Variables::kernel_defaults().expand("$(CC_VERSION)").unwrap_err();
        assert!(matches!(err, KconfigError::UndefinedVariable(name) if name == "CC_VERSION"));
    }
}
