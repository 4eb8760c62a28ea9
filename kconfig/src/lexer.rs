use logos::Logos;

/// Pieces of a string that may carry `$(NAME)` substitution tokens.
#[derive(Logos, Debug, PartialEq)]
pub enum Fragment {
    #[regex(r"\$\([A-Z_]+\)", |lex| {
        let s = lex.slice();
        s[2..s.len() - 1].to_string() // strip `$(` and `)`
    })]
    Variable(String),

    // a `$` that does not open a well-formed token stays literal
    #[token("$")]
    Dollar,

    #[regex(r"[^$]+")]
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Fragment> {
        Fragment::lexer(input).map(|t| t.expect("lexing error")).collect()
    }

    #[test]
    fn splits_variables_from_text() {
        assert_eq!(
            lex("arch/$(SRCARCH)/Kconfig"),
            vec![
                Fragment::Text,
                Fragment::Variable("SRCARCH".to_string()),
                Fragment::Text,
            ]
        );
    }

    #[test]
    fn lowercase_names_are_not_variables() {
        assert_eq!(
            lex("$(arch)"),
            vec![Fragment::Dollar, Fragment::Text]
        );
    }
}
