//! Splitting text into symbols.
//!
//! Two modes are supported. In `Chars` mode every character is a symbol. In
//! `Words` mode a symbol is either a maximal run of non-whitespace characters
//! or a single whitespace character. In both modes the tokens concatenate back
//! to the input exactly.

use serde::{Deserialize, Serialize};

/// How text is cut into symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolMode {
    /// One symbol per character.
    #[default]
    Chars,
    /// Words and individual whitespace characters.
    Words,
}

impl SymbolMode {
    /// Iterate the tokens of `text` under this mode.
    pub fn tokens(self, text: &str) -> Tokens<'_> {
        Tokens {
            rest: text,
            mode: self,
        }
    }
}

/// Iterator over the tokens of a string. Yields borrowed slices.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
    mode: SymbolMode,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.chars().next()?;
        let end = match self.mode {
            SymbolMode::Chars => first.len_utf8(),
            SymbolMode::Words if first.is_whitespace() => first.len_utf8(),
            SymbolMode::Words => self
                .rest
                .char_indices()
                .find(|(_, c)| c.is_whitespace())
                .map_or(self.rest.len(), |(i, _)| i),
        };
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_words_keep_whitespace_tokens() {
        let tokens: Vec<&str> = SymbolMode::Words.tokens("the cat  sat\n").collect();
        assert_eq!(tokens, vec!["the", " ", "cat", " ", " ", "sat", "\n"]);
    }

    #[test]
    fn test_chars() {
        let tokens: Vec<&str> = SymbolMode::Chars.tokens("aé b").collect();
        assert_eq!(tokens, vec!["a", "é", " ", "b"]);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(SymbolMode::Words.tokens("").count(), 0);
        assert_eq!(SymbolMode::Chars.tokens("").count(), 0);
    }

    proptest! {
        #[test]
        fn prop_tokens_concatenate_to_input(text in "[a-c \t\n]{0,40}") {
            for mode in [SymbolMode::Chars, SymbolMode::Words] {
                let joined: String = mode.tokens(&text).collect();
                prop_assert_eq!(&joined, &text);
            }
        }
    }
}
