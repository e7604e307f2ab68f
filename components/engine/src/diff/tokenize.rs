//! Tokenizers for the static diff.
//!
//! Tokens always concatenate back to the input: whitespace stays attached to
//! the token before it, so a diff over tokens maps onto exact char offsets.

use serde::{Deserialize, Serialize};

/// Size of the units the static engine diffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Whitespace-separated words.
    #[default]
    Word,
    /// Sentences ending in `.`, `!`, `?` or a line break.
    Sentence,
    /// Lines, including their trailing newline.
    Line,
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "word" => Ok(Self::Word),
            "sentence" => Ok(Self::Sentence),
            "line" => Ok(Self::Line),
            other => Err(format!("Unknown granularity: '{other}'")),
        }
    }
}

/// A slice of the input with its char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token text, trailing whitespace included.
    pub text: &'a str,
    /// Char offset of the first char.
    pub start: usize,
    /// Char offset one past the last char.
    pub end: usize,
}

/// Splits `text` into tokens of the given granularity.
#[must_use]
pub fn tokenize(text: &str, granularity: Granularity) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start_byte = 0;
    let mut start_char = 0;
    let mut count = 0;
    let mut last_content: Option<char> = None;
    let mut run_has_newline = false;
    let mut chars = text.char_indices().peekable();

    while let Some((byte, ch)) = chars.next() {
        count += 1;
        if ch.is_whitespace() {
            run_has_newline |= ch == '\n';
        } else {
            run_has_newline = false;
            if !is_closer(ch) || last_content.is_none() {
                last_content = Some(ch);
            }
        }
        let Some(&(_, next)) = chars.peek() else {
            break;
        };

        let boundary = match granularity {
            Granularity::Line => ch == '\n',
            Granularity::Word => ch.is_whitespace() && !next.is_whitespace(),
            Granularity::Sentence => {
                ch.is_whitespace()
                    && !next.is_whitespace()
                    && (run_has_newline || last_content.is_none_or(is_terminator))
            }
        };
        if boundary {
            let end_byte = byte + ch.len_utf8();
            tokens.push(Token {
                text: &text[start_byte..end_byte],
                start: start_char,
                end: count,
            });
            start_byte = end_byte;
            start_char = count;
            last_content = None;
            run_has_newline = false;
        }
    }
    if start_byte < text.len() {
        tokens.push(Token {
            text: &text[start_byte..],
            start: start_char,
            end: count,
        });
    }
    tokens
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '…')
}

fn is_closer(ch: char) -> bool {
    matches!(ch, '"' | '\'' | ')' | ']' | '”' | '’' | '»')
}
