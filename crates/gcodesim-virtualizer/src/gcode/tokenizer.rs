//! Word tokenizer
//!
//! Splits a cleaned G-code line into ordered `(letter, value)` words.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single G-code word, e.g. `X10.5` or `G1`
///
/// `value` is `None` when the letter carried no parseable number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Uppercase word letter
    pub letter: char,
    /// Numeric value, if one was present and parseable
    pub value: Option<f64>,
}

impl Word {
    pub fn new(letter: char, value: Option<f64>) -> Self {
        Self {
            letter: letter.to_ascii_uppercase(),
            value,
        }
    }

    /// Whether this word starts a new command group (G, M or T)
    pub fn is_command(&self) -> bool {
        matches!(self.letter, 'G' | 'M' | 'T')
    }

    /// Whether this word addresses an axis or arc parameter
    pub fn is_axis(&self) -> bool {
        matches!(
            self.letter,
            'X' | 'Y' | 'Z' | 'A' | 'B' | 'C' | 'I' | 'J' | 'K' | 'R'
        )
    }
}

/// Splits a cleaned line into words
///
/// Implementations must return words in their original order. The
/// virtualizer only relies on this contract, so callers may plug in a
/// dialect-specific tokenizer.
pub trait WordTokenizer: Send {
    fn tokenize(&self, line: &str) -> Vec<Word>;
}

/// Regex-based tokenizer accepting both spaced (`G1 X10`) and packed
/// (`G1X10`) words
#[derive(Debug, Clone, Default)]
pub struct DefaultTokenizer;

impl DefaultTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn word_regex() -> &'static Regex {
        static WORD_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
        WORD_REGEX.get_or_init(|| {
            Regex::new(r"([A-Za-z])\s*([-+]?[0-9]*\.?[0-9]*)").expect("invalid regex pattern")
        })
    }
}

impl WordTokenizer for DefaultTokenizer {
    fn tokenize(&self, line: &str) -> Vec<Word> {
        Self::word_regex()
            .captures_iter(line)
            .filter_map(|caps| {
                let letter = caps.get(1)?.as_str().chars().next()?;
                let value = caps
                    .get(2)
                    .map(|m| m.as_str())
                    .filter(|s| !s.is_empty())
                    .and_then(|s| s.parse::<f64>().ok());
                Some(Word::new(letter, value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_spaced_words() {
        let words = DefaultTokenizer::new().tokenize("G1 X10.5 Y-2 F300");
        assert_eq!(
            words,
            vec![
                Word::new('G', Some(1.0)),
                Word::new('X', Some(10.5)),
                Word::new('Y', Some(-2.0)),
                Word::new('F', Some(300.0)),
            ]
        );
    }

    #[test]
    fn test_tokenize_packed_words() {
        let words = DefaultTokenizer::new().tokenize("g0x1y.5");
        assert_eq!(words.len(), 3);
        assert_eq!(words[0], Word::new('G', Some(0.0)));
        assert_eq!(words[2], Word::new('Y', Some(0.5)));
    }

    #[test]
    fn test_tokenize_decimal_codes() {
        let words = DefaultTokenizer::new().tokenize("G92.1");
        assert_eq!(words, vec![Word::new('G', Some(92.1))]);
    }

    #[test]
    fn test_missing_value_is_none() {
        let words = DefaultTokenizer::new().tokenize("G1 X Y5");
        assert_eq!(words[1], Word::new('X', None));
        assert_eq!(words[2], Word::new('Y', Some(5.0)));
    }

    #[test]
    fn test_word_classification() {
        assert!(Word::new('t', Some(1.0)).is_command());
        assert!(Word::new('R', Some(1.0)).is_axis());
        assert!(!Word::new('F', Some(1.0)).is_axis());
    }
}
