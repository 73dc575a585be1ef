//! Line cleaning and command grouping

use regex::Regex;

use super::command::Command;
use super::state::MotionMode;
use super::tokenizer::{DefaultTokenizer, Word, WordTokenizer};

/// Parameter words attached to a command, in line order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    words: Vec<Word>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, word: Word) {
        self.words.push(word);
    }

    /// Whether the letter appears at all, with or without a value
    pub fn has(&self, letter: char) -> bool {
        self.words.iter().any(|w| w.letter == letter)
    }

    /// Value of the last occurrence of a letter
    ///
    /// Returns `None` when the letter is absent or carried no number.
    pub fn get(&self, letter: char) -> Option<f64> {
        self.words
            .iter()
            .rev()
            .find(|w| w.letter == letter)
            .and_then(|w| w.value)
            .filter(|v| !v.is_nan())
    }

    /// Whether any linear or rotary axis word is present
    pub fn has_axis_words(&self) -> bool {
        ['X', 'Y', 'Z', 'A', 'B', 'C'].iter().any(|l| self.has(*l))
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

/// A command together with the parameter words that followed it
///
/// `command` is `None` for a line made only of non-axis parameter words
/// (e.g. a lone `F500`).
#[derive(Debug, Clone, PartialEq)]
pub struct CommandGroup {
    pub command: Option<Command>,
    pub params: Params,
}

/// Motion command re-issued for a line that omits its G word
fn implicit_command(motion: MotionMode) -> Option<Command> {
    match motion {
        MotionMode::Rapid => Some(Command::Rapid),
        MotionMode::Linear => Some(Command::Linear),
        MotionMode::ArcCw => Some(Command::ArcCw),
        MotionMode::ArcCcw => Some(Command::ArcCcw),
        MotionMode::Probe(_) | MotionMode::Cancel => None,
    }
}

/// Group an ordered word list into commands
///
/// Each G, M or T word opens a new group; the words after it, up to the
/// next G/M/T word, are its parameters. Words before the first G/M/T word
/// continue the active motion mode when they contain an axis word.
pub fn group_words(words: &[Word], motion: MotionMode) -> Vec<CommandGroup> {
    let mut groups: Vec<CommandGroup> = Vec::new();
    let mut leading = Params::new();

    for word in words {
        if word.is_command() {
            groups.push(CommandGroup {
                command: Some(Command::from_word(word.letter, word.value)),
                params: Params::new(),
            });
        } else if let Some(group) = groups.last_mut() {
            group.params.push(*word);
        } else {
            leading.push(*word);
        }
    }

    if !leading.is_empty() {
        let command = if leading.words().iter().any(Word::is_axis) {
            implicit_command(motion)
        } else {
            None
        };
        groups.insert(
            0,
            CommandGroup {
                command,
                params: leading,
            },
        );
    }

    groups
}

/// Line preprocessor and tokenizer front end
pub struct GcodeParser {
    tokenizer: Box<dyn WordTokenizer>,
}

impl GcodeParser {
    /// Create a parser using the [`DefaultTokenizer`]
    pub fn new() -> Self {
        Self::with_tokenizer(Box::new(DefaultTokenizer::new()))
    }

    /// Create a parser with a caller-supplied tokenizer
    pub fn with_tokenizer(tokenizer: Box<dyn WordTokenizer>) -> Self {
        Self { tokenizer }
    }

    /// Strip comments and normalise whitespace
    ///
    /// Parenthesised comments are removed (an unclosed parenthesis comments
    /// out the rest of the line), then everything from the first `;`.
    pub fn clean_line(line: &str) -> String {
        static COMMENT_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
        static WHITESPACE_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
        let comments = COMMENT_REGEX
            .get_or_init(|| Regex::new(r"\([^)]*\)|\(.*$|;.*$").expect("invalid regex pattern"));
        let whitespace =
            WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("invalid regex pattern"));

        let stripped = comments.replace_all(line, " ");
        whitespace.replace_all(stripped.trim(), " ").into_owned()
    }

    /// Split a cleaned line into words
    pub fn tokenize(&self, cleaned: &str) -> Vec<Word> {
        self.tokenizer.tokenize(cleaned)
    }
}

impl Default for GcodeParser {
    fn default() -> Self {
        Self::new()
    }
}
