//! Sentence terminators shared by the false-blank and reflow stages.

/// Set of characters that close a sentence.
///
/// Closing quotes are included so a quoted sentence is not glued to the
/// line after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminators {
    chars: Vec<char>,
}

impl Terminators {
    /// The default Latin terminator set.
    pub const LATIN: [char; 6] = ['.', ':', '!', '?', '"', '\''];

    /// Create a terminator set from arbitrary characters.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut chars: Vec<char> = chars.into_iter().collect();
        chars.sort_unstable();
        chars.dedup();
        Self { chars }
    }

    /// Latin terminators plus CJK full stops and typographic closing quotes.
    pub fn extended() -> Self {
        Self::new(
            Self::LATIN
                .into_iter()
                .chain(['。', '！', '？', '”', '’', '»']),
        )
    }

    /// Add a terminator character.
    pub fn with(mut self, c: char) -> Self {
        if !self.chars.contains(&c) {
            self.chars.push(c);
        }
        self
    }

    /// Check if a line ends a sentence (trailing whitespace ignored).
    pub fn ends_sentence(&self, line: &str) -> bool {
        line.trim_end()
            .chars()
            .next_back()
            .is_some_and(|c| self.chars.contains(&c))
    }

    /// The characters in this set.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl Default for Terminators {
    fn default() -> Self {
        Self::new(Self::LATIN)
    }
}
