//! Text unit splitting
//!
//! Each splitter turns text into byte ranges. Ranges never cover leading
//! or trailing whitespace and never overlap.

use crate::walker::WalkerKind;

/// Splits text into navigation units
pub trait UnitSplitter {
    const KIND: WalkerKind;

    /// Whether units read across the leaves of a group, or stay in one leaf
    const SPANS_LEAVES: bool = true;

    fn split(&self, text: &str) -> Vec<(usize, usize)>;
}

/// Every non-whitespace character
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterUnits;

impl UnitSplitter for CharacterUnits {
    const KIND: WalkerKind = WalkerKind::Character;

    fn split(&self, text: &str) -> Vec<(usize, usize)> {
        text.char_indices()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, c)| (i, i + c.len_utf8()))
            .collect()
    }
}

/// Runs of non-whitespace
#[derive(Debug, Clone, Copy, Default)]
pub struct WordUnits;

impl UnitSplitter for WordUnits {
    const KIND: WalkerKind = WalkerKind::Word;

    fn split(&self, text: &str) -> Vec<(usize, usize)> {
        words(text).collect()
    }
}

fn words(text: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut start = None;
    let mut chars = text.char_indices().chain(std::iter::once((text.len(), ' ')));
    std::iter::from_fn(move || {
        for (i, c) in chars.by_ref() {
            match (start, c.is_whitespace()) {
                (None, false) => start = Some(i),
                (Some(s), true) => {
                    start = None;
                    return Some((s, i));
                }
                _ => {}
            }
        }
        None
    })
}

const TERMINATORS: &[char] = &['.', '!', '?', '\u{2026}'];

const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '\u{201D}', '\u{2019}', '\u{00BB}'];

/// Text up to a terminator that is followed by whitespace or the end
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceUnits;

impl UnitSplitter for SentenceUnits {
    const KIND: WalkerKind = WalkerKind::Sentence;

    fn split(&self, text: &str) -> Vec<(usize, usize)> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut units = Vec::new();
        let mut start: Option<usize> = None;
        let mut i = 0;
        while i < chars.len() {
            let (pos, c) = chars[i];
            if start.is_none() {
                if c.is_whitespace() {
                    i += 1;
                    continue;
                }
                start = Some(pos);
            }
            if !TERMINATORS.contains(&c) {
                i += 1;
                continue;
            }
            let mut j = i + 1;
            while j < chars.len() && (TERMINATORS.contains(&chars[j].1) || CLOSERS.contains(&chars[j].1)) {
                j += 1;
            }
            let end = chars.get(j).map_or(Some(text.len()), |&(p, next)| next.is_whitespace().then_some(p));
            if let (Some(end), Some(s)) = (end, start) {
                units.push((s, end));
                start = None;
            }
            i = j;
        }
        if let Some(s) = start {
            let end = text.trim_end().len();
            if end > s {
                units.push((s, end));
            }
        }
        units
    }
}

/// Lines broken at newlines and soft-wrapped at a column width
#[derive(Debug, Clone, Copy)]
pub struct LineUnits {
    pub width: usize,
}

impl Default for LineUnits {
    fn default() -> Self {
        Self { width: 80 }
    }
}

impl UnitSplitter for LineUnits {
    const KIND: WalkerKind = WalkerKind::Visual;

    fn split(&self, text: &str) -> Vec<(usize, usize)> {
        let width = self.width.max(1);
        let mut units = Vec::new();
        let mut offset = 0;
        for segment in text.split('\n') {
            let mut line: Option<(usize, usize)> = None;
            for (s, e) in words(segment) {
                let (s, e) = (s + offset, e + offset);
                line = match line {
                    Some((ls, _)) if text[ls..e].chars().count() <= width => Some((ls, e)),
                    Some(done) => {
                        units.push(done);
                        Some((s, e))
                    }
                    None => Some((s, e)),
                };
            }
            units.extend(line);
            offset += segment.len() + 1;
        }
        units
    }
}

/// The whole leaf as one unit
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUnits;

impl UnitSplitter for ObjectUnits {
    const KIND: WalkerKind = WalkerKind::Object;
    const SPANS_LEAVES: bool = false;

    fn split(&self, text: &str) -> Vec<(usize, usize)> {
        if text.is_empty() { Vec::new() } else { vec![(0, text.len())] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices<'a>(text: &'a str, units: &[(usize, usize)]) -> Vec<&'a str> {
        units.iter().map(|&(s, e)| &text[s..e]).collect()
    }

    #[test]
    fn test_characters_skip_whitespace() {
        let text = "a bé";
        assert_eq!(slices(text, &CharacterUnits.split(text)), vec!["a", "b", "é"]);
    }

    #[test]
    fn test_words() {
        let text = "  Hello,\tbig  world ";
        assert_eq!(slices(text, &WordUnits.split(text)), vec!["Hello,", "big", "world"]);
        assert!(WordUnits.split("   ").is_empty());
    }

    #[test]
    fn test_sentences() {
        let text = "Hello world. How are you? \"Fine!\" said 3.5 people";
        assert_eq!(
            slices(text, &SentenceUnits.split(text)),
            vec!["Hello world.", "How are you?", "\"Fine!\"", "said 3.5 people"]
        );
    }

    #[test]
    fn test_sentence_trailing_whitespace_trimmed() {
        let text = " One... Two  ";
        assert_eq!(slices(text, &SentenceUnits.split(text)), vec!["One...", "Two"]);
    }

    #[test]
    fn test_lines_wrap_and_break() {
        let text = "aaa bbb ccc\nddd";
        let lines = LineUnits { width: 7 }.split(text);
        assert_eq!(slices(text, &lines), vec!["aaa bbb", "ccc", "ddd"]);
    }

    #[test]
    fn test_long_word_gets_its_own_line() {
        let text = "hi extraordinarily long";
        let lines = LineUnits { width: 5 }.split(text);
        assert_eq!(slices(text, &lines), vec!["hi", "extraordinarily", "long"]);
    }

    #[test]
    fn test_object_is_whole_text() {
        assert_eq!(ObjectUnits.split(" x "), vec![(0, 3)]);
    }
}
