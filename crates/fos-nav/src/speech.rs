//! Speech output
//!
//! The engine never talks to a TTS engine directly. Hosts implement
//! [`Speaker`]; [`SpeechQueue`] is an in-memory one for headless use.

use std::collections::VecDeque;

use crate::description::{Earcon, NavDescription, SpeechHint};

/// How new speech interacts with speech already queued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMode {
    /// Drop pending speech first
    Flush,
    /// Speak after pending speech
    Queue,
}

/// Speech sink
pub trait Speaker {
    fn speak(&mut self, descriptions: &[NavDescription], mode: QueueMode);
    fn is_speaking(&self) -> bool;
}

/// One queued utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub earcon: Option<Earcon>,
    pub hint: SpeechHint,
}

impl From<&NavDescription> for Utterance {
    fn from(desc: &NavDescription) -> Self {
        Self { text: desc.spoken(), earcon: desc.earcon, hint: desc.hint }
    }
}

/// Utterances kept in the transcript unless told otherwise
pub const DEFAULT_TRANSCRIPT_SIZE: usize = 256;

/// Speech queue that "speaks" until told an utterance is done.
///
/// Also keeps a transcript of the most recent utterances. Both are bounded:
/// `max_size` caps pending speech (`0` for no cap), the transcript keeps at
/// most `transcript_size` entries.
#[derive(Debug)]
pub struct SpeechQueue {
    queue: VecDeque<Utterance>,
    spoken: VecDeque<Utterance>,
    max_size: usize,
    transcript_size: usize,
}

impl Default for SpeechQueue {
    fn default() -> Self { Self::new(0) }
}

impl SpeechQueue {
    pub fn new(max_size: usize) -> Self { Self::with_transcript_size(max_size, DEFAULT_TRANSCRIPT_SIZE) }

    pub fn with_transcript_size(max_size: usize, transcript_size: usize) -> Self {
        Self { queue: VecDeque::new(), spoken: VecDeque::new(), max_size, transcript_size }
    }

    /// Mark the current utterance finished
    pub fn finish_current(&mut self) -> Option<Utterance> { self.queue.pop_front() }
    pub fn finish_all(&mut self) { self.queue.clear(); }
    pub fn peek(&self) -> Option<&Utterance> { self.queue.front() }
    pub fn pending(&self) -> usize { self.queue.len() }
    /// Most recent utterances queued, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Utterance> { self.spoken.iter() }
    pub fn history_text(&self) -> Vec<&str> { self.spoken.iter().map(|u| u.text.as_str()).collect() }
}

impl Speaker for SpeechQueue {
    fn speak(&mut self, descriptions: &[NavDescription], mode: QueueMode) {
        if mode == QueueMode::Flush { self.queue.clear(); }
        for desc in descriptions.iter().filter(|d| !d.is_empty()) {
            let utterance = Utterance::from(desc);
            if self.transcript_size > 0 {
                if self.spoken.len() == self.transcript_size { self.spoken.pop_front(); }
                self.spoken.push_back(utterance.clone());
            }
            self.queue.push_back(utterance);
        }
        while self.max_size > 0 && self.queue.len() > self.max_size { self.queue.pop_front(); }
    }

    fn is_speaking(&self) -> bool { !self.queue.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_queue() {
        let mut queue = SpeechQueue::new(10);
        queue.speak(&[NavDescription::new("", "Hello", ""), NavDescription::default()], QueueMode::Queue);
        assert!(queue.is_speaking());
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.finish_current().unwrap().text, "Hello");
        assert!(!queue.is_speaking());
    }

    #[test]
    fn test_flush_drops_pending() {
        let mut queue = SpeechQueue::new(10);
        queue.speak(&[NavDescription::new("", "one", "")], QueueMode::Queue);
        queue.speak(&[NavDescription::new("", "two", "")], QueueMode::Flush);
        assert_eq!(queue.peek().unwrap().text, "two");
        assert_eq!(queue.history_text(), vec!["one", "two"]);
    }

    #[test]
    fn test_transcript_is_bounded() {
        let mut queue = SpeechQueue::with_transcript_size(0, 3);
        for word in ["one", "two", "three", "four", "five"] {
            queue.speak(&[NavDescription::new("", word, "")], QueueMode::Flush);
        }
        assert_eq!(queue.history_text(), vec!["three", "four", "five"]);
        assert_eq!(queue.history().count(), 3);

        let mut long_read = SpeechQueue::new(0);
        for i in 0..(DEFAULT_TRANSCRIPT_SIZE * 4) {
            long_read.speak(&[NavDescription::new("", i.to_string(), "")], QueueMode::Queue);
            long_read.finish_current();
        }
        assert_eq!(long_read.history().count(), DEFAULT_TRANSCRIPT_SIZE);
        assert_eq!(long_read.pending(), 0);
    }
}
