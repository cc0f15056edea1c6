//! RevealJob: The emission state machine, free of any timing.

use super::sink::Sink;
use super::RevealOptions;
use crate::markup::{tokenize, Token};

/// Outcome of one emission step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Content was appended and the sink rendered once.
    Emitted {
        /// Characters appended (0 or 1).
        chars: usize,
        /// Atomic tokens flushed before the character.
        atomics: usize,
    },
    /// The cursor was already at the end; nothing was rendered.
    Finished,
}

/// One reveal over an immutable token stream.
#[derive(Debug, Clone)]
pub struct RevealJob {
    tokens: Vec<Token>,
    cursor: usize,
    content: String,
}

impl RevealJob {
    /// Tokenize `text` and position the cursor at the start.
    pub fn new(text: &str, options: RevealOptions) -> Self {
        let tokens = tokenize(text, options.preserve_markup);
        Self {
            content: String::with_capacity(text.len()),
            tokens,
            cursor: 0,
        }
    }

    /// Run one emission step against `sink`.
    ///
    /// Consecutive atomic tokens at the cursor are appended in one burst,
    /// followed by at most one character, then the sink renders once. The
    /// step that reaches the end also marks the sink complete.
    pub fn step(&mut self, sink: &mut dyn Sink) -> Step {
        if self.is_finished() {
            return Step::Finished;
        }

        let mut atomics = 0;
        while let Some(Token::Atomic(span)) = self.tokens.get(self.cursor) {
            self.content.push_str(span);
            self.cursor += 1;
            atomics += 1;
        }

        let mut chars = 0;
        if let Some(Token::Char(ch)) = self.tokens.get(self.cursor) {
            self.content.push(*ch);
            self.cursor += 1;
            chars = 1;
        }

        sink.render(&self.content);
        if self.is_finished() {
            sink.complete();
        }
        Step::Emitted { chars, atomics }
    }

    /// Run every remaining step without pacing.
    pub fn finish(&mut self, sink: &mut dyn Sink) {
        while let Step::Emitted { .. } = self.step(sink) {}
    }

    /// Whether the cursor has reached the end of the token stream.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Content accumulated so far.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current cursor position in the token stream.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// The token stream.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
