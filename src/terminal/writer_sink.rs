//! StyledWriterSink: Streams revealed content to a plain writer.

use super::output::OutputBuffer;
use crate::markup::{pending_entity_len, spans_for};
use crate::reveal::Sink;
use std::io::Write;
use tracing::warn;

/// A sink that appends newly visible characters to a writer.
///
/// Each render carries the whole accumulated content; only the visible
/// characters not yet printed are written, with ANSI styling for
/// emphasis when `styled` is set. An entity still being revealed is held
/// back until it decodes or the job completes. A render after completion,
/// or one that no longer extends the previous content, starts a new job.
pub struct StyledWriterSink<W: Write + Send> {
    out: W,
    content: String,
    printed: usize,
    completed: bool,
    preserve_markup: bool,
    styled: bool,
    frame: OutputBuffer,
}

impl<W: Write + Send> StyledWriterSink<W> {
    /// Create a sink writing to `out`.
    pub fn new(out: W, preserve_markup: bool, styled: bool) -> Self {
        Self {
            out,
            content: String::new(),
            printed: 0,
            completed: false,
            preserve_markup,
            styled,
            frame: OutputBuffer::with_capacity(256),
        }
    }

    /// Visible characters written so far.
    pub const fn printed(&self) -> usize {
        self.printed
    }

    /// Borrow the underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, settled: bool) {
        let held = if settled || !self.preserve_markup {
            0
        } else {
            pending_entity_len(&self.content)
        };
        let shown = &self.content[..self.content.len() - held];
        let spans = spans_for(shown, self.preserve_markup);
        let visible: usize = spans.iter().map(|s| s.text.chars().count()).sum();

        self.frame.clear();
        let mut skip = self.printed;
        for span in &spans {
            let len = span.text.chars().count();
            if skip >= len {
                skip -= len;
                continue;
            }
            let fresh: String = span.text.chars().skip(skip).collect();
            skip = 0;
            if self.styled && !span.modifiers.is_empty() {
                self.frame.set_modifiers(span.modifiers);
                self.frame.write_str(&fresh);
                self.frame.reset_attrs();
            } else {
                self.frame.write_str(&fresh);
            }
        }
        self.printed = self.printed.max(visible);

        if self.frame.is_empty() {
            return;
        }
        if let Err(error) = self.frame.flush_to(&mut self.out) {
            warn!(%error, "failed to write revealed content");
        }
    }
}

impl<W: Write + Send> Sink for StyledWriterSink<W> {
    fn render(&mut self, content: &str) {
        if self.completed || !content.starts_with(self.content.as_str()) {
            self.printed = 0;
            self.completed = false;
        }
        self.content.clear();
        self.content.push_str(content);
        self.emit(false);
    }

    fn complete(&mut self) {
        self.emit(true);
        self.completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::expand;
    use crate::reveal::{RevealJob, RevealOptions};

    fn feed(sink: &mut StyledWriterSink<Vec<u8>>, frames: &[&str]) {
        for frame in frames {
            sink.render(frame);
        }
    }

    #[test]
    fn test_plain_deltas() {
        let mut sink = StyledWriterSink::new(Vec::new(), true, false);
        feed(&mut sink, &["H", "Hi", "Hi!"]);
        assert_eq!(sink.get_ref(), b"Hi!");
        assert_eq!(sink.printed(), 3);
    }

    #[test]
    fn test_markup_never_printed() {
        let full = expand("a **bold** b", true);
        let mut sink = StyledWriterSink::new(Vec::new(), true, false);
        let mut content = String::new();
        for token in crate::markup::tokenize("a **bold** b", true) {
            token.push_to(&mut content);
            sink.render(&content);
        }
        assert_eq!(content, full);
        assert_eq!(String::from_utf8(sink.get_ref().clone()).unwrap(), "a bold b");
    }

    #[test]
    fn test_styled_output_renders_bold() {
        let mut sink = StyledWriterSink::new(Vec::new(), true, true);
        sink.render(&expand("Hi **there**", true));

        let mut parser = vt100::Parser::new(4, 40, 0);
        parser.process(sink.get_ref());
        let screen = parser.screen();
        assert_eq!(screen.contents().trim_end(), "Hi there");
        assert!(!screen.cell(0, 0).unwrap().bold());
        assert!(screen.cell(0, 3).unwrap().bold());
    }

    #[test]
    fn test_shrinking_content_restarts() {
        let mut sink = StyledWriterSink::new(Vec::new(), false, false);
        feed(&mut sink, &["abc", "x"]);
        assert_eq!(sink.get_ref(), b"abcx");
    }

    #[test]
    fn test_entity_printed_once() {
        let mut sink = StyledWriterSink::new(Vec::new(), true, false);
        let mut job = RevealJob::new("Forms &amp; Tables", RevealOptions::default());
        job.finish(&mut sink);
        assert_eq!(String::from_utf8(sink.get_ref().clone()).unwrap(), "Forms & Tables");
        assert_eq!(sink.printed(), "Forms & Tables".chars().count());
    }

    #[test]
    fn test_trailing_ampersand_flushed_on_complete() {
        let mut sink = StyledWriterSink::new(Vec::new(), true, false);
        let mut job = RevealJob::new("R&D &", RevealOptions::default());
        job.finish(&mut sink);
        assert_eq!(sink.get_ref(), b"R&D &");
    }

    #[test]
    fn test_next_job_restarts_printing() {
        let mut sink = StyledWriterSink::new(Vec::new(), true, false);
        RevealJob::new("one", RevealOptions::default()).finish(&mut sink);
        RevealJob::new("two", RevealOptions::default()).finish(&mut sink);
        assert_eq!(sink.get_ref(), b"onetwo");
        assert_eq!(sink.printed(), 3);

        RevealJob::new("t", RevealOptions::default()).finish(&mut sink);
        assert_eq!(sink.get_ref(), b"onetwot");
    }

    #[test]
    fn test_plain_mode_prints_source() {
        let mut sink = StyledWriterSink::new(Vec::new(), false, true);
        sink.render("<b>x</b>");
        assert_eq!(sink.get_ref(), b"<b>x</b>");
    }
}
