//! Style: Converting accumulated markup into styled spans.
//!
//! The reveal sinks accumulate markup text. A terminal cannot interpret
//! tags, so this module walks the markup and produces runs of visible text
//! tagged with [`Modifiers`]. Tag characters never reach the display, even
//! when a tag is unterminated.

use bitflags::bitflags;

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use typewriter::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::ACCENT;
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Italic text
        const ITALIC = 0b0000_0010;
        /// Accent foreground color
        const ACCENT = 0b0000_0100;
    }
}

/// A run of visible text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    /// Visible text.
    pub text: String,
    /// Style applied to the whole run.
    pub modifiers: Modifiers,
}

impl StyledSpan {
    /// Create a new span.
    pub fn new(text: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            text: text.into(),
            modifiers,
        }
    }
}

const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
];

/// Parse markup into styled spans.
///
/// Supported: `<strong>`/`<b>` (bold, plus accent when the tag's style
/// mentions an accent color), `<em>`/`<i>` (italic), `<br>` (newline) and
/// the five basic entities. Anything else in angle brackets is dropped.
pub fn parse_spans(content: &str) -> Vec<StyledSpan> {
    let mut spans = SpanBuilder::default();
    let mut stack: Vec<Modifiers> = Vec::new();
    let mut pos = 0;

    while let Some(ch) = content[pos..].chars().next() {
        let rest = &content[pos..];
        let current = stack.last().copied().unwrap_or_default();

        match ch {
            '<' => {
                let Some(end) = rest.find('>') else {
                    // Unterminated tag: nothing after it is visible.
                    break;
                };
                apply_tag(&rest[1..end], &mut stack, &mut spans);
                pos += end + 1;
            }
            '&' => {
                if let Some((entity, decoded)) =
                    ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity))
                {
                    spans.push(*decoded, current);
                    pos += entity.len();
                } else {
                    spans.push('&', current);
                    pos += 1;
                }
            }
            _ => {
                spans.push(ch, current);
                pos += ch.len_utf8();
            }
        }
    }

    spans.finish()
}

/// Byte length of a trailing entity that is still being revealed.
///
/// `"a &am"` ends in the start of `&amp;`, so its last three bytes are not
/// yet displayable. A trailing `&` run that cannot grow into a known entity
/// is ordinary text and yields 0.
pub fn pending_entity_len(content: &str) -> usize {
    let Some(start) = content.rfind('&') else {
        return 0;
    };
    let tail = &content[start..];
    let partial = ENTITIES
        .iter()
        .any(|(entity, _)| entity.len() > tail.len() && entity.starts_with(tail));
    if partial {
        tail.len()
    } else {
        0
    }
}

/// Render content verbatim as a single unstyled span.
pub fn literal_spans(content: &str) -> Vec<StyledSpan> {
    if content.is_empty() {
        Vec::new()
    } else {
        vec![StyledSpan::new(content, Modifiers::empty())]
    }
}

/// Choose [`parse_spans`] or [`literal_spans`] by markup mode.
pub fn spans_for(content: &str, preserve_markup: bool) -> Vec<StyledSpan> {
    if preserve_markup {
        parse_spans(content)
    } else {
        literal_spans(content)
    }
}

/// Strip markup, keeping only the visible text.
pub fn plain_text(content: &str) -> String {
    parse_spans(content).into_iter().map(|span| span.text).collect()
}

fn apply_tag(body: &str, stack: &mut Vec<Modifiers>, spans: &mut SpanBuilder) {
    let body = body.trim();
    let (closing, body) = body
        .strip_prefix('/')
        .map_or((false, body), |rest| (true, rest.trim_start()));
    let name: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    let added = match name.as_str() {
        "strong" | "b" => {
            let mut m = Modifiers::BOLD;
            if body.contains("accent") {
                m |= Modifiers::ACCENT;
            }
            m
        }
        "em" | "i" => Modifiers::ITALIC,
        "br" => {
            if !closing {
                spans.push('\n', stack.last().copied().unwrap_or_default());
            }
            return;
        }
        _ => return,
    };

    if closing {
        stack.pop();
    } else {
        let current = stack.last().copied().unwrap_or_default();
        stack.push(current | added);
    }
}

/// Accumulates characters, merging runs with identical modifiers.
#[derive(Default)]
struct SpanBuilder {
    spans: Vec<StyledSpan>,
}

impl SpanBuilder {
    fn push(&mut self, ch: char, modifiers: Modifiers) {
        match self.spans.last_mut() {
            Some(last) if last.modifiers == modifiers => last.text.push(ch),
            _ => self.spans.push(StyledSpan::new(ch.to_string(), modifiers)),
        }
    }

    fn finish(self) -> Vec<StyledSpan> {
        self.spans
    }
}
