//! Token: The unit of a paced reveal.
//!
//! Text is scanned once, left to right:
//!
//! ```text
//!   "a**b**c<br>"
//!    │└──┬──┘│└─┬─┘
//!    │   │   │  └── Atomic("<br>")           tag literal
//!    │   │   └───── Char('c')
//!    │   └───────── Atomic("<strong …>b</strong>")   rewritten emphasis
//!    └───────────── Char('a')
//! ```
//!
//! An unterminated tag (`<` with no later `>`) swallows the rest of the
//! input as one atomic token.

/// Opening tag emitted for a `**…**` emphasis span.
pub const EMPHASIS_OPEN: &str = r#"<strong style="color: var(--accent-cyan); font-weight: 600;">"#;

/// Closing tag emitted for a `**…**` emphasis span.
pub const EMPHASIS_CLOSE: &str = "</strong>";

const EMPHASIS_MARKER: &str = "**";

/// One unit of the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A single display character, revealed after one pacing interval.
    Char(char),
    /// A markup span emitted in full, without consuming an interval.
    Atomic(String),
}

impl Token {
    /// Whether this token is emitted instantly.
    #[inline]
    pub const fn is_atomic(&self) -> bool {
        matches!(self, Self::Atomic(_))
    }

    /// Append the token's text to `out`.
    #[inline]
    pub fn push_to(&self, out: &mut String) {
        match self {
            Self::Char(ch) => out.push(*ch),
            Self::Atomic(span) => out.push_str(span),
        }
    }
}

/// Split `text` into reveal tokens.
///
/// With `preserve_markup` off every character is a [`Token::Char`],
/// including `*`, `<` and `>`.
pub fn tokenize(text: &str, preserve_markup: bool) -> Vec<Token> {
    if !preserve_markup {
        return text.chars().map(Token::Char).collect();
    }

    let mut tokens = Vec::with_capacity(text.len());
    let mut pos = 0;

    while let Some(ch) = text[pos..].chars().next() {
        let rest = &text[pos..];

        if let Some((span, consumed)) = emphasis_span(rest) {
            tokens.push(Token::Atomic(span));
            pos += consumed;
            continue;
        }

        if ch == '<' {
            // Up to and including the next '>', or everything left.
            let end = rest.find('>').map_or(rest.len(), |i| i + 1);
            tokens.push(Token::Atomic(rest[..end].to_string()));
            pos += end;
            continue;
        }

        tokens.push(Token::Char(ch));
        pos += ch.len_utf8();
    }

    tokens
}

/// Concatenate the tokens of `text` into the content a completed reveal shows.
pub fn expand(text: &str, preserve_markup: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for token in tokenize(text, preserve_markup) {
        token.push_to(&mut out);
    }
    out
}

/// Match a `**inner**` span at the start of `rest`.
///
/// The closing marker is the nearest one; the inner text may be empty but
/// may not cross a line break. Returns the rewritten span and the number of
/// bytes consumed.
fn emphasis_span(rest: &str) -> Option<(String, usize)> {
    let body = rest.strip_prefix(EMPHASIS_MARKER)?;
    let close = body.find(EMPHASIS_MARKER)?;
    let inner = &body[..close];

    if inner.contains(is_line_break) {
        return None;
    }

    let mut span = String::with_capacity(EMPHASIS_OPEN.len() + inner.len() + EMPHASIS_CLOSE.len());
    span.push_str(EMPHASIS_OPEN);
    span.push_str(inner);
    span.push_str(EMPHASIS_CLOSE);

    Some((span, EMPHASIS_MARKER.len() * 2 + inner.len()))
}

const fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong(inner: &str) -> Token {
        Token::Atomic(format!("{EMPHASIS_OPEN}{inner}{EMPHASIS_CLOSE}"))
    }

    #[test]
    fn test_plain_text_is_one_token_per_char() {
        let tokens = tokenize("héllo", true);
        assert_eq!(
            tokens,
            vec![
                Token::Char('h'),
                Token::Char('é'),
                Token::Char('l'),
                Token::Char('l'),
                Token::Char('o'),
            ]
        );
    }

    #[test]
    fn test_emphasis_is_single_atomic_token() {
        let tokens = tokenize("a**b**c", true);
        assert_eq!(tokens, vec![Token::Char('a'), strong("b"), Token::Char('c')]);
    }

    #[test]
    fn test_emphasis_rewrite_matches_accent_span() {
        let tokens = tokenize("**Hi** there", true);
        assert_eq!(
            tokens[0],
            Token::Atomic(
                r#"<strong style="color: var(--accent-cyan); font-weight: 600;">Hi</strong>"#
                    .to_string()
            )
        );
        assert_eq!(tokens.len(), 1 + " there".len());
    }

    #[test]
    fn test_empty_emphasis() {
        assert_eq!(tokenize("****", true), vec![strong("")]);
    }

    #[test]
    fn test_emphasis_uses_nearest_closing_marker() {
        let tokens = tokenize("**a** and **b**", true);
        assert_eq!(tokens.first(), Some(&strong("a")));
        assert_eq!(tokens.last(), Some(&strong("b")));
        assert_eq!(tokens.len(), 1 + " and ".len() + 1);
    }

    #[test]
    fn test_triple_star_keeps_leading_star_inside() {
        assert_eq!(tokenize("***a**", true), vec![strong("*a")]);
    }

    #[test]
    fn test_unclosed_emphasis_is_literal() {
        let tokens = tokenize("**oops", true);
        assert_eq!(tokens.len(), 6);
        assert!(tokens.iter().all(|t| !t.is_atomic()));
    }

    #[test]
    fn test_emphasis_does_not_cross_newline() {
        let tokens = tokenize("**a\nb**", true);
        assert!(tokens.iter().all(|t| !t.is_atomic()));
        assert_eq!(tokens.len(), 7);
    }

    #[test]
    fn test_tag_literal_is_atomic() {
        let tokens = tokenize("x<br>y", true);
        assert_eq!(
            tokens,
            vec![Token::Char('x'), Token::Atomic("<br>".into()), Token::Char('y')]
        );
    }

    #[test]
    fn test_consecutive_tags_are_separate_atomics() {
        let tokens = tokenize("<em><b>", true);
        assert_eq!(
            tokens,
            vec![Token::Atomic("<em>".into()), Token::Atomic("<b>".into())]
        );
    }

    #[test]
    fn test_unterminated_tag_swallows_rest() {
        let tokens = tokenize("ok<br", true);
        assert_eq!(
            tokens,
            vec![Token::Char('o'), Token::Char('k'), Token::Atomic("<br".into())]
        );
    }

    #[test]
    fn test_stray_closing_bracket_is_a_char() {
        assert_eq!(tokenize("a>b", true).len(), 3);
    }

    #[test]
    fn test_plain_mode_paces_markup() {
        let tokens = tokenize("a**b**<i>", false);
        assert_eq!(tokens.len(), 9);
        assert!(tokens.iter().all(|t| !t.is_atomic()));
    }

    #[test]
    fn test_expand_round_trips_plain_text() {
        assert_eq!(expand("no markup here", true), "no markup here");
        assert_eq!(
            expand("**Hi** there", true),
            format!("{EMPHASIS_OPEN}Hi{EMPHASIS_CLOSE} there")
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("", true).is_empty());
    }
}
