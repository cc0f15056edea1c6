//! Markup: Tokenizing and styling the small inline markup subset.
//!
//! Problem statements may carry Markdown-style emphasis (`**bold**`) and
//! literal tags (`<br>`). This module provides:
//! - [`tokenize`]: splits text into paced characters and atomic markup spans
//! - [`parse_spans`]: turns accumulated markup into styled terminal spans
//!
//! # Example
//!
//! ```rust,ignore
//! use typewriter::markup::{tokenize, Token};
//!
//! let tokens = tokenize("a**b**c", true);
//! assert_eq!(tokens.len(), 3);
//! ```

mod style;
mod token;

pub use style::{
    literal_spans, parse_spans, pending_entity_len, plain_text, spans_for, Modifiers, StyledSpan,
};
pub use token::{expand, tokenize, Token, EMPHASIS_CLOSE, EMPHASIS_OPEN};
