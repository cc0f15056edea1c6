//! Terminal: ANSI output, session management and drawing.
//!
//! - [`OutputBuffer`]: accumulates escape sequences for a single write
//! - [`TerminalSession`]: raw mode + alternate screen, restored on drop
//! - [`draw`]: composes a full frame of the [`crate::view::ScenarioView`]
//! - [`StyledWriterSink`]: a reveal sink that streams to any writer

mod color;
mod draw;
mod output;
mod session;
mod writer_sink;

pub use color::{Palette, Rgb};
pub use draw::{draw, BodyFit, DrawContext};
pub use output::OutputBuffer;
pub use session::{SessionConfig, TerminalSession};
pub use writer_sink::StyledWriterSink;
