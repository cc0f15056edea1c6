//! Sink: Display targets that receive revealed content.

use std::fmt;
use std::sync::{Arc, Mutex};

/// A display target for revealed content.
///
/// Each call carries the full accumulated content of the running job, so a
/// sink can simply replace what it shows.
pub trait Sink: Send {
    /// Show `content`.
    fn render(&mut self, content: &str);

    /// The last render carried the job's complete content.
    fn complete(&mut self) {}
}

/// A sink shared between the engine's pacer thread and its owner.
pub type SharedSink = Arc<Mutex<dyn Sink>>;

/// Identity of a display target in the engine's registry.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SinkId(Arc<str>);

impl SinkId {
    /// Create an identity from a target name.
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// The target name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SinkId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Debug for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SinkId({})", self.0)
    }
}

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An in-memory sink holding the latest rendered content.
#[derive(Debug, Default, Clone)]
pub struct TextSink {
    content: String,
    renders: u64,
}

impl TextSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The content of the last render.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of renders received so far.
    ///
    /// Useful as a cheap change counter for redraw decisions.
    pub const fn renders(&self) -> u64 {
        self.renders
    }
}

impl Sink for TextSink {
    fn render(&mut self, content: &str) {
        self.content.clear();
        self.content.push_str(content);
        self.renders += 1;
    }
}
