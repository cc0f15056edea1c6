//! Reveal: Paced, markup-aware text reveal.
//!
//! # Architecture
//!
//! ```text
//!  start(sink, text) ──▶ ┌──────────────┐  step()   ┌──────────────┐
//!                        │ RevealEngine │ ────────▶ │  RevealJob   │
//!  cancel(sink) ───────▶ │  (registry)  │           │ tokens+cursor│
//!                        └──────┬───────┘           └──────┬───────┘
//!                               │ one pacer thread          │ render(content)
//!                               │ per running job           ▼
//!                               └──────────────────▶ ┌──────────────┐
//!                                                    │  dyn Sink    │
//!                                                    └──────────────┘
//! ```
//!
//! A [`RevealJob`] is a pure state machine: each [`RevealJob::step`]
//! flushes any atomic markup at the cursor, appends at most one character,
//! and renders once. The [`RevealEngine`] owns the timing and guarantees at
//! most one running job per [`SinkId`].

mod engine;
mod job;
mod sink;

pub use engine::{JobHandle, JobState, RevealEngine};
pub use job::{RevealJob, Step};
pub use sink::{SharedSink, Sink, SinkId, TextSink};

/// Options shared by every job an engine starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealOptions {
    /// Treat `**…**` and `<…>` as atomic markup. When off, every character
    /// is paced and shown literally.
    pub preserve_markup: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            preserve_markup: true,
        }
    }
}
