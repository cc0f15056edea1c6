//! # Typewriter
//!
//! A terminal client for the CSA scenario generator.
//!
//! The client posts a module selection to the generator backend and reveals
//! the returned problem statement one character at a time, while inline
//! markup (emphasis spans, tags) appears instantly so it never visibly
//! "types".
//!
//! ## Core Concepts
//!
//! - **Tokenization**: text is split once into paced characters and atomic
//!   markup spans ([`markup::tokenize`])
//! - **Reveal jobs**: a cursor over the token stream, stepped by a pacer
//!   thread ([`reveal::RevealJob`])
//! - **Per-sink registry**: at most one running job per display target
//!   ([`reveal::RevealEngine`])
//! - **Actor model**: input, network and UI loop run on separate threads
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//! use typewriter::{RevealEngine, RevealOptions, SinkId, TextSink};
//!
//! let engine = RevealEngine::new(RevealOptions::default());
//! let sink = Arc::new(Mutex::new(TextSink::default()));
//! let job = engine.start(SinkId::new("problem"), sink.clone(), "a **bold** move", Duration::from_millis(25));
//! job.wait(None);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod config;
pub mod error;
pub mod logging;
pub mod markup;
pub mod reveal;
pub mod scenario;
pub mod terminal;
pub mod view;

// Re-exports for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use markup::{tokenize, Modifiers, StyledSpan, Token};
pub use reveal::{JobHandle, JobState, RevealEngine, RevealJob, RevealOptions, SharedSink, Sink, SinkId, Step, TextSink};
pub use scenario::{Module, ModuleSelection, ScenarioClient, ScenarioResponse};
pub use view::{Panel, ScenarioView, Screen};
