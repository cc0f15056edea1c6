//! Actor Model: Message-passing concurrency for the interactive UI.
//!
//! This module implements a simple actor system using crossbeam channels:
//! - **Input Actor**: Polls terminal events, forwards to the app loop
//! - **Fetch Actor**: Runs backend requests on its own runtime
//! - **App Loop**: Coordinates between actors, drives the [`Controller`]
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │   App Loop   │
//!                                      │ (Controller) │
//! ┌──────────────┐    FetchRequest     │              │
//! │ Fetch Thread │ ◀────────────────── │              │
//! │   (tokio)    │ ──────────────────▶ │              │
//! └──────────────┘      AppEvent       └──────────────┘
//!                                            │ start/cancel
//!                                            ▼
//!                                      ┌──────────────┐
//!                                      │ RevealEngine │
//!                                      └──────────────┘
//! ```

mod app;
mod controller;
mod fetch;
mod input;
mod messages;

pub use app::{App, AppConfig};
pub use controller::{Action, Controller};
pub use fetch::FetchActor;
pub use input::InputActor;
pub use messages::{AppEvent, FetchRequest, InputEvent, KeyCode, KeyModifiers};
