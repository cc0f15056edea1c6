//! View: The display shell around the reveal engine.
//!
//! The shell owns the named content targets of the result panel (module
//! label, tips label, three lists, the problem-statement sink), the two
//! collapsible panels and the screen state machine:
//!
//! ```text
//!  Selection ──generate──▶ Loading ──populate──▶ Result
//!      ▲                      │                    │
//!      └────────fail──────────┘◀───────reset───────┘
//! ```
//!
//! It is independent of the terminal; `terminal::draw` renders it.

mod export;
mod shell;

pub use export::{export_to, write_markdown};
pub use shell::{
    alert_message, Panel, ScenarioView, Screen, ALERT_HEADLINE, DEFAULT_MODULE_LABEL,
    NOT_AVAILABLE, NO_PROBLEM_STATEMENT, NO_TIPS, PROBLEM_SINK,
};
