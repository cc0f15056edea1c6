//! Scenario: The generator backend and its module catalog.
//!
//! - [`Module`]: the fixed catalog of CSA modules
//! - [`ModuleSelection`]: a module or the `Random` sentinel, resolved
//!   client-side before sending
//! - [`ScenarioClient`]: `POST /api/generate-scenario` and `GET /health`

mod client;
mod module;
mod response;

pub use client::ScenarioClient;
pub use module::{Module, ModuleSelection, RANDOM_LABEL};
pub use response::{HealthStatus, ScenarioRequest, ScenarioResponse};
