//! Wire types for the generator backend.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /api/generate-scenario`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    /// Exact module name.
    pub module: String,
}

/// A generated scenario.
///
/// Every field is optional on the wire; list fields that are missing,
/// `null` or not arrays deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResponse {
    /// Module the scenario was generated for.
    #[serde(default)]
    pub module_name: Option<String>,
    /// Problem statement, possibly with `**emphasis**`.
    #[serde(default)]
    pub problem_statement: Option<String>,
    /// Free-text tips.
    #[serde(default)]
    pub pro_tips: Option<String>,
    /// Hints, in order.
    #[serde(default, deserialize_with = "lenient_list")]
    pub hints: Option<Vec<String>>,
    /// Guided steps, in order.
    #[serde(default, deserialize_with = "lenient_list")]
    pub guided_steps: Option<Vec<String>>,
    /// Theoretical references, in order.
    #[serde(default, deserialize_with = "lenient_list")]
    pub theoretical_references: Option<Vec<String>>,
    /// Backend-reported failure; aborts rendering when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScenarioResponse {
    /// The backend error, if one was reported.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    /// Liveness, `"active"` when up.
    pub status: String,
    /// Service name.
    pub service: String,
}

/// Error body of a non-success response.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// The detail as display text; validation errors arrive as arrays.
    pub(crate) fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::String(_) | Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        ),
        _ => None,
    })
}
