use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::grading::engine::GradingReport;

/// A saved career roadmap as stored in `roadmaps.json`, grouped by user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub id: String,
    pub career: String,
    pub skills: Vec<String>,
    /// Free-form recommendation payload supplied by the client.
    #[serde(default)]
    pub recommendations: Option<Value>,
    /// Absent on roadmaps saved before grading was stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grading: Option<GradingReport>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
