//! Inbound chart request

use serde::{Deserialize, Serialize};

/// A chart request as submitted by the UI layer.
///
/// Fields arrive as loose strings; the command layer is responsible for
/// presence checks and parsing them into typed values before the core runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRequest {
    pub symbol: String,
    pub graph_type: String,
    pub series_kind: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl ChartRequest {
    /// Start date with empty strings treated as absent.
    pub fn start(&self) -> Option<&str> {
        self.start_date.as_deref().filter(|s| !s.is_empty())
    }

    /// End date with empty strings treated as absent.
    pub fn end(&self) -> Option<&str> {
        self.end_date.as_deref().filter(|s| !s.is_empty())
    }
}
