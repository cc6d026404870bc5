//! Chart payload models

use serde::{Deserialize, Serialize};

/// Which chart style to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    Line,
    Bar,
}

impl GraphType {
    /// Parse the form/CLI value ("line" or "bar").
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "line" => Some(GraphType::Line),
            "bar" => Some(GraphType::Bar),
            _ => None,
        }
    }
}

/// Chart-ready payload produced by assembly.
///
/// The four price arrays and the label array are index-aligned with the
/// record slice they were built from, all the same length.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub title: String,
    pub graph_type: GraphType,
    pub labels: Vec<String>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl ChartData {
    pub fn point_count(&self) -> usize {
        self.labels.len()
    }
}
