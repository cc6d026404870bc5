//! Error kinds surfaced by the chart pipeline

use thiserror::Error;

/// All failure modes of a chart request.
///
/// Not-found boundary dates are deliberately absent here: they degrade to the
/// sequence extrema inside the normalizer and never become an error.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A required request field was empty or missing.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Start date is on or after the end date.
    #[error("End date cannot come before start date")]
    InvalidRange,

    /// A boundary date string could not be parsed as YYYY-MM-DD.
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    DateParse(String),

    /// The fetched payload had no recognizable time-series structure
    /// (unknown symbol, rate-limit note, API error body).
    #[error("Could not find data for this query")]
    DataFormat,

    /// The external request itself failed (network, timeout, HTTP status).
    #[error("Request failed: {0}")]
    Fetch(String),

    /// The chart backend failed while drawing.
    #[error("Failed to render chart: {0}")]
    Render(String),
}

impl ChartError {
    /// Single flash-style message shown to the user.
    ///
    /// Fetch and payload failures collapse into the generic "no data" message
    /// so API error text never reaches the user; the detail stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            ChartError::Fetch(_) | ChartError::DataFormat => {
                "Could not find data for this query".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_detail_is_hidden_from_users() {
        let err = ChartError::Fetch("connection reset by peer".to_string());
        assert_eq!(err.user_message(), "Could not find data for this query");
    }

    #[test]
    fn field_and_range_errors_keep_their_message() {
        assert_eq!(
            ChartError::MissingField("symbol").user_message(),
            "symbol is required"
        );
        assert_eq!(
            ChartError::InvalidRange.user_message(),
            "End date cannot come before start date"
        );
    }
}
