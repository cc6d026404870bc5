//! Time-series granularities and normalized price records

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::utils::errors::ChartError;

/// Granularity of the requested time series.
///
/// Determines the Alpha Vantage query function, the shape of the raw date
/// keys, the boundary-matching strategy, and the axis-label strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Intraday,
    Daily,
    Weekly,
    Monthly,
}

impl SeriesKind {
    /// Parse the form/CLI value ("intraday", "daily", "weekly", "monthly").
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "intraday" => Some(SeriesKind::Intraday),
            "daily" => Some(SeriesKind::Daily),
            "weekly" => Some(SeriesKind::Weekly),
            "monthly" => Some(SeriesKind::Monthly),
            _ => None,
        }
    }

    /// Alpha Vantage `function` query parameter for this granularity.
    pub fn query_function(&self) -> &'static str {
        match self {
            SeriesKind::Intraday => "TIME_SERIES_INTRADAY",
            SeriesKind::Daily => "TIME_SERIES_DAILY",
            SeriesKind::Weekly => "TIME_SERIES_WEEKLY",
            SeriesKind::Monthly => "TIME_SERIES_MONTHLY",
        }
    }

    /// Parse a raw date key into a structured timestamp.
    ///
    /// Intraday keys carry a time of day ("2023-01-01 09:30:00"); all other
    /// granularities are plain dates, parsed at midnight so one timestamp
    /// type covers every kind.
    pub fn parse_timestamp(&self, key: &str) -> Option<NaiveDateTime> {
        match self {
            SeriesKind::Intraday => {
                NaiveDateTime::parse_from_str(key, "%Y-%m-%d %H:%M:%S").ok()
            }
            _ => NaiveDate::parse_from_str(key, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
        }
    }
}

/// One normalized OHLC data point.
///
/// `key` preserves the raw date string from the API response; it is what
/// boundary matching searches and what chart titles fall back to. The parsed
/// `timestamp` is the sort key. `high >= low` is not validated here;
/// garbage from the API passes through unchanged.
#[derive(Debug, Clone)]
pub struct Record {
    pub key: String,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Parse a user-supplied boundary date, never defaulting on bad input.
pub fn parse_boundary_date(value: &str) -> Result<NaiveDate, ChartError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ChartError::DateParse(value.to_string()))
}
