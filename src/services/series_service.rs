//! Normalization of raw Alpha Vantage payloads into sorted, range-filtered
//! OHLC records.
//!
//! The payload is loosely keyed: the time series sits under a key like
//! "Time Series (Daily)" or "Time Series (15min)", and every field value is a
//! string-encoded number under a numbered name ("1. open", ...). Everything
//! here converts that into fixed-shape `Record`s up front so nothing further
//! down the pipeline touches a dynamic lookup.

use chrono::Duration;
use serde_json::{Map, Value};

use crate::models::record::{parse_boundary_date, Record, SeriesKind};
use crate::utils::errors::ChartError;

const FIELD_OPEN: &str = "1. open";
const FIELD_HIGH: &str = "2. high";
const FIELD_LOW: &str = "3. low";
const FIELD_CLOSE: &str = "4. close";

/// Find the keyed time-series object inside a full API payload.
///
/// Error payloads (unknown symbol, rate-limit notes) carry no such key and
/// come back as `DataFormat`, which the user sees as "no data for this query".
pub fn extract_series(payload: &Value) -> Result<&Map<String, Value>, ChartError> {
    payload
        .as_object()
        .and_then(|root| root.iter().find(|(key, _)| key.contains("Time Series")))
        .and_then(|(_, series)| series.as_object())
        .ok_or(ChartError::DataFormat)
}

/// Convert the raw keyed mapping into records sorted ascending by timestamp
/// and sliced to the requested date range.
///
/// Boundary dates that parse but match nothing silently widen to the
/// sequence extrema; malformed boundary dates are a `DateParse` error.
pub fn normalize(
    raw: &Map<String, Value>,
    kind: SeriesKind,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Vec<Record>, ChartError> {
    let mut records = raw
        .iter()
        .map(|(key, fields)| parse_record(key, fields, kind))
        .collect::<Result<Vec<Record>, ChartError>>()?;

    // Stable sort on the parsed timestamp, so duplicate timestamps keep
    // their incoming order. The raw keys are zero-padded ISO strings, so
    // this agrees with lexical order; structured comparison is used anyway.
    records.sort_by_key(|record| record.timestamp);

    let start_index = match start_date {
        Some(date) => locate(&records, kind, date)?.unwrap_or(0),
        None => 0,
    };
    // A found end match resolves to the index after it, keeping the matched
    // record inside the half-open slice.
    let end_index = match end_date {
        Some(date) => locate(&records, kind, date)?
            .map(|index| index + 1)
            .unwrap_or(records.len()),
        None => records.len(),
    };

    if start_index >= end_index {
        return Ok(Vec::new());
    }
    records.truncate(end_index);
    records.drain(..start_index);
    Ok(records)
}

/// Locate the record index matching a requested boundary date.
///
/// `Ok(None)` means no match; the caller degrades to the sequence extremum.
fn locate(
    records: &[Record],
    kind: SeriesKind,
    date: &str,
) -> Result<Option<usize>, ChartError> {
    let requested = parse_boundary_date(date)?;

    let index = match kind {
        SeriesKind::Weekly => {
            // Weekly rows anchor on week-ending dates, so an exact hit is
            // unlikely. Scan day offsets -3 through +3, in that order.
            let mut found = None;
            'window: for offset in -3i64..=3 {
                let needle = (requested + Duration::days(offset))
                    .format("%Y-%m-%d")
                    .to_string();
                for (i, record) in records.iter().enumerate() {
                    if record.key.contains(&needle) {
                        found = Some(i);
                        break 'window;
                    }
                }
            }
            found
        }
        SeriesKind::Monthly => {
            // Monthly rows land on arbitrary month-end days; match on the
            // year-month alone.
            let needle = requested.format("%Y-%m").to_string();
            records.iter().position(|record| record.key.contains(&needle))
        }
        SeriesKind::Intraday | SeriesKind::Daily => {
            let needle = requested.format("%Y-%m-%d").to_string();
            records.iter().position(|record| record.key.contains(&needle))
        }
    };

    Ok(index)
}

/// Parse one key/field-map pair into a fixed-shape record, failing fast on
/// any missing or non-numeric field.
fn parse_record(key: &str, fields: &Value, kind: SeriesKind) -> Result<Record, ChartError> {
    let fields = fields.as_object().ok_or(ChartError::DataFormat)?;
    let timestamp = kind.parse_timestamp(key).ok_or(ChartError::DataFormat)?;

    Ok(Record {
        key: key.to_string(),
        timestamp,
        open: read_price(fields, FIELD_OPEN)?,
        high: read_price(fields, FIELD_HIGH)?,
        low: read_price(fields, FIELD_LOW)?,
        close: read_price(fields, FIELD_CLOSE)?,
    })
}

fn read_price(fields: &Map<String, Value>, name: &str) -> Result<f64, ChartError> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .ok_or(ChartError::DataFormat)
}
