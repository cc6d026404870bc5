//! Date range validation for chart requests

use crate::models::record::parse_boundary_date;
use crate::utils::errors::ChartError;

/// Check that a requested date range is usable.
///
/// An absent or empty side leaves the range open and is always valid. With
/// both sides present the start must be strictly before the end; a
/// single-day range is rejected. Every side that IS present must parse,
/// even when the other is open, so a malformed date surfaces as a
/// `DateParse` error here instead of after the external fetch; that error
/// is distinct from an inverted range.
pub fn is_valid_range(start: Option<&str>, end: Option<&str>) -> Result<bool, ChartError> {
    let start = start
        .filter(|s| !s.is_empty())
        .map(parse_boundary_date)
        .transpose()?;
    let end = end
        .filter(|s| !s.is_empty())
        .map(parse_boundary_date)
        .transpose()?;

    match (start, end) {
        (Some(start), Some(end)) => Ok(start < end),
        _ => Ok(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_sides_are_valid() {
        assert!(is_valid_range(None, None).unwrap());
        assert!(is_valid_range(Some(""), Some("2023-01-01")).unwrap());
        assert!(is_valid_range(Some("2023-01-01"), None).unwrap());
    }

    #[test]
    fn equal_dates_are_invalid() {
        assert!(!is_valid_range(Some("2023-01-01"), Some("2023-01-01")).unwrap());
    }

    #[test]
    fn inverted_range_is_invalid() {
        assert!(!is_valid_range(Some("2023-01-02"), Some("2023-01-01")).unwrap());
    }

    #[test]
    fn ordered_range_is_valid() {
        assert!(is_valid_range(Some("2023-01-01"), Some("2023-01-02")).unwrap());
    }

    #[test]
    fn malformed_date_is_a_parse_error_not_an_invalid_range() {
        assert!(matches!(
            is_valid_range(Some("01/02/2023"), Some("2023-01-02")),
            Err(ChartError::DateParse(_))
        ));
    }

    #[test]
    fn malformed_date_fails_even_with_the_other_side_open() {
        assert!(matches!(
            is_valid_range(Some("02-01-2023"), None),
            Err(ChartError::DateParse(_))
        ));
        assert!(matches!(
            is_valid_range(None, Some("not-a-date")),
            Err(ChartError::DateParse(_))
        ));
    }
}
