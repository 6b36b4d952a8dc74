//! Date helpers for filter values and analytics queries.

use chrono::NaiveDate;

/// ISO calendar date format used on the wire, in cookies and in URLs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a NaiveDate as "YYYY-MM-DD"
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a date string in "YYYY-MM-DD" format
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
}

/// An inclusive calendar range, start then end, exactly as the user picked it.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl DateRange {
    pub fn is_reversed(&self) -> bool {
        self.0 > self.1
    }

    /// The same range with start and end swapped if they were reversed.
    pub fn ordered(self) -> DateRange {
        if self.is_reversed() {
            DateRange(self.1, self.0)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_parse() {
        let date = NaiveDate::from_ymd_opt(2022, 10, 4).unwrap();
        let formatted = format_date(&date);
        assert_eq!(formatted, "2022-10-04");
        let parsed = parse_date(&formatted).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!(parse_date("20221004").is_err());
        assert!(parse_date("2022-13-01").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_ordered_swaps_reversed_range() {
        let early = NaiveDate::from_ymd_opt(2022, 10, 4).unwrap();
        let late = NaiveDate::from_ymd_opt(2022, 10, 10).unwrap();
        let range = DateRange(late, early);
        assert!(range.is_reversed());
        assert_eq!(range.ordered(), DateRange(early, late));
    }

    #[test]
    fn test_single_day_range() {
        let day = NaiveDate::from_ymd_opt(2022, 3, 15).unwrap();
        let range = DateRange(day, day);
        assert!(!range.is_reversed());
        assert_eq!(range.ordered(), range);
    }
}
