use serde::{Deserialize, Serialize};

use super::quarter::Quarter;
use super::report::ReportType;

const YEAR_START: &str = "01-01";
const YEAR_END: &str = "12-31";

/// Filing date window sent to the backend as `after_date`/`before_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub after_date: String,
    pub before_date: String,
}

impl DateRange {
    /// Quarterly reports get the quarter's window; every other form type
    /// gets the whole calendar year. The year is not validated, so a
    /// malformed year comes back as a malformed date.
    pub fn derive(report_type: ReportType, year: &str, quarter: Quarter) -> Self {
        let (start, end) = if report_type.is_quarterly() {
            quarter.bounds()
        } else {
            (YEAR_START, YEAR_END)
        };

        DateRange {
            after_date: format!("{}-{}", year, start),
            before_date: format!("{}-{}", year, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn quarterly_report_uses_quarter_window() {
        let range = DateRange::derive(ReportType::Form10Q, "2023", Quarter::Q2);
        assert_eq!(range.after_date, "2023-04-01");
        assert_eq!(range.before_date, "2023-06-30");

        let range = DateRange::derive(ReportType::Form10Q, "2020", Quarter::Q4);
        assert_eq!(range.after_date, "2020-10-01");
        assert_eq!(range.before_date, "2020-12-31");
    }

    #[test]
    fn every_quarter_row_of_the_table() {
        let expected = [
            (Quarter::Q1, "2021-01-01", "2021-03-31"),
            (Quarter::Q2, "2021-04-01", "2021-06-30"),
            (Quarter::Q3, "2021-07-01", "2021-09-30"),
            (Quarter::Q4, "2021-10-01", "2021-12-31"),
        ];
        assert_eq!(Quarter::iter().count(), expected.len());

        for (quarter, (row_quarter, after, before)) in Quarter::iter().zip(expected) {
            assert_eq!(quarter, row_quarter);
            let range = DateRange::derive(ReportType::Form10Q, "2021", quarter);
            assert_eq!(range.after_date, after, "{}", quarter);
            assert_eq!(range.before_date, before, "{}", quarter);
        }
    }

    #[test]
    fn annual_report_ignores_quarter() {
        for quarter in Quarter::iter() {
            let range = DateRange::derive(ReportType::Form10K, "2022", quarter);
            assert_eq!(range.after_date, "2022-01-01");
            assert_eq!(range.before_date, "2022-12-31");
        }
    }

    #[test]
    fn every_non_quarterly_form_covers_full_year() {
        for report_type in ReportType::iter().filter(|t| !t.is_quarterly()) {
            let range = DateRange::derive(report_type, "2019", Quarter::Q3);
            assert_eq!(range.after_date, "2019-01-01", "{}", report_type);
            assert_eq!(range.before_date, "2019-12-31", "{}", report_type);
        }
    }

    #[test]
    fn q1_end_is_literal_even_in_leap_year() {
        let range = DateRange::derive(ReportType::Form10Q, "2024", Quarter::Q1);
        assert_eq!(range.before_date, "2024-03-31");
    }

    #[test]
    fn malformed_year_passes_through() {
        let range = DateRange::derive(ReportType::Form8K, "20x4", Quarter::Q1);
        assert_eq!(range.after_date, "20x4-01-01");
        assert_eq!(range.before_date, "20x4-12-31");
    }
}
