use log::warn;
use serde::{Deserialize, Serialize};

use super::client::QueryParams;
use super::date_range::DateRange;
use super::quarter::Quarter;
use super::report::ReportType;

/// Newest year on the year picker, also the form's starting year.
pub const LATEST_YEAR: i32 = 2024;
pub const YEAR_CHOICES: i32 = 10;

/// Everything the user can set on the search form.
///
/// # JSON Format
/// ```json
/// {
///   "ticker": "AAPL",
///   "report_type": "10-Q",
///   "year": "2023",
///   "quarter": "Q2",
///   "include_amends": false,
///   "limit": 5,
///   "download_details": true
/// }
/// ```
///
/// `quarter` only matters when `report_type` is `10-Q`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub ticker: String,
    pub report_type: ReportType,
    pub year: String,
    pub quarter: Quarter,
    pub include_amends: bool,
    pub limit: Option<u64>,
    pub download_details: bool,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        SearchCriteria {
            ticker: String::new(),
            report_type: ReportType::Form10K,
            year: LATEST_YEAR.to_string(),
            quarter: Quarter::Q1,
            include_amends: false,
            limit: None,
            download_details: true,
        }
    }
}

impl SearchCriteria {
    pub fn date_range(&self) -> DateRange {
        DateRange::derive(self.report_type, &self.year, self.quarter)
    }

    /// Builds the outbound parameters, deriving the date window fresh.
    pub fn to_params(&self) -> QueryParams {
        let DateRange {
            after_date,
            before_date,
        } = self.date_range();

        QueryParams {
            ticker: self.ticker.clone(),
            report_type: self.report_type.to_string(),
            after_date,
            before_date,
            include_amends: self.include_amends,
            limit: self.limit,
            download_details: Some(self.download_details),
        }
    }
}

/// Years offered by the year picker, newest first.
pub fn year_choices() -> Vec<String> {
    (0..YEAR_CHOICES)
        .map(|i| (LATEST_YEAR - i).to_string())
        .collect()
}

/// Parses the free-text limit field.
///
/// Blank text means no limit. Otherwise an optional `+` and the leading
/// digits are used, so "12abc" gives 12 and "+5" gives 5. Text without
/// leading digits, zero, or a value past `u64::MAX` also means no limit.
pub fn parse_limit(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        warn!("Ignoring non-numeric limit: {}", trimmed);
        return None;
    }

    match digits.parse::<u64>() {
        Ok(0) => {
            warn!("Ignoring limit of zero");
            None
        }
        Ok(limit) => Some(limit),
        Err(_) => {
            warn!("Ignoring limit too large to send: {}", digits);
            None
        }
    }
}
