use log::{debug, info};
use serde_json::Value;

use crate::core::types::FilingBackend;
use crate::edgar::client::QueryError;
use crate::edgar::quarter::Quarter;
use crate::edgar::query::{parse_limit, SearchCriteria};
use crate::edgar::report::ReportType;

pub const SUBMIT_LABEL: &str = "Fetch Filings";
pub const FETCHING_LABEL: &str = "Fetching...";

#[derive(Debug)]
pub enum Submit {
    /// The backend answered; the payload is now the displayed response.
    Received,
    /// The query failed; whatever was displayed before stays displayed.
    Failed(QueryError),
    /// A request was already in flight, nothing was sent.
    Busy,
}

/// Holds the form's in-flight flag up; lowering it on drop covers a
/// submit future that is dropped before the backend answers.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        InFlight(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// State behind the search form: the editable criteria, the raw limit text,
/// the last payload and whether a request is in flight.
#[derive(Debug, Default)]
pub struct FormState {
    criteria: SearchCriteria,
    limit_input: String,
    response: Option<Value>,
    last_error: Option<QueryError>,
    loading: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_criteria(criteria: SearchCriteria) -> Self {
        let limit_input = criteria.limit.map(|l| l.to_string()).unwrap_or_default();
        Self {
            criteria,
            limit_input,
            ..Self::default()
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn set_ticker(&mut self, ticker: &str) {
        self.criteria.ticker = ticker.to_string();
    }

    pub fn set_report_type(&mut self, report_type: ReportType) {
        self.criteria.report_type = report_type;
    }

    pub fn set_report_type_label(&mut self, label: &str) -> Result<(), String> {
        self.criteria.report_type = label.parse()?;
        Ok(())
    }

    pub fn set_year(&mut self, year: &str) {
        self.criteria.year = year.to_string();
    }

    pub fn set_quarter(&mut self, quarter: Quarter) {
        self.criteria.quarter = quarter;
    }

    pub fn toggle_include_amends(&mut self) -> bool {
        self.criteria.include_amends = !self.criteria.include_amends;
        self.criteria.include_amends
    }

    pub fn toggle_download_details(&mut self) -> bool {
        self.criteria.download_details = !self.criteria.download_details;
        self.criteria.download_details
    }

    pub fn set_limit_input(&mut self, input: &str) {
        self.limit_input = input.to_string();
    }

    pub fn limit_input(&self) -> &str {
        &self.limit_input
    }

    /// Back to a fresh form. The last response is kept on screen.
    pub fn reset(&mut self) {
        self.criteria = SearchCriteria::default();
        self.limit_input.clear();
    }

    pub fn quarter_visible(&self) -> bool {
        self.criteria.report_type.is_quarterly()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            FETCHING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn response(&self) -> Option<&Value> {
        self.response.as_ref()
    }

    pub fn last_error(&self) -> Option<&QueryError> {
        self.last_error.as_ref()
    }

    pub fn render_response(&self) -> Option<String> {
        self.response
            .as_ref()
            .and_then(|value| serde_json::to_string_pretty(value).ok())
    }

    /// Criteria as they will be sent, with the limit text parsed.
    pub fn snapshot(&self) -> SearchCriteria {
        SearchCriteria {
            limit: parse_limit(&self.limit_input),
            ..self.criteria.clone()
        }
    }

    pub async fn submit<B>(&mut self, backend: &B) -> Submit
    where
        B: FilingBackend + ?Sized,
    {
        if self.loading {
            debug!("Submit ignored, a request is already in flight");
            return Submit::Busy;
        }

        let params = self.snapshot().to_params();
        info!(
            "Searching {} filings for '{}' between {} and {}",
            params.report_type, params.ticker, params.after_date, params.before_date
        );

        let in_flight = InFlight::raise(&mut self.loading);
        let result = backend.fetch_filings(&params).await;
        drop(in_flight);

        match result {
            Ok(payload) => {
                self.response = Some(payload);
                self.last_error = None;
                Submit::Received
            }
            Err(e) => {
                let outcome = Submit::Failed(e.clone());
                self.last_error = Some(e);
                outcome
            }
        }
    }
}
