use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::{EnumIter, IntoEnumIterator};

/// SEC form types offered by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
#[serde(try_from = "String", into = "String")]
pub enum ReportType {
    #[default]
    Form10K,
    Form10Q,
    Form8K,
    Form13FNT,
    Form13FHR,
    FormSC13G,
    FormSD,
}

impl TryFrom<String> for ReportType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ReportType::from_str(&s)
    }
}

impl From<ReportType> for String {
    fn from(report_type: ReportType) -> Self {
        report_type.to_string()
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::Form10K => write!(f, "10-K"),
            ReportType::Form10Q => write!(f, "10-Q"),
            ReportType::Form8K => write!(f, "8-K"),
            ReportType::Form13FNT => write!(f, "13F-NT"),
            ReportType::Form13FHR => write!(f, "13F-HR"),
            ReportType::FormSC13G => write!(f, "SC 13G"),
            ReportType::FormSD => write!(f, "SD"),
        }
    }
}

pub static REPORT_TYPES: Lazy<String> = Lazy::new(|| {
    ReportType::iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
});

impl ReportType {
    pub fn list_types() -> &'static str {
        &REPORT_TYPES
    }

    /// Quarterly reports are the only form type searched by quarter.
    pub fn is_quarterly(&self) -> bool {
        matches!(self, ReportType::Form10Q)
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<ReportType, String> {
        // "sc13g" and "SC  13G" are both accepted for the one label with a space
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_uppercase().as_str() {
            "10-K" => Ok(ReportType::Form10K),
            "10-Q" => Ok(ReportType::Form10Q),
            "8-K" => Ok(ReportType::Form8K),
            "13F-NT" => Ok(ReportType::Form13FNT),
            "13F-HR" => Ok(ReportType::Form13FHR),
            "SC 13G" | "SC13G" => Ok(ReportType::FormSC13G),
            "SD" => Ok(ReportType::FormSD),
            _ => Err(format!(
                "Unknown form type '{}'. Valid types: {}",
                s,
                ReportType::list_types()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back_to_the_same_variant() {
        for report_type in ReportType::iter() {
            assert_eq!(report_type.to_string().parse::<ReportType>(), Ok(report_type));
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("10-q".parse::<ReportType>(), Ok(ReportType::Form10Q));
        assert_eq!("sc 13g".parse::<ReportType>(), Ok(ReportType::FormSC13G));
        assert_eq!("13f-hr".parse::<ReportType>(), Ok(ReportType::Form13FHR));
    }

    #[test]
    fn unknown_label_lists_valid_types() {
        let err = "S-1".parse::<ReportType>().unwrap_err();
        assert!(err.contains("S-1"));
        assert!(err.contains("10-K, 10-Q, 8-K, 13F-NT, 13F-HR, SC 13G, SD"));
    }

    #[test]
    fn serializes_as_form_label() {
        let json = serde_json::to_string(&ReportType::FormSC13G).unwrap();
        assert_eq!(json, "\"SC 13G\"");
        let back: ReportType = serde_json::from_str("\"10-Q\"").unwrap();
        assert_eq!(back, ReportType::Form10Q);
    }

    #[test]
    fn only_10q_is_quarterly() {
        let quarterly: Vec<_> = ReportType::iter().filter(|t| t.is_quarterly()).collect();
        assert_eq!(quarterly, vec![ReportType::Form10Q]);
    }
}
