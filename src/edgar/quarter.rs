use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
pub enum Quarter {
    #[default]
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// First and last month-day of the quarter, as fixed literals.
    pub fn bounds(self) -> (&'static str, &'static str) {
        match self {
            Quarter::Q1 => ("01-01", "03-31"),
            Quarter::Q2 => ("04-01", "06-30"),
            Quarter::Q3 => ("07-01", "09-30"),
            Quarter::Q4 => ("10-01", "12-31"),
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quarter::Q1 => write!(f, "Q1"),
            Quarter::Q2 => write!(f, "Q2"),
            Quarter::Q3 => write!(f, "Q3"),
            Quarter::Q4 => write!(f, "Q4"),
        }
    }
}

impl FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "Q1" | "1" => Ok(Quarter::Q1),
            "Q2" | "2" => Ok(Quarter::Q2),
            "Q3" | "3" => Ok(Quarter::Q3),
            "Q4" | "4" => Ok(Quarter::Q4),
            _ => Err(format!("Unknown quarter '{}'. Valid quarters: Q1, Q2, Q3, Q4", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_or_without_prefix() {
        assert_eq!("q3".parse::<Quarter>(), Ok(Quarter::Q3));
        assert_eq!("4".parse::<Quarter>(), Ok(Quarter::Q4));
        assert!("Q5".parse::<Quarter>().is_err());
    }
}
