use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Academic term of a course offering or timetable
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Term {
    #[sea_orm(string_value = "SPRING")]
    Spring,
    #[sea_orm(string_value = "SUMMER")]
    Summer,
    #[sea_orm(string_value = "FALL")]
    Fall,
    #[sea_orm(string_value = "WINTER")]
    Winter,
}

impl Term {
    pub fn as_str(&self) -> &'static str {
        match self {
            Term::Spring => "SPRING",
            Term::Summer => "SUMMER",
            Term::Fall => "FALL",
            Term::Winter => "WINTER",
        }
    }

    /// Term code used by the registration site's search parameters
    pub fn sugang_code(&self) -> &'static str {
        match self {
            Term::Spring => "U000200001U000300001",
            Term::Summer => "U000200001U000300002",
            Term::Fall => "U000200002U000300001",
            Term::Winter => "U000200002U000300002",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPRING" => Ok(Term::Spring),
            "SUMMER" => Ok(Term::Summer),
            "FALL" => Ok(Term::Fall),
            "WINTER" => Ok(Term::Winter),
            other => Err(format!("Unknown term: {}", other)),
        }
    }
}

/// Day of week of a weekly course time slot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    #[sea_orm(string_value = "MONDAY")]
    Monday,
    #[sea_orm(string_value = "TUESDAY")]
    Tuesday,
    #[sea_orm(string_value = "WEDNESDAY")]
    Wednesday,
    #[sea_orm(string_value = "THURSDAY")]
    Thursday,
    #[sea_orm(string_value = "FRIDAY")]
    Friday,
    #[sea_orm(string_value = "SATURDAY")]
    Saturday,
    #[sea_orm(string_value = "SUNDAY")]
    Sunday,
}

impl Weekday {
    /// Single-character Korean day token (월, 화, ...)
    pub fn from_korean(c: char) -> Option<Self> {
        match c {
            '월' => Some(Weekday::Monday),
            '화' => Some(Weekday::Tuesday),
            '수' => Some(Weekday::Wednesday),
            '목' => Some(Weekday::Thursday),
            '금' => Some(Weekday::Friday),
            '토' => Some(Weekday::Saturday),
            '일' => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Three-letter English abbreviation, case-insensitive
    pub fn from_english(abbr: &str) -> Option<Self> {
        match abbr.to_ascii_lowercase().as_str() {
            "mon" => Some(Weekday::Monday),
            "tue" => Some(Weekday::Tuesday),
            "wed" => Some(Weekday::Wednesday),
            "thu" => Some(Weekday::Thursday),
            "fri" => Some(Weekday::Friday),
            "sat" => Some(Weekday::Saturday),
            "sun" => Some(Weekday::Sunday),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_from_str() {
        assert_eq!("fall".parse::<Term>().unwrap(), Term::Fall);
        assert_eq!(" Spring ".parse::<Term>().unwrap(), Term::Spring);
        assert!("autumn".parse::<Term>().is_err());
    }

    #[test]
    fn test_term_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Term::Winter).unwrap(), "\"WINTER\"");
        let t: Term = serde_json::from_str("\"SUMMER\"").unwrap();
        assert_eq!(t, Term::Summer);
    }

    #[test]
    fn test_weekday_tokens() {
        assert_eq!(Weekday::from_korean('수'), Some(Weekday::Wednesday));
        assert_eq!(Weekday::from_korean('x'), None);
        assert_eq!(Weekday::from_english("THU"), Some(Weekday::Thursday));
        assert_eq!(Weekday::from_english("Sun"), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_english("Mo"), None);
    }
}
