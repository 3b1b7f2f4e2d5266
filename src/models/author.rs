//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Author record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    /// Date of death ("Died")
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "Last, First" as shown in lists
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// "(1920-01-02 - 1992-04-06)" style lifespan, empty when both dates are unknown
    pub fn lifespan(&self) -> String {
        match (self.date_of_birth, self.date_of_death) {
            (None, None) => String::new(),
            (birth, death) => format!(
                "({} - {})",
                birth.map(|d| d.to_string()).unwrap_or_default(),
                death.map(|d| d.to_string()).unwrap_or_default()
            ),
        }
    }
}

/// Author payload (every field of the record except the id)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AuthorIn {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub date_of_death: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(birth: Option<NaiveDate>, death: Option<NaiveDate>) -> Author {
        Author {
            id: 1,
            first_name: "Ursula".to_string(),
            last_name: "Le Guin".to_string(),
            date_of_birth: birth,
            date_of_death: death,
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(author(None, None).display_name(), "Le Guin, Ursula");
    }

    #[test]
    fn test_lifespan() {
        assert_eq!(author(None, None).lifespan(), "");
        let birth = NaiveDate::from_ymd_opt(1929, 10, 21);
        let death = NaiveDate::from_ymd_opt(2018, 1, 22);
        assert_eq!(author(birth, death).lifespan(), "(1929-10-21 - 2018-01-22)");
        assert_eq!(author(birth, None).lifespan(), "(1929-10-21 - )");
    }

    #[test]
    fn test_payload_validation() {
        let payload: AuthorIn =
            serde_json::from_str(r#"{"first_name":"J","last_name":"Doe"}"#).unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.date_of_birth.is_none());

        let empty: AuthorIn =
            serde_json::from_str(r#"{"first_name":"","last_name":"Doe"}"#).unwrap();
        assert!(empty.validate().is_err());
    }
}
