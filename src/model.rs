//! The `parts` row, its validated write shape, and the path identifier.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

pub const INVALID_ID_MESSAGE: &str = "Invalid part ID format.";

/// One row of the `parts` table as returned to clients.
///
/// `part_id` is a `BIGSERIAL`; it is written as a JSON string so clients that
/// parse numbers as doubles do not lose precision.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Part {
    #[serde(serialize_with = "serialize_id")]
    pub part_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn serialize_id<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}

/// Mutable fields of a part after validation. Shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPart {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub price: Option<Decimal>,
    pub category: Option<String>,
}

impl NewPart {
    /// Builds a response row from submitted data; no timestamps are known.
    pub fn into_part(self, id: PartId) -> Part {
        Part {
            part_id: id.get(),
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            price: self.price,
            category: self.category,
            created_at: None,
            updated_at: None,
        }
    }

    /// True when `part` already holds exactly these values.
    pub fn matches(&self, part: &Part) -> bool {
        self.name == part.name
            && self.description == part.description
            && self.quantity == part.quantity
            && self.price == part.price
            && self.category == part.category
    }
}

/// Primary key taken from a `/api/parts/:id` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(i64);

impl PartId {
    pub fn new(id: i64) -> Self {
        PartId(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+$").expect("static pattern"))
}

impl FromStr for PartId {
    type Err = AppError;

    /// Accepts ASCII digits only. Values past `i64::MAX` are rejected the same way.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !id_pattern().is_match(s) {
            return Err(AppError::invalid_input(INVALID_ID_MESSAGE));
        }
        s.parse::<i64>()
            .map(PartId)
            .map_err(|_| AppError::invalid_input(INVALID_ID_MESSAGE))
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn part_id_accepts_digits() {
        assert_eq!("42".parse::<PartId>().unwrap(), PartId::new(42));
        assert_eq!("007".parse::<PartId>().unwrap(), PartId::new(7));
        assert_eq!("0".parse::<PartId>().unwrap(), PartId::new(0));
    }

    #[test]
    fn part_id_rejects_non_digits() {
        for raw in ["abc", "", "-1", "+1", "1.5", " 1", "1 ", "١٢", "99999999999999999999"] {
            let err = raw.parse::<PartId>().unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(ref m) if m == INVALID_ID_MESSAGE), "{raw}");
        }
    }

    #[test]
    fn part_serializes_id_as_string_and_price_as_number() {
        let part = Part {
            part_id: 9_007_199_254_740_993,
            name: "Bolt M3".into(),
            description: None,
            quantity: 5,
            price: Some(Decimal::from_str("0.10").unwrap()),
            category: None,
            created_at: None,
            updated_at: None,
        };
        let v = serde_json::to_value(&part).unwrap();
        assert_eq!(
            v,
            json!({
                "part_id": "9007199254740993",
                "name": "Bolt M3",
                "description": null,
                "quantity": 5,
                "price": 0.1,
                "category": null
            })
        );
    }

    #[test]
    fn absent_price_serializes_as_null() {
        let part = NewPart {
            name: "Washer".into(),
            description: Some("zinc".into()),
            quantity: 0,
            price: None,
            category: Some("hardware".into()),
        }
        .into_part(PartId::new(3));
        let v = serde_json::to_value(&part).unwrap();
        assert_eq!(v["price"], serde_json::Value::Null);
        assert_eq!(v["part_id"], "3");
        assert!(v.get("created_at").is_none());
    }
}
