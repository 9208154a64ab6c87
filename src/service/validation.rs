//! Parse-and-validate for part request bodies.

use crate::error::AppError;
use crate::model::NewPart;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

pub const EMPTY_NAME_MESSAGE: &str = "Part name cannot be empty.";
pub const QUANTITY_MESSAGE: &str = "Quantity must be a non-negative number.";
pub const PRICE_MESSAGE: &str = "Price must be a non-negative number or empty.";
pub const PRICE_RANGE_MESSAGE: &str = "Price is too large.";

pub struct PartValidator;

impl PartValidator {
    /// Validate a create/update body. Unknown keys are ignored.
    pub fn validate(body: &Value) -> Result<NewPart, AppError> {
        let body = as_object(body)?;
        Ok(NewPart {
            name: parse_name(body.get("name"))?,
            description: parse_optional_text("description", body.get("description"))?,
            quantity: parse_quantity(body.get("quantity"))?,
            price: parse_price(body.get("price"))?,
            category: parse_optional_text("category", body.get("category"))?,
        })
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, AppError> {
    match body {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::invalid_input("Request body must be a JSON object.")),
    }
}

/// Absent, null, or a string of only whitespace.
fn is_blank(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn parse_name(v: Option<&Value>) -> Result<String, AppError> {
    let name = match v {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    if name.is_empty() {
        return Err(AppError::invalid_input(EMPTY_NAME_MESSAGE));
    }
    Ok(name)
}

fn parse_quantity(v: Option<&Value>) -> Result<i32, AppError> {
    if is_blank(v) {
        return Ok(0);
    }
    let parsed = match v {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .filter(|q| *q >= 0)
        .and_then(|q| i32::try_from(q).ok())
        .ok_or_else(|| AppError::invalid_input(QUANTITY_MESSAGE))
}

fn parse_price(v: Option<&Value>) -> Result<Option<Decimal>, AppError> {
    if is_blank(v) {
        return Ok(None);
    }
    let raw = match v {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        _ => return Err(AppError::invalid_input(PRICE_MESSAGE)),
    };
    match parse_decimal(&raw) {
        Some(p) if !p.is_sign_negative() || p.is_zero() => Ok(Some(p)),
        Some(_) => Err(AppError::invalid_input(PRICE_MESSAGE)),
        // A finite non-negative number that `Decimal` cannot hold.
        None if raw.parse::<f64>().is_ok_and(|f| f.is_finite() && f >= 0.0) => {
            Err(AppError::invalid_input(PRICE_RANGE_MESSAGE))
        }
        None => Err(AppError::invalid_input(PRICE_MESSAGE)),
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Description and category: blank becomes absent, scalars are kept as text.
fn parse_optional_text(field: &str, v: Option<&Value>) -> Result<Option<String>, AppError> {
    if is_blank(v) {
        return Ok(None);
    }
    match v {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        _ => Err(AppError::invalid_input(format!("{} must be text.", capitalize(field)))),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
