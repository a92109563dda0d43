//! Weekly outbreak map.
//!
//! POST /api/get-outbreaks/ with `{year, week}`. Both accept JSON numbers or
//! numeric strings.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use arogya_types::outbreak::OutbreakMap;

use crate::http::error::AppError;
use crate::http::extractors::json::JsonBody;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OutbreakRequest {
    #[serde(default)]
    pub year: Value,
    #[serde(default)]
    pub week: Value,
}

/// Outcome of reading one integer-ish field.
#[derive(Debug, PartialEq)]
enum IntField {
    Missing,
    Invalid,
    Value(i64),
}

/// Absent, null, `0` and blank strings count as missing.
fn int_field(value: &Value) -> IntField {
    match value {
        Value::Null => IntField::Missing,
        Value::Number(n) => match n.as_i64() {
            Some(0) => IntField::Missing,
            Some(v) => IntField::Value(v),
            None => IntField::Invalid,
        },
        Value::String(s) if s.trim().is_empty() => IntField::Missing,
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(0) => IntField::Missing,
            Ok(v) => IntField::Value(v),
            Err(_) => IntField::Invalid,
        },
        Value::Bool(false) => IntField::Missing,
        _ => IntField::Invalid,
    }
}

fn parse_year_week(request: &OutbreakRequest) -> Result<(i32, u32), AppError> {
    let (year, week) = match (int_field(&request.year), int_field(&request.week)) {
        (IntField::Missing, _) | (_, IntField::Missing) => {
            return Err(AppError::Validation(
                "Both 'year' and 'week' parameters are required".to_string(),
            ));
        }
        (IntField::Value(year), IntField::Value(week)) => (year, week),
        _ => return Err(invalid_integers()),
    };

    let year = i32::try_from(year).map_err(|_| invalid_integers())?;
    let week = u32::try_from(week).map_err(|_| invalid_integers())?;
    Ok((year, week))
}

fn invalid_integers() -> AppError {
    AppError::Validation("Year and week must be valid integers".to_string())
}

/// POST /api/get-outbreaks/
pub async fn get_outbreaks(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<OutbreakRequest>,
) -> Result<Json<OutbreakMap>, AppError> {
    let (year, week) = parse_year_week(&body)?;
    Ok(Json(state.outbreaks.outbreaks(year, week).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> OutbreakRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_numbers_and_strings_accepted() {
        assert_eq!(
            parse_year_week(&request(json!({"year": 2024, "week": 7}))).unwrap(),
            (2024, 7)
        );
        assert_eq!(
            parse_year_week(&request(json!({"year": " 2024 ", "week": "12"}))).unwrap(),
            (2024, 12)
        );
    }

    #[test]
    fn test_missing_fields() {
        for body in [
            json!({}),
            json!({"year": 2024}),
            json!({"week": 3}),
            json!({"year": "", "week": 3}),
            json!({"year": 2024, "week": 0}),
            json!({"year": null, "week": 3}),
        ] {
            let err = parse_year_week(&request(body.clone())).unwrap_err();
            assert!(
                matches!(&err, AppError::Validation(m) if m.contains("required")),
                "{body}"
            );
        }
    }

    #[test]
    fn test_non_integers_rejected() {
        for body in [
            json!({"year": "twenty", "week": 3}),
            json!({"year": 2024, "week": 2.5}),
            json!({"year": 2024, "week": -3}),
            json!({"year": [2024], "week": 3}),
        ] {
            let err = parse_year_week(&request(body.clone())).unwrap_err();
            assert!(
                matches!(&err, AppError::Validation(m) if m.contains("valid integers")),
                "{body}"
            );
        }
    }
}
