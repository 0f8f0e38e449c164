use crate::bookings::BookingKey;
use crate::catalog::PairIndex;
use crate::filter::Filters;
use crate::ipc::error::err;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::json;

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn bad_params(message: impl Into<String>) -> Self {
        HandlerErr {
            code: "bad_params",
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn get_date(params: &serde_json::Value, key: &str) -> Result<NaiveDate, HandlerErr> {
    let raw = get_required_str(params, key)?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| HandlerErr {
        code: "bad_params",
        message: format!("{} must be YYYY-MM-DD", key),
        details: Some(json!({ key: raw })),
    })
}

pub fn get_pair(params: &serde_json::Value, key: &str) -> Result<PairIndex, HandlerErr> {
    let Some(raw) = params.get(key).filter(|v| !v.is_null()) else {
        return Err(HandlerErr::bad_params(format!("missing {}", key)));
    };
    let Some(n) = raw.as_i64() else {
        return Err(HandlerErr {
            code: "bad_params",
            message: format!("{} must be an integer", key),
            details: Some(json!({ key: raw })),
        });
    };
    PairIndex::new(n).map_err(|e| HandlerErr {
        code: "bad_params",
        message: e.to_string(),
        details: Some(json!({ key: n })),
    })
}

pub fn get_booking_key(params: &serde_json::Value) -> Result<BookingKey, HandlerErr> {
    Ok(BookingKey::new(
        get_required_str(params, "roomId")?,
        get_date(params, "date")?,
        get_pair(params, "pair")?,
    ))
}

/// Deserializes `params[key]` into `T`, reporting serde's message on failure.
pub fn get_typed<T: DeserializeOwned>(params: &serde_json::Value, key: &str) -> Result<T, HandlerErr> {
    let Some(v) = params.get(key) else {
        return Err(HandlerErr::bad_params(format!("missing {}", key)));
    };
    serde_json::from_value(v.clone()).map_err(|e| HandlerErr {
        code: "bad_params",
        message: format!("invalid {}: {}", key, e),
        details: None,
    })
}

pub fn get_filters(params: &serde_json::Value) -> Result<Filters, HandlerErr> {
    get_typed(params, "filters")
}
