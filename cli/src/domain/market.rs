//! Marketplace response shapes: deal listings and create/start confirmations.
//!
//! Pure decoding of already-parsed JSON. No I/O.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::error::MarketError;

/// Deal lifecycle as reported by `deals list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealStatus {
    Any,
    Pending,
    Accepted,
    Closed,
}

impl DealStatus {
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Pending,
            2 => Self::Accepted,
            3 => Self::Closed,
            _ => Self::Any,
        }
    }

    /// Accepts `ACCEPTED`, `accepted`, or `DEAL_ACCEPTED`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let upper = name.trim().to_ascii_uppercase();
        match upper.strip_prefix("DEAL_").unwrap_or(&upper) {
            "PENDING" => Self::Pending,
            "ACCEPTED" => Self::Accepted,
            "CLOSED" => Self::Closed,
            other => other.parse().map_or(Self::Any, Self::from_code),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Code(i64),
    Name(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct RawDeal {
    id: RawId,
    #[serde(default)]
    status: Option<RawStatus>,
}

/// One entry of `deals list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub id: String,
    pub status: DealStatus,
}

impl From<RawDeal> for Deal {
    fn from(raw: RawDeal) -> Self {
        let status = match raw.status {
            Some(RawStatus::Code(code)) => DealStatus::from_code(code),
            Some(RawStatus::Name(name)) => DealStatus::from_name(&name),
            None => DealStatus::Any,
        };
        Self {
            id: raw.id.into(),
            status,
        }
    }
}

/// Decode `{"deals": [...] | null}`.
///
/// A `null` list means no deals. Entries without a usable `id` are dropped.
///
/// # Errors
///
/// Returns `MarketError::Protocol` if the `deals` key is missing or not a list.
pub fn parse_deal_list(doc: &Value) -> Result<Vec<Deal>, MarketError> {
    let deals = doc
        .get("deals")
        .ok_or_else(|| MarketError::Protocol("deals not found in listing".to_string()))?;
    if deals.is_null() {
        return Ok(Vec::new());
    }
    let entries = deals
        .as_array()
        .ok_or_else(|| MarketError::Protocol("deals is not a list".to_string()))?;
    Ok(entries
        .iter()
        .filter_map(|entry| RawDeal::deserialize(entry).ok())
        .map(Deal::from)
        .collect())
}

/// Extract the `id` from a `market create` or `tasks start` response.
///
/// # Errors
///
/// Returns `MarketError::Backend` when the response carries `error`, and
/// `MarketError::Protocol` when it is not an object or has no `id`.
pub fn parse_confirmed_id(doc: &Value) -> Result<String, MarketError> {
    let obj = doc
        .as_object()
        .ok_or_else(|| MarketError::Protocol("response is not an object".to_string()))?;
    if let Some(error) = obj.get("error") {
        let message = obj
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| display_value(error), str::to_string);
        return Err(MarketError::Backend(message));
    }
    let id = obj
        .get("id")
        .ok_or_else(|| MarketError::Protocol("response has no id".to_string()))?;
    RawId::deserialize(id)
        .map(String::from)
        .map_err(|_| MarketError::Protocol(format!("unusable id: {id}")))
}

fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
