use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelayError;

/// Only currency the relay charges in.
pub const CURRENCY: &str = "ZAR";

/// Status value the gateway returns for a captured charge.
pub const SUCCESS_STATUS: &str = "SUCCESSFUL";

/// Body of `POST /paiement` as received, before any checks.
#[derive(Debug, Default)]
pub struct RawChargeRequest {
    pub token: Option<Value>,
    pub amount: Option<Value>,
}

impl RawChargeRequest {
    /// Reads a request body. Anything but a JSON object is refused.
    pub fn from_slice(body: &[u8]) -> Result<Self, RelayError> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(mut fields)) => Ok(Self {
                token: fields.remove("token"),
                amount: fields.remove("amount"),
            }),
            _ => Err(RelayError::InvalidBody),
        }
    }
}

/// A charge that passed input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub token: String,
    /// Minor units (cents).
    pub amount: u64,
}

impl TryFrom<RawChargeRequest> for ChargeRequest {
    type Error = RelayError;

    fn try_from(raw: RawChargeRequest) -> Result<Self, Self::Error> {
        let (token, amount) = match (raw.token, raw.amount) {
            (Some(token), Some(amount)) if is_truthy(&token) && is_truthy(&amount) => {
                (token, amount)
            }
            _ => return Err(RelayError::MissingData),
        };

        let token = match token {
            Value::String(token) => token,
            _ => return Err(RelayError::InvalidField("token")),
        };

        let amount = minor_units(&amount).ok_or(RelayError::InvalidField("amount"))?;

        Ok(Self { token, amount })
    }
}

/// Largest integer an f64 holds exactly.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_991.0;

/// Positive whole numbers, including float forms such as `1e3` or `2550.0`.
fn minor_units(value: &Value) -> Option<u64> {
    let amount = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f > 0.0 && *f <= MAX_EXACT_F64)
            .map(|f| f as u64)
    })?;
    (amount > 0).then_some(amount)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Payload sent to `POST /v1/charges`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewayCharge {
    pub token: String,
    #[serde(rename = "amountInCents")]
    pub amount_in_cents: u64,
    pub currency: String,
}

impl From<&ChargeRequest> for GatewayCharge {
    fn from(request: &ChargeRequest) -> Self {
        Self {
            token: request.token.clone(),
            amount_in_cents: request.amount,
            currency: CURRENCY.to_string(),
        }
    }
}

/// Gateway response body. Every field is optional; a field of an unexpected
/// JSON type reads as absent, unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChargeResult {
    pub status: Option<String>,
    pub message: Option<String>,
    pub error: Option<Value>,
}

impl ChargeResult {
    /// Never fails: a body that is not an object yields an empty result.
    pub fn from_json(raw: &Value) -> Self {
        let text = |name: &str| raw.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            status: text("status"),
            message: text("message"),
            error: raw.get("error").filter(|e| !e.is_null()).cloned(),
        }
    }

    pub fn is_successful(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS) && self.error.is_none()
    }

    /// Human readable reason for a refusal, if the gateway gave one.
    pub fn detail(&self) -> Option<String> {
        let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());

        if let Some(message) = self.message.as_deref().and_then(non_empty) {
            return Some(message);
        }

        match &self.error {
            Some(Value::String(error)) => non_empty(error),
            Some(Value::Object(error)) => error
                .get("message")
                .and_then(Value::as_str)
                .and_then(non_empty),
            _ => None,
        }
    }
}

/// What the gateway answered to one charge attempt.
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub http_status: u16,
    pub result: ChargeResult,
    /// Full decoded body, kept for diagnostics.
    pub raw: Value,
}

impl GatewayReply {
    pub fn is_approved(&self) -> bool {
        (200..300).contains(&self.http_status) && self.result.is_successful()
    }
}

/// Body of every JSON response sent by `/paiement`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub message: String,
}
