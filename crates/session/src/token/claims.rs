use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Standard alphabet; unpadded input is accepted since token segments drop the `=`.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The one failure the decoder reports. Sub-reasons are logged at debug level only.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("invalid token")]
pub struct DecodeError;

/// Identity and display fields read, unverified, from a session token's payload.
///
/// Any JSON object is accepted. A known claim whose value has an unexpected type is left in
/// `extra` rather than failing the token.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct Claims {
    #[serde(rename = "sub", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whole seconds; a fractional `exp` is truncated.
    #[serde(rename = "exp", skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
    /// Issuer-defined fields, kept as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Claims {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Claims::from_payload)
    }
}

impl Claims {
    fn from_payload(mut extra: Map<String, Value>) -> Self {
        let subject = take(&mut extra, "sub", |v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        let name = take(&mut extra, "name", |v| v.as_str().map(str::to_string));
        let email = take(&mut extra, "email", |v| v.as_str().map(str::to_string));
        let expires = take(&mut extra, "exp", |v| {
            v.as_i64().or_else(|| v.as_f64().map(|secs| secs.trunc() as i64))
        });

        Self { subject, name, email, expires, extra }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Doctor")
    }

    /// For display only; expiry is never enforced client-side.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

/// Reads the payload segment of a `header.payload.signature` token.
///
/// The signature is not verified and `exp` is not checked. Anything derived from the result
/// is a display convenience; the service remains the authority on identity.
pub fn decode(token: &str) -> Result<Claims, DecodeError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(reject("token does not have three segments")),
    };

    let standard: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let bytes = PAYLOAD_ENGINE
        .decode(standard.as_bytes())
        .map_err(|_| reject("payload is not base64"))?;
    let text = String::from_utf8(bytes).map_err(|_| reject("payload is not utf-8"))?;

    serde_json::from_str(&text).map_err(|_| reject("payload is not a JSON object"))
}

fn reject(reason: &'static str) -> DecodeError {
    tracing::debug!(reason, "rejecting session token");
    DecodeError
}

/// Moves `key` out of `claims` when `read` accepts its value.
fn take<T>(
    claims: &mut Map<String, Value>,
    key: &str,
    read: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let value = read(claims.get(key)?)?;
    claims.remove(key);
    Some(value)
}
