use std::fmt;

use chrono::{DateTime, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::patients::PatientId;

/// Issue time of a prescription, kept exactly as the service rendered it.
///
/// The text is sent back verbatim as the `time` query parameter when deleting, so it is
/// never reparsed and reformatted.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrescribedAt(#[serde(deserialize_with = "crate::lenient::deserialize")] String);

impl PrescribedAt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(dt.with_timezone(&Utc));
        }
        self.0.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
    }
}

impl fmt::Display for PrescribedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrescribedAt {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PrescribedAt {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct Medicine {
    pub name: String,
    #[serde(deserialize_with = "crate::lenient::deserialize")]
    pub quantity: String,
    pub units: String,
    pub frequency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl Medicine {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("quantity", &self.quantity),
            ("units", &self.units),
            ("frequency", &self.frequency),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(default, deserialize_with = "crate::lenient::deserialize_option")]
    pub id: Option<String>,
    pub prescribed_at: PrescribedAt,
    #[serde(default)]
    pub medicines: Vec<Medicine>,
    #[serde(default)]
    pub warning: i64,
    #[serde(default)]
    pub danger: i64,
}

impl Prescription {
    pub fn slot(&self, patient_id: &PatientId) -> SlotKey {
        SlotKey::new(patient_id.clone(), self.prescribed_at.clone())
    }
}

/// Identifies a prescription for deletion: the service has no per-prescription route.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, new)]
pub struct SlotKey {
    pub patient_id: PatientId,
    pub prescribed_at: PrescribedAt,
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "patient {} at {}", self.patient_id, self.prescribed_at)
    }
}
