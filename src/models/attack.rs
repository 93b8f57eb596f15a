use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single synthetic attack record. These carry no evidentiary value: every
/// field is randomly sampled, including deliberately uncorrelated port and
/// protocol choices, and the IP may be a reserved or otherwise invalid
/// address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackAttempt {
    /// Opaque unique token. Identity only, no ordering meaning.
    pub id: String,

    pub timestamp: DateTime<Utc>,

    /// Dotted-quad string of four independently sampled bytes.
    pub ip: String,

    pub country: String,

    /// (latitude, longitude): country centroid plus per-axis jitter in
    /// [-5, +5] degrees. Not clamped to valid geographic bounds.
    pub coordinates: (f64, f64),

    pub port: u16,

    pub protocol: String,

    pub attack_type: String,

    /// Present with probability 0.3, always prefixed with `PAYLOAD:`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,

    pub success: bool,
}

/// A captured credential-stuffing attempt against the fake login portal.
/// Independent of the attack stream; `success` is always false.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginAttempt {
    pub id: String,

    pub timestamp: DateTime<Utc>,

    pub username: String,

    pub password: String,

    pub ip: String,

    pub user_agent: String,

    pub success: bool,
}
