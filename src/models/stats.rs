use serde::{Deserialize, Serialize};

use super::attack::AttackAttempt;

/// Occurrence count for a single country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub count: u64,
}

/// Occurrence count for a single attack type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackTypeCount {
    #[serde(rename = "type")]
    pub attack_type: String,
    pub count: u64,
}

/// Occurrence count for a single port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortCount {
    pub port: u16,
    pub count: u64,
}

/// Summary statistics derived from a batch of attack records. Always
/// recomputed from scratch, never mutated in place.
///
/// Top-N lists hold at most five entries, ranked by descending count with
/// ties broken by ascending key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_attempts: u64,

    /// Number of records flagged `success`.
    pub successful: u64,

    #[serde(rename = "uniqueIPs")]
    pub unique_ips: u64,

    pub top_countries: Vec<CountryCount>,

    pub top_attack_types: Vec<AttackTypeCount>,

    pub top_ports: Vec<PortCount>,

    /// First `min(10, n)` records of the input order.
    pub recent_activity: Vec<AttackAttempt>,
}

impl Statistics {
    /// Percentage of successful attempts. Defined as 0.0 for an empty batch
    /// rather than dividing by zero.
    pub fn success_rate(&self) -> f64 {
        if self.total_attempts == 0 {
            return 0.0;
        }
        self.successful as f64 * 100.0 / self.total_attempts as f64
    }
}
