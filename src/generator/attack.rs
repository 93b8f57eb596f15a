use chrono::{Duration as ChronoDuration, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::attack::{AttackAttempt, LoginAttempt};

use super::tables::{
    ATTACK_TYPES, COMMON_PASSWORDS, COMMON_PORTS, COMMON_USERNAMES, COUNTRIES, PROTOCOLS,
    SCANNER_USER_AGENT,
};

const DAY_MS: i64 = 86_400_000;

const TOKEN_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 13;

/// Opaque lowercase-alphanumeric token used for record ids and fake payloads.
pub fn random_token<R: Rng>(rng: &mut R) -> String {
    (0..TOKEN_LEN)
        .map(|_| TOKEN_CHARS[rng.random_range(0..TOKEN_CHARS.len())] as char)
        .collect()
}

/// Dotted-quad from four independent bytes. No validity checking: reserved
/// and broadcast addresses are as likely as any other.
pub fn random_ip<R: Rng>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.random::<u8>(),
        rng.random::<u8>(),
        rng.random::<u8>(),
        rng.random::<u8>()
    )
}

fn random_attack<R: Rng>(rng: &mut R) -> AttackAttempt {
    let country = COUNTRIES.choose(rng).unwrap();

    // Jitter in [-5, +5] degrees per axis for map variety; values may land
    // outside valid lat/long bounds.
    let lat_jitter = (rng.random::<f64>() - 0.5) * 10.0;
    let lon_jitter = (rng.random::<f64>() - 0.5) * 10.0;

    let payload = if rng.random_bool(0.3) {
        Some(format!("PAYLOAD:{}", random_token(rng)))
    } else {
        None
    };

    AttackAttempt {
        id: random_token(rng),
        timestamp: Utc::now() - ChronoDuration::milliseconds(rng.random_range(0..DAY_MS)),
        ip: random_ip(rng),
        country: country.name.to_string(),
        coordinates: (country.lat + lat_jitter, country.lon + lon_jitter),
        port: *COMMON_PORTS.choose(rng).unwrap(),
        protocol: PROTOCOLS.choose(rng).unwrap().to_string(),
        attack_type: ATTACK_TYPES.choose(rng).unwrap().to_string(),
        payload,
        success: rng.random_bool(0.2),
    }
}

/// Generate `count` independent attack records with timestamps uniformly
/// distributed over the trailing 24 hours, sorted newest first. The sort
/// only reorders; it never filters or deduplicates.
pub fn generate_attacks(count: usize) -> Vec<AttackAttempt> {
    let mut rng = rand::rng();
    let mut attacks: Vec<AttackAttempt> = (0..count).map(|_| random_attack(&mut rng)).collect();
    attacks.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    attacks
}

/// Generate a single credential-stuffing attempt stamped "now". Username and
/// password are drawn independently; no pairing logic.
pub fn generate_login_attempt() -> LoginAttempt {
    let mut rng = rand::rng();
    LoginAttempt {
        id: random_token(&mut rng),
        timestamp: Utc::now(),
        username: COMMON_USERNAMES.choose(&mut rng).unwrap().to_string(),
        password: COMMON_PASSWORDS.choose(&mut rng).unwrap().to_string(),
        ip: random_ip(&mut rng),
        user_agent: SCANNER_USER_AGENT.to_string(),
        success: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_exact_count() {
        assert!(generate_attacks(0).is_empty());
        assert_eq!(generate_attacks(1).len(), 1);
        assert_eq!(generate_attacks(250).len(), 250);
    }

    #[test]
    fn test_sorted_newest_first() {
        let attacks = generate_attacks(100);
        for pair in attacks.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[test]
    fn test_fields_drawn_from_tables() {
        for attack in generate_attacks(200) {
            assert!(COMMON_PORTS.contains(&attack.port));
            assert!(PROTOCOLS.contains(&attack.protocol.as_str()));
            assert!(ATTACK_TYPES.contains(&attack.attack_type.as_str()));
            assert!(COUNTRIES.iter().any(|c| c.name == attack.country));
        }
    }

    #[test]
    fn test_timestamps_within_trailing_day() {
        let before = Utc::now() - ChronoDuration::milliseconds(DAY_MS + 1000);
        let attacks = generate_attacks(100);
        let after = Utc::now();
        for attack in attacks {
            assert!(attack.timestamp >= before);
            assert!(attack.timestamp <= after);
        }
    }

    #[test]
    fn test_payload_frequency_roughly_30_percent() {
        let attacks = generate_attacks(5000);
        let with_payload = attacks.iter().filter(|a| a.payload.is_some()).count();
        let ratio = with_payload as f64 / attacks.len() as f64;
        assert!(ratio > 0.2 && ratio < 0.4, "payload ratio was {ratio}");
        for attack in attacks.iter().filter(|a| a.payload.is_some()) {
            assert!(attack.payload.as_ref().unwrap().starts_with("PAYLOAD:"));
        }
    }

    #[test]
    fn test_success_frequency_roughly_20_percent() {
        let attacks = generate_attacks(5000);
        let successes = attacks.iter().filter(|a| a.success).count();
        let ratio = successes as f64 / attacks.len() as f64;
        assert!(ratio > 0.1 && ratio < 0.3, "success ratio was {ratio}");
    }

    #[test]
    fn test_coordinates_near_country_centroid() {
        for attack in generate_attacks(200) {
            let country = COUNTRIES
                .iter()
                .find(|c| c.name == attack.country)
                .unwrap();
            assert!((attack.coordinates.0 - country.lat).abs() <= 5.0);
            assert!((attack.coordinates.1 - country.lon).abs() <= 5.0);
        }
    }

    #[test]
    fn test_random_ip_shape() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let ip = random_ip(&mut rng);
            let octets: Vec<&str> = ip.split('.').collect();
            assert_eq!(octets.len(), 4);
            for octet in octets {
                octet.parse::<u8>().unwrap();
            }
        }
    }

    #[test]
    fn test_login_attempt_fields() {
        let attempt = generate_login_attempt();
        assert!(COMMON_USERNAMES.contains(&attempt.username.as_str()));
        assert!(COMMON_PASSWORDS.contains(&attempt.password.as_str()));
        assert_eq!(attempt.user_agent, SCANNER_USER_AGENT);
        assert!(!attempt.success);
    }
}
