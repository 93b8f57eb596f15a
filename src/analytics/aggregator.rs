use std::collections::{HashMap, HashSet};

use crate::models::attack::AttackAttempt;
use crate::models::stats::{AttackTypeCount, CountryCount, PortCount, Statistics};

const TOP_N: usize = 5;
const RECENT_ACTIVITY: usize = 10;

/// Rank grouped counts: descending by count, ties broken by ascending key so
/// the output is deterministic, then keep the first `limit`.
fn ranked<K: Ord>(counts: HashMap<K, u64>, limit: usize) -> Vec<(K, u64)> {
    let mut entries: Vec<(K, u64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(limit);
    entries
}

/// Compute summary statistics over a batch of attack records.
///
/// Pure and total: the empty batch is a fully defined case (zero counts,
/// empty top-N lists). Calling this twice on the same input yields identical
/// output, including tie order.
pub fn compute_statistics(attacks: &[AttackAttempt]) -> Statistics {
    let unique_ips: HashSet<&str> = attacks.iter().map(|a| a.ip.as_str()).collect();

    let mut country_counts: HashMap<&str, u64> = HashMap::new();
    let mut type_counts: HashMap<&str, u64> = HashMap::new();
    let mut port_counts: HashMap<u16, u64> = HashMap::new();
    let mut successful = 0u64;

    for attack in attacks {
        *country_counts.entry(attack.country.as_str()).or_insert(0) += 1;
        *type_counts.entry(attack.attack_type.as_str()).or_insert(0) += 1;
        *port_counts.entry(attack.port).or_insert(0) += 1;
        if attack.success {
            successful += 1;
        }
    }

    Statistics {
        total_attempts: attacks.len() as u64,
        successful,
        unique_ips: unique_ips.len() as u64,
        top_countries: ranked(country_counts, TOP_N)
            .into_iter()
            .map(|(country, count)| CountryCount {
                country: country.to_string(),
                count,
            })
            .collect(),
        top_attack_types: ranked(type_counts, TOP_N)
            .into_iter()
            .map(|(attack_type, count)| AttackTypeCount {
                attack_type: attack_type.to_string(),
                count,
            })
            .collect(),
        top_ports: ranked(port_counts, TOP_N)
            .into_iter()
            .map(|(port, count)| PortCount { port, count })
            .collect(),
        recent_activity: attacks.iter().take(RECENT_ACTIVITY).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn attack(country: &str, attack_type: &str, port: u16, ip: &str, success: bool) -> AttackAttempt {
        AttackAttempt {
            id: format!("{country}-{port}-{ip}"),
            timestamp: Utc::now(),
            ip: ip.to_string(),
            country: country.to_string(),
            coordinates: (0.0, 0.0),
            port,
            protocol: "TCP".to_string(),
            attack_type: attack_type.to_string(),
            payload: None,
            success,
        }
    }

    fn repeated(country: &str, n: usize) -> Vec<AttackAttempt> {
        (0..n)
            .map(|i| attack(country, "Port Scan", 22, &format!("10.0.0.{i}"), false))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats.total_attempts, 0);
        assert_eq!(stats.unique_ips, 0);
        assert!(stats.top_countries.is_empty());
        assert!(stats.top_attack_types.is_empty());
        assert!(stats.top_ports.is_empty());
        assert!(stats.recent_activity.is_empty());
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_unique_ip_cardinality() {
        let attacks: Vec<AttackAttempt> = (0..8)
            .map(|_| attack("Germany", "XSS", 80, "1.2.3.4", false))
            .collect();
        assert_eq!(compute_statistics(&attacks).unique_ips, 1);
    }

    #[test]
    fn test_top_countries_ranked_by_count() {
        let mut attacks = repeated("United States", 5);
        attacks.extend(repeated("Germany", 3));
        attacks.extend(repeated("Russia", 1));

        let stats = compute_statistics(&attacks);
        assert_eq!(stats.total_attempts, 9);
        assert_eq!(
            stats.top_countries,
            vec![
                CountryCount { country: "United States".to_string(), count: 5 },
                CountryCount { country: "Germany".to_string(), count: 3 },
                CountryCount { country: "Russia".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_top_n_capped_at_five() {
        let mut attacks = Vec::new();
        for (i, country) in ["A", "B", "C", "D", "E", "F", "G"].iter().enumerate() {
            for _ in 0..(10 - i) {
                attacks.push(attack(country, "DDoS", 443, "9.9.9.9", false));
            }
        }
        let stats = compute_statistics(&attacks);
        assert_eq!(stats.top_countries.len(), 5);
        assert_eq!(stats.top_countries[0].country, "A");
        assert_eq!(stats.top_countries[4].country, "E");
    }

    #[test]
    fn test_equal_counts_break_ties_alphabetically() {
        let mut attacks = repeated("Russia", 2);
        attacks.extend(repeated("Brazil", 2));
        attacks.extend(repeated("China", 2));

        let countries: Vec<String> = compute_statistics(&attacks)
            .top_countries
            .into_iter()
            .map(|c| c.country)
            .collect();
        assert_eq!(countries, vec!["Brazil", "China", "Russia"]);
    }

    #[test]
    fn test_top_ports() {
        let mut attacks: Vec<AttackAttempt> = (0..4)
            .map(|i| attack("India", "Brute Force", 22, &format!("8.8.8.{i}"), false))
            .collect();
        attacks.push(attack("India", "Brute Force", 3389, "8.8.4.4", false));

        let stats = compute_statistics(&attacks);
        assert_eq!(stats.top_ports[0], PortCount { port: 22, count: 4 });
        assert_eq!(stats.top_ports[1], PortCount { port: 3389, count: 1 });
    }

    #[test]
    fn test_recent_activity_is_bounded_prefix() {
        let attacks = repeated("Canada", 25);
        let stats = compute_statistics(&attacks);
        assert_eq!(stats.recent_activity.len(), 10);
        for (got, expected) in stats.recent_activity.iter().zip(attacks.iter()) {
            assert_eq!(got.id, expected.id);
        }

        let short = repeated("Canada", 3);
        assert_eq!(compute_statistics(&short).recent_activity.len(), 3);
    }

    #[test]
    fn test_success_rate_guarded() {
        let mut attacks = Vec::new();
        for i in 0..100 {
            attacks.push(attack("China", "SSRF", 8080, &format!("2.2.2.{i}"), i < 23));
        }
        let stats = compute_statistics(&attacks);
        assert_eq!(stats.successful, 23);
        assert_eq!(stats.success_rate(), 23.0);
    }

    #[test]
    fn test_idempotent_over_same_input() {
        let mut attacks = repeated("Australia", 7);
        attacks.extend(repeated("South Korea", 7));

        let first = serde_json::to_value(compute_statistics(&attacks)).unwrap();
        let second = serde_json::to_value(compute_statistics(&attacks)).unwrap();
        assert_eq!(first, second);
    }
}
