//! Fixed reference tables the generator samples from. Country centroids are
//! approximate and only used as jitter bases for the attack map.

pub struct CountryRef {
    pub name: &'static str,
    pub code: &'static str,
    pub lat: f64,
    pub lon: f64,
}

pub const COUNTRIES: [CountryRef; 10] = [
    CountryRef { name: "United States", code: "US", lat: 37.0902, lon: -95.7129 },
    CountryRef { name: "Russia", code: "RU", lat: 61.5240, lon: 105.3188 },
    CountryRef { name: "China", code: "CN", lat: 35.8617, lon: 104.1954 },
    CountryRef { name: "Brazil", code: "BR", lat: -14.2350, lon: -51.9253 },
    CountryRef { name: "Germany", code: "DE", lat: 51.1657, lon: 10.4515 },
    CountryRef { name: "India", code: "IN", lat: 20.5937, lon: 78.9629 },
    CountryRef { name: "United Kingdom", code: "GB", lat: 55.3781, lon: -3.4360 },
    CountryRef { name: "Canada", code: "CA", lat: 56.1304, lon: -106.3468 },
    CountryRef { name: "Australia", code: "AU", lat: -25.2744, lon: 133.7751 },
    CountryRef { name: "South Korea", code: "KR", lat: 35.9078, lon: 127.7669 },
];

pub const ATTACK_TYPES: [&str; 10] = [
    "SQL Injection",
    "XSS",
    "Brute Force",
    "Port Scan",
    "DDoS",
    "Command Injection",
    "Directory Traversal",
    "File Upload",
    "CSRF",
    "SSRF",
];

pub const COMMON_PORTS: [u16; 15] = [
    21, 22, 23, 25, 53, 80, 110, 143, 443, 445, 3306, 3389, 5432, 8080, 8443,
];

pub const PROTOCOLS: [&str; 8] = [
    "TCP", "UDP", "HTTP", "HTTPS", "FTP", "SSH", "SMTP", "DNS",
];

pub const COMMON_USERNAMES: [&str; 16] = [
    "admin", "root", "administrator", "user", "guest", "support",
    "oracle", "test", "demo", "postgres", "mysql", "ubuntu",
    "ftpuser", "www-data", "apache", "webmaster",
];

pub const COMMON_PASSWORDS: [&str; 17] = [
    "password", "admin", "root", "123456", "qwerty", "password123",
    "admin123", "welcome", "p@ssw0rd", "letmein", "default", "secret",
    "changeme", "123456789", "12345678", "1234", "test123",
];

/// Browser user-agent reported for scripted credential-stuffing attempts.
pub const SCANNER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_country_codes_are_distinct() {
        let codes: HashSet<&str> = COUNTRIES.iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), COUNTRIES.len());
    }

    #[test]
    fn test_centroids_are_valid_coordinates() {
        for country in &COUNTRIES {
            assert!(country.lat.abs() <= 90.0, "{} latitude", country.name);
            assert!(country.lon.abs() <= 180.0, "{} longitude", country.name);
        }
    }
}
