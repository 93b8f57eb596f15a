use std::fmt;

use serde::{Deserialize, Serialize};

/// Vulnerability classes the honeypot can pretend to expose. Only the six
/// toggleable kinds are listed here; the remaining profile flags (XXE, SSRF,
/// deserialization, broken auth) describe the emulated application but are
/// not individually switchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VulnKind {
    SqlInjection,
    Xss,
    Rfi,
    Lfi,
    CommandInjection,
    Csrf,
}

impl fmt::Display for VulnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VulnKind::SqlInjection => write!(f, "SQL Injection"),
            VulnKind::Xss => write!(f, "Cross-Site Scripting (XSS)"),
            VulnKind::Rfi => write!(f, "Remote File Inclusion"),
            VulnKind::Lfi => write!(f, "Local File Inclusion"),
            VulnKind::CommandInjection => write!(f, "Command Injection"),
            VulnKind::Csrf => write!(f, "CSRF Vulnerabilities"),
        }
    }
}

impl VulnKind {
    pub const ALL: [VulnKind; 6] = [
        VulnKind::SqlInjection,
        VulnKind::Xss,
        VulnKind::Rfi,
        VulnKind::Lfi,
        VulnKind::CommandInjection,
        VulnKind::Csrf,
    ];

    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sql" | "sql_injection" => Some(Self::SqlInjection),
            "xss" => Some(Self::Xss),
            "rfi" => Some(Self::Rfi),
            "lfi" => Some(Self::Lfi),
            "command_injection" => Some(Self::CommandInjection),
            "csrf" => Some(Self::Csrf),
            _ => None,
        }
    }

    /// Short description shown next to the toggle in the console.
    pub fn description(&self) -> &'static str {
        match self {
            VulnKind::SqlInjection => "Emulates vulnerable SQL queries",
            VulnKind::Xss => "Responds to XSS injection attempts",
            VulnKind::Rfi => "Simulates RFI vulnerabilities",
            VulnKind::Lfi => "Emulates LFI vulnerabilities",
            VulnKind::CommandInjection => "Handles OS command injection attempts",
            VulnKind::Csrf => "Exposes fake CSRF endpoints",
        }
    }
}

/// A published version of an emulated application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebAppVersion {
    pub version: String,
    pub has_known_vulnerabilities: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerability_description: Option<String>,
}

/// Which vulnerability classes an application template exposes by default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityProfile {
    pub sql: bool,
    pub xss: bool,
    pub rfi: bool,
    pub lfi: bool,
    pub command_injection: bool,
    pub csrf: bool,
    pub xxe: bool,
    pub ssrf: bool,
    pub deserialization: bool,
    pub broken_auth: bool,
}

/// A web application the honeypot can emulate: identity, claimed versions,
/// tech stack, paths attackers probe, and the default vulnerability profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebAppTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub versions: Vec<WebAppVersion>,
    pub tech_stack: Vec<String>,
    pub common_urls: Vec<String>,
    pub default_ports: Vec<u16>,
    pub vulnerability_profile: VulnerabilityProfile,
}

fn version(v: &str, vulnerable: bool, desc: Option<&str>) -> WebAppVersion {
    WebAppVersion {
        version: v.to_string(),
        has_known_vulnerabilities: vulnerable,
        vulnerability_description: desc.map(|d| d.to_string()),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The built-in application templates.
pub fn builtin_templates() -> Vec<WebAppTemplate> {
    vec![
        WebAppTemplate {
            id: "wordpress".to_string(),
            name: "WordPress".to_string(),
            description: "WordPress CMS with plugins".to_string(),
            versions: vec![
                version("5.8.3", true, Some("SQLi in comments")),
                version("5.7.0", true, Some("XSS in media upload")),
                version("6.0.0", false, None),
            ],
            tech_stack: strings(&["PHP", "MySQL", "jQuery"]),
            common_urls: strings(&[
                "/wp-admin",
                "/wp-login.php",
                "/wp-content/uploads/",
                "/wp-json/",
            ]),
            default_ports: vec![80, 443],
            vulnerability_profile: VulnerabilityProfile {
                sql: true,
                xss: true,
                rfi: true,
                lfi: true,
                command_injection: false,
                csrf: true,
                xxe: false,
                ssrf: true,
                deserialization: false,
                broken_auth: true,
            },
        },
        WebAppTemplate {
            id: "phpmyadmin".to_string(),
            name: "PHPMyAdmin".to_string(),
            description: "MySQL database management interface".to_string(),
            versions: vec![
                version("4.9.7", true, Some("CSRF in settings")),
                version("5.1.0", false, None),
            ],
            tech_stack: strings(&["PHP", "MySQL", "JavaScript"]),
            common_urls: strings(&[
                "/phpmyadmin/",
                "/index.php",
                "/sql.php",
                "/db_structure.php",
            ]),
            default_ports: vec![80, 443],
            vulnerability_profile: VulnerabilityProfile {
                sql: true,
                xss: true,
                rfi: false,
                lfi: true,
                command_injection: true,
                csrf: true,
                xxe: false,
                ssrf: false,
                deserialization: false,
                broken_auth: true,
            },
        },
        WebAppTemplate {
            id: "ecommerce".to_string(),
            name: "E-commerce".to_string(),
            description: "Generic e-commerce application".to_string(),
            versions: vec![
                version("2.3.5", true, Some("SQL injection in product search")),
                version("3.0.1", false, None),
            ],
            tech_stack: strings(&["PHP", "MySQL", "jQuery", "Bootstrap"]),
            common_urls: strings(&[
                "/admin/",
                "/products/",
                "/cart.php",
                "/checkout.php",
                "/account/",
            ]),
            default_ports: vec![80, 443],
            vulnerability_profile: VulnerabilityProfile {
                sql: true,
                xss: true,
                rfi: false,
                lfi: true,
                command_injection: false,
                csrf: true,
                xxe: false,
                ssrf: true,
                deserialization: true,
                broken_auth: true,
            },
        },
        WebAppTemplate {
            id: "custom".to_string(),
            name: "Custom Application".to_string(),
            description: "Custom web application template".to_string(),
            versions: vec![version(
                "1.0.0",
                true,
                Some("Multiple vulnerabilities can be configured"),
            )],
            tech_stack: strings(&["Configurable"]),
            common_urls: strings(&["/login", "/admin", "/api/", "/dashboard"]),
            default_ports: vec![80, 443, 8080],
            vulnerability_profile: VulnerabilityProfile {
                sql: true,
                xss: true,
                rfi: true,
                lfi: true,
                command_injection: true,
                csrf: true,
                xxe: true,
                ssrf: true,
                deserialization: true,
                broken_auth: true,
            },
        },
    ]
}

/// Look up a built-in template by id.
pub fn get_template(id: &str) -> Option<WebAppTemplate> {
    builtin_templates().into_iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_template_lookup() {
        let wp = get_template("wordpress").unwrap();
        assert_eq!(wp.name, "WordPress");
        assert!(wp.vulnerability_profile.sql);
        assert!(!wp.vulnerability_profile.command_injection);

        assert!(get_template("does-not-exist").is_none());
    }

    #[test]
    fn test_four_builtin_templates() {
        let templates = builtin_templates();
        assert_eq!(templates.len(), 4);
        let ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["wordpress", "phpmyadmin", "ecommerce", "custom"]);
    }

    #[test]
    fn test_vuln_kind_names() {
        assert_eq!(
            VulnKind::from_str_name("sql_injection"),
            Some(VulnKind::SqlInjection)
        );
        assert_eq!(VulnKind::from_str_name("XSS"), Some(VulnKind::Xss));
        assert_eq!(VulnKind::from_str_name("nope"), None);
        assert_eq!(VulnKind::Csrf.to_string(), "CSRF Vulnerabilities");
    }
}
