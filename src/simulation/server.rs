use std::fmt;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::config::settings::HoneypotConfig;
use crate::generator::attack::random_ip;
use crate::generator::payloads::attack_details;
use crate::models::webapp::{get_template, VulnKind, WebAppTemplate};

/// Run state of the simulated honeypot server. Nothing ever listens on the
/// configured port; Running only means the attack-log loop is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServerStatus {
    Stopped,
    Running,
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerStatus::Stopped => write!(f, "stopped"),
            ServerStatus::Running => write!(f, "running"),
        }
    }
}

/// Which of the six toggleable vulnerability emulations are active.
#[derive(Debug, Clone, Copy)]
pub struct VulnToggles {
    sql: bool,
    xss: bool,
    rfi: bool,
    lfi: bool,
    command_injection: bool,
    csrf: bool,
}

impl VulnToggles {
    pub fn from_profile(template: &WebAppTemplate) -> Self {
        let p = &template.vulnerability_profile;
        Self {
            sql: p.sql,
            xss: p.xss,
            rfi: p.rfi,
            lfi: p.lfi,
            command_injection: p.command_injection,
            csrf: p.csrf,
        }
    }

    pub fn get(&self, kind: VulnKind) -> bool {
        match kind {
            VulnKind::SqlInjection => self.sql,
            VulnKind::Xss => self.xss,
            VulnKind::Rfi => self.rfi,
            VulnKind::Lfi => self.lfi,
            VulnKind::CommandInjection => self.command_injection,
            VulnKind::Csrf => self.csrf,
        }
    }

    pub fn set(&mut self, kind: VulnKind, value: bool) {
        match kind {
            VulnKind::SqlInjection => self.sql = value,
            VulnKind::Xss => self.xss = value,
            VulnKind::Rfi => self.rfi = value,
            VulnKind::Lfi => self.lfi = value,
            VulnKind::CommandInjection => self.command_injection = value,
            VulnKind::Csrf => self.csrf = value,
        }
    }

    pub fn enabled(&self) -> Vec<VulnKind> {
        VulnKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind))
            .collect()
    }
}

/// One row of the vulnerabilities panel.
#[derive(Debug, Clone, Serialize)]
pub struct VulnerabilityState {
    pub name: String,
    pub active: bool,
    pub description: String,
}

fn log_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// The honeypot server simulator: a Stopped/Running toggle, the selected
/// application template, vulnerability switches, and a bounded log ring
/// (newest first). Every operation only appends synthetic log lines and
/// mutates in-memory state.
pub struct HoneypotSim {
    name: RwLock<String>,
    port: RwLock<u16>,
    log_level: RwLock<String>,
    status: RwLock<ServerStatus>,
    template: RwLock<WebAppTemplate>,
    toggles: RwLock<VulnToggles>,
    logs: RwLock<Vec<String>>,
    log_capacity: usize,
}

impl HoneypotSim {
    pub fn new(template: WebAppTemplate, config: &HoneypotConfig, log_capacity: usize) -> Self {
        let toggles = VulnToggles::from_profile(&template);
        let initial_logs = vec![
            format!("[INFO] Honeypot server initialized for {}", template.name),
            format!(
                "[INFO] Available vulnerability modules based on {} profile",
                template.name
            ),
            format!("[INFO] Ready to start on port {}", config.port),
        ];
        Self {
            name: RwLock::new(config.name.clone()),
            port: RwLock::new(config.port),
            log_level: RwLock::new(config.log_level.clone()),
            status: RwLock::new(ServerStatus::Stopped),
            template: RwLock::new(template),
            toggles: RwLock::new(toggles),
            logs: RwLock::new(initial_logs),
            log_capacity,
        }
    }

    /// Prepend a block of lines, preserving their order at the head.
    fn push_block(&self, lines: Vec<String>) {
        let mut logs = self.logs.write();
        for line in lines.into_iter().rev() {
            logs.insert(0, line);
        }
        logs.truncate(self.log_capacity);
    }

    pub fn status(&self) -> ServerStatus {
        *self.status.read()
    }

    pub fn is_running(&self) -> bool {
        self.status() == ServerStatus::Running
    }

    pub fn start(&self) {
        let template = self.template.read().clone();
        let port = *self.port.read();
        let version = template
            .versions
            .first()
            .map(|v| v.version.clone())
            .unwrap_or_else(|| "1.0.0".to_string());

        *self.status.write() = ServerStatus::Running;
        self.push_block(vec![
            format!(
                "[{}] [INFO] Starting honeypot server on port {}",
                log_timestamp(),
                port
            ),
            format!(
                "[{}] [INFO] Emulating {} version {}",
                log_timestamp(),
                template.name,
                version
            ),
            format!(
                "[{}] [INFO] Loading vulnerability modules specific to {}",
                log_timestamp(),
                template.name
            ),
            format!("[{}] [INFO] Server started successfully", log_timestamp()),
        ]);
        info!("Honeypot server started on port {} ({})", port, template.name);
    }

    pub fn stop(&self) {
        *self.status.write() = ServerStatus::Stopped;
        self.push_block(vec![
            format!("[{}] [INFO] Stopping honeypot server", log_timestamp()),
            format!("[{}] [INFO] Saving collected attack data", log_timestamp()),
            format!("[{}] [INFO] Server stopped successfully", log_timestamp()),
        ]);
        info!("Honeypot server stopped");
    }

    /// Switch the emulated application. Resets the vulnerability toggles to
    /// the new template's profile. Returns false for an unknown id.
    pub fn select_template(&self, id: &str) -> bool {
        let Some(template) = get_template(id) else {
            return false;
        };
        self.push_block(vec![
            format!(
                "[{}] [INFO] Switching to {} application template",
                log_timestamp(),
                template.name
            ),
            format!(
                "[{}] [INFO] Loading {} vulnerability profile",
                log_timestamp(),
                template.name
            ),
        ]);
        *self.toggles.write() = VulnToggles::from_profile(&template);
        info!("Application template changed to {}", template.name);
        *self.template.write() = template;
        true
    }

    pub fn template(&self) -> WebAppTemplate {
        self.template.read().clone()
    }

    pub fn set_vulnerability(&self, kind: VulnKind, enabled: bool) {
        self.toggles.write().set(kind, enabled);
        self.push_block(vec![format!(
            "[{}] [INFO] {} vulnerability emulation {}",
            log_timestamp(),
            kind,
            if enabled { "enabled" } else { "disabled" }
        )]);
        info!("{} emulation {}", kind, if enabled { "enabled" } else { "disabled" });
    }

    pub fn vulnerabilities(&self) -> Vec<VulnerabilityState> {
        let toggles = *self.toggles.read();
        VulnKind::ALL
            .into_iter()
            .map(|kind| VulnerabilityState {
                name: kind.to_string(),
                active: toggles.get(kind),
                description: kind.description().to_string(),
            })
            .collect()
    }

    pub fn logs(&self) -> Vec<String> {
        self.logs.read().clone()
    }

    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    pub fn port(&self) -> u16 {
        *self.port.read()
    }

    pub fn log_level(&self) -> String {
        self.log_level.read().clone()
    }

    /// Apply a config update from the console. In-memory only; nothing is
    /// persisted across restarts.
    pub fn update_config(&self, name: Option<String>, log_level: Option<String>, port: Option<u16>) {
        if let Some(name) = name {
            *self.name.write() = name;
        }
        if let Some(level) = log_level {
            *self.log_level.write() = level;
        }
        if let Some(port) = port {
            *self.port.write() = port;
        }
        self.push_block(vec![format!(
            "[{}] [INFO] Configuration saved",
            log_timestamp()
        )]);
        info!("Honeypot configuration updated");
    }

    /// Synthesize one detected-attack log triplet. No-op when the server is
    /// stopped or every vulnerability toggle is off.
    pub fn emit_attack(&self) {
        if !self.is_running() {
            return;
        }
        let template = self.template.read().clone();
        let enabled = self.toggles.read().enabled();
        if enabled.is_empty() {
            return;
        }

        let mut rng = rand::rng();
        let kind = *enabled.choose(&mut rng).unwrap();
        let path = template
            .common_urls
            .choose(&mut rng)
            .cloned()
            .unwrap_or_else(|| "/".to_string());
        let ip = random_ip(&mut rng);
        let details = attack_details(kind, &template.name, &path);

        self.push_block(vec![
            format!(
                "[{}] [ALERT] Detected {} attempt on {} at {} from {}",
                log_timestamp(),
                kind,
                template.name,
                path,
                ip
            ),
            format!("[{}] [INFO] Payload: {}", log_timestamp(), details),
            format!(
                "[{}] [INFO] Response sent with appropriate emulation",
                log_timestamp()
            ),
        ]);
    }

    /// Attack-log loop: sleeps a randomized period, then emits one attack if
    /// the server is running. Mirrors the uncoordinated feel of real probe
    /// traffic.
    pub async fn run(&self, min_secs: u64, max_secs: u64) {
        loop {
            let wait = {
                let mut rng = rand::rng();
                rng.random_range(min_secs..=max_secs.max(min_secs))
            };
            tokio::time::sleep(Duration::from_secs(wait)).await;
            self.emit_attack();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::default_honeypot_config;

    fn sim() -> HoneypotSim {
        let template = get_template("wordpress").unwrap();
        HoneypotSim::new(template, &default_honeypot_config(), 50)
    }

    #[test]
    fn test_initial_state() {
        let sim = sim();
        assert_eq!(sim.status(), ServerStatus::Stopped);
        let logs = sim.logs();
        assert_eq!(logs.len(), 3);
        assert!(logs[0].contains("initialized for WordPress"));
    }

    #[test]
    fn test_start_and_stop_append_banners() {
        let sim = sim();
        sim.start();
        assert!(sim.is_running());
        let logs = sim.logs();
        assert!(logs[0].contains("Starting honeypot server on port 80"));
        assert!(logs[1].contains("Emulating WordPress version 5.8.3"));
        assert!(logs[3].contains("Server started successfully"));

        sim.stop();
        assert!(!sim.is_running());
        assert!(sim.logs()[0].contains("Stopping honeypot server"));
    }

    #[test]
    fn test_select_template_resets_toggles() {
        let sim = sim();
        // WordPress has no command injection; PHPMyAdmin does.
        assert!(!sim.toggles.read().get(VulnKind::CommandInjection));
        assert!(sim.select_template("phpmyadmin"));
        assert!(sim.toggles.read().get(VulnKind::CommandInjection));
        assert!(!sim.toggles.read().get(VulnKind::Rfi));
        assert_eq!(sim.template().name, "PHPMyAdmin");
        assert!(sim.logs()[0].contains("Switching to PHPMyAdmin"));

        assert!(!sim.select_template("unknown-app"));
    }

    #[test]
    fn test_set_vulnerability_logs_change() {
        let sim = sim();
        sim.set_vulnerability(VulnKind::Xss, false);
        assert!(sim.logs()[0]
            .contains("Cross-Site Scripting (XSS) vulnerability emulation disabled"));
        let states = sim.vulnerabilities();
        let xss = states.iter().find(|v| v.name.contains("XSS")).unwrap();
        assert!(!xss.active);
    }

    #[test]
    fn test_emit_attack_triplet_order() {
        let sim = sim();
        sim.start();
        let before = sim.logs().len();
        sim.emit_attack();
        let logs = sim.logs();
        assert_eq!(logs.len(), before + 3);
        assert!(logs[0].contains("[ALERT] Detected"));
        assert!(logs[1].contains("Payload:"));
        assert!(logs[2].contains("Response sent with appropriate emulation"));
    }

    #[test]
    fn test_emit_attack_noop_when_stopped_or_toggles_off() {
        let sim = sim();
        let before = sim.logs().len();
        sim.emit_attack();
        assert_eq!(sim.logs().len(), before);

        sim.start();
        for kind in VulnKind::ALL {
            sim.set_vulnerability(kind, false);
        }
        let before = sim.logs().len();
        sim.emit_attack();
        assert_eq!(sim.logs().len(), before);
    }

    #[test]
    fn test_log_ring_stays_bounded() {
        let sim = sim();
        sim.start();
        for _ in 0..100 {
            sim.emit_attack();
        }
        assert_eq!(sim.logs().len(), 50);
    }

    #[test]
    fn test_update_config() {
        let sim = sim();
        sim.update_config(Some("trap-7".to_string()), None, Some(8080));
        assert_eq!(sim.name(), "trap-7");
        assert_eq!(sim.port(), 8080);
        assert_eq!(sim.log_level(), "info");
        assert!(sim.logs()[0].contains("Configuration saved"));
    }
}
