use super::settings::{ApiConfig, HoneypotConfig, LoggingConfig, SimulationConfig};

// ---------------------------------------------------------------------------
// Section defaults
// ---------------------------------------------------------------------------

pub fn default_api_config() -> ApiConfig {
    ApiConfig {
        bind: default_api_bind(),
        api_key: default_api_key(),
    }
}

pub fn default_honeypot_config() -> HoneypotConfig {
    HoneypotConfig {
        name: default_honeypot_name(),
        template: default_template(),
        port: default_honeypot_port(),
        log_level: default_honeypot_log_level(),
    }
}

pub fn default_simulation_config() -> SimulationConfig {
    SimulationConfig {
        initial_attacks: default_initial_attacks(),
        activity_interval_secs: default_activity_interval_secs(),
        login_interval_secs: default_login_interval_secs(),
        attack_min_interval_secs: default_attack_min_interval_secs(),
        attack_max_interval_secs: default_attack_max_interval_secs(),
        feed_capacity: default_feed_capacity(),
        log_capacity: default_log_capacity(),
    }
}

pub fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file: default_log_file(),
    }
}

// ---------------------------------------------------------------------------
// Field defaults
// ---------------------------------------------------------------------------

pub fn default_api_bind() -> String {
    "127.0.0.1:8787".to_string()
}

pub fn default_api_key() -> String {
    "changeme".to_string()
}

pub fn default_honeypot_name() -> String {
    "Honeypot-Server-1".to_string()
}

pub fn default_template() -> String {
    "wordpress".to_string()
}

pub fn default_honeypot_port() -> u16 {
    80
}

pub fn default_honeypot_log_level() -> String {
    "info".to_string()
}

pub fn default_initial_attacks() -> usize {
    100
}

pub fn default_activity_interval_secs() -> u64 {
    3
}

pub fn default_login_interval_secs() -> u64 {
    5
}

pub fn default_attack_min_interval_secs() -> u64 {
    5
}

pub fn default_attack_max_interval_secs() -> u64 {
    15
}

pub fn default_feed_capacity() -> usize {
    20
}

pub fn default_log_capacity() -> usize {
    200
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_log_file() -> String {
    "logs/honeytrap.log".to_string()
}
