//! Centralized constants for the solar advisor
//!
//! Server defaults, file names and regional facts live here so every crate
//! reads the same value. Estimation tunables are in
//! `solar_agent_core::SizingConstants` and can be overridden from settings.

/// Server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_DATA_DIR: &str = "data";

    /// Used when `SOLAR_CONFIG` is unset and the file exists
    pub const DEFAULT_CONFIG_PATH: &str = "config/solar.toml";

    /// Env var naming an explicit config file
    pub const CONFIG_PATH_ENV: &str = "SOLAR_CONFIG";

    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Service region
pub mod region {
    /// Name used in size replies
    pub const REGION_NAME: &str = "Rawalpindi";

    /// Installer list used for absent or unknown locations
    pub const DEFAULT_INSTALLER_LOCATION: &str = "rawalpindi";
}

/// Data file names under `DATA_DIR`
pub mod data_files {
    pub const INSTALLERS: &str = "installers.json";
    pub const FAQS: &str = "faqs.json";
    pub const COST_TIERS: &str = "cost_tiers.json";
}

/// Phone numbers quoted in replies
pub mod helplines {
    /// Advisor helpline for choosing an installer
    pub const ADVISOR: &str = "051-111-000-111";

    /// Islamabad Electric Supply Company
    pub const IESCO: &str = "051-111-000-000";
}

/// Webhook parameter names, canonical first, then aliases
pub mod parameters {
    pub const ENERGY_USAGE: &[&str] = &["energy_usage", "units"];
    pub const MONTHLY_BILL: &[&str] = &["monthly_bill", "bill"];
    pub const ROOF_AREA: &[&str] = &["roof_area", "area"];
    pub const SIZE_KW: &[&str] = &["size_kw", "size"];
    pub const LOCATION: &[&str] = &["location", "city"];
    pub const FAQ_TOPIC: &[&str] = &["faq_topic", "topic"];
}

/// Tolerance when matching a size against a cost tier
pub const TIER_MATCH_TOLERANCE: f64 = 1e-6;
