use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::driver::appium::SessionOptions;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "mobile-fixtures",
    version,
    about = "Page-object fixtures for the mobile shop app"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Appium server URL
    #[arg(long, global = true)]
    pub appium_endpoint: Option<String>,

    /// Path to config file (default: mobile-fixtures.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print locator tables
    Locators {
        /// Only this screen: login, menu, products, goods, cart or error
        #[arg(long)]
        screen: Option<String>,

        /// Output format: json or yaml
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Check every locator table for emptiness and duplicate keys
    Validate,

    /// Log in through the fixtures and report where the app ended up
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        /// Write a JSONL command trace to this file
        #[arg(long)]
        trace: Option<String>,

        /// Use an in-memory recording driver instead of Appium
        #[arg(long)]
        dry_run: bool,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:4723";

/// Optional YAML config file: `mobile-fixtures.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub appium: AppiumConfig,
    #[serde(default)]
    pub capabilities: CapabilitiesConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppiumConfig {
    pub endpoint: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for AppiumConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilitiesConfig {
    #[serde(default = "default_platform")]
    pub platform_name: String,

    #[serde(default = "default_automation")]
    pub automation_name: String,

    pub device_name: Option<String>,
    pub app: Option<String>,
    pub app_package: Option<String>,
    pub app_activity: Option<String>,

    #[serde(default)]
    pub no_reset: bool,

    /// Passed through verbatim; keys without a vendor prefix get `appium:`.
    #[serde(default)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for CapabilitiesConfig {
    fn default() -> Self {
        Self {
            platform_name: default_platform(),
            automation_name: default_automation(),
            device_name: None,
            app: None,
            app_package: None,
            app_activity: None,
            no_reset: false,
            extra: BTreeMap::new(),
        }
    }
}

/// Capability names defined by W3C itself; these never take a prefix.
const W3C_CAPABILITIES: [&str; 9] = [
    "browserName",
    "browserVersion",
    "platformName",
    "acceptInsecureCerts",
    "pageLoadStrategy",
    "proxy",
    "setWindowRect",
    "timeouts",
    "unhandledPromptBehavior",
];

fn vendor_key(key: &str) -> String {
    if key.contains(':') || W3C_CAPABILITIES.contains(&key) {
        key.to_string()
    } else {
        format!("appium:{}", key)
    }
}

impl CapabilitiesConfig {
    /// W3C `alwaysMatch` object for the new-session request.
    pub fn to_w3c(&self) -> Value {
        let mut caps = Map::new();
        caps.insert("platformName".into(), Value::from(self.platform_name.clone()));
        caps.insert("appium:automationName".into(), Value::from(self.automation_name.clone()));

        let optional = [
            ("appium:deviceName", &self.device_name),
            ("appium:app", &self.app),
            ("appium:appPackage", &self.app_package),
            ("appium:appActivity", &self.app_activity),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                caps.insert(key.into(), Value::from(v.clone()));
            }
        }

        if self.no_reset {
            caps.insert("appium:noReset".into(), Value::Bool(true));
        }

        for (key, value) in &self.extra {
            caps.insert(vendor_key(key), value.clone());
        }

        Value::Object(caps)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// Serde default helpers
fn default_timeout_ms() -> u64 { 30_000 }
fn default_platform() -> String { "Android".to_string() }
fn default_automation() -> String { "UiAutomator2".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("mobile-fixtures.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "malformed config file, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Appium endpoint: CLI > config file > `APPIUM_ENDPOINT` > default.
pub fn resolve_endpoint(cli_endpoint: Option<&str>, config: &AppConfig) -> String {
    cli_endpoint
        .map(str::to_string)
        .or_else(|| config.appium.endpoint.clone())
        .or_else(|| std::env::var("APPIUM_ENDPOINT").ok())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}

pub fn build_session_options(endpoint: &str, config: &AppConfig) -> SessionOptions {
    SessionOptions {
        endpoint: endpoint.to_string(),
        timeout_ms: config.appium.timeout_ms,
        capabilities: config.capabilities.to_w3c(),
    }
}
