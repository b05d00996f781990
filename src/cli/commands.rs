use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::driver::appium::{AppiumSession, SessionOptions};
use crate::driver::driver_model::{AutomationDriver, DriverHandle};
use crate::driver::recording::RecordingDriver;
use crate::fixtures::registry::FixtureRegistry;
use crate::locators::locator_model::{LocatorTable, LocatorTableError, validate_table};
use crate::screens::login_screen::LOGIN_SCREEN_LOCATORS;
use crate::screens::screen_model::Screen;
use crate::trace::{logger::TraceLogger, traced_driver::TracedDriver};

// ============================================================================
// locators subcommand
// ============================================================================

/// Map a `--screen` value (short name or exported table name) to its table.
pub fn table_for_screen(screen: &str) -> Option<&'static dyn LocatorTable> {
    let wanted = match screen.to_lowercase().as_str() {
        "login" => "LOGIN_SCREEN_LOCATORS",
        "menu" => "MENU_SCREEN_LOCATORS",
        "products" => "PRODUCTS_SCREEN_LOCATORS",
        "goods" => "GOODS_SCREEN_LOCATORS",
        "cart" => "CART_SCREEN_LOCATORS",
        "error" => "ERROR_LOCATORS",
        _ => screen,
    };
    FixtureRegistry::locator_tables()
        .into_iter()
        .find(|t| t.table_name() == wanted)
}

/// `{ key: { strategy, value } }` in declaration order.
pub fn table_to_json(table: &dyn LocatorTable) -> Result<Value, serde_json::Error> {
    let mut map = Map::new();
    for (key, locator) in table.entries() {
        map.insert(key.to_string(), serde_json::to_value(locator)?);
    }
    Ok(Value::Object(map))
}

pub fn cmd_locators(screen: Option<&str>, format: &str) -> Result<String, Box<dyn std::error::Error>> {
    let tables: Vec<&'static dyn LocatorTable> = match screen {
        Some(name) => {
            let table = table_for_screen(name).ok_or_else(|| format!("Unknown screen: {}", name))?;
            vec![table]
        }
        None => FixtureRegistry::locator_tables().to_vec(),
    };

    let mut out = Map::new();
    for table in tables {
        out.insert(table.table_name().to_string(), table_to_json(table)?);
    }
    let out = Value::Object(out);

    let rendered = match format {
        "json" => serde_json::to_string_pretty(&out)?,
        "yaml" => serde_yaml::to_string(&out)?,
        other => return Err(format!("Unknown format: {} (expected json or yaml)", other).into()),
    };
    Ok(rendered)
}

// ============================================================================
// validate subcommand
// ============================================================================

pub fn cmd_validate() -> Vec<(&'static str, Result<(), LocatorTableError>)> {
    FixtureRegistry::locator_tables()
        .into_iter()
        .map(|table| (table.table_name(), validate_table(table)))
        .collect()
}

pub fn format_validation(results: &[(&'static str, Result<(), LocatorTableError>)]) -> String {
    let mut out = String::new();
    for (name, result) in results {
        match result {
            Ok(()) => out.push_str(&format!("\u{2713} {}\n", name)),
            Err(e) => out.push_str(&format!("\u{2717} {}: {}\n", name, e)),
        }
    }
    out
}

// ============================================================================
// login subcommand
// ============================================================================

/// Where the app ended up after submitting credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn { products: usize },
    Rejected { message: String },
    Unknown,
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginOutcome::LoggedIn { products } => {
                write!(f, "Logged in: products screen shows {} item(s)", products)
            }
            LoginOutcome::Rejected { message } => write!(f, "Login rejected: {}", message),
            LoginOutcome::Unknown => write!(f, "Login submitted, but neither products nor an error appeared"),
        }
    }
}

fn with_trace<D>(driver: D, trace: Option<&str>) -> DriverHandle
where
    D: AutomationDriver + 'static,
{
    let handle: DriverHandle = match trace {
        Some(path) => Arc::new(TracedDriver::new(driver, TraceLogger::new(path))),
        None => Arc::new(driver),
    };
    handle
}

/// Open a driver (Appium, or recording for `dry_run`), optionally traced.
pub fn connect(
    options: &SessionOptions,
    dry_run: bool,
    trace: Option<&str>,
) -> Result<DriverHandle, Box<dyn std::error::Error>> {
    if dry_run {
        info!("dry run: using recording driver");
        let driver =
            RecordingDriver::new().with_missing(&LOGIN_SCREEN_LOCATORS.error_locators.container.value);
        return Ok(with_trace(driver, trace));
    }
    let session = AppiumSession::start(options)?;
    Ok(with_trace(session, trace))
}

/// Log in through the registry's screens and classify the result.
pub fn run_login(
    registry: &FixtureRegistry,
    username: &str,
    password: &str,
) -> Result<LoginOutcome, Box<dyn std::error::Error>> {
    registry.login_screen.login(username, password)?;

    if registry.products_screen.is_displayed()? {
        let products = registry.products_screen.product_titles()?.len();
        return Ok(LoginOutcome::LoggedIn { products });
    }

    if let Some(message) = registry.login_screen.error_message()? {
        return Ok(LoginOutcome::Rejected { message });
    }

    Ok(LoginOutcome::Unknown)
}

pub fn cmd_login(
    options: &SessionOptions,
    username: &str,
    password: &str,
    trace: Option<&str>,
    dry_run: bool,
) -> Result<LoginOutcome, Box<dyn std::error::Error>> {
    let driver = connect(options, dry_run, trace)?;
    let registry = FixtureRegistry::new(driver);
    login_and_quit(&registry, username, password)
}

/// `run_login`, then close the session. A failed quit is logged and never
/// replaces the login result.
pub fn login_and_quit(
    registry: &FixtureRegistry,
    username: &str,
    password: &str,
) -> Result<LoginOutcome, Box<dyn std::error::Error>> {
    let outcome = run_login(registry, username, password);
    if let Err(e) = registry.driver().quit() {
        warn!(error = %e, "failed to close driver session after login");
    }
    outcome
}
