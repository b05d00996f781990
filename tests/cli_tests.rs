use clap::Parser;
use mobile_fixtures::{FixtureRegistry, LocatorTable};
use mobile_fixtures::cli::commands::{
    LoginOutcome, cmd_locators, cmd_login, cmd_validate, format_validation, login_and_quit,
    run_login, table_for_screen,
};
use mobile_fixtures::cli::config::{
    AppConfig, Cli, Commands, DEFAULT_ENDPOINT, build_session_options, load_config, parse_config,
    resolve_endpoint,
};
use mobile_fixtures::cli::logging::level_for;
use mobile_fixtures::driver::recording::RecordingDriver;
use mobile_fixtures::{DriverError, ERROR_LOCATORS, LOGIN_SCREEN_LOCATORS, PRODUCTS_SCREEN_LOCATORS};

use crate::common::utils::recording_registry;

mod common;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_locators_defaults() {
    let cli = Cli::parse_from(["mobile-fixtures", "locators"]);
    match cli.command {
        Commands::Locators { screen, format } => {
            assert_eq!(screen, None);
            assert_eq!(format, "json");
        }
        _ => panic!("Expected Locators command"),
    }
    assert_eq!(cli.verbose, 0);
}

#[test]
fn cli_parse_login_all_args() {
    let cli = Cli::parse_from([
        "mobile-fixtures",
        "-vv",
        "--appium-endpoint",
        "http://device-farm:4723",
        "login",
        "--username",
        "standard_user",
        "--password",
        "secret_sauce",
        "--trace",
        "trace.jsonl",
        "--dry-run",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.appium_endpoint.as_deref(), Some("http://device-farm:4723"));
    match cli.command {
        Commands::Login {
            username,
            password,
            trace,
            dry_run,
        } => {
            assert_eq!(username, "standard_user");
            assert_eq!(password, "secret_sauce");
            assert_eq!(trace.as_deref(), Some("trace.jsonl"));
            assert!(dry_run);
        }
        _ => panic!("Expected Login command"),
    }
}

#[test]
fn cli_login_requires_credentials() {
    assert!(Cli::try_parse_from(["mobile-fixtures", "login", "--username", "u"]).is_err());
}

#[test]
fn cli_parse_validate() {
    let cli = Cli::parse_from(["mobile-fixtures", "validate", "--config", "ci.yaml"]);
    assert!(matches!(cli.command, Commands::Validate));
    assert_eq!(cli.config.as_deref(), Some("ci.yaml"));
}

#[test]
fn verbosity_maps_to_filter_levels() {
    assert_eq!(level_for(0), "warn");
    assert_eq!(level_for(1), "info");
    assert_eq!(level_for(2), "debug");
    assert_eq!(level_for(9), "trace");
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.appium.endpoint, None);
    assert_eq!(config.appium.timeout_ms, 30_000);
    assert_eq!(config.capabilities.platform_name, "Android");
    assert_eq!(config.capabilities.automation_name, "UiAutomator2");
    assert_eq!(config.trace.path, None);
}

#[test]
fn config_missing_file_returns_defaults() {
    let config = load_config(Some("/nonexistent/mobile-fixtures.yaml"));
    assert_eq!(config.appium.timeout_ms, 30_000);
}

#[test]
fn config_malformed_file_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "appium: [not, a, map").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.capabilities.platform_name, "Android");
}

#[test]
fn config_partial_yaml_fills_defaults() {
    let yaml = r#"
appium:
  endpoint: http://10.0.0.5:4723
capabilities:
  device_name: Pixel_7
  app: /builds/shop.apk
  no_reset: true
  extra:
    newCommandTimeout: 300
    "uiautomator2:skipServerInstallation": true
trace:
  path: run.jsonl
"#;
    let config = parse_config(yaml).unwrap();
    assert_eq!(config.appium.endpoint.as_deref(), Some("http://10.0.0.5:4723"));
    assert_eq!(config.appium.timeout_ms, 30_000);
    assert_eq!(config.capabilities.platform_name, "Android");
    assert_eq!(config.trace.path.as_deref(), Some("run.jsonl"));

    let caps = config.capabilities.to_w3c();
    assert_eq!(caps["platformName"], "Android");
    assert_eq!(caps["appium:automationName"], "UiAutomator2");
    assert_eq!(caps["appium:deviceName"], "Pixel_7");
    assert_eq!(caps["appium:app"], "/builds/shop.apk");
    assert_eq!(caps["appium:noReset"], true);
    assert_eq!(caps["appium:newCommandTimeout"], 300);
    assert_eq!(caps["uiautomator2:skipServerInstallation"], true);
    assert!(caps.get("appium:appPackage").is_none(), "unset options are omitted");
}

#[test]
fn endpoint_resolution_prefers_cli_then_config() {
    let mut config = AppConfig::default();
    config.appium.endpoint = Some("http://from-config:4723".into());

    assert_eq!(resolve_endpoint(Some("http://from-cli:4723"), &config), "http://from-cli:4723");
    assert_eq!(resolve_endpoint(None, &config), "http://from-config:4723");
}

#[test]
fn endpoint_resolution_falls_back_to_env_or_default() {
    let resolved = resolve_endpoint(None, &AppConfig::default());
    match std::env::var("APPIUM_ENDPOINT") {
        Ok(env) => assert_eq!(resolved, env),
        Err(_) => assert_eq!(resolved, DEFAULT_ENDPOINT),
    }
}

#[test]
fn session_options_carry_timeout_and_capabilities() {
    let mut config = AppConfig::default();
    config.appium.timeout_ms = 5_000;
    let options = build_session_options("http://127.0.0.1:4723/", &config);

    assert_eq!(options.endpoint, "http://127.0.0.1:4723/");
    assert_eq!(options.timeout_ms, 5_000);
    assert_eq!(options.capabilities["platformName"], "Android");
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn locators_json_contains_every_table() {
    let out = cmd_locators(None, "json").unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();

    for name in [
        "LOGIN_SCREEN_LOCATORS",
        "MENU_SCREEN_LOCATORS",
        "PRODUCTS_SCREEN_LOCATORS",
        "GOODS_SCREEN_LOCATORS",
        "CART_SCREEN_LOCATORS",
        "ERROR_LOCATORS",
    ] {
        assert!(json.get(name).is_some(), "missing {}", name);
    }
    assert_eq!(json["LOGIN_SCREEN_LOCATORS"]["login_button"]["value"], "test-LOGIN");
}

#[test]
fn locators_single_screen_yaml() {
    let out = cmd_locators(Some("cart"), "yaml").unwrap();
    let yaml: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
    let map = yaml.as_mapping().unwrap();
    assert_eq!(map.len(), 1);
    assert!(out.contains("CART_SCREEN_LOCATORS"));
    assert!(out.contains("test-CHECKOUT"));
}

#[test]
fn locators_rejects_unknown_screen_and_format() {
    assert!(cmd_locators(Some("checkout"), "json").is_err());
    assert!(cmd_locators(None, "xml").is_err());
}

#[test]
fn table_lookup_accepts_short_and_exported_names() {
    assert_eq!(table_for_screen("Login").unwrap().table_name(), "LOGIN_SCREEN_LOCATORS");
    assert_eq!(table_for_screen("ERROR_LOCATORS").unwrap().table_name(), "ERROR_LOCATORS");
    assert!(table_for_screen("settings").is_none());
}

#[test]
fn validate_passes_for_shipped_tables() {
    let results = cmd_validate();
    assert_eq!(results.len(), 6);
    assert!(results.iter().all(|(_, r)| r.is_ok()));

    let report = format_validation(&results);
    assert_eq!(report.lines().count(), 6);
    assert!(report.contains("\u{2713} ERROR_LOCATORS"));
}

#[test]
fn run_login_reports_products_after_success() {
    let (_driver, registry) = recording_registry(
        RecordingDriver::new()
            .with_texts(&PRODUCTS_SCREEN_LOCATORS.item_title.value, ["Backpack", "Bike Light"]),
    );
    let outcome = run_login(&registry, "standard_user", "secret_sauce").unwrap();
    assert_eq!(outcome, LoginOutcome::LoggedIn { products: 2 });
}

#[test]
fn run_login_reports_rejection_text() {
    let (_driver, registry) = recording_registry(
        RecordingDriver::new()
            .with_missing(&PRODUCTS_SCREEN_LOCATORS.screen.value)
            .with_text(&ERROR_LOCATORS.message.value, "Sorry, this user has been locked out."),
    );
    let outcome = run_login(&registry, "locked_out_user", "secret_sauce").unwrap();
    assert_eq!(
        outcome,
        LoginOutcome::Rejected {
            message: "Sorry, this user has been locked out.".into()
        }
    );
    assert_eq!(outcome.to_string(), "Login rejected: Sorry, this user has been locked out.");
}

#[test]
fn run_login_unknown_when_nothing_appears() {
    let (_driver, registry) = recording_registry(
        RecordingDriver::new()
            .with_missing(&PRODUCTS_SCREEN_LOCATORS.screen.value)
            .with_missing(&ERROR_LOCATORS.container.value),
    );
    let registry: &FixtureRegistry = &registry;
    assert_eq!(run_login(registry, "u", "p").unwrap(), LoginOutcome::Unknown);
}

#[test]
fn login_result_survives_failed_quit() {
    let (driver, registry) = recording_registry(
        RecordingDriver::new()
            .with_texts(&PRODUCTS_SCREEN_LOCATORS.item_title.value, ["Backpack"])
            .with_failing_quit(),
    );

    let outcome = login_and_quit(&registry, "standard_user", "secret_sauce").unwrap();
    assert_eq!(outcome, LoginOutcome::LoggedIn { products: 1 });
    assert!(driver.is_quit());
}

#[test]
fn login_error_is_kept_when_quit_also_fails() {
    let (driver, registry) = recording_registry(
        RecordingDriver::new()
            .with_missing(&LOGIN_SCREEN_LOCATORS.username_field.value)
            .with_failing_quit(),
    );

    let err = login_and_quit(&registry, "standard_user", "secret_sauce").unwrap_err();
    let driver_err = err.downcast_ref::<DriverError>().expect("driver error");
    assert!(driver_err.is_not_found(), "got {:?}", driver_err);
    assert!(driver.is_quit());
}

#[test]
fn dry_run_login_writes_trace() {
    let dir = tempfile::tempdir().unwrap();
    let trace = dir.path().join("login.jsonl");
    let options = build_session_options(DEFAULT_ENDPOINT, &AppConfig::default());

    let outcome = cmd_login(&options, "standard_user", "secret_sauce", trace.to_str(), true).unwrap();
    assert!(matches!(outcome, LoginOutcome::LoggedIn { .. }));

    let content = std::fs::read_to_string(&trace).unwrap();
    assert!(content.lines().count() > 0);
    assert!(content.lines().last().unwrap().contains("\"quit\""));
}
