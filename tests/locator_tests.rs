use std::collections::HashSet;

use mobile_fixtures::{
    ERROR_LOCATORS, FixtureRegistry, LOGIN_SCREEN_LOCATORS, Locator, LocatorTable,
    PRODUCTS_SCREEN_LOCATORS, Strategy,
    locators::locator_model::{LocatorTableError, validate_table},
    screens::products_screen::xpath_literal,
};

// =========================================================================
// Exported tables
// =========================================================================

#[test]
fn every_exported_table_is_non_empty() {
    for table in FixtureRegistry::locator_tables() {
        assert!(!table.entries().is_empty(), "{} must not be empty", table.table_name());
    }
}

#[test]
fn every_exported_table_has_unique_keys() {
    for table in FixtureRegistry::locator_tables() {
        let keys = table.keys();
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(keys.len(), unique.len(), "{} has duplicate keys", table.table_name());
    }
}

#[test]
fn every_exported_table_validates() {
    for table in FixtureRegistry::locator_tables() {
        assert_eq!(validate_table(table), Ok(()), "{}", table.table_name());
    }
}

#[test]
fn table_names_follow_the_export_names() {
    let names: Vec<_> = FixtureRegistry::locator_tables()
        .iter()
        .map(|t| t.table_name())
        .collect();
    assert_eq!(
        names,
        vec![
            "LOGIN_SCREEN_LOCATORS",
            "MENU_SCREEN_LOCATORS",
            "PRODUCTS_SCREEN_LOCATORS",
            "GOODS_SCREEN_LOCATORS",
            "CART_SCREEN_LOCATORS",
            "ERROR_LOCATORS",
        ]
    );
}

#[test]
fn login_table_lists_error_entries_under_prefix() {
    for (key, locator) in ERROR_LOCATORS.entries() {
        let prefixed = format!("error.{}", key);
        assert_eq!(
            LOGIN_SCREEN_LOCATORS.get(&prefixed),
            Some(locator),
            "{} must be reachable from the login table",
            prefixed
        );
    }
}

#[test]
fn get_finds_declared_keys_only() {
    assert_eq!(
        LOGIN_SCREEN_LOCATORS.get("username_field"),
        Some(&Locator::accessibility_id("test-Username"))
    );
    assert_eq!(LOGIN_SCREEN_LOCATORS.get("nope"), None);
    assert_eq!(
        PRODUCTS_SCREEN_LOCATORS.get("cart_button").map(|l| l.strategy),
        Some(Strategy::AccessibilityId)
    );
}

// =========================================================================
// validate_table failures
// =========================================================================

struct FakeTable(Vec<(&'static str, Locator)>);

impl LocatorTable for FakeTable {
    fn table_name(&self) -> &'static str {
        "FAKE_LOCATORS"
    }

    fn entries(&self) -> Vec<(&'static str, &Locator)> {
        self.0.iter().map(|(k, l)| (*k, l)).collect()
    }
}

#[test]
fn validate_rejects_empty_table() {
    let table = FakeTable(vec![]);
    assert_eq!(
        validate_table(&table),
        Err(LocatorTableError::Empty {
            table: "FAKE_LOCATORS".into()
        })
    );
}

#[test]
fn validate_rejects_duplicate_key() {
    let table = FakeTable(vec![
        ("login", Locator::accessibility_id("a")),
        ("login", Locator::accessibility_id("b")),
    ]);
    assert_eq!(
        validate_table(&table),
        Err(LocatorTableError::DuplicateKey {
            table: "FAKE_LOCATORS".into(),
            key: "login".into(),
        })
    );
}

#[test]
fn validate_rejects_blank_selector() {
    let table = FakeTable(vec![("ok", Locator::id("x")), ("blank", Locator::xpath("  "))]);
    let err = validate_table(&table).unwrap_err();
    assert_eq!(err.to_string(), "FAKE_LOCATORS.blank has an empty selector");
}

// =========================================================================
// Locator formatting
// =========================================================================

#[test]
fn strategies_map_to_w3c_using_values() {
    assert_eq!(Strategy::AccessibilityId.as_w3c(), "accessibility id");
    assert_eq!(Strategy::Id.as_w3c(), "id");
    assert_eq!(Strategy::XPath.as_w3c(), "xpath");
    assert_eq!(Strategy::ClassName.as_w3c(), "class name");
    assert_eq!(Strategy::AndroidUiAutomator.as_w3c(), "-android uiautomator");
    assert_eq!(Strategy::IosPredicate.as_w3c(), "-ios predicate string");
}

#[test]
fn locator_display_and_serialize() {
    let locator = Locator::accessibility_id("test-LOGIN");
    assert_eq!(locator.to_string(), "accessibility id=test-LOGIN");

    let json = serde_json::to_value(&locator).unwrap();
    assert_eq!(json["strategy"], "accessibility_id");
    assert_eq!(json["value"], "test-LOGIN");
}

#[test]
fn owned_xpath_equals_static_xpath() {
    let built = Locator::xpath_owned("//a".to_string());
    assert_eq!(built, Locator::xpath("//a"));
}

#[test]
fn xpath_literal_picks_a_safe_quote() {
    assert_eq!(xpath_literal("Sauce Labs Backpack"), "\"Sauce Labs Backpack\"");
    assert_eq!(xpath_literal("The \"Best\" Tee"), "'The \"Best\" Tee'");
    assert_eq!(
        xpath_literal("It's \"fine\""),
        "concat(\"It's \", '\"', \"fine\", '\"', \"\")"
    );
}
