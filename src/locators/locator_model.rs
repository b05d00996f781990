use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// How the driver should search for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    AccessibilityId,
    Id,
    XPath,
    ClassName,
    AndroidUiAutomator,
    IosPredicate,
}

impl Strategy {
    /// The `using` value sent in a W3C find-element request.
    pub fn as_w3c(&self) -> &'static str {
        match self {
            Strategy::AccessibilityId => "accessibility id",
            Strategy::Id => "id",
            Strategy::XPath => "xpath",
            Strategy::ClassName => "class name",
            Strategy::AndroidUiAutomator => "-android uiautomator",
            Strategy::IosPredicate => "-ios predicate string",
        }
    }
}

/// A selector for one UI element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Locator {
    pub strategy: Strategy,
    pub value: Cow<'static, str>,
}

impl Locator {
    pub const fn new(strategy: Strategy, value: &'static str) -> Self {
        Locator {
            strategy,
            value: Cow::Borrowed(value),
        }
    }

    pub const fn accessibility_id(value: &'static str) -> Self {
        Self::new(Strategy::AccessibilityId, value)
    }

    pub const fn id(value: &'static str) -> Self {
        Self::new(Strategy::Id, value)
    }

    pub const fn xpath(value: &'static str) -> Self {
        Self::new(Strategy::XPath, value)
    }

    pub const fn class_name(value: &'static str) -> Self {
        Self::new(Strategy::ClassName, value)
    }

    pub const fn android_uiautomator(value: &'static str) -> Self {
        Self::new(Strategy::AndroidUiAutomator, value)
    }

    pub const fn ios_predicate(value: &'static str) -> Self {
        Self::new(Strategy::IosPredicate, value)
    }

    /// XPath built at runtime (e.g. matching on an item's text).
    pub fn xpath_owned(value: String) -> Self {
        Locator {
            strategy: Strategy::XPath,
            value: Cow::Owned(value),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy.as_w3c(), self.value)
    }
}

/// Read-only mapping from symbolic element name to locator.
pub trait LocatorTable: Sync {
    /// Exported name of the table, e.g. `LOGIN_SCREEN_LOCATORS`.
    fn table_name(&self) -> &'static str;

    /// All (name, locator) pairs in declaration order.
    fn entries(&self) -> Vec<(&'static str, &Locator)>;

    fn get(&self, key: &str) -> Option<&Locator> {
        self.entries()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, locator)| locator)
    }

    fn keys(&self) -> Vec<&'static str> {
        self.entries().into_iter().map(|(name, _)| name).collect()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocatorTableError {
    #[error("{table} has no entries")]
    Empty { table: String },

    #[error("{table} declares '{key}' more than once")]
    DuplicateKey { table: String, key: String },

    #[error("{table}.{key} has an empty selector")]
    EmptySelector { table: String, key: String },
}

/// Check that a table is non-empty, has unique keys and no blank selectors.
pub fn validate_table(table: &dyn LocatorTable) -> Result<(), LocatorTableError> {
    let entries = table.entries();
    if entries.is_empty() {
        return Err(LocatorTableError::Empty {
            table: table.table_name().to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (key, locator) in entries {
        if !seen.insert(key) {
            return Err(LocatorTableError::DuplicateKey {
                table: table.table_name().to_string(),
                key: key.to_string(),
            });
        }
        if locator.value.trim().is_empty() {
            return Err(LocatorTableError::EmptySelector {
                table: table.table_name().to_string(),
                key: key.to_string(),
            });
        }
    }

    Ok(())
}
