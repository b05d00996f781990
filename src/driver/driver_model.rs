use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::driver::error::DriverError;
use crate::locators::locator_model::Locator;

/// Opaque element handle returned by a find command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ElementRef(pub String);

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        ElementRef(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The automation surface screens are written against.
///
/// Implementations take `&self` so one handle can be shared by every screen
/// in a registry.
pub trait AutomationDriver: Send + Sync {
    fn find_element(&self, locator: &Locator) -> Result<ElementRef, DriverError>;

    /// Returns an empty list (not an error) when nothing matches.
    fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError>;

    fn click(&self, element: &ElementRef) -> Result<(), DriverError>;

    fn send_keys(&self, element: &ElementRef, text: &str) -> Result<(), DriverError>;

    fn clear(&self, element: &ElementRef) -> Result<(), DriverError>;

    fn text(&self, element: &ElementRef) -> Result<String, DriverError>;

    fn is_displayed(&self, element: &ElementRef) -> Result<bool, DriverError>;

    /// System back navigation.
    fn back(&self) -> Result<(), DriverError>;

    fn quit(&self) -> Result<(), DriverError>;
}

/// Shared driver handle held by every screen.
pub type DriverHandle = Arc<dyn AutomationDriver>;

/// One driver command, as recorded or traced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DriverCommand {
    FindElement { locator: String },
    FindElements { locator: String },
    Click { element: String },
    SendKeys { element: String, text: String },
    Clear { element: String },
    Text { element: String },
    IsDisplayed { element: String },
    Back,
    Quit,
}

impl DriverCommand {
    pub fn name(&self) -> &'static str {
        match self {
            DriverCommand::FindElement { .. } => "find_element",
            DriverCommand::FindElements { .. } => "find_elements",
            DriverCommand::Click { .. } => "click",
            DriverCommand::SendKeys { .. } => "send_keys",
            DriverCommand::Clear { .. } => "clear",
            DriverCommand::Text { .. } => "text",
            DriverCommand::IsDisplayed { .. } => "is_displayed",
            DriverCommand::Back => "back",
            DriverCommand::Quit => "quit",
        }
    }

    /// Locator or element the command addressed, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            DriverCommand::FindElement { locator } | DriverCommand::FindElements { locator } => {
                Some(locator)
            }
            DriverCommand::Click { element }
            | DriverCommand::SendKeys { element, .. }
            | DriverCommand::Clear { element }
            | DriverCommand::Text { element }
            | DriverCommand::IsDisplayed { element } => Some(element),
            DriverCommand::Back | DriverCommand::Quit => None,
        }
    }
}
