use crate::driver::driver_model::{AutomationDriver, DriverHandle};
use crate::driver::error::DriverError;
use crate::locators::locator_model::{Locator, LocatorTable};

/// A page object over one UI surface of the app.
pub trait Screen: Send + Sync {
    /// Stable display name, e.g. "Login".
    fn name(&self) -> &'static str;

    fn driver(&self) -> &DriverHandle;

    fn locators(&self) -> &'static dyn LocatorTable;

    /// Element whose presence means this screen is showing.
    fn anchor(&self) -> &'static Locator;

    fn is_displayed(&self) -> Result<bool, DriverError> {
        is_visible(self.driver().as_ref(), self.anchor())
    }
}

// ============================================================================
// Shared element helpers
// ============================================================================

pub fn tap(driver: &dyn AutomationDriver, locator: &Locator) -> Result<(), DriverError> {
    let element = driver.find_element(locator)?;
    driver.click(&element)
}

/// Clear the field, then type `text` into it.
pub fn type_text(driver: &dyn AutomationDriver, locator: &Locator, text: &str) -> Result<(), DriverError> {
    let element = driver.find_element(locator)?;
    driver.clear(&element)?;
    driver.send_keys(&element, text)
}

pub fn read_text(driver: &dyn AutomationDriver, locator: &Locator) -> Result<String, DriverError> {
    let element = driver.find_element(locator)?;
    driver.text(&element)
}

/// Text of every element matching `locator`, trimmed.
pub fn read_all_texts(driver: &dyn AutomationDriver, locator: &Locator) -> Result<Vec<String>, DriverError> {
    driver
        .find_elements(locator)?
        .iter()
        .map(|element| driver.text(element).map(|t| t.trim().to_string()))
        .collect()
}

/// Found and displayed. A missing element is `Ok(false)`, not an error.
pub fn is_visible(driver: &dyn AutomationDriver, locator: &Locator) -> Result<bool, DriverError> {
    match driver.find_element(locator) {
        Ok(element) => driver.is_displayed(&element),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

/// Tap the `index`-th element matching `locator`.
pub fn tap_nth(driver: &dyn AutomationDriver, locator: &Locator, index: usize) -> Result<(), DriverError> {
    let elements = driver.find_elements(locator)?;
    let element = elements
        .get(index)
        .ok_or_else(|| DriverError::not_found(format!("{}[{}]", locator, index)))?;
    driver.click(element)
}
