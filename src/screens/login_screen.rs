use tracing::debug;

use crate::driver::driver_model::DriverHandle;
use crate::driver::error::DriverError;
use crate::locators::locator_model::{Locator, LocatorTable};
use crate::screens::screen_model::{Screen, is_visible, read_text, tap, type_text};

/// Locators for the login error banner.
#[derive(Debug)]
pub struct ErrorLocators {
    pub container: Locator,
    pub message: Locator,
    pub close_button: Locator,
}

#[derive(Debug)]
pub struct LoginScreenLocators {
    pub screen: Locator,
    pub username_field: Locator,
    pub password_field: Locator,
    pub login_button: Locator,
    pub error_locators: ErrorLocators,
}

pub static LOGIN_SCREEN_LOCATORS: LoginScreenLocators = LoginScreenLocators {
    screen: Locator::accessibility_id("test-Login"),
    username_field: Locator::accessibility_id("test-Username"),
    password_field: Locator::accessibility_id("test-Password"),
    login_button: Locator::accessibility_id("test-LOGIN"),
    error_locators: ErrorLocators {
        container: Locator::accessibility_id("test-Error message"),
        message: Locator::xpath(
            "//*[@content-desc=\"test-Error message\"]/*[@class=\"android.widget.TextView\"]",
        ),
        close_button: Locator::xpath("//*[@content-desc=\"test-Error message\"]//*[@clickable=\"true\"]"),
    },
};

impl LocatorTable for ErrorLocators {
    fn table_name(&self) -> &'static str {
        "ERROR_LOCATORS"
    }

    fn entries(&self) -> Vec<(&'static str, &Locator)> {
        vec![
            ("container", &self.container),
            ("message", &self.message),
            ("close_button", &self.close_button),
        ]
    }
}

impl LocatorTable for LoginScreenLocators {
    fn table_name(&self) -> &'static str {
        "LOGIN_SCREEN_LOCATORS"
    }

    fn entries(&self) -> Vec<(&'static str, &Locator)> {
        vec![
            ("screen", &self.screen),
            ("username_field", &self.username_field),
            ("password_field", &self.password_field),
            ("login_button", &self.login_button),
            ("error.container", &self.error_locators.container),
            ("error.message", &self.error_locators.message),
            ("error.close_button", &self.error_locators.close_button),
        ]
    }
}

pub struct LoginScreen {
    driver: DriverHandle,
}

impl LoginScreen {
    pub fn new(driver: DriverHandle) -> Self {
        LoginScreen { driver }
    }

    pub fn enter_username(&self, username: &str) -> Result<(), DriverError> {
        type_text(self.driver.as_ref(), &LOGIN_SCREEN_LOCATORS.username_field, username)
    }

    pub fn enter_password(&self, password: &str) -> Result<(), DriverError> {
        type_text(self.driver.as_ref(), &LOGIN_SCREEN_LOCATORS.password_field, password)
    }

    pub fn tap_login(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &LOGIN_SCREEN_LOCATORS.login_button)
    }

    /// Fill both credentials and submit.
    pub fn login(&self, username: &str, password: &str) -> Result<(), DriverError> {
        debug!(username, "logging in");
        self.enter_username(username)?;
        self.enter_password(password)?;
        self.tap_login()
    }

    pub fn is_error_displayed(&self) -> Result<bool, DriverError> {
        is_visible(self.driver.as_ref(), &LOGIN_SCREEN_LOCATORS.error_locators.container)
    }

    /// Text of the error banner, or `None` when no banner is showing.
    pub fn error_message(&self) -> Result<Option<String>, DriverError> {
        if !self.is_error_displayed()? {
            return Ok(None);
        }
        let text = read_text(self.driver.as_ref(), &LOGIN_SCREEN_LOCATORS.error_locators.message)?;
        Ok(Some(text.trim().to_string()))
    }

    pub fn dismiss_error(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &LOGIN_SCREEN_LOCATORS.error_locators.close_button)
    }
}

impl Screen for LoginScreen {
    fn name(&self) -> &'static str {
        "Login"
    }

    fn driver(&self) -> &DriverHandle {
        &self.driver
    }

    fn locators(&self) -> &'static dyn LocatorTable {
        &LOGIN_SCREEN_LOCATORS
    }

    fn anchor(&self) -> &'static Locator {
        &LOGIN_SCREEN_LOCATORS.screen
    }
}
