use crate::driver::driver_model::DriverHandle;
use crate::driver::error::DriverError;
use crate::locators::locator_model::{Locator, LocatorTable};
use crate::screens::screen_model::{Screen, is_visible, tap};

#[derive(Debug)]
pub struct MenuScreenLocators {
    pub menu_button: Locator,
    pub close_button: Locator,
    pub all_items: Locator,
    pub about: Locator,
    pub logout: Locator,
    pub reset_app_state: Locator,
}

pub static MENU_SCREEN_LOCATORS: MenuScreenLocators = MenuScreenLocators {
    menu_button: Locator::accessibility_id("test-Menu"),
    close_button: Locator::accessibility_id("test-Close"),
    all_items: Locator::accessibility_id("test-ALL ITEMS"),
    about: Locator::accessibility_id("test-ABOUT"),
    logout: Locator::accessibility_id("test-LOGOUT"),
    reset_app_state: Locator::accessibility_id("test-RESET APP STATE"),
};

impl LocatorTable for MenuScreenLocators {
    fn table_name(&self) -> &'static str {
        "MENU_SCREEN_LOCATORS"
    }

    fn entries(&self) -> Vec<(&'static str, &Locator)> {
        vec![
            ("menu_button", &self.menu_button),
            ("close_button", &self.close_button),
            ("all_items", &self.all_items),
            ("about", &self.about),
            ("logout", &self.logout),
            ("reset_app_state", &self.reset_app_state),
        ]
    }
}

/// The slide-out navigation drawer.
pub struct MenuScreen {
    driver: DriverHandle,
}

impl MenuScreen {
    pub fn new(driver: DriverHandle) -> Self {
        MenuScreen { driver }
    }

    pub fn open(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &MENU_SCREEN_LOCATORS.menu_button)
    }

    pub fn close(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &MENU_SCREEN_LOCATORS.close_button)
    }

    pub fn is_open(&self) -> Result<bool, DriverError> {
        is_visible(self.driver.as_ref(), &MENU_SCREEN_LOCATORS.close_button)
    }

    pub fn tap_all_items(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &MENU_SCREEN_LOCATORS.all_items)
    }

    pub fn tap_about(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &MENU_SCREEN_LOCATORS.about)
    }

    pub fn tap_logout(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &MENU_SCREEN_LOCATORS.logout)
    }

    pub fn tap_reset_app_state(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &MENU_SCREEN_LOCATORS.reset_app_state)
    }
}

impl Screen for MenuScreen {
    fn name(&self) -> &'static str {
        "Menu"
    }

    fn driver(&self) -> &DriverHandle {
        &self.driver
    }

    fn locators(&self) -> &'static dyn LocatorTable {
        &MENU_SCREEN_LOCATORS
    }

    fn anchor(&self) -> &'static Locator {
        &MENU_SCREEN_LOCATORS.close_button
    }
}
