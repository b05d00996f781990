use crate::driver::driver_model::DriverHandle;
use crate::driver::error::DriverError;
use crate::locators::locator_model::{Locator, LocatorTable};
use crate::screens::screen_model::{Screen, read_all_texts, tap, tap_nth};

#[derive(Debug)]
pub struct CartScreenLocators {
    pub screen: Locator,
    pub item: Locator,
    pub item_title: Locator,
    pub item_quantity: Locator,
    pub remove_button: Locator,
    pub checkout_button: Locator,
    pub continue_shopping_button: Locator,
}

pub static CART_SCREEN_LOCATORS: CartScreenLocators = CartScreenLocators {
    screen: Locator::accessibility_id("test-Cart Content"),
    item: Locator::accessibility_id("test-Item"),
    item_title: Locator::xpath(
        "//*[@content-desc=\"test-Description\"]/*[@class=\"android.widget.TextView\"][1]",
    ),
    item_quantity: Locator::accessibility_id("test-Amount"),
    remove_button: Locator::accessibility_id("test-REMOVE"),
    checkout_button: Locator::accessibility_id("test-CHECKOUT"),
    continue_shopping_button: Locator::accessibility_id("test-CONTINUE SHOPPING"),
};

impl LocatorTable for CartScreenLocators {
    fn table_name(&self) -> &'static str {
        "CART_SCREEN_LOCATORS"
    }

    fn entries(&self) -> Vec<(&'static str, &Locator)> {
        vec![
            ("screen", &self.screen),
            ("item", &self.item),
            ("item_title", &self.item_title),
            ("item_quantity", &self.item_quantity),
            ("remove_button", &self.remove_button),
            ("checkout_button", &self.checkout_button),
            ("continue_shopping_button", &self.continue_shopping_button),
        ]
    }
}

pub struct CartScreen {
    driver: DriverHandle,
}

impl CartScreen {
    pub fn new(driver: DriverHandle) -> Self {
        CartScreen { driver }
    }

    pub fn item_titles(&self) -> Result<Vec<String>, DriverError> {
        read_all_texts(self.driver.as_ref(), &CART_SCREEN_LOCATORS.item_title)
    }

    pub fn item_count(&self) -> Result<usize, DriverError> {
        Ok(self.driver.find_elements(&CART_SCREEN_LOCATORS.item)?.len())
    }

    pub fn remove_item(&self, index: usize) -> Result<(), DriverError> {
        tap_nth(self.driver.as_ref(), &CART_SCREEN_LOCATORS.remove_button, index)
    }

    pub fn checkout(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &CART_SCREEN_LOCATORS.checkout_button)
    }

    pub fn continue_shopping(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &CART_SCREEN_LOCATORS.continue_shopping_button)
    }
}

impl Screen for CartScreen {
    fn name(&self) -> &'static str {
        "Cart"
    }

    fn driver(&self) -> &DriverHandle {
        &self.driver
    }

    fn locators(&self) -> &'static dyn LocatorTable {
        &CART_SCREEN_LOCATORS
    }

    fn anchor(&self) -> &'static Locator {
        &CART_SCREEN_LOCATORS.screen
    }
}
