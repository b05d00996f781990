use crate::driver::driver_model::DriverHandle;
use crate::driver::error::DriverError;
use crate::locators::locator_model::{Locator, LocatorTable};
use crate::screens::screen_model::{Screen, read_text, tap};

#[derive(Debug)]
pub struct GoodsScreenLocators {
    pub screen: Locator,
    pub title: Locator,
    pub description: Locator,
    pub price: Locator,
    pub add_to_cart_button: Locator,
    pub remove_button: Locator,
    pub back_button: Locator,
}

pub static GOODS_SCREEN_LOCATORS: GoodsScreenLocators = GoodsScreenLocators {
    screen: Locator::accessibility_id("test-Inventory item page"),
    title: Locator::xpath(
        "//*[@content-desc=\"test-Description\"]/*[@class=\"android.widget.TextView\"][1]",
    ),
    description: Locator::xpath(
        "//*[@content-desc=\"test-Description\"]/*[@class=\"android.widget.TextView\"][2]",
    ),
    price: Locator::accessibility_id("test-Price"),
    add_to_cart_button: Locator::accessibility_id("test-ADD TO CART"),
    remove_button: Locator::accessibility_id("test-REMOVE"),
    back_button: Locator::accessibility_id("test-BACK TO PRODUCTS"),
};

impl LocatorTable for GoodsScreenLocators {
    fn table_name(&self) -> &'static str {
        "GOODS_SCREEN_LOCATORS"
    }

    fn entries(&self) -> Vec<(&'static str, &Locator)> {
        vec![
            ("screen", &self.screen),
            ("title", &self.title),
            ("description", &self.description),
            ("price", &self.price),
            ("add_to_cart_button", &self.add_to_cart_button),
            ("remove_button", &self.remove_button),
            ("back_button", &self.back_button),
        ]
    }
}

/// Detail page of a single product.
pub struct GoodsScreen {
    driver: DriverHandle,
}

impl GoodsScreen {
    pub fn new(driver: DriverHandle) -> Self {
        GoodsScreen { driver }
    }

    pub fn title(&self) -> Result<String, DriverError> {
        read_text(self.driver.as_ref(), &GOODS_SCREEN_LOCATORS.title).map(|t| t.trim().to_string())
    }

    pub fn description(&self) -> Result<String, DriverError> {
        read_text(self.driver.as_ref(), &GOODS_SCREEN_LOCATORS.description).map(|t| t.trim().to_string())
    }

    pub fn price(&self) -> Result<String, DriverError> {
        read_text(self.driver.as_ref(), &GOODS_SCREEN_LOCATORS.price).map(|t| t.trim().to_string())
    }

    pub fn add_to_cart(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &GOODS_SCREEN_LOCATORS.add_to_cart_button)
    }

    pub fn remove_from_cart(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &GOODS_SCREEN_LOCATORS.remove_button)
    }

    pub fn back_to_products(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &GOODS_SCREEN_LOCATORS.back_button)
    }
}

impl Screen for GoodsScreen {
    fn name(&self) -> &'static str {
        "Goods"
    }

    fn driver(&self) -> &DriverHandle {
        &self.driver
    }

    fn locators(&self) -> &'static dyn LocatorTable {
        &GOODS_SCREEN_LOCATORS
    }

    fn anchor(&self) -> &'static Locator {
        &GOODS_SCREEN_LOCATORS.screen
    }
}
