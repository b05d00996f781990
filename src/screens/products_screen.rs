use crate::driver::driver_model::DriverHandle;
use crate::driver::error::DriverError;
use crate::locators::locator_model::{Locator, LocatorTable};
use crate::screens::screen_model::{Screen, is_visible, read_all_texts, read_text, tap, tap_nth};

#[derive(Debug)]
pub struct ProductsScreenLocators {
    pub screen: Locator,
    pub item: Locator,
    pub item_title: Locator,
    pub item_price: Locator,
    pub add_to_cart_button: Locator,
    pub remove_button: Locator,
    pub sort_button: Locator,
    pub cart_button: Locator,
    pub cart_badge: Locator,
}

pub static PRODUCTS_SCREEN_LOCATORS: ProductsScreenLocators = ProductsScreenLocators {
    screen: Locator::accessibility_id("test-PRODUCTS"),
    item: Locator::accessibility_id("test-Item"),
    item_title: Locator::accessibility_id("test-Item title"),
    item_price: Locator::accessibility_id("test-Price"),
    add_to_cart_button: Locator::accessibility_id("test-ADD TO CART"),
    remove_button: Locator::accessibility_id("test-REMOVE"),
    sort_button: Locator::accessibility_id("test-Modal Selector Button"),
    cart_button: Locator::accessibility_id("test-Cart"),
    cart_badge: Locator::xpath("//*[@content-desc=\"test-Cart\"]//*[@class=\"android.widget.TextView\"]"),
};

impl LocatorTable for ProductsScreenLocators {
    fn table_name(&self) -> &'static str {
        "PRODUCTS_SCREEN_LOCATORS"
    }

    fn entries(&self) -> Vec<(&'static str, &Locator)> {
        vec![
            ("screen", &self.screen),
            ("item", &self.item),
            ("item_title", &self.item_title),
            ("item_price", &self.item_price),
            ("add_to_cart_button", &self.add_to_cart_button),
            ("remove_button", &self.remove_button),
            ("sort_button", &self.sort_button),
            ("cart_button", &self.cart_button),
            ("cart_badge", &self.cart_badge),
        ]
    }
}

/// Quote `s` as an XPath string literal.
pub fn xpath_literal(s: &str) -> String {
    if !s.contains('"') {
        format!("\"{}\"", s)
    } else if !s.contains('\'') {
        format!("'{}'", s)
    } else {
        let parts: Vec<String> = s.split('"').map(|p| format!("\"{}\"", p)).collect();
        format!("concat({})", parts.join(", '\"', "))
    }
}

/// The product catalogue shown after login.
pub struct ProductsScreen {
    driver: DriverHandle,
}

impl ProductsScreen {
    pub fn new(driver: DriverHandle) -> Self {
        ProductsScreen { driver }
    }

    pub fn product_titles(&self) -> Result<Vec<String>, DriverError> {
        read_all_texts(self.driver.as_ref(), &PRODUCTS_SCREEN_LOCATORS.item_title)
    }

    pub fn product_prices(&self) -> Result<Vec<String>, DriverError> {
        read_all_texts(self.driver.as_ref(), &PRODUCTS_SCREEN_LOCATORS.item_price)
    }

    /// Tap "ADD TO CART" on the `index`-th visible product.
    pub fn add_to_cart(&self, index: usize) -> Result<(), DriverError> {
        tap_nth(self.driver.as_ref(), &PRODUCTS_SCREEN_LOCATORS.add_to_cart_button, index)
    }

    pub fn remove_from_cart(&self, index: usize) -> Result<(), DriverError> {
        tap_nth(self.driver.as_ref(), &PRODUCTS_SCREEN_LOCATORS.remove_button, index)
    }

    /// Open the detail (goods) screen of the product with this title.
    pub fn open_product(&self, title: &str) -> Result<(), DriverError> {
        let locator = Locator::xpath_owned(format!(
            "//*[@content-desc=\"test-Item title\" and @text={}]",
            xpath_literal(title)
        ));
        tap(self.driver.as_ref(), &locator)
    }

    pub fn open_sort_options(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &PRODUCTS_SCREEN_LOCATORS.sort_button)
    }

    pub fn open_cart(&self) -> Result<(), DriverError> {
        tap(self.driver.as_ref(), &PRODUCTS_SCREEN_LOCATORS.cart_button)
    }

    /// Number on the cart badge; 0 when the badge is not shown.
    pub fn cart_badge_count(&self) -> Result<u32, DriverError> {
        let badge = &PRODUCTS_SCREEN_LOCATORS.cart_badge;
        if !is_visible(self.driver.as_ref(), badge)? {
            return Ok(0);
        }
        let text = read_text(self.driver.as_ref(), badge)?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(0);
        }
        text.parse().map_err(|_| DriverError::UnexpectedResponse {
            command: "cart_badge_count".into(),
            detail: format!("badge text '{}' is not a number", text),
        })
    }
}

impl Screen for ProductsScreen {
    fn name(&self) -> &'static str {
        "Products"
    }

    fn driver(&self) -> &DriverHandle {
        &self.driver
    }

    fn locators(&self) -> &'static dyn LocatorTable {
        &PRODUCTS_SCREEN_LOCATORS
    }

    fn anchor(&self) -> &'static Locator {
        &PRODUCTS_SCREEN_LOCATORS.screen
    }
}
