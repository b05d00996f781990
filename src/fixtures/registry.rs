use std::sync::Arc;

use tracing::debug;

use crate::driver::driver_model::DriverHandle;
use crate::locators::locator_model::LocatorTable;
use crate::screens::{
    cart_screen::{CART_SCREEN_LOCATORS, CartScreen},
    goods_screen::{GOODS_SCREEN_LOCATORS, GoodsScreen},
    login_screen::{ErrorLocators, LOGIN_SCREEN_LOCATORS, LoginScreen},
    menu_screen::{MENU_SCREEN_LOCATORS, MenuScreen},
    products_screen::{PRODUCTS_SCREEN_LOCATORS, ProductsScreen},
    screen_model::Screen,
};

/// The login error banner locators, lifted to the top level.
///
/// Points at `LOGIN_SCREEN_LOCATORS.error_locators`; it is not a copy.
pub static ERROR_LOCATORS: &ErrorLocators = &LOGIN_SCREEN_LOCATORS.error_locators;

/// Every name the registry answers to, in export order.
pub const FIXTURE_NAMES: [&str; 11] = [
    "login_screen",
    "menu_screen",
    "products_screen",
    "goods_screen",
    "cart_screen",
    "LOGIN_SCREEN_LOCATORS",
    "MENU_SCREEN_LOCATORS",
    "PRODUCTS_SCREEN_LOCATORS",
    "GOODS_SCREEN_LOCATORS",
    "CART_SCREEN_LOCATORS",
    "ERROR_LOCATORS",
];

/// A value looked up by fixture name.
#[derive(Clone, Copy)]
pub enum Fixture<'a> {
    Screen(&'a dyn Screen),
    Locators(&'static dyn LocatorTable),
}

/// One ready-to-use instance of every screen, all sharing one driver.
pub struct FixtureRegistry {
    pub login_screen: LoginScreen,
    pub menu_screen: MenuScreen,
    pub products_screen: ProductsScreen,
    pub goods_screen: GoodsScreen,
    pub cart_screen: CartScreen,
    driver: DriverHandle,
}

impl FixtureRegistry {
    /// Build all five screens. Performs no driver calls and cannot fail.
    pub fn new(driver: DriverHandle) -> Self {
        debug!("constructing fixture registry");
        FixtureRegistry {
            login_screen: LoginScreen::new(Arc::clone(&driver)),
            menu_screen: MenuScreen::new(Arc::clone(&driver)),
            products_screen: ProductsScreen::new(Arc::clone(&driver)),
            goods_screen: GoodsScreen::new(Arc::clone(&driver)),
            cart_screen: CartScreen::new(Arc::clone(&driver)),
            driver,
        }
    }

    pub fn driver(&self) -> &DriverHandle {
        &self.driver
    }

    pub fn screens(&self) -> [&dyn Screen; 5] {
        [
            &self.login_screen,
            &self.menu_screen,
            &self.products_screen,
            &self.goods_screen,
            &self.cart_screen,
        ]
    }

    /// Every exported locator table, in `FIXTURE_NAMES` order.
    pub fn locator_tables() -> [&'static dyn LocatorTable; 6] {
        [
            &LOGIN_SCREEN_LOCATORS,
            &MENU_SCREEN_LOCATORS,
            &PRODUCTS_SCREEN_LOCATORS,
            &GOODS_SCREEN_LOCATORS,
            &CART_SCREEN_LOCATORS,
            ERROR_LOCATORS,
        ]
    }

    pub fn get(&self, name: &str) -> Option<Fixture<'_>> {
        let fixture = match name {
            "login_screen" => Fixture::Screen(&self.login_screen),
            "menu_screen" => Fixture::Screen(&self.menu_screen),
            "products_screen" => Fixture::Screen(&self.products_screen),
            "goods_screen" => Fixture::Screen(&self.goods_screen),
            "cart_screen" => Fixture::Screen(&self.cart_screen),
            _ => Fixture::Locators(
                Self::locator_tables()
                    .into_iter()
                    .find(|t| t.table_name() == name)?,
            ),
        };
        Some(fixture)
    }
}
