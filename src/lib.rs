//! Page-object fixtures for the mobile shop app.
//!
//! Build a [`FixtureRegistry`] from a driver handle (or use
//! [`shared_registry`] for one process-wide instance) and reach every screen
//! and locator table from a single import.

pub mod cli;
pub mod driver;
pub mod fixtures;
pub mod locators;
pub mod screens;
pub mod trace;

pub use crate::{
    driver::driver_model::{AutomationDriver, DriverHandle},
    driver::error::DriverError,
    fixtures::{
        registry::{ERROR_LOCATORS, FIXTURE_NAMES, Fixture, FixtureRegistry},
        shared::{close_shared_registry, installed_registry, shared_registry, try_shared_registry},
    },
    locators::locator_model::{Locator, LocatorTable, Strategy},
    screens::{
        cart_screen::{CART_SCREEN_LOCATORS, CartScreen},
        goods_screen::{GOODS_SCREEN_LOCATORS, GoodsScreen},
        login_screen::{LOGIN_SCREEN_LOCATORS, LoginScreen},
        menu_screen::{MENU_SCREEN_LOCATORS, MenuScreen},
        products_screen::{PRODUCTS_SCREEN_LOCATORS, ProductsScreen},
        screen_model::Screen,
    },
};
