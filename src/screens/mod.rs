pub mod cart_screen;
pub mod goods_screen;
pub mod login_screen;
pub mod menu_screen;
pub mod products_screen;
pub mod screen_model;
