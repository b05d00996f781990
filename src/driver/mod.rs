pub mod appium;
pub mod driver_model;
pub mod error;
pub mod recording;
