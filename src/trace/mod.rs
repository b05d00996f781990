pub mod logger;
pub mod trace;
pub mod traced_driver;
