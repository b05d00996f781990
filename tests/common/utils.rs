use std::sync::Arc;

use mobile_fixtures::{DriverHandle, FixtureRegistry, driver::recording::RecordingDriver};

/// Registry over a recording driver, plus the concrete driver for inspection.
pub fn recording_registry(driver: RecordingDriver) -> (Arc<RecordingDriver>, FixtureRegistry) {
    let driver = Arc::new(driver);
    let handle: DriverHandle = driver.clone();
    (driver, FixtureRegistry::new(handle))
}

pub fn recording_handle() -> DriverHandle {
    Arc::new(RecordingDriver::new())
}
