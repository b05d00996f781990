use std::sync::OnceLock;

use tracing::info;

use crate::driver::driver_model::DriverHandle;
use crate::driver::error::DriverError;
use crate::fixtures::registry::FixtureRegistry;

/// Never dropped: statics outlive `main`, so a driver's own cleanup on drop
/// does not run for the shared registry. Call `close_shared_registry`
/// before exit to end the session.
static SHARED: OnceLock<FixtureRegistry> = OnceLock::new();

/// Process-wide registry. The first call builds it from `connect`; every
/// later call returns the same instance and never invokes `connect`.
pub fn shared_registry<F>(connect: F) -> &'static FixtureRegistry
where
    F: FnOnce() -> DriverHandle,
{
    SHARED.get_or_init(|| {
        info!("initializing shared fixture registry");
        FixtureRegistry::new(connect())
    })
}

/// Like `shared_registry`, for drivers whose connection can fail.
///
/// If two threads race on the first call, both may connect; only one
/// driver ends up in the registry and the other is dropped.
pub fn try_shared_registry<F>(connect: F) -> Result<&'static FixtureRegistry, DriverError>
where
    F: FnOnce() -> Result<DriverHandle, DriverError>,
{
    if let Some(registry) = SHARED.get() {
        return Ok(registry);
    }
    let driver = connect()?;
    Ok(shared_registry(move || driver))
}

/// The shared registry, if some caller has already built it.
pub fn installed_registry() -> Option<&'static FixtureRegistry> {
    SHARED.get()
}

/// Quit the shared registry's driver. Returns `false` when no registry was
/// built. Screens in the registry fail with `SessionClosed` afterwards.
pub fn close_shared_registry() -> Result<bool, DriverError> {
    let Some(registry) = SHARED.get() else {
        return Ok(false);
    };
    registry.driver().quit()?;
    info!("shared fixture registry driver closed");
    Ok(true)
}
