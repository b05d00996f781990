use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::driver::driver_model::{AutomationDriver, DriverCommand, ElementRef};
use crate::driver::error::DriverError;
use crate::locators::locator_model::Locator;
use crate::trace::logger::TraceLogger;

/// Wraps a driver and logs every command it forwards.
pub struct TracedDriver<D> {
    inner: D,
    logger: TraceLogger,
    step: AtomicU64,
}

impl<D: AutomationDriver> TracedDriver<D> {
    pub fn new(inner: D, logger: TraceLogger) -> Self {
        Self {
            inner,
            logger,
            step: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    fn traced<T>(
        &self,
        command: DriverCommand,
        run: impl FnOnce(&D) -> Result<T, DriverError>,
    ) -> Result<T, DriverError> {
        let step = self.step.fetch_add(1, Ordering::SeqCst);
        debug!(step, command = command.name(), addressed = command.target(), "driver command");

        let result = run(&self.inner);
        self.logger.record(step, &command, result.as_ref().err());
        result
    }
}

impl<D: AutomationDriver> AutomationDriver for TracedDriver<D> {
    fn find_element(&self, locator: &Locator) -> Result<ElementRef, DriverError> {
        let command = DriverCommand::FindElement {
            locator: locator.to_string(),
        };
        self.traced(command, |d| d.find_element(locator))
    }

    fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        let command = DriverCommand::FindElements {
            locator: locator.to_string(),
        };
        self.traced(command, |d| d.find_elements(locator))
    }

    fn click(&self, element: &ElementRef) -> Result<(), DriverError> {
        let command = DriverCommand::Click {
            element: element.to_string(),
        };
        self.traced(command, |d| d.click(element))
    }

    fn send_keys(&self, element: &ElementRef, text: &str) -> Result<(), DriverError> {
        let command = DriverCommand::SendKeys {
            element: element.to_string(),
            text: text.to_string(),
        };
        self.traced(command, |d| d.send_keys(element, text))
    }

    fn clear(&self, element: &ElementRef) -> Result<(), DriverError> {
        let command = DriverCommand::Clear {
            element: element.to_string(),
        };
        self.traced(command, |d| d.clear(element))
    }

    fn text(&self, element: &ElementRef) -> Result<String, DriverError> {
        let command = DriverCommand::Text {
            element: element.to_string(),
        };
        self.traced(command, |d| d.text(element))
    }

    fn is_displayed(&self, element: &ElementRef) -> Result<bool, DriverError> {
        let command = DriverCommand::IsDisplayed {
            element: element.to_string(),
        };
        self.traced(command, |d| d.is_displayed(element))
    }

    fn back(&self) -> Result<(), DriverError> {
        self.traced(DriverCommand::Back, |d| d.back())
    }

    fn quit(&self) -> Result<(), DriverError> {
        self.traced(DriverCommand::Quit, |d| d.quit())
    }
}
