use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use crate::driver::driver_model::{AutomationDriver, DriverCommand, ElementRef};
use crate::driver::error::DriverError;
use crate::locators::locator_model::Locator;

// ============================================================================
// RecordingDriver: scripted, in-memory (for testing without a device)
// ============================================================================

/// In-memory driver that records every command it receives.
///
/// Elements are keyed by locator value. By default every locator resolves to
/// a single displayed element with empty text; `with_texts` scripts how many
/// elements a locator yields and what each one reads, `with_missing` and
/// `with_hidden` script absence and visibility.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    state: Mutex<RecordingState>,
}

#[derive(Debug, Default)]
struct RecordingState {
    commands: Vec<DriverCommand>,
    texts: HashMap<String, Vec<String>>,
    missing: HashSet<String>,
    hidden: HashSet<String>,
    quit: bool,
    fail_quit: bool,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the elements matched by `locator_value`, one per text.
    pub fn with_texts<I, S>(self, locator_value: &str, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock()
            .texts
            .insert(locator_value.to_string(), texts.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_text(self, locator_value: &str, text: &str) -> Self {
        self.with_texts(locator_value, [text])
    }

    pub fn with_missing(self, locator_value: &str) -> Self {
        self.lock().missing.insert(locator_value.to_string());
        self
    }

    pub fn with_hidden(self, locator_value: &str) -> Self {
        self.lock().hidden.insert(locator_value.to_string());
        self
    }

    /// Make `quit` close the session but report an error, like a failed DELETE.
    pub fn with_failing_quit(self) -> Self {
        self.lock().fail_quit = true;
        self
    }

    /// Remove a locator from the missing set (e.g. after a screen transition).
    pub fn reveal(&self, locator_value: &str) {
        self.lock().missing.remove(locator_value);
    }

    pub fn commands(&self) -> Vec<DriverCommand> {
        self.lock().commands.clone()
    }

    /// Locator values of every clicked element, in order.
    pub fn clicked(&self) -> Vec<String> {
        self.lock()
            .commands
            .iter()
            .filter_map(|c| match c {
                DriverCommand::Click { element } => Some(locator_of(element).to_string()),
                _ => None,
            })
            .collect()
    }

    /// (locator value, text) for every send_keys, in order.
    pub fn typed(&self) -> Vec<(String, String)> {
        self.lock()
            .commands
            .iter()
            .filter_map(|c| match c {
                DriverCommand::SendKeys { element, text } => {
                    Some((locator_of(element).to_string(), text.clone()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn is_quit(&self) -> bool {
        self.lock().quit
    }

    fn lock(&self) -> MutexGuard<'_, RecordingState> {
        // A panic inside a test must not hide the commands recorded so far.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record a command that needs nothing back from the state.
    fn push(&self, command: DriverCommand) -> Result<(), DriverError> {
        self.record(command).map(drop)
    }

    fn record(&self, command: DriverCommand) -> Result<MutexGuard<'_, RecordingState>, DriverError> {
        let mut state = self.lock();
        if state.quit {
            return Err(DriverError::SessionClosed);
        }
        state.commands.push(command);
        Ok(state)
    }
}

/// Element ids are `<locator value>#<index>`.
fn element_id(locator_value: &str, index: usize) -> ElementRef {
    ElementRef::new(format!("{}#{}", locator_value, index))
}

fn locator_of(element: &str) -> &str {
    element.rsplit_once('#').map(|(l, _)| l).unwrap_or(element)
}

fn index_of(element: &str) -> usize {
    element
        .rsplit_once('#')
        .and_then(|(_, i)| i.parse().ok())
        .unwrap_or(0)
}

impl RecordingState {
    fn count(&self, locator_value: &str) -> usize {
        if self.missing.contains(locator_value) {
            0
        } else {
            self.texts.get(locator_value).map(Vec::len).unwrap_or(1)
        }
    }
}

impl AutomationDriver for RecordingDriver {
    fn find_element(&self, locator: &Locator) -> Result<ElementRef, DriverError> {
        let state = self.record(DriverCommand::FindElement {
            locator: locator.to_string(),
        })?;
        if state.count(&locator.value) == 0 {
            return Err(DriverError::not_found(locator));
        }
        Ok(element_id(&locator.value, 0))
    }

    fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        let state = self.record(DriverCommand::FindElements {
            locator: locator.to_string(),
        })?;
        let count = state.count(&locator.value);
        Ok((0..count).map(|i| element_id(&locator.value, i)).collect())
    }

    fn click(&self, element: &ElementRef) -> Result<(), DriverError> {
        self.push(DriverCommand::Click {
            element: element.to_string(),
        })
    }

    fn send_keys(&self, element: &ElementRef, text: &str) -> Result<(), DriverError> {
        self.push(DriverCommand::SendKeys {
            element: element.to_string(),
            text: text.to_string(),
        })
    }

    fn clear(&self, element: &ElementRef) -> Result<(), DriverError> {
        self.push(DriverCommand::Clear {
            element: element.to_string(),
        })
    }

    fn text(&self, element: &ElementRef) -> Result<String, DriverError> {
        let state = self.record(DriverCommand::Text {
            element: element.to_string(),
        })?;
        let id = element.as_str();
        let text = state
            .texts
            .get(locator_of(id))
            .and_then(|texts| texts.get(index_of(id)))
            .cloned()
            .unwrap_or_default();
        Ok(text)
    }

    fn is_displayed(&self, element: &ElementRef) -> Result<bool, DriverError> {
        let state = self.record(DriverCommand::IsDisplayed {
            element: element.to_string(),
        })?;
        Ok(!state.hidden.contains(locator_of(element.as_str())))
    }

    fn back(&self) -> Result<(), DriverError> {
        self.push(DriverCommand::Back)
    }

    fn quit(&self) -> Result<(), DriverError> {
        let mut state = self.lock();
        if state.quit {
            return Ok(());
        }
        state.commands.push(DriverCommand::Quit);
        state.quit = true;
        if state.fail_quit {
            return Err(DriverError::UnexpectedResponse {
                command: "quit".into(),
                detail: "session could not be deleted".into(),
            });
        }
        Ok(())
    }
}
