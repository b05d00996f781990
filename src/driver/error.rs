use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    /// HTTP transport to the Appium server failed
    #[error("HTTP error during {command}: {source}")]
    Http {
        command: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a W3C error body
    #[error("{command} failed ({error}): {message}")]
    WebDriver {
        command: String,
        error: String,
        message: String,
    },

    /// No element matched the locator (or the index was out of range)
    #[error("Element not found: {locator}")]
    ElementNotFound { locator: String },

    /// JSON parsing failed (server response or serde)
    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Response parsed but did not have the expected shape
    #[error("Unexpected response to {command}: {detail}")]
    UnexpectedResponse { command: String, detail: String },

    /// Command issued after quit()
    #[error("Session already closed")]
    SessionClosed,
}

impl DriverError {
    pub fn not_found(locator: impl ToString) -> Self {
        DriverError::ElementNotFound {
            locator: locator.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DriverError::ElementNotFound { .. })
    }
}
