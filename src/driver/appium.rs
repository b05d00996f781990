use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::driver::driver_model::{AutomationDriver, ElementRef};
use crate::driver::error::DriverError;
use crate::locators::locator_model::Locator;

/// W3C element identifier key in find-element responses.
pub const W3C_ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Pre-W3C (JSONWire) element key, still sent by some Appium drivers.
pub const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

/// Everything needed to open a session against an Appium server.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Server base URL, e.g. `http://127.0.0.1:4723`
    pub endpoint: String,

    /// Per-request HTTP timeout
    pub timeout_ms: u64,

    /// W3C `alwaysMatch` capabilities
    pub capabilities: Value,
}

/// Request body sent to the Appium server (JSON).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WireRequest {
    NewSession {
        capabilities: Value,
    },
    FindElement {
        using: &'static str,
        value: String,
    },
    SendKeys {
        text: String,
    },
    Empty {},
}

impl WireRequest {
    pub fn new_session(always_match: &Value) -> Self {
        WireRequest::NewSession {
            capabilities: serde_json::json!({
                "alwaysMatch": always_match,
                "firstMatch": [{}],
            }),
        }
    }

    pub fn find(locator: &Locator) -> Self {
        WireRequest::FindElement {
            using: locator.strategy.as_w3c(),
            value: locator.value.to_string(),
        }
    }

    pub fn send_keys(text: &str) -> Self {
        WireRequest::SendKeys {
            text: text.to_string(),
        }
    }

    pub fn empty() -> Self {
        WireRequest::Empty {}
    }
}

/// Every W3C response wraps its payload in `value`.
#[derive(Debug, Deserialize)]
pub struct WireResponse {
    #[serde(default)]
    pub value: Value,
}

/// Parse a raw HTTP response into its `value` payload, mapping W3C error
/// bodies to `DriverError::WebDriver`.
pub fn parse_wire_response(command: &str, status: u16, body: &str) -> Result<Value, DriverError> {
    let response: WireResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) if status >= 400 => {
            return Err(DriverError::WebDriver {
                command: command.into(),
                error: format!("http {}", status),
                message: format!("{} ({})", body.trim(), e),
            });
        }
        Err(e) => {
            return Err(DriverError::JsonParse {
                context: format!("{} response", command),
                source: e,
            });
        }
    };

    if let Some(error) = response.value.get("error").and_then(Value::as_str) {
        let message = response.value["message"].as_str().unwrap_or("").to_string();
        return Err(DriverError::WebDriver {
            command: command.into(),
            error: error.to_string(),
            message,
        });
    }

    if status >= 400 {
        return Err(DriverError::WebDriver {
            command: command.into(),
            error: format!("http {}", status),
            message: body.trim().to_string(),
        });
    }

    Ok(response.value)
}

/// Read an element id out of a find-element payload.
pub fn element_ref_from_value(command: &str, value: &Value) -> Result<ElementRef, DriverError> {
    value
        .get(W3C_ELEMENT_KEY)
        .or_else(|| value.get(LEGACY_ELEMENT_KEY))
        .and_then(Value::as_str)
        .map(ElementRef::new)
        .ok_or_else(|| DriverError::UnexpectedResponse {
            command: command.into(),
            detail: format!("no element id in {}", value),
        })
}

/// `value` of a text reply; anything but a string is a protocol error.
pub fn string_from_value(command: &str, value: &Value) -> Result<String, DriverError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DriverError::UnexpectedResponse {
            command: command.into(),
            detail: format!("expected a string, got {}", value),
        })
}

/// `value` of a boolean reply, e.g. `/displayed`.
pub fn bool_from_value(command: &str, value: &Value) -> Result<bool, DriverError> {
    value.as_bool().ok_or_else(|| DriverError::UnexpectedResponse {
        command: command.into(),
        detail: format!("expected a boolean, got {}", value),
    })
}

/// Turn a W3C "no such element" into `ElementNotFound` for the given locator.
fn not_found_for(err: DriverError, locator: &Locator) -> DriverError {
    match err {
        DriverError::WebDriver { ref error, .. } if error == "no such element" => {
            DriverError::not_found(locator)
        }
        other => other,
    }
}

/// A live Appium session spoken to over the W3C WebDriver protocol.
pub struct AppiumSession {
    client: Client,
    endpoint: String,
    session_id: String,
    closed: AtomicBool,
}

impl AppiumSession {
    /// Open a new session on the server.
    pub fn start(options: &SessionOptions) -> Result<Self, DriverError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(options.timeout_ms))
            .build()
            .map_err(|e| DriverError::Http {
                command: "new_session".into(),
                source: e,
            })?;

        let endpoint = options.endpoint.trim_end_matches('/').to_string();
        let request = WireRequest::new_session(&options.capabilities);
        let value = Self::execute_raw(
            &client,
            Method::POST,
            &format!("{}/session", endpoint),
            Some(&request),
            "new_session",
        )?;

        let session_id = value["sessionId"]
            .as_str()
            .ok_or_else(|| DriverError::UnexpectedResponse {
                command: "new_session".into(),
                detail: "no sessionId in response".into(),
            })?
            .to_string();

        info!(%endpoint, %session_id, "appium session started");

        Ok(AppiumSession {
            client,
            endpoint,
            session_id,
            closed: AtomicBool::new(false),
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn execute_raw(
        client: &Client,
        method: Method,
        url: &str,
        body: Option<&WireRequest>,
        command: &str,
    ) -> Result<Value, DriverError> {
        debug!(command, %method, url, "appium request");

        let mut builder = client.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(|e| DriverError::Http {
            command: command.into(),
            source: e,
        })?;
        let status = response.status().as_u16();
        let text = response.text().map_err(|e| DriverError::Http {
            command: command.into(),
            source: e,
        })?;

        parse_wire_response(command, status, &text)
    }

    fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&WireRequest>,
        command: &str,
    ) -> Result<Value, DriverError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DriverError::SessionClosed);
        }
        let url = format!("{}/session/{}{}", self.endpoint, self.session_id, path);
        Self::execute_raw(&self.client, method, &url, body, command)
    }
}

impl AutomationDriver for AppiumSession {
    fn find_element(&self, locator: &Locator) -> Result<ElementRef, DriverError> {
        let value = self
            .execute(Method::POST, "/element", Some(&WireRequest::find(locator)), "find_element")
            .map_err(|e| not_found_for(e, locator))?;
        element_ref_from_value("find_element", &value)
    }

    fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        let value = self.execute(
            Method::POST,
            "/elements",
            Some(&WireRequest::find(locator)),
            "find_elements",
        )?;
        let items = value.as_array().ok_or_else(|| DriverError::UnexpectedResponse {
            command: "find_elements".into(),
            detail: "value is not an array".into(),
        })?;
        items
            .iter()
            .map(|item| element_ref_from_value("find_elements", item))
            .collect()
    }

    fn click(&self, element: &ElementRef) -> Result<(), DriverError> {
        let path = format!("/element/{}/click", element);
        self.execute(Method::POST, &path, Some(&WireRequest::empty()), "click")?;
        Ok(())
    }

    fn send_keys(&self, element: &ElementRef, text: &str) -> Result<(), DriverError> {
        let path = format!("/element/{}/value", element);
        self.execute(Method::POST, &path, Some(&WireRequest::send_keys(text)), "send_keys")?;
        Ok(())
    }

    fn clear(&self, element: &ElementRef) -> Result<(), DriverError> {
        let path = format!("/element/{}/clear", element);
        self.execute(Method::POST, &path, Some(&WireRequest::empty()), "clear")?;
        Ok(())
    }

    fn text(&self, element: &ElementRef) -> Result<String, DriverError> {
        let path = format!("/element/{}/text", element);
        let value = self.execute(Method::GET, &path, None, "text")?;
        string_from_value("text", &value)
    }

    fn is_displayed(&self, element: &ElementRef) -> Result<bool, DriverError> {
        let path = format!("/element/{}/displayed", element);
        let value = self.execute(Method::GET, &path, None, "is_displayed")?;
        bool_from_value("is_displayed", &value)
    }

    fn back(&self) -> Result<(), DriverError> {
        self.execute(Method::POST, "/back", Some(&WireRequest::empty()), "back")?;
        Ok(())
    }

    fn quit(&self) -> Result<(), DriverError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let url = format!("{}/session/{}", self.endpoint, self.session_id);
        Self::execute_raw(&self.client, Method::DELETE, &url, None, "quit")?;
        info!(session_id = %self.session_id, "appium session closed");
        Ok(())
    }
}

impl Drop for AppiumSession {
    fn drop(&mut self) {
        if let Err(e) = self.quit() {
            warn!(error = %e, "failed to close appium session");
        }
    }
}
