//! Response type filled in by the dispatcher.

use std::collections::HashMap;

use serde_json::Value;

const HTML: &str = "text/html; charset=UTF-8";
const JSON: &str = "application/json; charset=UTF-8";

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Creates a new response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a 200 OK response.
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Sets the status code.
    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Sets a header in place.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(key.into(), value.into());
    }

    /// Writes a handler's return value.
    ///
    /// Arrays and objects are encoded as JSON; scalars are written as HTML
    /// text. `null` produces an empty HTML body.
    pub fn write_body(&mut self, content: &Value) {
        let (content_type, body) = match content {
            Value::Array(_) | Value::Object(_) => (JSON, content.to_string()),
            Value::String(s) => (HTML, s.clone()),
            Value::Null | Value::Bool(false) => (HTML, String::new()),
            Value::Bool(true) => (HTML, "1".to_string()),
            Value::Number(n) => (HTML, n.to_string()),
        };
        self.set_header("Content-Type", content_type);
        self.body = body.into_bytes();
    }

    /// Points the client at another URL. The status is left to the caller.
    pub fn redirect(&mut self, url: impl Into<String>) {
        self.set_header("Location", url);
        self.body.clear();
    }

    /// Turns the response into an error page.
    pub fn error(&mut self, status: u16, message: impl Into<String>) {
        self.status = status;
        self.set_header("Content-Type", HTML);
        self.body = message.into().into_bytes();
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(key, value);
        self
    }

    /// Gets a header value.
    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Returns the status text for the current status code.
    pub fn status_text(&self) -> &'static str {
        match self.status {
            200 => "OK",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            404 => "Not Found",
            500 => "Internal Server Error",
            _ => "Unknown",
        }
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}
