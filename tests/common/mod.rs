use psn_feed::{Method, Params, PsnClient, PsnError, Transport};
use serde_json::{json, Value};
use std::cell::RefCell;

#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub url: String,
    pub params: Params,
}

/// Records every request and answers with a canned response.
pub struct RecordingTransport {
    calls: RefCell<Vec<Call>>,
    response: Result<Value, (u16, String)>,
}

impl RecordingTransport {
    pub fn ok() -> Self {
        RecordingTransport {
            calls: RefCell::new(Vec::new()),
            response: Ok(json!({ "ok": true })),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        RecordingTransport {
            calls: RefCell::new(Vec::new()),
            response: Err((status, body.to_string())),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn only_call(&self) -> Call {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one request, got {:?}", calls);
        calls[0].clone()
    }
}

impl Transport for RecordingTransport {
    fn request(&self, method: Method, url: &str, params: Params) -> Result<Value, PsnError> {
        self.calls.borrow_mut().push(Call {
            method,
            url: url.to_string(),
            params,
        });
        match &self.response {
            Ok(value) => Ok(value.clone()),
            Err((status, body)) => Err(PsnError::ApiError {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

pub fn client() -> PsnClient<RecordingTransport> {
    PsnClient::new(RecordingTransport::ok())
}

/// Macros still present in a URL, e.g. `["region", "psn"]`.
pub fn remaining_macros(url: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = url;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                found.push(after[..end].to_string());
                rest = &after[end + 2..];
            }
            None => break,
        }
    }
    found
}
