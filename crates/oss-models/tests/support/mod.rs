#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io;
use std::sync::Mutex;

use oss_codec::{OperationInput, OperationOutput, Transport};
use serde::Deserialize;

/// A canned HTTP response.
#[derive(Debug, Deserialize)]
pub struct ResponseFixture {
    pub name: String,
    pub status_code: u16,
    pub status: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ResponseFixture {
    pub fn to_output(&self) -> OperationOutput {
        let mut output = OperationOutput::new(self.status_code, self.status.clone());
        for (name, value) in &self.headers {
            output = output
                .with_header(name, value)
                .unwrap_or_else(|err| panic!("fixture {} header {name}: {err}", self.name));
        }
        match &self.body {
            Some(body) => output.with_body(body.clone()),
            None => output,
        }
    }
}

pub fn load_fixture(name: &str) -> ResponseFixture {
    let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{name}.json"));
    let data = std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read fixture {name}: {err}"));
    serde_json::from_str(&data)
        .unwrap_or_else(|err| panic!("failed to parse fixture {name}: {err}"))
}

/// Answers every request with one canned response and keeps the last
/// request it saw.
pub struct MockTransport {
    response: OperationOutput,
    seen: Mutex<Option<OperationInput>>,
}

impl MockTransport {
    pub fn new(response: OperationOutput) -> Self {
        Self {
            response,
            seen: Mutex::new(None),
        }
    }

    pub fn from_fixture(name: &str) -> Self {
        Self::new(load_fixture(name).to_output())
    }

    pub fn last_input(&self) -> OperationInput {
        self.seen
            .lock()
            .expect("seen mutex should lock")
            .clone()
            .expect("transport should have been called")
    }
}

impl Transport for MockTransport {
    type Error = io::Error;

    fn execute(&self, input: OperationInput) -> Result<OperationOutput, Self::Error> {
        *self.seen.lock().expect("seen mutex should lock") = Some(input);
        Ok(self.response.clone())
    }
}

/// Fails every request without producing a response.
pub struct UnreachableTransport;

impl Transport for UnreachableTransport {
    type Error = io::Error;

    fn execute(&self, _input: OperationInput) -> Result<OperationOutput, Self::Error> {
        Err(io::Error::new(io::ErrorKind::ConnectionRefused, "endpoint unreachable"))
    }
}
