//! The `{error, result}` wrapper around every API response.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Error descriptor returned when the API is used incorrectly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl ResponseError {
    /// `{code: 0, message: ""}` is how the API spells "no error".
    pub fn is_populated(&self) -> bool {
        self.code != 0 || !self.message.is_empty()
    }
}

/// Wire-level response.
///
/// `error` may be absent or `null`. `result` must be present but may hold
/// any JSON value, `null` included.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub error: Option<ResponseError>,
    pub result: Value,
}

impl Envelope {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// The populated error descriptor, if any.
    pub fn api_error(&self) -> Option<&ResponseError> {
        self.error.as_ref().filter(|e| e.is_populated())
    }

    /// Take the result, failing if the API reported an error.
    pub fn into_result(self) -> Result<Value> {
        match self.error {
            Some(err) if err.is_populated() => Err(Error::Api {
                code: err.code,
                message: err.message,
            }),
            _ => Ok(self.result),
        }
    }
}
