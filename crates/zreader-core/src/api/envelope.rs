use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::{codes, ApiError};

/// Uniform response shape for every backend reply.
///
/// `data` is only meaningful when `code` is `codes::SUCCESS`; failure
/// replies usually carry `null` or omit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: String,
    #[serde(rename = "msg", alias = "message", default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == codes::SUCCESS
    }

    pub fn is_session_expired(&self) -> bool {
        self.code == codes::SESSION_EXPIRED
    }

    /// Success yields the (possibly absent) payload; any other code becomes
    /// `ApiError::Business`.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::Business {
                code: self.code,
                message: self.message,
            })
        }
    }

    /// Like `into_result`, but a success without payload is an error.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.into_result()?
            .ok_or_else(|| ApiError::InvalidResponse("success envelope without data".to_string()))
    }
}

impl Envelope<Value> {
    /// Convert the untyped payload into `T`.
    ///
    /// A success payload that does not match `T` is an invalid response.
    /// Failure payloads are advisory and are dropped when they do not match.
    pub(crate) fn decode<T: DeserializeOwned>(self) -> Result<Envelope<T>, ApiError> {
        let success = self.is_success();
        let data = match self.data {
            None => None,
            Some(value) => match serde_json::from_value::<T>(value) {
                Ok(data) => Some(data),
                Err(e) if success => {
                    return Err(ApiError::InvalidResponse(format!(
                        "payload for code {} did not match expected shape: {}",
                        self.code, e
                    )))
                }
                Err(_) => None,
            },
        };
        Ok(Envelope {
            code: self.code,
            message: self.message,
            data,
        })
    }
}
