use std::error::Error;
use std::fmt;

use crate::bits::DecodeError;
use crate::save::SaveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    Io,
    Decode,
    InvalidInput,
    UnsupportedOperation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for CoreError {}

impl From<SaveError> for CoreError {
    fn from(err: SaveError) -> Self {
        Self::new(CoreErrorCode::InvalidInput, err.to_string())
    }
}

impl From<DecodeError> for CoreError {
    fn from(err: DecodeError) -> Self {
        Self::new(CoreErrorCode::Decode, err.to_string())
    }
}
