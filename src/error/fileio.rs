use std::fmt;

use super::CrumbError;

#[derive(Debug, Clone, PartialEq)]
pub enum FileIOError {
    ExternalError(String, String),
}

impl From<std::io::Error> for FileIOError {
    fn from(e: std::io::Error) -> Self {
        FileIOError::ExternalError("io::Error".into(), e.to_string())
    }
}

impl fmt::Display for FileIOError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self, f)
    }
}

impl CrumbError for FileIOError {}

pub type FileIOResult<O = ()> = Result<O, FileIOError>;
