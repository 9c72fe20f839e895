use std::fmt;

use super::CrumbError;

#[derive(Debug, Clone, PartialEq)]
pub enum MachineError {
    ExternalError(String, String),
    /// Requested snapshot range is inverted or falls outside memory.
    BadRange {
        first: usize,
        last: usize,
        memory_size: usize,
    },
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self, f)
    }
}

impl CrumbError for MachineError {}

pub type MachineResult<O = ()> = Result<O, MachineError>;
