use std::fmt;

use super::CrumbError;
use crate::{Opcode, TokenKind};

#[derive(Debug, Clone, PartialEq)]
pub enum AssembleError {
    ExternalError(String, String),
    /// The mnemonic is not one of the four defined operations.
    UnsupportedOperation(String),
    /// A line starts with something other than a mnemonic.
    ExpectedMnemonic(TokenKind),
    /// A non-integer token where an operand was expected.
    StrayToken(TokenKind),
    WrongOperandCount {
        operation: Opcode,
        expected: usize,
        received: usize,
    },
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self, f)
    }
}

impl CrumbError for AssembleError {}

pub type AssembleResult<O = ()> = Result<O, AssembleError>;
