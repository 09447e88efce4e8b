use std::fmt;
use std::fmt::Formatter;

use crate::ast::{Operator, Rule};

#[macro_export]
macro_rules! internal_error {
    () => {
        Err($crate::error::InternalError {
            file: file!(),
            line: line!()
        })
    };
}

/// Raised when an expression that passed validation still fails to reduce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalError {
    pub file: &'static str,
    pub line: u32,
}
impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "internal error originated at {}:{}", self.file, self.line)
    }
}
impl std::error::Error for InternalError {

}

/// Why a clause or query was rejected.
/// Rejected input never reaches the knowledge base
#[derive(Debug)]
pub enum ValidationError {
    Empty,
    UnrecognizedSymbol { symbol: char, position: usize },
    /// recognized by the evaluator, but not allowed in a clause
    Unsupported { symbol: char, position: usize },
    MissingImplication,
    ChainedImplication { position: usize },
    MixedConnectives { first: Operator, second: Operator, position: usize },
    NotAProposition(String),
    Malformed(pest::error::Error<Rule>),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use ValidationError::*;
        match self {
            Empty => write!(f, "nothing to read"),
            UnrecognizedSymbol { symbol, position } => {
                write!(f, "unrecognized symbol `{}` at position {}", symbol, position)
            }
            Unsupported { symbol, position } => {
                write!(f, "`{}` at position {} is not allowed in a clause", symbol, position)
            }
            MissingImplication => {
                write!(f, "a clause longer than one proposition must be a rule with exactly one implication")
            }
            ChainedImplication { position } => {
                write!(f, "unexpected second implication at position {}; a rule concludes exactly one proposition", position)
            }
            MixedConnectives { first, second, position } => {
                write!(f, "unexpected {} after {} at position {}; a rule body must not mix connectives", second, first, position)
            }
            NotAProposition(text) => {
                write!(f, "`{}` is not a single proposition", text)
            }
            Malformed(error) => write!(f, "{}", error),
        }
    }
}
impl std::error::Error for ValidationError {

}

impl From<pest::error::Error<Rule>> for ValidationError {
    fn from(error: pest::error::Error<Rule>) -> Self {
        ValidationError::Malformed(error)
    }
}

/// Anything that can go wrong while answering a request
#[derive(Debug)]
pub enum Error {
    Validation(ValidationError),
    Internal(InternalError),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(why) => write!(f, "{}", why),
            Error::Internal(why) => write!(f, "{}", why),
        }
    }
}
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Validation(why) => Some(why),
            Error::Internal(why) => Some(why),
        }
    }
}
impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        Error::Validation(error)
    }
}
impl From<InternalError> for Error {
    fn from(error: InternalError) -> Self {
        Error::Internal(error)
    }
}

pub type BoxedErrorTrait = Box<(dyn std::error::Error + 'static)>;
