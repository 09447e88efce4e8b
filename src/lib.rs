#[macro_use]
pub mod error;
pub mod ast;
#[macro_use]
pub mod prover;
pub mod shell;

extern crate pretty_env_logger;
#[macro_use] extern crate log;

pub use ast::{evaluate, parse_expression, to_postfix, validate_clause, validate_query};
pub use ast::{Expression, Operator, Proposition, Token, Valuation};
pub use error::{Error, InternalError, ValidationError};
pub use prover::{Body, Clause, KnowledgeBase, KnowledgeStats};
