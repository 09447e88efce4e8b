use std::collections::{BTreeMap, HashMap};
use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::ast::{Associativity, Proposition, Token};
use crate::error::InternalError;

/// An assignment of truth values to propositions.
/// Anything unassigned is false
pub trait Valuation {
    fn lookup(&self, proposition: Proposition) -> Option<bool>;

    fn truth(&self, proposition: Proposition) -> bool {
        self.lookup(proposition).unwrap_or(false)
    }
}

impl Valuation for HashMap<Proposition, bool> {
    fn lookup(&self, proposition: Proposition) -> Option<bool> {
        self.get(&proposition).copied()
    }
}
impl Valuation for BTreeMap<Proposition, bool> {
    fn lookup(&self, proposition: Proposition) -> Option<bool> {
        self.get(&proposition).copied()
    }
}
impl Valuation for IndexMap<Proposition, bool> {
    fn lookup(&self, proposition: Proposition) -> Option<bool> {
        self.get(&proposition).copied()
    }
}

/// An infix boolean expression, already checked against the grammar
#[derive(Clone, PartialEq, Eq)]
pub struct Expression {
    source: String,
    tokens: Vec<Token>,
}

impl Expression {
    /// `tokens` must be a well formed infix expression
    pub(crate) fn from_tokens(source: &str, tokens: Vec<Token>) -> Expression {
        Expression { source: source.to_string(), tokens }
    }
    pub fn source(&self) -> &str {
        self.source.as_str()
    }
    pub fn tokens(&self) -> &[Token] {
        self.tokens.as_slice()
    }
    /// Every proposition mentioned, in order of appearance, without repeats
    pub fn propositions(&self) -> impl Iterator<Item = Proposition> + '_ {
        self.tokens.iter()
            .filter_map(|token| match token {
                Token::Proposition(p) => Some(*p),
                _ => None,
            })
            .unique()
    }
    pub fn postfix(&self) -> Vec<Token> {
        to_postfix(self.tokens.as_slice())
    }
    /// Evaluate the expression under `assignment`
    pub fn evaluate<V: Valuation + ?Sized>(&self, assignment: &V) -> Result<bool, InternalError> {
        if let [Token::Proposition(p)] = self.tokens.as_slice() {
            return Ok(assignment.truth(*p));
        }
        let postfix = self.postfix();
        trace!("`{}` in postfix: {}", self.source, postfix.iter().map(|t| t.symbol()).join(" "));

        let mut stack: Vec<bool> = Vec::with_capacity(postfix.len());
        for token in postfix {
            match token {
                Token::Proposition(p) => stack.push(assignment.truth(p)),
                Token::Operator(op) => {
                    // the right operand is on top
                    let right = match stack.pop() {
                        Some(value) => value,
                        None => return internal_error!(),
                    };
                    let left = if op.arity() == 2 {
                        match stack.pop() {
                            Some(value) => value,
                            None => return internal_error!(),
                        }
                    } else {
                        false
                    };
                    stack.push(op.apply(left, right));
                }
                Token::Open | Token::Close => return internal_error!(),
            }
        }
        match stack.as_slice() {
            [value] => Ok(*value),
            _ => internal_error!(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expression({})", self.source)
    }
}

/// Reorder infix tokens into postfix order with the shunting yard algorithm.
/// Parentheses never appear in the output.
/// The input should be well formed, since nothing here checks it
pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();
    for &token in tokens {
        match token {
            Token::Proposition(_) => output.push(token),
            Token::Operator(current) => {
                while let Some(&Token::Operator(top)) = stack.last() {
                    let pops = top.precedence() > current.precedence()
                        || (top.precedence() == current.precedence()
                            && current.associativity() == Associativity::Left);
                    if !pops {
                        break;
                    }
                    stack.pop();
                    output.push(Token::Operator(top));
                }
                stack.push(token);
            }
            Token::Open => stack.push(token),
            Token::Close => {
                // unwind to the matching parenthesis, discarding it
                while let Some(top) = stack.pop() {
                    if top == Token::Open {
                        break;
                    }
                    output.push(top);
                }
            }
        }
    }
    while let Some(top) = stack.pop() {
        if top != Token::Open {
            output.push(top);
        }
    }
    output
}
